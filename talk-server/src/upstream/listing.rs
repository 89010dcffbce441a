//! Listing document parser.
//!
//! Turns an HTML results page (the search page or a teacher's page — both
//! share the same block structure) into an ordered list of talk summaries
//! plus a "more pages exist" flag. Pure; no I/O.
//!
//! The upstream markup is uncontrolled, so every field is extracted
//! independently and tolerates absence: a missing token becomes an empty
//! string or zero, never an error. Only the id+title anchor is mandatory —
//! a block without it is not a talk block (typically leading boilerplate)
//! and is skipped.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{TalkPage, TalkSummary};

use super::text::{decode_entities, parse_duration_minutes};

/// Each talk sits in its own fixed-width table; this is the block delimiter.
const BLOCK_DELIMITER: &str = "<table width='100%'>";

/// "Next page exists" marker. The site exposes no total counts, so
/// pagination is a pure content test.
const NEXT_MARKER: &str = "class=\"next\">next";

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a\s+class="talkteacher"\s+href="/talks/(\d+)"\s*>\s*([\s\S]*?)\s*</a>"#)
        .expect("title regex")
});

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").expect("date regex"));

static DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<i>(\d+:\d{2}(?::\d{2})?)</i>").expect("duration regex"));

static TEACHER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a\s+class='talkteacher'\s+href="/teacher/\d+">([\s\S]*?)</a>"#)
        .expect("teacher regex")
});

static AUDIO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"href="(/talks/\d+/[^"]*\.mp3)""#).expect("audio regex"));

static RETREAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"href="/retreats/(\d+)/">\s*<i>([\s\S]*?)</i>"#).expect("retreat regex")
});

/// Parse a listing page into talk summaries.
///
/// `base_url` is prepended to the relative audio path; `page` is echoed back
/// untouched (pagination is positional, driven by the caller).
pub fn parse_listing(html: &str, page: u32, base_url: &str) -> TalkPage {
    let mut talks = Vec::new();

    for block in html.split(BLOCK_DELIMITER) {
        let Some(title_caps) = TITLE_RE.captures(block) else {
            continue;
        };

        // The id is \d+ so this only fails on absurd overflow; skip then too.
        let Ok(id) = title_caps[1].parse::<u64>() else {
            continue;
        };
        let title = decode_entities(title_caps[2].trim());

        let date = DATE_RE
            .find(block)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        let duration_minutes = DURATION_RE
            .captures(block)
            .map(|c| parse_duration_minutes(&c[1]))
            .unwrap_or(0);

        let teacher = TEACHER_RE
            .captures(block)
            .map(|c| decode_entities(c[1].trim()))
            .unwrap_or_default();

        let audio_url = AUDIO_RE
            .captures(block)
            .map(|c| format!("{base_url}{}", &c[1]))
            .unwrap_or_default();

        let (retreat_id, retreat_title) = match RETREAT_RE.captures(block) {
            Some(c) => (
                c[1].parse::<u64>().ok(),
                Some(decode_entities(c[2].trim())),
            ),
            None => (None, None),
        };

        talks.push(TalkSummary {
            id,
            title,
            teacher,
            duration_minutes,
            date,
            audio_url,
            retreat_id,
            retreat_title,
        });
    }

    TalkPage {
        talks,
        page,
        has_more: html.contains(NEXT_MARKER),
    }
}
