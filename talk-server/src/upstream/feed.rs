//! Retreat feed parser.
//!
//! Turns a retreat RSS/XML feed into a deduplicated, ordered list of talk
//! summaries plus the retreat's display title. Pure; no I/O.
//!
//! The feed is the source of truth for retreat listings: it carries its own
//! channel title and, unlike the listing pages, is fetched in full, so the
//! result is always a single page with no continuation. The upstream feed is
//! known to repeat entries, hence the dedup-by-id invariant (first
//! occurrence wins).

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::domain::{RetreatPage, TalkPage, TalkSummary};

use super::text::parse_duration_minutes;

/// Site-branding qualifier appended to the channel title, e.g.
/// `"Weekend Retreat (Dharma Seed: Retreat talks)"`.
static TITLE_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(Dharma Seed:.*?\)\s*$").expect("title suffix regex"));

/// Talk id: a numeric path segment in the item's link.
static LINK_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/talks/(\d+)").expect("link id regex"));

/// Parse a retreat feed into a single page of talks.
pub fn parse_feed(xml: &str, retreat_id: u64) -> RetreatPage {
    let retreat_title = channel_title(xml);

    let mut seen = std::collections::HashSet::new();
    let mut talks = Vec::new();

    // Everything before the first <item> is channel metadata.
    for item in xml.split("<item>").skip(1) {
        let link = tag_text(item, "link").unwrap_or_default();
        let Some(id) = LINK_ID_RE
            .captures(link)
            .and_then(|c| c[1].parse::<u64>().ok())
        else {
            continue;
        };

        if !seen.insert(id) {
            continue;
        }

        let teacher = tag_text(item, "itunes:author").unwrap_or_default().to_string();
        let title = strip_teacher_prefix(tag_text(item, "title").unwrap_or_default(), &teacher);

        let duration_minutes = tag_text(item, "itunes:duration")
            .map(parse_duration_minutes)
            .unwrap_or(0);

        let date = tag_text(item, "pubDate").map(feed_date).unwrap_or_default();

        let audio_url = repair_audio_url(tag_attr(item, "enclosure", "url").unwrap_or_default());

        talks.push(TalkSummary {
            id,
            title,
            teacher,
            duration_minutes,
            date,
            audio_url,
            retreat_id: Some(retreat_id),
            retreat_title: retreat_title.clone(),
        });
    }

    RetreatPage {
        page: TalkPage {
            talks,
            page: 1,
            has_more: false,
        },
        retreat_title,
    }
}

/// Extract the channel's display title, minus the branding suffix.
fn channel_title(xml: &str) -> Option<String> {
    let channel = &xml[xml.find("<channel>")?..];
    let raw = tag_text(channel, "title")?;
    let stripped = TITLE_SUFFIX_RE.replace(raw, "");
    Some(stripped.trim().to_string())
}

/// Feed titles lead with `"<teacher>: "` for solo talks; strip that to get
/// the bare talk title. Co-taught talks (teacher not in the prefix) keep
/// their full title.
fn strip_teacher_prefix(title: &str, teacher: &str) -> String {
    if let Some(idx) = title.find(": ") {
        if idx > 0 && !teacher.is_empty() && title[..idx].contains(teacher) {
            return title[idx + 2..].to_string();
        }
    }
    title.to_string()
}

/// Reduce an RFC 2822 publish date to a `YYYY-MM-DD` calendar date (UTC).
/// Unparseable dates yield an empty string.
fn feed_date(pub_date: &str) -> String {
    match DateTime::parse_from_rfc2822(pub_date) {
        Ok(dt) => dt.with_timezone(&Utc).format("%Y-%m-%d").to_string(),
        Err(_) => String::new(),
    }
}

/// The feed's enclosure URLs carry a doubled slash before the path and a
/// trailing tracking parameter; repair both.
fn repair_audio_url(url: &str) -> String {
    let url = url.replacen("//talks/", "/talks/", 1);
    url.strip_suffix("?rss=").unwrap_or(&url).to_string()
}

/// Text content of the first `<tag>…</tag>` pair, trimmed.
fn tag_text<'a>(xml: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{tag}");
    let close = format!("</{tag}>");

    let start = xml.find(&open)?;
    let body_start = start + xml[start..].find('>')? + 1;
    let body_end = body_start + xml[body_start..].find(&close)?;

    Some(xml[body_start..body_end].trim())
}

/// Value of `attr="…"` inside the first `<tag …>` element.
fn tag_attr<'a>(xml: &'a str, tag: &str, attr: &str) -> Option<&'a str> {
    let open = format!("<{tag}");
    let start = xml.find(&open)?;
    let element = &xml[start..start + xml[start..].find('>')?];

    let marker = format!("{attr}=\"");
    let value_start = element.find(&marker)? + marker.len();
    let value_end = value_start + element[value_start..].find('"')?;

    Some(&element[value_start..value_end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_item(id: u64, title: &str) -> String {
        format!(
            r#"<item>
              <link>https://dharmaseed.org/talks/{id}/</link>
              <title>{title}</title>
              <itunes:author>Jane Doe</itunes:author>
              <itunes:duration>0:45:00</itunes:duration>
              <pubDate>Tue, 14 Jan 2025 12:00:00 GMT</pubDate>
              <enclosure length="123" type="audio/mpeg" url="https://dharmaseed.org//talks/{id}/file.mp3?rss=" />
            </item>"#
        )
    }

    fn feed(items: &str) -> String {
        format!(
            r#"<rss><channel>
              <title>Weekend Retreat (Dharma Seed: Retreat talks)</title>
              {items}
            </channel></rss>"#
        )
    }

    #[test]
    fn channel_title_drops_branding_suffix() {
        let xml = feed(&feed_item(900, "Jane Doe: First Talk"));
        let result = parse_feed(&xml, 77);
        assert_eq!(result.retreat_title.as_deref(), Some("Weekend Retreat"));
    }

    #[test]
    fn parses_item_fields() {
        let xml = feed(&feed_item(900, "Jane Doe: First Talk"));
        let result = parse_feed(&xml, 77);

        assert_eq!(result.page.page, 1);
        assert!(!result.page.has_more);
        assert_eq!(result.page.talks.len(), 1);

        let talk = &result.page.talks[0];
        assert_eq!(talk.id, 900);
        assert_eq!(talk.title, "First Talk");
        assert_eq!(talk.teacher, "Jane Doe");
        assert_eq!(talk.duration_minutes, 45);
        assert_eq!(talk.date, "2025-01-14");
        assert_eq!(talk.audio_url, "https://dharmaseed.org/talks/900/file.mp3");
        assert_eq!(talk.retreat_id, Some(77));
        assert_eq!(talk.retreat_title.as_deref(), Some("Weekend Retreat"));
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let items = format!(
            "{}{}",
            feed_item(900, "Jane Doe: First Talk"),
            feed_item(900, "Jane Doe: Duplicate Talk")
        );
        let result = parse_feed(&feed(&items), 77);

        assert_eq!(result.page.talks.len(), 1);
        assert_eq!(result.page.talks[0].title, "First Talk");
    }

    #[test]
    fn co_taught_title_is_left_intact() {
        // The pre-colon text doesn't contain the itunes:author, so nothing
        // is stripped.
        let item = r#"<item>
          <link>https://dharmaseed.org/talks/5/</link>
          <title>Alice, Bob: Joint Session</title>
          <itunes:author>Carol</itunes:author>
        </item>"#;
        let result = parse_feed(&feed(item), 1);
        assert_eq!(result.page.talks[0].title, "Alice, Bob: Joint Session");
    }

    #[test]
    fn multi_teacher_prefix_is_stripped_when_author_matches() {
        let item = r#"<item>
          <link>https://dharmaseed.org/talks/6/</link>
          <title>Alice, Bob: Joint Session</title>
          <itunes:author>Alice</itunes:author>
        </item>"#;
        let result = parse_feed(&feed(item), 1);
        assert_eq!(result.page.talks[0].title, "Joint Session");
    }

    #[test]
    fn item_without_talk_link_is_discarded() {
        let item = r#"<item>
          <link>https://dharmaseed.org/about/</link>
          <title>Not a talk</title>
        </item>"#;
        let result = parse_feed(&feed(item), 1);
        assert!(result.page.talks.is_empty());
    }

    #[test]
    fn unparseable_pub_date_yields_empty_date() {
        let item = r#"<item>
          <link>https://dharmaseed.org/talks/8/</link>
          <title>T</title>
          <pubDate>sometime last week</pubDate>
        </item>"#;
        let result = parse_feed(&feed(item), 1);
        assert_eq!(result.page.talks[0].date, "");
    }

    #[test]
    fn offset_pub_date_reduces_to_utc_calendar_date() {
        // 23:30 -0500 is 04:30 UTC the next day.
        let item = r#"<item>
          <link>https://dharmaseed.org/talks/9/</link>
          <title>T</title>
          <pubDate>Sat, 20 Nov 2021 23:30:00 -0500</pubDate>
        </item>"#;
        let result = parse_feed(&feed(item), 1);
        assert_eq!(result.page.talks[0].date, "2021-11-21");
    }

    #[test]
    fn missing_channel_yields_no_title() {
        let result = parse_feed("<rss></rss>", 4);
        assert_eq!(result.retreat_title, None);
        assert!(result.page.talks.is_empty());
    }
}
