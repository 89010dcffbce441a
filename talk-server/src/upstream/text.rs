//! Text helpers shared by the listing and feed parsers.

/// Decode the HTML entities the upstream site actually emits.
///
/// This is deliberately small: the site uses a fixed handful of entities in
/// titles and names, and we only have to cope with those, not arbitrary
/// markup.
pub fn decode_entities(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ")
}

/// Parse a `H:MM:SS` or `MM:SS` duration token into whole minutes,
/// rounded to nearest.
///
/// Malformed tokens yield 0 rather than an error; a missing duration is not
/// worth failing a whole talk block over.
pub fn parse_duration_minutes(s: &str) -> u32 {
    let parts: Vec<Option<f64>> = s.split(':').map(|p| p.parse::<f64>().ok()).collect();

    let total = match parts.as_slice() {
        [Some(h), Some(m), Some(sec)] => h * 60.0 + m + sec / 60.0,
        [Some(m), Some(sec)] => m + sec / 60.0,
        _ => return 0,
    };

    total.round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_known_entities() {
        assert_eq!(decode_entities("Sam &amp; Lee"), "Sam & Lee");
        assert_eq!(decode_entities("&quot;A&quot;"), "\"A\"");
        assert_eq!(decode_entities("it&#39;s&nbsp;here"), "it's here");
        assert_eq!(decode_entities("it&#x27;s"), "it's");
        assert_eq!(decode_entities("&lt;b&gt;"), "<b>");
    }

    #[test]
    fn duration_three_parts() {
        assert_eq!(parse_duration_minutes("1:30:00"), 90);
        assert_eq!(parse_duration_minutes("0:45:00"), 45);
    }

    #[test]
    fn duration_two_parts_rounds_up() {
        // 48 + 43/60 = 48.72 rounds to 49
        assert_eq!(parse_duration_minutes("48:43"), 49);
    }

    #[test]
    fn duration_two_parts_rounds_down() {
        // 12 + 15/60 = 12.25 rounds to 12
        assert_eq!(parse_duration_minutes("12:15"), 12);
    }

    #[test]
    fn malformed_duration_is_zero() {
        assert_eq!(parse_duration_minutes(""), 0);
        assert_eq!(parse_duration_minutes("90"), 0);
        assert_eq!(parse_duration_minutes("a:bc"), 0);
        assert_eq!(parse_duration_minutes("1:2:3:4"), 0);
    }
}
