//! Script construction for `document.cookie` writes.

use std::fmt::Write as _;

/// Builds `document.cookie="<name>=<value>";` for one cookie entry.
///
/// Name and value arrive from an attacker-controllable URL, so both are
/// escaped as JS string-literal content instead of being interpolated
/// raw.
pub fn cookie_assignment(name: &str, value: &str) -> String {
    format!(
        "document.cookie=\"{}={}\";",
        escape_js_string(name),
        escape_js_string(value)
    )
}

fn escape_js_string(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            // Line separators terminate JS string literals just like \n.
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::cookie_assignment;
    use super::escape_js_string;

    #[test]
    fn plain_entries_pass_through() {
        assert_eq!(
            cookie_assignment("session", "abc123"),
            "document.cookie=\"session=abc123\";"
        );
    }

    #[test]
    fn quotes_and_backslashes_are_escaped() {
        assert_eq!(escape_js_string(r#"a"b"#), r#"a\"b"#);
        assert_eq!(escape_js_string(r"a\b"), r"a\\b");
    }

    #[test]
    fn control_characters_become_unicode_escapes() {
        assert_eq!(escape_js_string("a\nb"), r"a\nb");
        assert_eq!(escape_js_string("a\rb"), r"a\rb");
        assert_eq!(escape_js_string("a\u{1}b"), r"a\u0001b");
        assert_eq!(escape_js_string("a\u{2028}b"), r"a\u2028b");
    }

    #[test]
    fn breakout_attempt_stays_inside_the_literal() {
        let script = cookie_assignment("k", "\";document.location=\"https://evil.example");
        assert_eq!(
            script,
            "document.cookie=\"k=\\\";document.location=\\\"https://evil.example\";"
        );
    }

    #[test]
    fn semicolons_and_equals_are_preserved() {
        // Cookie attributes are value content here, not script syntax.
        assert_eq!(
            cookie_assignment("pref", "a=b;Path=/"),
            "document.cookie=\"pref=a=b;Path=/\";"
        );
    }
}
