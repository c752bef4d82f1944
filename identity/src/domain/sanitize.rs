//! Identifier sanitization applied before salting and storage.
//!
//! Caller-supplied identifiers are opaque, but control characters,
//! markup-significant characters, and unbounded length are stripped before a
//! value reaches hashing or the store. This mirrors the ingestion path's
//! treatment of anonymous ids and session ids.

/// Maximum length for general string fields.
pub const STRING_MAX_LENGTH: usize = 2048;

/// Maximum length for short identifier fields such as anonymous ids.
pub const SHORT_STRING_MAX_LENGTH: usize = 255;

/// Maximum length for session identifiers.
pub const SESSION_ID_MAX_LENGTH: usize = 128;

/// Control characters removed outright (whitespace controls like tab and
/// newline survive to be collapsed instead).
fn is_stripped_control(c: char) -> bool {
    let code = c as u32;
    code <= 0x08 || code == 0x0B || code == 0x0C || (0x0E..=0x1F).contains(&code) || code == 0x7F
}

fn is_markup_significant(c: char) -> bool {
    matches!(c, '<' | '>' | '\'' | '"' | '&')
}

/// Sanitize a caller-supplied string.
///
/// Trims, caps at `max_len` characters, drops control and
/// markup-significant characters, and collapses whitespace runs to single
/// spaces. The result may be empty when nothing survives.
pub fn sanitize_string(input: &str, max_len: usize) -> String {
    let mut out = String::with_capacity(input.len().min(max_len));
    let mut pending_space = false;
    for c in input.trim().chars().take(max_len) {
        if is_stripped_control(c) || is_markup_significant(c) {
            continue;
        }
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }
    out
}

/// Validate a session identifier.
///
/// Sanitizes to at most [`SESSION_ID_MAX_LENGTH`] characters, then requires
/// the result to be non-empty and drawn from `[A-Za-z0-9_-]`. Returns `None`
/// for anything else.
pub fn validate_session_id(input: &str) -> Option<String> {
    let sanitized = sanitize_string(input, SESSION_ID_MAX_LENGTH);
    if sanitized.is_empty() {
        return None;
    }
    sanitized
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        .then_some(sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("  anon_12345  ", "anon_12345")]
    #[case("a\u{0}b\u{7f}c", "abc")]
    #[case("<script>alert('x')</script>", "scriptalert(x)/script")]
    #[case("a   b\t\nc", "a b c")]
    #[case("", "")]
    fn sanitization_strips_and_collapses(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_string(input, SHORT_STRING_MAX_LENGTH), expected);
    }

    #[test]
    fn sanitization_truncates_to_the_character_cap() {
        let input = "x".repeat(300);
        assert_eq!(sanitize_string(&input, SHORT_STRING_MAX_LENGTH).len(), 255);
    }

    #[test]
    fn sanitization_keeps_whitespace_controls_as_spaces() {
        // Tab and newline are whitespace, not stripped controls, so a run of
        // them collapses rather than vanishing.
        assert_eq!(sanitize_string("a\t\t\nb", STRING_MAX_LENGTH), "a b");
    }

    #[rstest]
    #[case("sess_12345")]
    #[case("AbC-9_z")]
    fn valid_session_ids_pass(#[case] input: &str) {
        assert_eq!(validate_session_id(input).as_deref(), Some(input));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("sess 12345")]
    #[case("sess.12345")]
    fn invalid_session_ids_are_rejected(#[case] input: &str) {
        assert_eq!(validate_session_id(input), None);
    }

    #[test]
    fn overlong_session_ids_are_capped_before_validation() {
        let input = "a".repeat(200);
        let validated = validate_session_id(&input).expect("alphabet is valid");
        assert_eq!(validated.len(), SESSION_ID_MAX_LENGTH);
    }
}
