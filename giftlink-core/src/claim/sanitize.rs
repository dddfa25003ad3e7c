// File: giftlink-core/src/claim/sanitize.rs
//
// Input scrubbers applied on every keystroke before the value lands in
// form state. Each one is idempotent, so re-sanitizing a stored value is
// harmless.

/// Letters, whitespace, apostrophes and hyphens only, capped at 40 chars.
pub fn sanitize_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace() || *c == '\'' || *c == '-')
        .take(40)
        .collect()
}

/// Word characters plus `.@+-`, capped at 60 chars.
pub fn sanitize_email(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(*c, '_' | '.' | '@' | '+' | '-'))
        .take(60)
        .collect()
}

/// Social handle: alphanumerics, dots and underscores, re-prefixed with a
/// single `@` when anything survives the scrub.
pub fn sanitize_handle(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(*c, '.' | '_'))
        .collect();
    if cleaned.is_empty() {
        String::new()
    } else {
        format!("@{cleaned}")
    }
}

/// Digits only, capped at 15.
pub fn sanitize_phone(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).take(15).collect()
}
