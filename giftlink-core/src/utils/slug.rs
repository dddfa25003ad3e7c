// File: giftlink-core/src/utils/slug.rs

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;

static NON_SLUG: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_\s-]").unwrap());
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s_-]+").unwrap());

/// Lowercase, strip punctuation, collapse separator runs to single
/// hyphens. A name with nothing usable left becomes `campaign`.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let stripped = NON_SLUG.replace_all(lowered.trim(), "");
    let dashed = SEPARATORS.replace_all(&stripped, "-");
    let trimmed = dashed.trim_matches('-');
    if trimmed.is_empty() {
        "campaign".to_string()
    } else {
        trimmed.to_string()
    }
}

const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 4;

fn suffix() -> String {
    let mut rng = rand::rng();
    (0..SUFFIX_LEN)
        .map(|_| SUFFIX_ALPHABET[rng.random_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect()
}

/// Slugified name plus a short random base36 tail. The tail keeps links
/// short while making same-name collisions unlikely; the publisher still
/// re-rolls on an actual collision.
pub fn generate_slug(name: &str) -> String {
    format!("{}-{}", slugify(name), suffix())
}
