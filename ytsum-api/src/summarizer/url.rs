//! Syntactic YouTube link check
//!
//! No network lookup or redirect resolution. Accepts
//! `[http://|https://][www.]youtube.com/<something>` and
//! `[http://|https://][www.]youtu.be/<something>`, ASCII case-insensitive.
//! Mobile (`m.youtube.com`) and other variants are rejected.

/// Link prefixes accepted after the optional scheme and `www.`
const ACCEPTED_PREFIXES: [&str; 2] = ["youtube.com/", "youtu.be/"];

/// Whether `candidate` looks like a YouTube video link
pub fn is_supported_video_url(candidate: &str) -> bool {
    let lower = candidate.trim().to_ascii_lowercase();

    let rest = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
        .unwrap_or(&lower);
    let rest = rest.strip_prefix("www.").unwrap_or(rest);

    ACCEPTED_PREFIXES
        .iter()
        .any(|prefix| rest.strip_prefix(prefix).is_some_and(|tail| !tail.is_empty()))
}
