//! Share-link construction
//!
//! Builds outbound URLs to third-party share targets by URL-encoding a
//! fixed result template. No network calls are made here; the links are
//! only printed for the player to open.

/// One share target: a label and a ready-to-open URL
#[derive(Clone, Debug)]
pub struct ShareLink {
    pub label: &'static str,
    pub url: String,
}

/// The plain-text result blurb that gets encoded into share URLs
pub fn share_text(score: u32, total_rounds: u32, final_message: &str) -> String {
    format!(
        "Real or AI? game result\nScore: {}/{}\n{}\nTry it yourself!",
        score, total_rounds, final_message
    )
}

/// Build the share URLs for a finished session.
pub fn share_links(
    score: u32,
    total_rounds: u32,
    final_message: &str,
    game_url: &str,
) -> Vec<ShareLink> {
    let text = percent_encode(&share_text(score, total_rounds, final_message));
    let url = percent_encode(game_url);

    vec![
        ShareLink {
            label: "🐦 X / Twitter",
            url: format!("https://twitter.com/intent/tweet?text={}&url={}", text, url),
        },
        ShareLink {
            label: "📘 Facebook",
            url: format!("https://www.facebook.com/sharer/sharer.php?u={}", url),
        },
    ]
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
