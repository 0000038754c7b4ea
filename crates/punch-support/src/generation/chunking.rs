//! Splitting model replies into chat bubbles

/// Split a reply on blank lines into trimmed, non-empty chunks
pub fn split_reply(reply: &str) -> Vec<String> {
    reply
        .replace("\r\n", "\n")
        .split("\n\n")
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(str::to_string)
        .collect()
}
