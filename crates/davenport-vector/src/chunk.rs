//! Character-window text splitting for the retrieval corpus.

/// Split `text` into overlapping chunks of at most `chunk_size` characters.
///
/// Consecutive chunks share `overlap` characters. Counts are in characters,
/// not bytes, so multi-byte input never splits inside a code point. An
/// `overlap >= chunk_size` is clamped so the window always advances.
pub fn split_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    if text.is_empty() || chunk_size == 0 {
        return Vec::new();
    }

    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= chunk_size {
        return vec![text.to_string()];
    }

    let step = chunk_size.saturating_sub(overlap).max(1);
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start += step;
    }

    chunks
}
