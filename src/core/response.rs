//! Reply chunking for Discord's message size limit
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.2.0: Keep note entries whole across message boundaries
//! - 1.1.0: Drop embed helpers, notes are sent as plain messages
//! - 1.0.0: Line-aware, UTF-8 safe chunking

/// Discord message content limit
pub const MESSAGE_LIMIT: usize = 2000;

/// Split `text` into pieces of at most `max_size` bytes.
///
/// Blank-line separated blocks (one note each in a listing) stay whole when
/// they fit. A block that does not fit is split on lines, and a line that
/// does not fit is split on character boundaries.
pub fn chunk_text(text: &str, max_size: usize) -> Vec<String> {
    if text.len() <= max_size {
        return vec![text.to_string()];
    }

    let blocks = text.split("\n\n").flat_map(|block| {
        if block.len() <= max_size {
            vec![block.to_string()]
        } else {
            let lines = block
                .lines()
                .flat_map(|line| split_on_char_boundaries(line, max_size));
            pack(lines, "\n", max_size)
        }
    });
    pack(blocks, "\n\n", max_size)
}

/// Greedily join pieces (each already within `max_size`) with `separator`
fn pack(pieces: impl IntoIterator<Item = String>, separator: &str, max_size: usize) -> Vec<String> {
    let mut packed = Vec::new();
    let mut current = String::new();

    for piece in pieces.into_iter().filter(|p| !p.trim().is_empty()) {
        if !current.is_empty() && current.len() + separator.len() + piece.len() > max_size {
            packed.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push_str(separator);
        }
        current.push_str(&piece);
    }

    if !current.is_empty() {
        packed.push(current);
    }
    packed
}

fn split_on_char_boundaries(line: &str, max_size: usize) -> Vec<String> {
    let mut parts = Vec::new();
    let mut start = 0;

    for (index, ch) in line.char_indices() {
        if index > start && index + ch.len_utf8() - start > max_size {
            parts.push(line[start..index].to_string());
            start = index;
        }
    }
    parts.push(line[start..].to_string());
    parts
}

/// Chunk text for message content (2000 byte limit)
pub fn chunk_for_message(text: &str) -> Vec<String> {
    chunk_text(text, MESSAGE_LIMIT)
}
