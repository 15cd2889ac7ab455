//! Misc small utilities shared across modules.

/// Splits `message` into chunks of at most `max_chars` characters, breaking only
/// at newlines. Joining the chunks with `'\n'` gives back the original text,
/// minus a trailing newline that would otherwise be sent as an empty chunk.
/// A single line longer than `max_chars` becomes its own oversized chunk.
/// No chunk is ever empty; a blank line is carried into the following chunk.
pub fn split_message(message: &str, max_chars: usize) -> Vec<String> {
    if message.chars().count() <= max_chars {
        return vec![message.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current: Option<(String, usize)> = None;
    for line in message.split('\n') {
        let line_len = line.chars().count();
        current = Some(match current.take() {
            Some((mut chunk, len)) if chunk.is_empty() || len + 1 + line_len <= max_chars => {
                chunk.push('\n');
                chunk.push_str(line);
                (chunk, len + 1 + line_len)
            }
            Some((chunk, _)) => {
                chunks.push(chunk);
                (line.to_string(), line_len)
            }
            None => (line.to_string(), line_len),
        });
    }
    if let Some((chunk, _)) = current.filter(|(chunk, _)| !chunk.is_empty()) {
        chunks.push(chunk);
    }
    chunks
}

/// Renders `items` as a 1-based numbered list, one per line.
pub fn numbered<I, T>(items: I) -> String
where
    I: IntoIterator<Item = T>,
    T: std::fmt::Display,
{
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}
