use tracing::trace;

/// Telegram rejects messages longer than 4096 characters.
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// Remove markdown bold markers (`**`) from a model answer.
pub fn strip_bold_markup(text: &str) -> String {
    text.replace("**", "")
}

/// Split `text` into chunks of at most `limit` characters, preferring to break
/// at line ends.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split_inclusive('\n') {
        let line_len = line.chars().count();
        if current_len + line_len > limit && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if line_len > limit {
            let chars: Vec<char> = line.chars().collect();
            for piece in chars.chunks(limit) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }
        current.push_str(line);
        current_len += line_len;
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    trace!(chunks = chunks.len(), "Split message");
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_every_bold_marker() {
        assert_eq!(strip_bold_markup("**Rome** is great"), "Rome is great");
        assert_eq!(strip_bold_markup("a ***b***"), "a *b*");
        assert_eq!(strip_bold_markup("plain"), "plain");
    }

    #[test]
    fn short_text_is_one_chunk() {
        assert_eq!(split_message("hello\nworld", 100), vec!["hello\nworld"]);
        assert!(split_message("", 100).is_empty());
    }

    #[test]
    fn breaks_at_line_ends() {
        let chunks = split_message("aaaa\nbbbb\ncc", 10);
        assert_eq!(chunks, vec!["aaaa\nbbbb\n", "cc"]);
    }

    #[test]
    fn long_lines_are_cut() {
        let chunks = split_message("ééééé", 2);
        assert_eq!(chunks, vec!["éé", "éé", "é"]);
    }
}
