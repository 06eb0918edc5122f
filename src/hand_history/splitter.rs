/// Every hand block starts with this literal.
pub const HAND_MARKER: &str = "PokerStars Hand #";

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Split the text of a session file into one block per hand.
///
/// A leading byte order mark is ignored and both `\r\n` and `\r` line endings
/// are normalized to `\n`. Each block starts with [`HAND_MARKER`] and has no
/// surrounding whitespace. Fragments that are empty or that don't start with
/// the marker are dropped, so text without any hands gives an empty list.
pub fn split_hands(text: &str) -> Vec<String> {
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut starts: Vec<usize> = normalized
        .match_indices(HAND_MARKER)
        .map(|(idx, _)| idx)
        .collect();
    if starts.first() != Some(&0) {
        starts.insert(0, 0);
    }

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(normalized.len());
            normalized[start..end].trim()
        })
        .filter(|block| block.starts_with(HAND_MARKER))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_HANDS: &str = "PokerStars Hand #1: first\nline two\n\n\nPokerStars Hand #2: second\nline two\n";

    #[test]
    fn test_two_hands() {
        let blocks = split_hands(TWO_HANDS);
        assert_eq!(2, blocks.len());
        assert_eq!("PokerStars Hand #1: first\nline two", blocks[0]);
        assert_eq!("PokerStars Hand #2: second\nline two", blocks[1]);
    }

    #[test]
    fn test_blocks_are_trimmed_and_start_with_marker() {
        let text = format!("\n\n  {TWO_HANDS}  \n");
        for block in split_hands(&text) {
            assert!(block.starts_with(HAND_MARKER));
            assert_eq!(block.trim(), block);
        }
    }

    #[test]
    fn test_byte_order_mark_and_crlf() {
        let text = format!("\u{feff}{}", TWO_HANDS.replace('\n', "\r\n"));
        assert_eq!(split_hands(TWO_HANDS), split_hands(&text));
    }

    #[test]
    fn test_old_mac_line_endings() {
        let text = TWO_HANDS.replace('\n', "\r");
        assert_eq!(split_hands(TWO_HANDS), split_hands(&text));
    }

    #[test]
    fn test_leading_garbage_is_dropped() {
        let text = format!("Some export banner\n\n{TWO_HANDS}");
        assert_eq!(2, split_hands(&text).len());
    }

    #[test]
    fn test_empty_text() {
        assert!(split_hands("").is_empty());
        assert!(split_hands("   \n\r\n").is_empty());
        assert!(split_hands("\u{feff}").is_empty());
    }
}
