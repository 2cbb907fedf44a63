//! Text normalization primitives
//!
//! There is exactly one whitespace-collapse implementation in this crate:
//! [`normalize_whitespace`]. Deduplication keys, preview highlighting and
//! commit-time matching are all built on top of it, so a string that matches
//! in one place matches in all of them.

/// A whitespace-normalized view of a string with a map back to the original
///
/// `index_map[i]` is the character index in the original string that produced
/// the `i`-th character of `text`. A collapsed whitespace run maps to the
/// index of its first whitespace character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    /// The normalized text: trimmed, internal whitespace runs collapsed to a
    /// single ASCII space
    pub text: String,
    /// Normalized character index → original character index
    pub index_map: Vec<usize>,
}

/// Collapse whitespace runs to single spaces and trim, tracking the mapping
/// from normalized character positions back to original character positions
pub fn normalize_whitespace(s: &str) -> NormalizedText {
    let mut text = String::new();
    let mut index_map = Vec::new();
    let mut pending_space: Option<usize> = None;

    for (i, c) in s.chars().enumerate() {
        if c.is_whitespace() {
            if pending_space.is_none() {
                pending_space = Some(i);
            }
        } else {
            if let Some(ws) = pending_space.take() {
                // Leading whitespace is dropped entirely
                if !text.is_empty() {
                    text.push(' ');
                    index_map.push(ws);
                }
            }
            text.push(c);
            index_map.push(i);
        }
    }

    NormalizedText { text, index_map }
}

/// Whitespace-collapsed form of a string (case preserved)
pub fn collapse_whitespace(s: &str) -> String {
    normalize_whitespace(s).text
}

/// Deduplication key: lower-case, trimmed, internal whitespace collapsed
///
/// Two candidates with the same key are duplicates regardless of source.
pub fn normalize_key(s: &str) -> String {
    collapse_whitespace(s).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("John  Smith", "John Smith"; "internal run")]
    #[test_case("  John Smith  ", "John Smith"; "outer trim")]
    #[test_case("L  PINTO \t DOS\nSANTOS", "L PINTO DOS SANTOS"; "mixed whitespace")]
    #[test_case("", ""; "empty")]
    #[test_case("   ", ""; "all whitespace")]
    fn test_collapse_whitespace(input: &str, expected: &str) {
        assert_eq!(collapse_whitespace(input), expected);
    }

    #[test]
    fn test_normalize_idempotent() {
        for s in ["  a  b  ", "John\t\tSmith", "x", "", "  é  ü  "] {
            let once = collapse_whitespace(s);
            assert_eq!(collapse_whitespace(&once), once);
        }
    }

    #[test]
    fn test_key_case_and_whitespace_insensitive() {
        assert_eq!(normalize_key("John  SMITH "), normalize_key("john smith"));
        assert_ne!(normalize_key("John Smith"), normalize_key("John Smithe"));
    }

    #[test]
    fn test_index_map_points_into_original() {
        let s = "ab   cd";
        let norm = normalize_whitespace(s);
        assert_eq!(norm.text, "ab cd");
        // 'a'=0, 'b'=1, collapsed run starts at 2, 'c'=5, 'd'=6
        assert_eq!(norm.index_map, vec![0, 1, 2, 5, 6]);
    }

    #[test]
    fn test_index_map_with_leading_whitespace() {
        let norm = normalize_whitespace("  xy");
        assert_eq!(norm.text, "xy");
        assert_eq!(norm.index_map, vec![2, 3]);
    }

    #[test]
    fn test_index_map_char_based_not_byte_based() {
        let norm = normalize_whitespace("é  b");
        assert_eq!(norm.text, "é b");
        assert_eq!(norm.index_map, vec![0, 1, 3]);
    }
}
