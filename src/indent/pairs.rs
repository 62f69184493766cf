//! Auto-pair delimiter table

/// Opening delimiter and the closing counterpart inserted with it
const PAIRS: &[(char, char)] = &[('{', '}'), ('(', ')'), ('[', ']'), ('"', '"'), ('\'', '\'')];

/// Closing counterpart of an opening delimiter
pub fn closing_for(open: char) -> Option<char> {
    PAIRS
        .iter()
        .find(|(o, _)| *o == open)
        .map(|(_, close)| *close)
}

/// Whether `c` closes some pair (quotes close themselves)
pub fn is_closing(c: char) -> bool {
    PAIRS.iter().any(|(_, close)| *close == c)
}

/// Quotes open and close with the same character
pub fn is_symmetric(c: char) -> bool {
    closing_for(c) == Some(c)
}
