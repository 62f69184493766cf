//! Language definitions for syntax highlighting
//!
//! This module provides the LanguageDefinition struct that combines
//! the ordered pattern rules and the optional block comment rule of
//! one language mode.

use super::rules::{BlockCommentRule, HighlightResult, LineState, PatternRule};
use super::style::{Span, Theme};

/// A complete language definition for syntax highlighting
pub struct LanguageDefinition {
    /// Language name (e.g., "C/C++", "Python")
    pub name: String,
    /// Single-line pattern rules in application order
    pub patterns: Vec<PatternRule>,
    /// Multi-line comment rule, applied after all patterns
    pub block_comment: Option<BlockCommentRule>,
}

impl LanguageDefinition {
    /// Create a new empty language definition
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            patterns: Vec::new(),
            block_comment: None,
        }
    }

    /// Append a pattern rule; it wins over every rule added before it
    pub fn add_pattern(&mut self, rule: PatternRule) {
        self.patterns.push(rule);
    }

    /// Set the block comment rule
    pub fn set_block_comment(&mut self, rule: BlockCommentRule) {
        self.block_comment = Some(rule);
    }

    /// Highlight a single line of text
    ///
    /// Takes the line text and the state from the previous line.
    /// Returns spans in application order and the state for the next line.
    /// Languages without block comments always end in the normal state.
    pub fn highlight_line(&self, text: &str, prev_state: LineState, theme: Theme) -> HighlightResult {
        let mut spans = Vec::new();

        for rule in &self.patterns {
            let style = rule.token_type.style(theme);
            for (start, end) in rule.find_all(text) {
                if start < end {
                    spans.push(Span::new(start, end, rule.token_type, style));
                }
            }
        }

        let mut end_state = LineState::default();
        if let Some(rule) = &self.block_comment {
            let (ranges, state) = rule.scan(text, prev_state);
            let style = rule.token_type.style(theme);
            spans.extend(
                ranges
                    .into_iter()
                    .filter(|(start, end)| start < end)
                    .map(|(start, end)| Span::new(start, end, rule.token_type, style)),
            );
            end_state = state;
        }

        HighlightResult { spans, end_state }
    }
}

/// Flatten overlapping spans into sorted, non-overlapping runs
///
/// Where spans overlap, the one applied last wins for those bytes.
pub fn resolve_spans(spans: &[Span], line_len: usize) -> Vec<Span> {
    let mut owner: Vec<Option<usize>> = vec![None; line_len];
    for (idx, span) in spans.iter().enumerate() {
        let end = span.end.min(line_len);
        for slot in owner.iter_mut().take(end).skip(span.start) {
            *slot = Some(idx);
        }
    }

    let mut runs: Vec<Span> = Vec::new();
    let mut pos = 0;
    while pos < line_len {
        let Some(idx) = owner[pos] else {
            pos += 1;
            continue;
        };
        let start = pos;
        while pos < line_len && owner[pos].map(|i| spans[i].style) == Some(spans[idx].style)
            && owner[pos].map(|i| spans[i].token) == Some(spans[idx].token)
        {
            pos += 1;
        }
        runs.push(Span::new(start, pos, spans[idx].token, spans[idx].style));
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LanguageMode;
    use crate::syntax::builtin::definition_for;
    use crate::syntax::tokens::TokenType;

    fn c_like() -> LanguageDefinition {
        definition_for(LanguageMode::CLike).unwrap()
    }

    fn python_like() -> LanguageDefinition {
        definition_for(LanguageMode::PythonLike).unwrap()
    }

    /// Token covering a byte after overlap resolution
    fn token_at(result: &HighlightResult, text: &str, pos: usize) -> Option<TokenType> {
        resolve_spans(&result.spans, text.len())
            .into_iter()
            .find(|s| s.contains(pos))
            .map(|s| s.token)
    }

    #[test]
    fn test_keywords_numbers_functions() {
        let text = "int total = compute(42) + 3.5;";
        let result = c_like().highlight_line(text, LineState::default(), Theme::Dark);
        assert!(result.end_state.is_normal());
        assert_eq!(token_at(&result, text, 0), Some(TokenType::Keyword));
        assert_eq!(token_at(&result, text, 4), None);
        assert_eq!(token_at(&result, text, 12), Some(TokenType::Function));
        assert_eq!(token_at(&result, text, 19), None);
        assert_eq!(token_at(&result, text, 20), Some(TokenType::Number));
        assert_eq!(token_at(&result, text, 26), Some(TokenType::Number));
    }

    #[test]
    fn test_whole_word_keywords() {
        let text = "interval double do";
        let result = c_like().highlight_line(text, LineState::default(), Theme::Dark);
        assert_eq!(token_at(&result, text, 0), None);
        assert_eq!(token_at(&result, text, 9), Some(TokenType::Keyword));
        assert_eq!(token_at(&result, text, 16), Some(TokenType::Keyword));
    }

    #[test]
    fn test_class_capture_overrides_keyword() {
        let text = "struct Point {";
        let result = c_like().highlight_line(text, LineState::default(), Theme::Dark);
        assert_eq!(token_at(&result, text, 0), Some(TokenType::Class));
        assert_eq!(token_at(&result, text, 8), Some(TokenType::Class));
    }

    #[test]
    fn test_later_rules_override_earlier() {
        // The string rule repaints the keyword inside the quotes
        let text = r#"puts("return value");"#;
        let result = c_like().highlight_line(text, LineState::default(), Theme::Dark);
        assert_eq!(token_at(&result, text, 6), Some(TokenType::String));
        assert_eq!(token_at(&result, text, 0), Some(TokenType::Function));
    }

    #[test]
    fn test_naive_greedy_string() {
        // Greedy to the last quote; the text between two strings is swallowed
        let text = r#"a = "x" + "y";"#;
        let result = c_like().highlight_line(text, LineState::default(), Theme::Dark);
        let strings: Vec<_> = result.spans.iter().filter(|s| s.token == TokenType::String).collect();
        assert_eq!(strings.len(), 1);
        assert_eq!((strings[0].start, strings[0].end), (4, 13));
    }

    #[test]
    fn test_preprocessor_and_line_comment() {
        let text = "#include <stdio.h> // io";
        let result = c_like().highlight_line(text, LineState::default(), Theme::Dark);
        assert_eq!(token_at(&result, text, 0), Some(TokenType::Preprocessor));
        assert_eq!(token_at(&result, text, 19), Some(TokenType::Comment));
    }

    #[test]
    fn test_balanced_block_comment_on_one_line() {
        let text = "x = 1; /* int y = 2; */ z();";
        let result = c_like().highlight_line(text, LineState::default(), Theme::Dark);
        assert!(result.end_state.is_normal());
        let comments: Vec<_> = result.spans.iter().filter(|s| s.token == TokenType::BlockComment).collect();
        assert_eq!(comments.len(), 1);
        assert_eq!((comments[0].start, comments[0].end), (7, 23));
        // The keyword inside the comment loses to the comment pass
        assert_eq!(token_at(&result, text, 10), Some(TokenType::BlockComment));
        assert_eq!(token_at(&result, text, 24), Some(TokenType::Function));
    }

    #[test]
    fn test_unterminated_block_comment() {
        let text = "code(); /* open";
        let result = c_like().highlight_line(text, LineState::default(), Theme::Dark);
        assert!(result.end_state.in_block_comment);
        assert_eq!(token_at(&result, text, 8), Some(TokenType::BlockComment));
        assert_eq!(token_at(&result, text, text.len() - 1), Some(TokenType::BlockComment));
    }

    #[test]
    fn test_idempotent() {
        let lang = c_like();
        let text = "for (int i = 0; i < n; i++) { /* loop";
        let first = lang.highlight_line(text, LineState::inside_comment(), Theme::Light);
        let second = lang.highlight_line(text, LineState::inside_comment(), Theme::Light);
        assert_eq!(first, second);
    }

    #[test]
    fn test_python_rules() {
        let text = "@cached";
        let result = python_like().highlight_line(text, LineState::default(), Theme::Dark);
        assert_eq!(token_at(&result, text, 0), Some(TokenType::Decorator));

        let text = "def run(self): # go";
        let result = python_like().highlight_line(text, LineState::default(), Theme::Dark);
        assert_eq!(token_at(&result, text, 0), Some(TokenType::Function));
        assert_eq!(token_at(&result, text, 4), Some(TokenType::Function));
        assert_eq!(token_at(&result, text, 15), Some(TokenType::Comment));
    }

    #[test]
    fn test_python_strings_match_own_quote() {
        let text = r#"s = 'it"s' + x"#;
        let result = python_like().highlight_line(text, LineState::default(), Theme::Dark);
        let strings: Vec<_> = result.spans.iter().filter(|s| s.token == TokenType::String).collect();
        assert_eq!(strings.len(), 1);
        assert_eq!((strings[0].start, strings[0].end), (4, 10));
    }

    #[test]
    fn test_python_ignores_block_state() {
        let text = "x = 1";
        let result = python_like().highlight_line(text, LineState::inside_comment(), Theme::Dark);
        assert!(result.end_state.is_normal());
        assert_eq!(token_at(&result, text, 0), None);
    }

    #[test]
    fn test_resolve_spans_last_wins() {
        let style_a = TokenType::Keyword.style(Theme::Dark);
        let style_b = TokenType::String.style(Theme::Dark);
        let spans = vec![
            Span::new(0, 6, TokenType::Keyword, style_a),
            Span::new(2, 4, TokenType::String, style_b),
        ];
        let runs = resolve_spans(&spans, 8);
        let ranges: Vec<_> = runs.iter().map(|s| (s.start, s.end, s.token)).collect();
        assert_eq!(
            ranges,
            vec![
                (0, 2, TokenType::Keyword),
                (2, 4, TokenType::String),
                (4, 6, TokenType::Keyword),
            ]
        );
    }
}
