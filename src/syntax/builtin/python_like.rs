//! Python language definition

use crate::syntax::language::LanguageDefinition;
use crate::syntax::rules::PatternRule;
use crate::syntax::tokens::TokenType;

const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "break", "class", "continue", "def",
    "del", "elif", "else", "except", "finally", "for", "from", "global", "if", "import",
    "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

/// Create the Python-like language definition
pub fn python_like_language() -> LanguageDefinition {
    let mut lang = LanguageDefinition::new("Python");

    // Keywords
    let keywords = format!(r"\b(?:{})\b", KEYWORDS.join("|"));
    if let Some(rule) = PatternRule::new("keyword", &keywords, TokenType::Keyword) {
        lang.add_pattern(rule);
    }

    // `class Name`
    if let Some(rule) = PatternRule::new("class", r"\bclass\s+(\w+)\b", TokenType::Class) {
        lang.add_pattern(rule);
    }

    // Comments
    if let Some(rule) = PatternRule::new("comment", r"#.*", TokenType::Comment) {
        lang.add_pattern(rule);
    }

    // Decorators
    if let Some(rule) = PatternRule::new("decorator", r"@\w+\b", TokenType::Decorator) {
        lang.add_pattern(rule);
    }

    // Strings: from an opening quote to the last matching quote on the line.
    // Leftmost-first alternation selects the same text a back-reference would.
    if let Some(rule) = PatternRule::new("string", r#"'.*'|".*""#, TokenType::String) {
        lang.add_pattern(rule);
    }

    // `def name`
    if let Some(rule) = PatternRule::new("function", r"\bdef\s+(\w+)\b", TokenType::Function) {
        lang.add_pattern(rule);
    }

    // Numbers
    if let Some(rule) = PatternRule::new("number", r"\b\d+\.?\d*\b", TokenType::Number) {
        lang.add_pattern(rule);
    }

    lang
}
