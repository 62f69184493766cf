//! C/C++ language definition

use crate::syntax::language::LanguageDefinition;
use crate::syntax::rules::{BlockCommentRule, PatternRule};
use crate::syntax::tokens::TokenType;

const KEYWORDS: &[&str] = &[
    "class", "const", "enum", "explicit", "friend", "inline", "namespace", "operator",
    "private", "protected", "public", "signals", "slots", "static", "struct", "template",
    "typedef", "typename", "union", "virtual", "volatile", "break", "case", "catch",
    "continue", "default", "delete", "do", "else", "for", "goto", "if", "new", "return",
    "switch", "try", "while", "auto", "bool", "char", "double", "float", "int", "long",
    "short", "signed", "unsigned", "void", "override", "final", "nullptr", "true", "false",
    "this",
];

/// Create the C-like language definition
///
/// Rule order matters: each rule repaints whatever an earlier rule styled.
pub fn c_like_language() -> LanguageDefinition {
    let mut lang = LanguageDefinition::new("C/C++");

    // Keywords
    let keywords = format!(r"\b(?:{})\b", KEYWORDS.join("|"));
    if let Some(rule) = PatternRule::new("keyword", &keywords, TokenType::Keyword) {
        lang.add_pattern(rule);
    }

    // `class Name` / `struct Name`, styled as a whole
    if let Some(rule) = PatternRule::new("class", r"\b(?:class|struct)\s+(\w+)\b", TokenType::Class) {
        lang.add_pattern(rule);
    }

    // Line comments
    if let Some(rule) = PatternRule::new("line_comment", r"//.*", TokenType::Comment) {
        lang.add_pattern(rule);
    }

    // Strings: greedy to the last quote on the line, no escapes
    if let Some(rule) = PatternRule::new("string", r#"".*""#, TokenType::String) {
        lang.add_pattern(rule);
    }

    // Identifier directly followed by `(`; only the name is styled
    if let Some(rule) = PatternRule::with_group("function", r"\b([A-Za-z0-9_]+)\(", TokenType::Function, 1) {
        lang.add_pattern(rule);
    }

    // Numbers
    if let Some(rule) = PatternRule::new("number", r"\b\d+\.?\d*\b", TokenType::Number) {
        lang.add_pattern(rule);
    }

    // Preprocessor directives
    if let Some(rule) = PatternRule::new("preprocessor", r"#[a-zA-Z_][a-zA-Z0-9_]*\b", TokenType::Preprocessor) {
        lang.add_pattern(rule);
    }

    // Block comments, applied after every pattern rule
    if let Some(rule) = BlockCommentRule::new(r"/\*", r"\*/", TokenType::BlockComment) {
        lang.set_block_comment(rule);
    }

    lang
}
