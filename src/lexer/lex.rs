use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::VecDeque;

lazy_static! {
    static ref DELIMITER_RE: Regex = Regex::new(r#"\s+|[;{}()\[\],.:&|^~!+\-*/%=><"'\\?]"#).unwrap();
    static ref NUMBER_RE: Regex =
        Regex::new(r"^(0[xX][0-9a-fA-F]+|([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?)$").unwrap();
}

const KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor",
    "bool", "break", "case", "catch", "char", "char8_t", "char16_t", "char32_t",
    "class", "compl", "concept", "const", "consteval", "constexpr", "const_cast",
    "continue", "co_await", "co_return", "co_yield", "decltype", "default", "delete",
    "do", "double", "dynamic_cast", "else", "enum", "explicit", "export", "extern",
    "false", "float", "for", "friend", "goto", "if", "inline", "int", "long",
    "mutable", "namespace", "new", "noexcept", "not", "not_eq", "nullptr", "operator",
    "or", "or_eq", "private", "protected", "public", "register", "reinterpret_cast",
    "requires", "return", "short", "signed", "sizeof", "static", "static_assert",
    "static_cast", "struct", "switch", "template", "this", "thread_local", "throw",
    "true", "try", "typedef", "typeid", "typename", "union", "unsigned", "using",
    "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
];

const OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "%", "=", "==", "!=", ">", "<", ">=", "<=", "&&", "||", "!", "++",
    "--", "+=", "-=", "*=", "/=", "%=", "<<", ">>", "&", "|", "^", "~", "?",
];

const PUNCTUATION: &[&str] = &[";", "{", "}", "(", ")", "[", "]", ",", ".", ":", "\\"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Keyword,
    Operator,
    Literal,
    Punctuation,
    Preprocessor,
    Identifier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub value: String,
    pub kind: TokenKind,
    pub line: usize,
}

impl Token {
    pub fn new(value: impl Into<String>, kind: TokenKind, line: usize) -> Token {
        Token {
            value: value.into(),
            kind,
            line,
        }
    }
}

/// Keyword, then operator, then literal shape, then punctuation; anything
/// else is an identifier.
pub fn classify(word: &str) -> TokenKind {
    if KEYWORDS.contains(&word) {
        TokenKind::Keyword
    } else if OPERATORS.contains(&word) {
        TokenKind::Operator
    } else if NUMBER_RE.is_match(word) || word.starts_with('"') || word.starts_with('\'') {
        TokenKind::Literal
    } else if PUNCTUATION.contains(&word) {
        TokenKind::Punctuation
    } else {
        TokenKind::Identifier
    }
}

/// Splits one physical line on the delimiter table, keeping every
/// non-whitespace delimiter as a fragment of its own.
///
/// Multi-character operators never survive this step, so `==` comes out as
/// two `=` fragments.
pub fn split_fragments(line: &str) -> Vec<&str> {
    let mut fragments = vec![];
    let mut last = 0;

    for m in DELIMITER_RE.find_iter(line) {
        if m.start() > last {
            fragments.push(&line[last..m.start()]);
        }
        if !m.as_str().trim().is_empty() {
            fragments.push(m.as_str());
        }
        last = m.end();
    }

    if last < line.len() {
        fragments.push(&line[last..]);
    }

    fragments
        .into_iter()
        .filter(|fragment| !fragment.trim().is_empty())
        .collect()
}

/// Line-oriented tokenizer. Produces tokens lazily, one physical line at a
/// time.
pub struct Lexer<'a> {
    lines: std::str::Split<'a, char>,
    line: usize,
    in_block_comment: bool,
    pending: VecDeque<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Lexer<'a> {
        Lexer {
            lines: src.split('\n'),
            line: 0,
            in_block_comment: false,
            pending: VecDeque::new(),
        }
    }

    fn lex_line(&mut self, raw: &str) {
        let trimmed = raw.trim();

        if trimmed.starts_with("//") {
            return;
        }

        // Lines carrying a block comment marker are dropped whole, including
        // any code before `/*` or after `*/` on the same line.
        match (raw.rfind("/*"), raw.rfind("*/")) {
            (None, None) => {}
            (Some(open), Some(close)) => {
                self.in_block_comment = open > close;
                return;
            }
            (Some(_), None) => {
                self.in_block_comment = true;
                return;
            }
            (None, Some(_)) => {
                self.in_block_comment = false;
                return;
            }
        }
        if self.in_block_comment {
            return;
        }

        if trimmed.starts_with('#') {
            self.pending
                .push_back(Token::new(trimmed, TokenKind::Preprocessor, self.line));
            return;
        }

        for word in split_fragments(raw) {
            self.pending
                .push_back(Token::new(word, classify(word), self.line));
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }

            let raw = self.lines.next()?;
            self.line += 1;
            self.lex_line(raw);
        }
    }
}

pub fn tokenize(src: &str) -> Vec<Token> {
    let tokens: Vec<Token> = Lexer::new(src).collect();
    log::debug!("lexer produced {} tokens", tokens.len());
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(src: &str) -> Vec<String> {
        tokenize(src).into_iter().map(|t| t.value).collect()
    }

    #[test]
    fn classification_precedence() {
        assert_eq!(classify("int"), TokenKind::Keyword);
        assert_eq!(classify("+"), TokenKind::Operator);
        assert_eq!(classify("42"), TokenKind::Literal);
        assert_eq!(classify("0x1F"), TokenKind::Literal);
        assert_eq!(classify("\""), TokenKind::Literal);
        assert_eq!(classify(";"), TokenKind::Punctuation);
        assert_eq!(classify("counter"), TokenKind::Identifier);
    }

    #[test]
    fn delimiters_are_kept_as_tokens() {
        assert_eq!(
            values("int x = 5;"),
            vec!["int", "x", "=", "5", ";"]
        );
    }

    #[test]
    fn double_operators_are_split() {
        assert_eq!(values("a == b"), vec!["a", "=", "=", "b"]);
    }

    #[test]
    fn preprocessor_line_is_one_token() {
        let tokens = tokenize("  #include <iostream>  ");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].value, "#include <iostream>");
        assert_eq!(tokens[0].kind, TokenKind::Preprocessor);
    }

    #[test]
    fn comment_lines_still_count() {
        let tokens = tokenize("// header\nint x;");
        assert_eq!(tokens[0].line, 2);
    }

    #[test]
    fn block_comment_marker_lines_are_skipped() {
        let tokens = tokenize("int a; /* note */ int b;\nint c;");
        assert!(tokens.iter().all(|t| t.line == 2));
    }

    #[test]
    fn block_comment_interior_is_skipped() {
        let tokens = tokenize("/*\n hello world\n*/\nint c;");
        assert_eq!(tokens.first().map(|t| t.line), Some(4));
    }
}
