//! Token classification
//!
//! Splits an input line into tokens and tags each one as an operator symbol,
//! a path, a branch reference (`@name`) or an opaque literal. Classification
//! is a pure function of the token text; nothing here touches the filesystem.

use std::fmt;

/// Sigil that marks a branch (or remote) reference, as in `@master`
pub const BRANCH_SIGIL: char = '@';

/// Reserved operator symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// `+` stage files
    Plus,
    /// `-` unstage files
    Minus,
    /// `~` diff files
    Tilde,
    /// `=` register a submodule or remote
    Equals,
    /// `->` push
    Arrow,
    /// `>` merge
    Angle,
    /// `cd` change directory
    Cd,
}

impl Symbol {
    /// Parse an exact operator symbol
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "+" => Some(Symbol::Plus),
            "-" => Some(Symbol::Minus),
            "~" => Some(Symbol::Tilde),
            "=" => Some(Symbol::Equals),
            "->" => Some(Symbol::Arrow),
            ">" => Some(Symbol::Angle),
            "cd" => Some(Symbol::Cd),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Symbol::Plus => "+",
            Symbol::Minus => "-",
            Symbol::Tilde => "~",
            Symbol::Equals => "=",
            Symbol::Arrow => "->",
            Symbol::Angle => ">",
            Symbol::Cd => "cd",
        }
    }

    /// Symbols that restart partitioning when they appear after position 0
    pub fn restarts_partition(&self) -> bool {
        matches!(self, Symbol::Plus | Symbol::Minus | Symbol::Tilde)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification tag of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Operator(Symbol),
    Path,
    BranchRef,
    Literal,
}

/// A classified token from an input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    text: String,
    kind: TokenKind,
}

impl Token {
    /// Classify `text` and wrap it
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let kind = classify(&text);
        Self { text, kind }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The token exactly as typed
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The semantic value: branch references lose their sigil, everything
    /// else is returned verbatim.
    pub fn value(&self) -> &str {
        match self.kind {
            TokenKind::BranchRef => &self.text[BRANCH_SIGIL.len_utf8()..],
            _ => &self.text,
        }
    }

    pub fn symbol(&self) -> Option<Symbol> {
        match self.kind {
            TokenKind::Operator(symbol) => Some(symbol),
            _ => None,
        }
    }

    pub fn is_operator(&self) -> bool {
        matches!(self.kind, TokenKind::Operator(_))
    }

    pub fn is_branch_ref(&self) -> bool {
        self.kind == TokenKind::BranchRef
    }

    /// Paths and branch references are the only tokens collected mid-line
    pub fn is_operand(&self) -> bool {
        matches!(self.kind, TokenKind::Path | TokenKind::BranchRef)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Split a line on whitespace and classify every piece
pub fn tokenize(line: &str) -> Vec<Token> {
    line.split_whitespace().map(Token::new).collect()
}

/// Classify a single token
pub fn classify(text: &str) -> TokenKind {
    if let Some(symbol) = Symbol::parse(text) {
        return TokenKind::Operator(symbol);
    }

    if let Some(payload) = text.strip_prefix(BRANCH_SIGIL) {
        if !payload.is_empty() {
            return TokenKind::BranchRef;
        }
        return TokenKind::Literal;
    }

    if is_path_like(text) {
        TokenKind::Path
    } else {
        TokenKind::Literal
    }
}

/// Path grammar: an optional drive prefix (`C:\` or `C:/`), an optional
/// leading `~`, then word characters, `-`, `.` and `/` or `\` separators.
/// At least one non-separator character is required.
pub fn is_path_like(text: &str) -> bool {
    let rest = strip_drive(text);
    let rest = rest.strip_prefix('~').unwrap_or(rest);

    let mut has_name = text.starts_with('~');
    for c in rest.chars() {
        match c {
            '/' | '\\' => {}
            c if is_name_char(c) => has_name = true,
            _ => return false,
        }
    }
    has_name
}

fn strip_drive(text: &str) -> &str {
    let bytes = text.as_bytes();
    if bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'\\' || bytes[2] == b'/')
    {
        &text[3..]
    } else {
        text
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || c == '.'
}
