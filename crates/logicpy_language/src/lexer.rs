//! Lexer for LogicPy sources.
//!
//! The lexer converts source text into a stream of tokens. Layout follows
//! Python: indentation changes become `Indent`/`Dedent` tokens, a logical line
//! ends with `Newline`, and newlines inside brackets are ignored.

use std::collections::VecDeque;

use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Operators longer than one character, longest first.
const MULTI_CHAR_OPS: &[&str] = &[
    "**=", "//=", ">>=", "<<=", "...", "==", "!=", "<=", ">=", "->", "**", "//", "+=", "-=", "*=",
    "/=", "%=", "&=", "|=", "^=", "@=", ":=", "<<", ">>",
];

/// Width a tab advances indentation to (next multiple of this).
const TAB_WIDTH: u32 = 8;

/// Lexer for LogicPy source code.
pub struct Lexer<'src> {
    /// Source text being tokenized.
    source: &'src str,
    /// Remaining source text.
    rest: &'src str,
    /// Current byte offset in source.
    position: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    column: u32,
    /// Open indentation levels; always starts with 0.
    indents: Vec<u32>,
    /// Layout tokens waiting to be returned.
    pending: VecDeque<Token>,
    /// Bracket nesting depth.
    depth: u32,
    /// True before the first token of a physical line has been seen.
    at_line_start: bool,
    /// True once the current logical line has produced a real token.
    line_has_tokens: bool,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            rest: source,
            position: 0,
            line: 1,
            column: 1,
            indents: vec![0],
            pending: VecDeque::new(),
            depth: 0,
            at_line_start: true,
            line_has_tokens: false,
        }
    }

    /// Returns the next token from the source.
    ///
    /// After the end of input, keeps returning `Eof`.
    pub fn next_token(&mut self) -> Token {
        if let Some(token) = self.pending.pop_front() {
            return token;
        }

        if self.at_line_start && self.depth == 0 {
            if let Some(token) = self.scan_indentation() {
                return token;
            }
        }

        self.skip_whitespace();

        let start = self.position;
        let start_line = self.line;
        let start_column = self.column;

        let Some(c) = self.peek_char() else {
            return self.finish(Span::point(start, start_line, start_column));
        };

        let kind = match c {
            '\n' => {
                self.advance();
                self.at_line_start = true;
                if !self.line_has_tokens {
                    return self.next_token();
                }
                self.line_has_tokens = false;
                TokenKind::Newline
            }
            '#' => self.scan_comment(),
            '"' | '\'' => self.scan_string(false),
            c if c.is_ascii_digit() => self.scan_number(),
            c if is_name_start(c) => self.scan_name(),
            _ => self.scan_operator(),
        };

        if !matches!(kind, TokenKind::Newline | TokenKind::Comment(_)) {
            self.line_has_tokens = true;
        }

        Token::new(
            kind,
            Span::new(start, self.position, start_line, start_column),
        )
    }

    /// Tokenizes all source and returns a vector of tokens.
    ///
    /// Comments are included in the output.
    #[must_use]
    pub fn tokenize_all(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// Peeks `n` characters ahead.
    fn peek_char_n(&self, n: usize) -> Option<char> {
        self.rest.chars().nth(n)
    }

    /// Advances past the next character.
    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            let len = c.len_utf8();
            self.rest = &self.rest[len..];
            self.position += len;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Advances past `n` characters.
    fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Measures the indentation of a new line and emits layout tokens.
    ///
    /// Blank and comment-only lines do not affect indentation.
    fn scan_indentation(&mut self) -> Option<Token> {
        loop {
            let mut width = 0u32;
            while let Some(c) = self.peek_char() {
                match c {
                    ' ' => width += 1,
                    '\t' => width = (width / TAB_WIDTH + 1) * TAB_WIDTH,
                    '\x0c' | '\r' => {}
                    _ => break,
                }
                self.advance();
            }

            match self.peek_char() {
                None => return None,
                Some('\n') => {
                    self.advance();
                }
                Some('#') => {
                    let start = self.position;
                    let (line, column) = (self.line, self.column);
                    let kind = self.scan_comment();
                    return Some(Token::new(
                        kind,
                        Span::new(start, self.position, line, column),
                    ));
                }
                Some(_) => {
                    self.at_line_start = false;
                    return self.apply_indentation(width);
                }
            }
        }
    }

    /// Compares a line's indentation with the open levels.
    fn apply_indentation(&mut self, width: u32) -> Option<Token> {
        let span = Span::point(self.position, self.line, self.column);
        let top = self.indents.last().copied().unwrap_or(0);

        if width > top {
            self.indents.push(width);
            return Some(Token::new(TokenKind::Indent, span));
        }

        while self.indents.last().is_some_and(|&level| width < level) {
            self.indents.pop();
            self.pending.push_back(Token::new(TokenKind::Dedent, span));
        }

        if self.indents.last().copied().unwrap_or(0) != width {
            self.pending.push_back(Token::new(
                TokenKind::Error("unindent does not match any outer indentation level".into()),
                span,
            ));
        }

        self.pending.pop_front()
    }

    /// Produces the closing layout tokens, then `Eof`.
    fn finish(&mut self, span: Span) -> Token {
        if self.line_has_tokens {
            self.line_has_tokens = false;
            return Token::new(TokenKind::Newline, span);
        }
        if self.indents.len() > 1 {
            self.indents.pop();
            return Token::new(TokenKind::Dedent, span);
        }
        Token::new(TokenKind::Eof, span)
    }

    /// Skips insignificant whitespace within a line.
    ///
    /// Inside brackets newlines are insignificant too, and a backslash at the
    /// end of a line joins it with the next.
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            match c {
                ' ' | '\t' | '\r' | '\x0c' => self.advance(),
                '\n' if self.depth > 0 => self.advance(),
                '\\' if self.peek_char_n(1) == Some('\n') => self.advance_n(2),
                '\\' if self.rest.starts_with("\\\r\n") => self.advance_n(3),
                _ => break,
            }
        }
    }

    /// Scans a comment starting with `#`.
    fn scan_comment(&mut self) -> TokenKind {
        let mut text = String::new();
        while let Some(c) = self.peek_char() {
            if c == '\n' {
                break;
            }
            text.push(c);
            self.advance();
        }
        TokenKind::Comment(text)
    }

    /// Scans a string literal, single- or triple-quoted.
    fn scan_string(&mut self, raw: bool) -> TokenKind {
        let Some(quote) = self.peek_char() else {
            return TokenKind::Error("expected string literal".into());
        };
        let triple = self.peek_char_n(1) == Some(quote) && self.peek_char_n(2) == Some(quote);
        self.advance_n(if triple { 3 } else { 1 });

        let mut text = String::new();
        loop {
            match self.peek_char() {
                None => return TokenKind::Error("unterminated string literal".into()),
                Some('\n') if !triple => {
                    return TokenKind::Error("unterminated string literal".into());
                }
                Some(c) if c == quote => {
                    if !triple {
                        self.advance();
                        break;
                    }
                    if self.peek_char_n(1) == Some(quote) && self.peek_char_n(2) == Some(quote) {
                        self.advance_n(3);
                        break;
                    }
                    self.advance();
                    text.push(c);
                }
                Some('\\') => {
                    self.advance();
                    let Some(escaped) = self.peek_char() else {
                        return TokenKind::Error("unterminated string literal".into());
                    };
                    self.advance();
                    if raw {
                        text.push('\\');
                        text.push(escaped);
                        continue;
                    }
                    match escaped {
                        'n' => text.push('\n'),
                        't' => text.push('\t'),
                        'r' => text.push('\r'),
                        '0' => text.push('\0'),
                        '\\' | '\'' | '"' => text.push(escaped),
                        '\n' => {}
                        other => {
                            text.push('\\');
                            text.push(other);
                        }
                    }
                }
                Some(c) => {
                    self.advance();
                    text.push(c);
                }
            }
        }
        TokenKind::String(text)
    }

    /// Scans a numeric literal.
    ///
    /// Plain decimal integers become `Int`; every other numeric form is kept
    /// verbatim as `Number`.
    fn scan_number(&mut self) -> TokenKind {
        let start = self.position;
        while let Some(c) = self.peek_char() {
            let fraction_dot =
                c == '.' && self.peek_char_n(1).is_some_and(|next| next.is_ascii_digit());
            if c.is_ascii_alphanumeric() || c == '_' || fraction_dot {
                self.advance();
            } else {
                break;
            }
        }

        let text = &self.source[start..self.position];
        if text.bytes().all(|b| b.is_ascii_digit() || b == b'_') {
            let digits: String = text.chars().filter(|&c| c != '_').collect();
            match digits.parse::<i64>() {
                Ok(n) => TokenKind::Int(n),
                Err(e) => TokenKind::Error(format!("invalid integer: {e}")),
            }
        } else {
            TokenKind::Number(text.to_string())
        }
    }

    /// Scans an identifier, or a prefixed string like `r"..."`.
    fn scan_name(&mut self) -> TokenKind {
        let start = self.position;
        while let Some(c) = self.peek_char() {
            if is_name_char(c) {
                self.advance();
            } else {
                break;
            }
        }
        let name = &self.source[start..self.position];

        if matches!(self.peek_char(), Some('"' | '\'')) && is_string_prefix(name) {
            let raw = name.contains(['r', 'R']);
            return self.scan_string(raw);
        }

        TokenKind::Name(name.to_string())
    }

    /// Scans punctuation and operators.
    fn scan_operator(&mut self) -> TokenKind {
        if let Some(op) = MULTI_CHAR_OPS.iter().find(|op| self.rest.starts_with(**op)) {
            self.advance_n(op.len());
            return TokenKind::Op((*op).to_string());
        }

        let Some(c) = self.peek_char() else {
            return TokenKind::Error("unexpected end of input".into());
        };
        self.advance();
        match c {
            '(' | '[' | '{' => {
                self.depth += 1;
                match c {
                    '(' => TokenKind::LParen,
                    '[' => TokenKind::LBracket,
                    _ => TokenKind::LBrace,
                }
            }
            ')' | ']' | '}' => {
                self.depth = self.depth.saturating_sub(1);
                match c {
                    ')' => TokenKind::RParen,
                    ']' => TokenKind::RBracket,
                    _ => TokenKind::RBrace,
                }
            }
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '=' => TokenKind::Equals,
            '-' => TokenKind::Minus,
            '+' | '*' | '/' | '%' | '<' | '>' | '@' | '&' | '|' | '^' | '~' | '!' | ';' => {
                TokenKind::Op(c.to_string())
            }
            c => TokenKind::Error(format!("unexpected character: {c}")),
        }
    }
}

/// Returns true if `c` can start an identifier.
fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Returns true if `c` can appear in an identifier (not at start).
fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Returns true if `name` is a string literal prefix such as `r` or `fR`.
fn is_string_prefix(name: &str) -> bool {
    name.len() <= 2
        && name
            .chars()
            .all(|c| matches!(c.to_ascii_lowercase(), 'r' | 'b' | 'u' | 'f'))
}
