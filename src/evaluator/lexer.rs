//! Tokenizer for the expression language, with byte offsets for error reporting.

use crate::error::EvaluationError;
use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    String(String),
    Identifier(String),
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Question,
    Colon,
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Percent,
    Bang,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    EqualEqual,
    BangEqual,
    EqualEqualEqual,
    BangEqualEqual,
    AndAnd,
    OrOr,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "{}", n),
            TokenKind::String(s) => write!(f, "{:?}", s),
            TokenKind::Identifier(name) => write!(f, "{}", name),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::LBracket => write!(f, "["),
            TokenKind::RBracket => write!(f, "]"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Dot => write!(f, "."),
            TokenKind::Question => write!(f, "?"),
            TokenKind::Colon => write!(f, ":"),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::StarStar => write!(f, "**"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Percent => write!(f, "%"),
            TokenKind::Bang => write!(f, "!"),
            TokenKind::Less => write!(f, "<"),
            TokenKind::LessEqual => write!(f, "<="),
            TokenKind::Greater => write!(f, ">"),
            TokenKind::GreaterEqual => write!(f, ">="),
            TokenKind::EqualEqual => write!(f, "=="),
            TokenKind::BangEqual => write!(f, "!="),
            TokenKind::EqualEqualEqual => write!(f, "==="),
            TokenKind::BangEqualEqual => write!(f, "!=="),
            TokenKind::AndAnd => write!(f, "&&"),
            TokenKind::OrOr => write!(f, "||"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the token's first character.
    pub position: usize,
}

pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    /// Tokenizes the entire input. The last token is always `Eof`.
    pub fn tokenize(input: &str) -> Result<Vec<Token>, EvaluationError> {
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                return Ok(tokens);
            }
        }
    }

    fn next_token(&mut self) -> Result<Token, EvaluationError> {
        self.skip_whitespace();
        let position = self.current_pos();

        let Some(c) = self.peek_char() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                position,
            });
        };

        let kind = match c {
            '0'..='9' => return self.read_number(position),
            '.' if self.peek_second().is_some_and(|n| n.is_ascii_digit()) => {
                return self.read_number(position);
            }
            '"' | '\'' => return self.read_string(position, c),
            c if is_identifier_start(c) => return Ok(self.read_identifier(position)),
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            ',' => self.single(TokenKind::Comma),
            '.' => self.single(TokenKind::Dot),
            '?' => self.single(TokenKind::Question),
            ':' => self.single(TokenKind::Colon),
            '+' => self.single(TokenKind::Plus),
            '-' => self.single(TokenKind::Minus),
            '/' => self.single(TokenKind::Slash),
            '%' => self.single(TokenKind::Percent),
            '*' => {
                self.advance();
                if self.eat('*') {
                    TokenKind::StarStar
                } else {
                    TokenKind::Star
                }
            }
            '<' => {
                self.advance();
                if self.eat('=') {
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                }
            }
            '>' => {
                self.advance();
                if self.eat('=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                }
            }
            '!' => {
                self.advance();
                if self.eat('=') {
                    if self.eat('=') {
                        TokenKind::BangEqualEqual
                    } else {
                        TokenKind::BangEqual
                    }
                } else {
                    TokenKind::Bang
                }
            }
            '=' => {
                self.advance();
                if !self.eat('=') {
                    return Err(parse_error("assignment is not allowed in expressions", position));
                }
                if self.eat('=') {
                    TokenKind::EqualEqualEqual
                } else {
                    TokenKind::EqualEqual
                }
            }
            '&' => {
                self.advance();
                if !self.eat('&') {
                    return Err(parse_error("expected '&&'", position));
                }
                TokenKind::AndAnd
            }
            '|' => {
                self.advance();
                if !self.eat('|') {
                    return Err(parse_error("expected '||'", position));
                }
                TokenKind::OrOr
            }
            other => {
                return Err(parse_error(
                    &format!("unexpected character '{}'", other),
                    position,
                ));
            }
        };

        Ok(Token { kind, position })
    }

    fn read_number(&mut self, start: usize) -> Result<Token, EvaluationError> {
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek_char() == Some('.') {
            self.advance();
            while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }
        if matches!(self.peek_char(), Some('e' | 'E')) {
            self.advance();
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.advance();
            }
            if !self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                return Err(parse_error("malformed exponent", start));
            }
            while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let text = &self.input[start..self.current_pos()];
        let value: f64 = text
            .parse()
            .map_err(|_| parse_error(&format!("invalid number '{}'", text), start))?;
        Ok(Token {
            kind: TokenKind::Number(value),
            position: start,
        })
    }

    fn read_string(&mut self, start: usize, quote: char) -> Result<Token, EvaluationError> {
        self.advance(); // opening quote
        let mut value = String::new();
        loop {
            match self.peek_char() {
                None => return Err(parse_error("unterminated string", start)),
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    let escaped = match self.peek_char() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some(c) => c,
                        None => return Err(parse_error("unterminated string", start)),
                    };
                    self.advance();
                    value.push(escaped);
                }
                Some(c) => {
                    self.advance();
                    value.push(c);
                }
            }
        }
        Ok(Token {
            kind: TokenKind::String(value),
            position: start,
        })
    }

    fn read_identifier(&mut self, start: usize) -> Token {
        while self.peek_char().is_some_and(is_identifier_part) {
            self.advance();
        }
        Token {
            kind: TokenKind::Identifier(self.input[start..self.current_pos()].to_string()),
            position: start,
        }
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_second(&self) -> Option<char> {
        let mut lookahead = self.chars.clone();
        lookahead.next();
        lookahead.next().map(|(_, c)| c)
    }

    fn advance(&mut self) {
        self.chars.next();
    }

    fn current_pos(&mut self) -> usize {
        self.chars.peek().map_or(self.input.len(), |(i, _)| *i)
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

pub(super) fn parse_error(message: &str, position: usize) -> EvaluationError {
    EvaluationError::Parse {
        message: message.to_string(),
        position,
    }
}
