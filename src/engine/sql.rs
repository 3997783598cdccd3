//! The query text exchanged with storage sessions
//!
//! Fetches only ever need one statement shape:
//!
//! ```text
//! SELECT <* | col [, col]*> FROM <relation> [ORDER BY RANDOM()] [;]
//! ```
//!
//! Identifiers may be bare or double-quoted. Keywords are case-insensitive.
//! The rendered form is valid SQLite, and the memory engine parses exactly
//! this grammar back.

use super::errors::{EngineError, EngineResult};
use super::relation::quote_ident;

/// Projection list of a SELECT
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// `*`: every column in declaration order
    All,
    /// Named columns in the listed order
    Columns(Vec<String>),
}

/// Row order requested from the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOrder {
    /// Whatever order the engine scans in
    Natural,
    /// `ORDER BY RANDOM()`: re-sampled by the engine on every call
    Random,
}

/// A parsed or to-be-rendered SELECT
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectStatement {
    pub projection: Projection,
    pub relation: String,
    pub order: RowOrder,
}

impl SelectStatement {
    pub fn new(projection: Projection, relation: impl Into<String>, order: RowOrder) -> Self {
        Self {
            projection,
            relation: relation.into(),
            order,
        }
    }

    /// Render as SQL text
    pub fn render(&self) -> String {
        let projection = match &self.projection {
            Projection::All => "*".to_string(),
            Projection::Columns(columns) => columns
                .iter()
                .map(|c| quote_ident(c))
                .collect::<Vec<_>>()
                .join(", "),
        };

        let mut sql = format!("SELECT {} FROM {}", projection, quote_ident(&self.relation));
        if self.order == RowOrder::Random {
            sql.push_str(" ORDER BY RANDOM()");
        }
        sql
    }

    /// Parse SQL text
    pub fn parse(sql: &str) -> EngineResult<Self> {
        let tokens = tokenize(sql)?;
        Parser {
            sql,
            tokens,
            pos: 0,
        }
        .parse_select()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Word(String),
    Quoted(String),
    Comma,
    LParen,
    RParen,
    Star,
    Semicolon,
}

fn tokenize(sql: &str) -> EngineResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = sql.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            ';' => {
                chars.next();
                tokens.push(Token::Semicolon);
            }
            '"' => {
                chars.next();
                let mut ident = String::new();
                loop {
                    match chars.next() {
                        Some('"') if chars.peek() == Some(&'"') => {
                            chars.next();
                            ident.push('"');
                        }
                        Some('"') => break,
                        Some(ch) => ident.push(ch),
                        None => return Err(EngineError::syntax(sql, "unterminated quoted identifier")),
                    }
                }
                tokens.push(Token::Quoted(ident));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut word = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_ascii_alphanumeric() || ch == '_' {
                        word.push(ch);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Word(word));
            }
            other => {
                return Err(EngineError::syntax(
                    sql,
                    format!("unexpected character '{}'", other),
                ))
            }
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    sql: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser<'_> {
    fn parse_select(mut self) -> EngineResult<SelectStatement> {
        self.expect_keyword("SELECT")?;

        let projection = if self.eat(&Token::Star) {
            Projection::All
        } else {
            let mut columns = vec![self.identifier()?];
            while self.eat(&Token::Comma) {
                columns.push(self.identifier()?);
            }
            Projection::Columns(columns)
        };

        self.expect_keyword("FROM")?;
        let relation = self.identifier()?;

        let order = if self.eat_keyword("ORDER") {
            self.expect_keyword("BY")?;
            self.expect_keyword("RANDOM")?;
            self.expect(&Token::LParen)?;
            self.expect(&Token::RParen)?;
            RowOrder::Random
        } else {
            RowOrder::Natural
        };

        self.eat(&Token::Semicolon);
        if let Some(token) = self.tokens.get(self.pos) {
            return Err(self.error(format!("unexpected trailing token {:?}", token)));
        }

        Ok(SelectStatement {
            projection,
            relation,
            order,
        })
    }

    fn error(&self, reason: impl Into<String>) -> EngineError {
        EngineError::syntax(self.sql, reason)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &Token) -> EngineResult<()> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(format!("expected {:?}", token)))
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        match self.peek() {
            Some(Token::Word(w)) if w.eq_ignore_ascii_case(keyword) => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> EngineResult<()> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(self.error(format!("expected {}", keyword)))
        }
    }

    fn identifier(&mut self) -> EngineResult<String> {
        match self.tokens.get(self.pos).cloned() {
            Some(Token::Word(w)) | Some(Token::Quoted(w)) => {
                self.pos += 1;
                Ok(w)
            }
            _ => Err(self.error("expected identifier")),
        }
    }
}
