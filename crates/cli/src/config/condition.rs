// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Conditional expressions for a job's `only` field.
//!
//! Expressions compare context variables against string literals:
//! - `tool == "Bash"` - exact comparison
//! - `tool != "Read"` - negated comparison
//! - `files =~ "\.rs$"` - regex match
//! - `prompt !~ "^/"` - negated regex
//! - `file` - true when the variable is non-empty
//!
//! Combine with `&&`, `||`, `!` and parentheses. For `files`, a comparison
//! (negated ones included) holds if any changed file satisfies it, so it is
//! false when nothing changed.

use std::fmt;

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message} at offset {offset}")]
pub struct ConditionError {
    pub offset: usize,
    pub message: String,
}

impl ConditionError {
    fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

/// Context variables an expression can reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Var {
    Tool,
    Event,
    File,
    Files,
    Cwd,
    Prompt,
}

impl Var {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "tool" | "tool_name" => Some(Self::Tool),
            "event" => Some(Self::Event),
            "file" | "file_path" => Some(Self::File),
            "files" => Some(Self::Files),
            "cwd" => Some(Self::Cwd),
            "prompt" => Some(Self::Prompt),
            _ => None,
        }
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Tool => "tool",
            Self::Event => "event",
            Self::File => "file",
            Self::Files => "files",
            Self::Cwd => "cwd",
            Self::Prompt => "prompt",
        })
    }
}

/// Values an expression is evaluated against.
#[derive(Clone, Debug, Default)]
pub struct Facts<'a> {
    pub tool: &'a str,
    pub event: &'a str,
    pub files: &'a [String],
    pub cwd: &'a str,
    pub prompt: &'a str,
}

impl Facts<'_> {
    fn values(&self, var: Var) -> Vec<&str> {
        match var {
            Var::Tool => vec![self.tool],
            Var::Event => vec![self.event],
            Var::File => vec![self.files.first().map(String::as_str).unwrap_or("")],
            Var::Files => self.files.iter().map(String::as_str).collect(),
            Var::Cwd => vec![self.cwd],
            Var::Prompt => vec![self.prompt],
        }
    }
}

/// A parsed expression.
#[derive(Clone, Debug)]
pub enum Condition {
    Truthy(Var),
    Equals { var: Var, value: String, negate: bool },
    Matches { var: Var, regex: Regex, negate: bool },
    Not(Box<Condition>),
    And(Box<Condition>, Box<Condition>),
    Or(Box<Condition>, Box<Condition>),
}

impl Condition {
    /// Parse an expression.
    pub fn parse(source: &str) -> Result<Self, ConditionError> {
        let tokens = lex(source)?;
        let mut parser = Parser { tokens, pos: 0 };
        let condition = parser.or()?;
        match parser.peek() {
            None => Ok(condition),
            Some((offset, token)) => Err(ConditionError::new(
                *offset,
                format!("unexpected {token}"),
            )),
        }
    }

    /// Evaluate against the given facts.
    pub fn evaluate(&self, facts: &Facts<'_>) -> bool {
        match self {
            Self::Truthy(var) => facts.values(*var).iter().any(|v| !v.is_empty()),
            Self::Equals { var, value, negate } => facts
                .values(*var)
                .iter()
                .any(|v| (v == value) != *negate),
            Self::Matches { var, regex, negate } => facts
                .values(*var)
                .iter()
                .any(|v| regex.is_match(v) != *negate),
            Self::Not(inner) => !inner.evaluate(facts),
            Self::And(a, b) => a.evaluate(facts) && b.evaluate(facts),
            Self::Or(a, b) => a.evaluate(facts) || b.evaluate(facts),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Ident(String),
    Str(String),
    Eq,
    Ne,
    Match,
    NotMatch,
    And,
    Or,
    Not,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(s) => write!(f, "identifier '{s}'"),
            Self::Str(s) => write!(f, "string \"{s}\""),
            Self::Eq => f.write_str("'=='"),
            Self::Ne => f.write_str("'!='"),
            Self::Match => f.write_str("'=~'"),
            Self::NotMatch => f.write_str("'!~'"),
            Self::And => f.write_str("'&&'"),
            Self::Or => f.write_str("'||'"),
            Self::Not => f.write_str("'!'"),
            Self::LParen => f.write_str("'('"),
            Self::RParen => f.write_str("')'"),
        }
    }
}

fn lex(source: &str) -> Result<Vec<(usize, Token)>, ConditionError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        let token = match c {
            c if c.is_whitespace() => continue,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '=' => match chars.next() {
                Some((_, '=')) => Token::Eq,
                Some((_, '~')) => Token::Match,
                _ => return Err(ConditionError::new(offset, "expected '==' or '=~'")),
            },
            '!' => match chars.peek() {
                Some((_, '=')) => {
                    chars.next();
                    Token::Ne
                }
                Some((_, '~')) => {
                    chars.next();
                    Token::NotMatch
                }
                _ => Token::Not,
            },
            '&' => match chars.next() {
                Some((_, '&')) => Token::And,
                _ => return Err(ConditionError::new(offset, "expected '&&'")),
            },
            '|' => match chars.next() {
                Some((_, '|')) => Token::Or,
                _ => return Err(ConditionError::new(offset, "expected '||'")),
            },
            '"' | '\'' => {
                let quote = c;
                let mut value = String::new();
                let mut closed = false;
                while let Some((_, q)) = chars.next() {
                    if q == quote {
                        closed = true;
                        break;
                    }
                    // Only the quote character is escapable; regex escapes pass through.
                    if q == '\\' {
                        if let Some((_, next)) = chars.peek() {
                            if *next == quote {
                                value.push(quote);
                                chars.next();
                                continue;
                            }
                        }
                    }
                    value.push(q);
                }
                if !closed {
                    return Err(ConditionError::new(offset, "unterminated string"));
                }
                Token::Str(value)
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut ident = String::from(c);
                while let Some((_, n)) = chars.peek() {
                    if n.is_ascii_alphanumeric() || *n == '_' {
                        ident.push(*n);
                        chars.next();
                    } else {
                        break;
                    }
                }
                match ident.as_str() {
                    "and" => Token::And,
                    "or" => Token::Or,
                    "not" => Token::Not,
                    _ => Token::Ident(ident),
                }
            }
            other => {
                return Err(ConditionError::new(
                    offset,
                    format!("unexpected character '{other}'"),
                ))
            }
        };
        tokens.push((offset, token));
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<(usize, Token)>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&(usize, Token)> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<(usize, Token)> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn end_offset(&self) -> usize {
        self.tokens
            .last()
            .map(|(offset, _)| offset + 1)
            .unwrap_or(0)
    }

    fn or(&mut self) -> Result<Condition, ConditionError> {
        let mut left = self.and()?;
        while matches!(self.peek(), Some((_, Token::Or))) {
            self.next();
            let right = self.and()?;
            left = Condition::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn and(&mut self) -> Result<Condition, ConditionError> {
        let mut left = self.unary()?;
        while matches!(self.peek(), Some((_, Token::And))) {
            self.next();
            let right = self.unary()?;
            left = Condition::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Condition, ConditionError> {
        match self.next() {
            Some((_, Token::Not)) => Ok(Condition::Not(Box::new(self.unary()?))),
            Some((offset, Token::LParen)) => {
                let inner = self.or()?;
                match self.next() {
                    Some((_, Token::RParen)) => Ok(inner),
                    _ => Err(ConditionError::new(offset, "unclosed '('")),
                }
            }
            Some((offset, Token::Ident(name))) => {
                let var = Var::parse(&name).ok_or_else(|| {
                    ConditionError::new(
                        offset,
                        format!(
                            "unknown variable '{name}' (expected tool, event, file, files, cwd, prompt)"
                        ),
                    )
                })?;
                self.comparison(var)
            }
            Some((offset, token)) => Err(ConditionError::new(
                offset,
                format!("unexpected {token}"),
            )),
            None => Err(ConditionError::new(
                self.end_offset(),
                "unexpected end of expression",
            )),
        }
    }

    fn comparison(&mut self, var: Var) -> Result<Condition, ConditionError> {
        let op = match self.peek() {
            Some((_, op @ (Token::Eq | Token::Ne | Token::Match | Token::NotMatch))) => op.clone(),
            _ => return Ok(Condition::Truthy(var)),
        };
        self.next();

        let (offset, value) = match self.next() {
            Some((offset, Token::Str(value))) => (offset, value),
            Some((offset, Token::Ident(value))) => (offset, value),
            Some((offset, token)) => {
                return Err(ConditionError::new(
                    offset,
                    format!("expected a string after {op}, found {token}"),
                ))
            }
            None => {
                return Err(ConditionError::new(
                    self.end_offset(),
                    format!("expected a string after {op}"),
                ))
            }
        };

        Ok(match op {
            Token::Eq | Token::Ne => Condition::Equals {
                var,
                value,
                negate: op == Token::Ne,
            },
            _ => {
                let regex = Regex::new(&value)
                    .map_err(|e| ConditionError::new(offset, format!("invalid regex: {e}")))?;
                Condition::Matches {
                    var,
                    regex,
                    negate: op == Token::NotMatch,
                }
            }
        })
    }
}

#[cfg(test)]
#[path = "condition_tests.rs"]
mod tests;
