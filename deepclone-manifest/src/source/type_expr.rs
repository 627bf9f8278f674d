//! Declared member types.
//!
//! A small recursive-descent parser over the C# type syntax a member
//! declaration can carry: keywords, dotted names, `global::`, generic
//! arguments, nullable `?` and array `[]` suffixes.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Built-in keyword types. These never bind to a user declaration.
pub const BUILTIN_TYPES: &[&str] = &[
    "bool", "byte", "sbyte", "char", "decimal", "double", "float", "int", "uint", "nint",
    "nuint", "long", "ulong", "short", "ushort", "object", "string", "dynamic",
];

/// A parsed type expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// A keyword type such as `int` or `string`.
    Builtin(String),
    /// A possibly-qualified, possibly-generic name.
    Named {
        /// Written with a `global::` prefix: bound from the root namespace
        /// only.
        global: bool,
        path: Vec<String>,
        args: Vec<TypeExpr>,
    },
    /// `T?`
    Nullable(Box<TypeExpr>),
    /// `T[]`
    Array(Box<TypeExpr>),
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Builtin(name) => f.write_str(name),
            TypeExpr::Named { global, path, args } => {
                if *global {
                    f.write_str("global::")?;
                }
                f.write_str(&path.join("."))?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            TypeExpr::Nullable(inner) => write!(f, "{}?", inner),
            TypeExpr::Array(inner) => write!(f, "{}[]", inner),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason} (at offset {offset})")]
pub struct TypeExprError {
    pub reason: String,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    Dot,
    ColonColon,
    Lt,
    Gt,
    Comma,
    Question,
    LBracket,
    RBracket,
}

fn tokenize(input: &str) -> Result<Vec<(usize, Token)>, TypeExprError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        let token = match c {
            c if c.is_whitespace() => continue,
            '.' => Token::Dot,
            '<' => Token::Lt,
            '>' => Token::Gt,
            ',' => Token::Comma,
            '?' => Token::Question,
            '[' => Token::LBracket,
            ']' => Token::RBracket,
            ':' => match chars.next() {
                Some((_, ':')) => Token::ColonColon,
                _ => {
                    return Err(TypeExprError {
                        reason: "expected '::'".into(),
                        offset,
                    });
                }
            },
            c if c.is_alphabetic() || c == '_' || c == '@' => {
                let mut ident = String::new();
                if c != '@' {
                    ident.push(c);
                }
                while let Some(&(_, next)) = chars.peek() {
                    if next.is_alphanumeric() || next == '_' {
                        ident.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                Token::Ident(ident)
            }
            other => {
                return Err(TypeExprError {
                    reason: format!("unexpected character '{}'", other),
                    offset,
                });
            }
        };
        tokens.push((offset, token));
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<(usize, Token)>,
    pos: usize,
    end: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(_, t)| t)
    }

    fn offset(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.end, |(o, _)| *o)
    }

    fn error(&self, reason: impl Into<String>) -> TypeExprError {
        TypeExprError {
            reason: reason.into(),
            offset: self.offset(),
        }
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn ident(&mut self) -> Result<String, TypeExprError> {
        match self.tokens.get(self.pos) {
            Some((_, Token::Ident(name))) if !name.is_empty() => {
                let name = name.clone();
                self.pos += 1;
                Ok(name)
            }
            _ => Err(self.error("expected a type name")),
        }
    }

    fn parse_type(&mut self) -> Result<TypeExpr, TypeExprError> {
        let mut ty = self.parse_named()?;
        loop {
            if self.eat(&Token::Question) {
                ty = TypeExpr::Nullable(Box::new(ty));
            } else if self.eat(&Token::LBracket) {
                if !self.eat(&Token::RBracket) {
                    return Err(self.error("expected ']'"));
                }
                ty = TypeExpr::Array(Box::new(ty));
            } else {
                return Ok(ty);
            }
        }
    }

    fn parse_named(&mut self) -> Result<TypeExpr, TypeExprError> {
        let mut first = self.ident()?;
        let global = first == "global" && self.eat(&Token::ColonColon);
        if global {
            first = self.ident()?;
        }

        let mut path = vec![first];
        while self.eat(&Token::Dot) {
            path.push(self.ident()?);
        }

        let mut args = Vec::new();
        if self.eat(&Token::Lt) {
            loop {
                args.push(self.parse_type()?);
                if self.eat(&Token::Comma) {
                    continue;
                }
                if self.eat(&Token::Gt) {
                    break;
                }
                return Err(self.error("expected ',' or '>'"));
            }
        }

        if !global && path.len() == 1 && args.is_empty() && BUILTIN_TYPES.contains(&path[0].as_str())
        {
            return Ok(TypeExpr::Builtin(path.remove(0)));
        }

        Ok(TypeExpr::Named { global, path, args })
    }
}

impl FromStr for TypeExpr {
    type Err = TypeExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser {
            tokens: tokenize(s)?,
            pos: 0,
            end: s.len(),
        };
        let ty = parser.parse_type()?;
        if parser.pos != parser.tokens.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(ty)
    }
}
