//! Type expressions as written in API descriptions.
//!
//! ```text
//! expr := base "?"?
//! base := "Void"
//!       | "List" "(" expr ")"
//!       | "Map" "(" expr "," expr ")"
//!       | "Nullable" "(" expr ")"
//!       | ident ("." ident)?
//! ```

use std::{fmt, str::FromStr};

/// An unresolved type reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Void,
    /// A primitive or user-defined type, optionally namespace-qualified.
    Named {
        namespace: Option<String>,
        name: String,
    },
    List(Box<TypeExpr>),
    Map(Box<TypeExpr>, Box<TypeExpr>),
    Nullable(Box<TypeExpr>),
}

impl TypeExpr {
    fn nullable(inner: TypeExpr) -> Result<Self, String> {
        match inner {
            TypeExpr::Void => Err("Void cannot be nullable".to_string()),
            TypeExpr::Nullable(_) => Err("a nullable type cannot be nullable again".to_string()),
            other => Ok(TypeExpr::Nullable(Box::new(other))),
        }
    }
}

impl FromStr for TypeExpr {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser { src: s, pos: 0 };
        let expr = parser.expr()?;
        parser.skip_ws();
        match parser.peek() {
            None => Ok(expr),
            Some(c) => Err(format!("unexpected '{}' at position {}", c, parser.pos)),
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Void => f.write_str("Void"),
            TypeExpr::Named {
                namespace: Some(ns),
                name,
            } => write!(f, "{}.{}", ns, name),
            TypeExpr::Named {
                namespace: None,
                name,
            } => f.write_str(name),
            TypeExpr::List(inner) => write!(f, "List({})", inner),
            TypeExpr::Map(key, value) => write!(f, "Map({}, {})", key, value),
            TypeExpr::Nullable(inner) => write!(f, "{}?", inner),
        }
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn expr(&mut self) -> Result<TypeExpr, String> {
        let base = self.base()?;
        self.skip_ws();
        if self.eat('?') {
            TypeExpr::nullable(base)
        } else {
            Ok(base)
        }
    }

    fn base(&mut self) -> Result<TypeExpr, String> {
        self.skip_ws();
        let ident = self.ident()?;
        self.skip_ws();

        match ident {
            "Void" => Ok(TypeExpr::Void),
            "List" if self.peek() == Some('(') => {
                self.expect('(')?;
                let inner = self.expr()?;
                self.expect(')')?;
                Ok(TypeExpr::List(Box::new(inner)))
            }
            "Map" if self.peek() == Some('(') => {
                self.expect('(')?;
                let key = self.expr()?;
                self.expect(',')?;
                let value = self.expr()?;
                self.expect(')')?;
                Ok(TypeExpr::Map(Box::new(key), Box::new(value)))
            }
            "Nullable" if self.peek() == Some('(') => {
                self.expect('(')?;
                let inner = self.expr()?;
                self.expect(')')?;
                TypeExpr::nullable(inner)
            }
            _ if self.eat('.') => {
                let name = self.ident()?;
                Ok(TypeExpr::Named {
                    namespace: Some(ident.to_string()),
                    name: name.to_string(),
                })
            }
            _ => Ok(TypeExpr::Named {
                namespace: None,
                name: ident.to_string(),
            }),
        }
    }

    fn ident(&mut self) -> Result<&'a str, String> {
        let rest = &self.src[self.pos..];
        let len = rest
            .char_indices()
            .find(|&(i, c)| {
                !(c.is_ascii_alphabetic() || c == '_' || (i > 0 && c.is_ascii_digit()))
            })
            .map_or(rest.len(), |(i, _)| i);
        if len == 0 {
            return Err(match rest.chars().next() {
                Some(c) => format!("expected a type name at position {}, found '{}'", self.pos, c),
                None => "expected a type name".to_string(),
            });
        }
        self.pos += len;
        Ok(&rest[..len])
    }

    fn expect(&mut self, c: char) -> Result<(), String> {
        self.skip_ws();
        if self.eat(c) {
            Ok(())
        } else {
            Err(match self.peek() {
                Some(found) => format!("expected '{}' at position {}, found '{}'", c, self.pos, found),
                None => format!("expected '{}'", c),
            })
        }
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn skip_ws(&mut self) {
        let rest = &self.src[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }
}
