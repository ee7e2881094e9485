//! Named SQL parameters.
//!
//! Repositories write `:name` placeholders and pass a [`NamedParams`] map; the
//! query is rewritten to Postgres positional `$n` placeholders before binding.
//! `::type` casts and text inside single-quoted literals, double-quoted
//! identifiers and comments are left untouched.

use std::fmt;

use crate::infrastructure::ports::RepoError;

/// A value bound to a named parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(i32),
    BigInt(i64),
    Real(f32),
    Text(String),
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::BigInt(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::BigInt(value)
    }
}

impl From<u32> for SqlValue {
    fn from(value: u32) -> Self {
        Self::BigInt(i64::from(value))
    }
}

impl From<f32> for SqlValue {
    fn from(value: f32) -> Self {
        Self::Real(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Parameter map for one statement, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedParams(Vec<(&'static str, SqlValue)>);

impl NamedParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or overwrite a parameter.
    pub fn bind(mut self, name: &'static str, value: impl Into<SqlValue>) -> Self {
        let value = value.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&SqlValue> {
        self.0
            .iter()
            .find(|(existing, _)| *existing == name)
            .map(|(_, value)| value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NamedParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}

/// A statement rewritten to positional placeholders with its values in bind order.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionalQuery {
    sql: String,
    values: Vec<SqlValue>,
}

impl PositionalQuery {
    /// Rewrite `query`, resolving every `:name` against `params`.
    ///
    /// A name used more than once maps to the same `$n`. Parameters that the query
    /// does not mention are ignored.
    ///
    /// # Errors
    ///
    /// Returns `RepoError::Database` when the query names a parameter missing from
    /// `params`, or leaves a quote or block comment unterminated.
    pub fn parse(query: &str, params: &NamedParams) -> Result<Self, RepoError> {
        let mut sql = String::with_capacity(query.len());
        let mut order: Vec<&str> = Vec::new();
        let mut values = Vec::new();
        let mut chars = query.char_indices().peekable();

        while let Some((start, c)) = chars.next() {
            match c {
                '\'' | '"' => {
                    sql.push(c);
                    let mut closed = false;
                    for (_, inner) in chars.by_ref() {
                        sql.push(inner);
                        if inner == c {
                            closed = true;
                            break;
                        }
                    }
                    // A doubled quote ('') reopens the literal on the next iteration.
                    if !closed {
                        return Err(RepoError::database("named_query", "unterminated quote"));
                    }
                }
                '-' if matches!(chars.peek(), Some((_, '-'))) => {
                    sql.push(c);
                    for (_, inner) in chars.by_ref() {
                        sql.push(inner);
                        if inner == '\n' {
                            break;
                        }
                    }
                }
                '/' if matches!(chars.peek(), Some((_, '*'))) => {
                    sql.push(c);
                    let mut previous = '\0';
                    let mut closed = false;
                    for (_, inner) in chars.by_ref() {
                        sql.push(inner);
                        if previous == '*' && inner == '/' {
                            closed = true;
                            break;
                        }
                        previous = inner;
                    }
                    if !closed {
                        return Err(RepoError::database(
                            "named_query",
                            "unterminated block comment",
                        ));
                    }
                }
                ':' => match chars.peek() {
                    Some((_, ':')) => {
                        sql.push_str("::");
                        chars.next();
                    }
                    Some((_, next)) if next.is_ascii_alphabetic() || *next == '_' => {
                        let mut end = start + 1;
                        while let Some((i, next)) = chars.peek() {
                            if next.is_ascii_alphanumeric() || *next == '_' {
                                end = i + next.len_utf8();
                                chars.next();
                            } else {
                                break;
                            }
                        }
                        let name = &query[start + 1..end];
                        let position = match order.iter().position(|known| *known == name) {
                            Some(index) => index + 1,
                            None => {
                                let value = params.get(name).ok_or_else(|| {
                                    RepoError::database(
                                        "named_query",
                                        format!("missing value for parameter :{name}"),
                                    )
                                })?;
                                order.push(name);
                                values.push(value.clone());
                                order.len()
                            }
                        };
                        sql.push('$');
                        sql.push_str(&position.to_string());
                    }
                    _ => sql.push(c),
                },
                _ => sql.push(c),
            }
        }

        Ok(Self { sql, values })
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    pub fn into_parts(self) -> (String, Vec<SqlValue>) {
        (self.sql, self.values)
    }
}
