//! Named placeholder rewriting.
//!
//! Report queries refer to parameters by name (`?status`, `?order.code`).
//! SQLite binds by position, so the query is rewritten to plain `?` markers
//! and the names are returned in binding order. A name used twice is bound
//! twice.
//!
//! Quoted strings, quoted identifiers and comments are copied verbatim.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::PlaceholderError;

/// A query rewritten for positional binding.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedQuery {
  pub sql: String,
  /// Placeholder names in the order they must be bound.
  pub names: Vec<String>,
}

pub fn bind_named(query: &str) -> Result<NamedQuery, PlaceholderError> {
  let mut sql = String::with_capacity(query.len());
  let mut names = Vec::new();
  let mut chars = query.char_indices().peekable();

  while let Some((position, c)) = chars.next() {
    match c {
      '\'' | '"' | '`' => {
        sql.push(c);
        copy_until(&mut chars, &mut sql, |ch, _| ch == c);
      }
      '[' => {
        sql.push(c);
        copy_until(&mut chars, &mut sql, |ch, _| ch == ']');
      }
      '-' if matches!(chars.peek(), Some((_, '-'))) => {
        sql.push(c);
        copy_until(&mut chars, &mut sql, |ch, _| ch == '\n');
      }
      '/' if matches!(chars.peek(), Some((_, '*'))) => {
        sql.push(c);
        copy_until(&mut chars, &mut sql, |ch, prev| prev == Some('*') && ch == '/');
      }
      '?' => match chars.peek() {
        Some((_, next)) if is_name_start(*next) => {
          names.push(read_name(&mut chars));
          sql.push('?');
        }
        _ => return Err(PlaceholderError::Unnamed { position }),
      },
      _ => sql.push(c),
    }
  }

  Ok(NamedQuery { sql, names })
}

/// Copy characters up to and including the first one accepted by `end`.
fn copy_until(
  chars: &mut Peekable<CharIndices<'_>>,
  sql: &mut String,
  end: impl Fn(char, Option<char>) -> bool,
) {
  let mut prev = None;
  for (_, c) in chars.by_ref() {
    sql.push(c);
    if end(c, prev) {
      return;
    }
    prev = Some(c);
  }
}

fn read_name(chars: &mut Peekable<CharIndices<'_>>) -> String {
  let mut name = String::new();
  while let Some((_, c)) = chars.peek().copied() {
    if c.is_ascii_alphanumeric() || c == '_' {
      name.push(c);
      chars.next();
    } else if c == '.' && followed_by_name(chars) {
      name.push(c);
      chars.next();
    } else {
      break;
    }
  }
  name
}

fn followed_by_name(chars: &Peekable<CharIndices<'_>>) -> bool {
  let mut lookahead = chars.clone();
  lookahead.next();
  matches!(lookahead.peek(), Some((_, c)) if is_name_start(*c))
}

fn is_name_start(c: char) -> bool {
  c.is_ascii_alphabetic() || c == '_'
}
