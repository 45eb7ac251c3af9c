//! Allow-list checks for the pieces of a statement that cannot be bound as parameters.

use crate::dbms::data_action::Parameters;
use crate::dbms::query::{QueryError, QueryResult};

/// Sequences which end a statement or open a comment.
const FORBIDDEN_SEQUENCES: [&str; 4] = [";", "--", "/*", "*/"];

/// Checks that `name` is a plain identifier: `[A-Za-z_][A-Za-z0-9_]*`.
pub fn identifier(name: &str) -> QueryResult<()> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_');

    if valid {
        Ok(())
    } else {
        Err(QueryError::InvalidIdentifier(name.to_string()))
    }
}

/// Checks a selected column: `*`, an identifier, or a dotted path of identifiers
/// optionally ending with `*` (`users.id`, `users.*`).
pub fn selected_column(name: &str) -> QueryResult<()> {
    if name == "*" {
        return Ok(());
    }

    let segments = name.split('.').collect::<Vec<_>>();
    let (last, qualifiers) = segments
        .split_last()
        .ok_or_else(|| QueryError::InvalidIdentifier(name.to_string()))?;

    for qualifier in qualifiers {
        identifier(qualifier).map_err(|_| QueryError::InvalidIdentifier(name.to_string()))?;
    }

    if *last == "*" && !qualifiers.is_empty() {
        return Ok(());
    }
    identifier(last).map_err(|_| QueryError::InvalidIdentifier(name.to_string()))
}

/// Checks a free-form fragment (clause condition or column definition).
pub fn fragment(fragment: &str) -> QueryResult<()> {
    if fragment.trim().is_empty() {
        return Err(QueryError::EmptyFragment);
    }

    if FORBIDDEN_SEQUENCES
        .iter()
        .any(|sequence| fragment.contains(sequence))
    {
        return Err(QueryError::ForbiddenFragment(fragment.to_string()));
    }

    Ok(())
}

/// Returns the named placeholders (`:name`) referenced by `sql`, in order of appearance.
///
/// Casts such as `value::text` are not placeholders.
pub fn placeholders(sql: &str) -> Vec<&str> {
    let bytes = sql.as_bytes();
    let mut found = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b':' {
            i += 1;
            continue;
        }
        if bytes.get(i + 1) == Some(&b':') {
            i += 2;
            continue;
        }
        if i > 0 && bytes[i - 1] == b':' {
            i += 1;
            continue;
        }

        let start = i + 1;
        let mut end = start;
        while end < bytes.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_') {
            end += 1;
        }
        if end > start && !bytes[start].is_ascii_digit() {
            found.push(&sql[start..end]);
        }
        i = end.max(start);
    }

    found
}

/// Returns the placeholders of `sql` which have no value in `parameters`.
pub fn missing_parameters<'a>(sql: &'a str, parameters: &Parameters) -> Vec<&'a str> {
    let mut missing = Vec::new();
    for name in placeholders(sql) {
        if !parameters.contains_key(name) && !missing.contains(&name) {
            missing.push(name);
        }
    }
    missing
}
