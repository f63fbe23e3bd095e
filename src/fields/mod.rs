//! # Field DSL Module
//!
//! Parses the compact field definitions passed to `crudgen generate --fields`.
//!
//! ## Grammar
//!
//! ```text
//! fields  := clause ("," clause)*
//! clause  := name (":" type (":" option)*)?
//! ```
//!
//! - `name` is trimmed; a clause whose name is empty is dropped under
//!   [`ParsePolicy::Lenient`] and rejected under [`ParsePolicy::Strict`]
//! - `type` defaults to `string` when absent or blank
//! - options are kept in order and never validated; consumers ignore the ones they
//!   do not recognise
//!
//! There is no escaping: a literal `,` or `:` cannot appear inside a value.
//!
//! ## Example
//!
//! ```rust
//! use crudgen::fields::parse_fields;
//!
//! let fields = parse_fields(Some("title:string:nullable,views:integer"));
//! assert_eq!(fields.len(), 2);
//! assert!(fields[0].has_option("nullable"));
//! assert_eq!(fields[1].field_type, "integer");
//! ```

use serde::Serialize;


/// Type assigned to a field when the clause omits one
pub const DEFAULT_FIELD_TYPE: &str = "string";

/// One parsed field clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Column / attribute name, never empty
    pub name: String,
    /// Storage type as written in the DSL (`string`, `text`, `integer`, ...)
    #[serde(rename = "type")]
    pub field_type: String,
    /// Modifier flags such as `nullable` or `unique`, in input order
    pub options: Vec<String>,
}

impl FieldSpec {
    /// Build a field with no options
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            options: Vec::new(),
        }
    }

    /// Add an option flag (builder style, mostly for tests and callers building specs by hand)
    pub fn with_option(mut self, option: impl Into<String>) -> Self {
        self.options.push(option.into());
        self
    }

    /// Whether the option flag is present
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    /// Whether the field's type is one of `types`
    pub fn is_type(&self, types: &[&str]) -> bool {
        types.contains(&self.field_type.as_str())
    }
}

/// How clauses with an empty name are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParsePolicy {
    /// Drop the clause silently
    #[default]
    Lenient,
    /// Fail with [`FieldParseError::EmptyName`]
    Strict,
}

/// Error raised by [`parse_fields_with`] under [`ParsePolicy::Strict`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldParseError {
    /// A clause had no name once trimmed
    #[error("field clause #{position} (`{clause}`) has an empty name")]
    EmptyName {
        /// The raw clause text
        clause: String,
        /// 1-based position of the clause in the input
        position: usize,
    },
}

/// Parse a field DSL string leniently.
///
/// `None` and `""` both yield an empty list.
pub fn parse_fields(input: Option<&str>) -> Vec<FieldSpec> {
    // lenient parsing never errors
    parse_fields_with(input, ParsePolicy::Lenient).unwrap_or_default()
}

/// Parse a field DSL string under the given policy.
///
/// # Errors
///
/// Under [`ParsePolicy::Strict`], returns the first clause whose name is empty.
pub fn parse_fields_with(
    input: Option<&str>,
    policy: ParsePolicy,
) -> Result<Vec<FieldSpec>, FieldParseError> {
    let mut fields = Vec::new();
    for (index, clause) in clauses(input) {
        match parse_clause(clause) {
            Some(field) => fields.push(field),
            None if policy == ParsePolicy::Strict => {
                return Err(FieldParseError::EmptyName {
                    clause: clause.to_string(),
                    position: index + 1,
                });
            }
            None => {
                tracing::debug!(clause, position = index + 1, "dropping field clause with empty name");
            }
        }
    }
    Ok(fields)
}

fn clauses(input: Option<&str>) -> impl Iterator<Item = (usize, &str)> {
    input
        .filter(|s| !s.is_empty())
        .into_iter()
        .flat_map(|s| s.split(','))
        .enumerate()
}

fn parse_clause(clause: &str) -> Option<FieldSpec> {
    let mut segments = clause.trim().split(':');
    let name = segments.next().unwrap_or_default().trim();
    if name.is_empty() {
        return None;
    }
    let field_type = match segments.next().map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => DEFAULT_FIELD_TYPE,
    };
    let options = segments.map(|o| o.trim().to_string()).collect();
    Some(FieldSpec {
        name: name.to_string(),
        field_type: field_type.to_string(),
        options,
    })
}
