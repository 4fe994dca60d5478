//! Error types for schema marshalling

use thiserror::Error;

use crate::tags;
use crate::types::Kind;

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Failures raised while building a schema or one of its field fragments
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("the following types are invalid {0:?}")]
    InvalidTypes(Vec<String>),

    #[error("kind [{0:?}] is not supported")]
    UnsupportedKind(Kind),

    #[error("validation [{0}] requires a value")]
    MissingValue(String),

    #[error("validation [{0}] does not need a value")]
    UnexpectedValue(String),

    #[error("invalid validation value: [{0}]")]
    UnknownDirective(String),

    #[error("invalid value for [{directive}]: {source}")]
    InvalidNumber {
        directive: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("invalid [min,max] values, min ({min}) can not be larger than max ({max})")]
    MinAboveMax { min: f64, max: f64 },

    #[error("could not derive an element template from an empty slice")]
    EmptySlice,

    #[error("struct nesting exceeds {0} levels")]
    DepthExceeded(usize),

    #[error("a validation schema can only be marshalled from a struct shape")]
    NotAStruct,
}

/// A non-fatal, per-field failure.
///
/// The affected field contributes no property and no required entry; the
/// rest of the traversal is unaffected. Callers are expected to log these.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("[{name}]: {source}")]
pub struct FieldWarning {
    name: String,
    tag: String,
    #[source]
    source: SchemaError,
}

impl FieldWarning {
    pub(crate) fn new(tag: impl Into<String>, name: impl Into<String>, source: SchemaError) -> Self {
        Self {
            tag: tag.into(),
            name: name.into(),
            source,
        }
    }

    /// Declared name of the field that was dropped.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved tag of the field that was dropped.
    ///
    /// If no tag was resolved before the failure, falls back to the declared
    /// name with its first character lower-cased.
    pub fn tag(&self) -> String {
        if self.tag.is_empty() {
            tags::resolve_name("", "", &self.name).0
        } else {
            self.tag.clone()
        }
    }

    /// The underlying failure.
    pub fn error(&self) -> &SchemaError {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_display() {
        let warning = FieldWarning::new("tag", "Tag", SchemaError::EmptySlice);
        assert_eq!(
            warning.to_string(),
            "[Tag]: could not derive an element template from an empty slice"
        );
        assert_eq!(warning.tag(), "tag");
        assert_eq!(warning.name(), "Tag");
    }

    #[test]
    fn test_warning_tag_fallback() {
        let warning = FieldWarning::new("", "Tag", SchemaError::EmptySlice);
        assert_eq!(warning.tag(), "tag");
        assert_eq!(warning.name(), "Tag");
    }
}
