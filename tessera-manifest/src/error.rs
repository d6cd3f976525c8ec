use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::validate::{find_all_name_spans, find_name_span, find_quoted_span, find_type_ref_span};

/// Result type for API loading (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename, reducing parameter passing
/// in error factory functions.
///
/// # Example
///
/// ```ignore
/// let ctx = SourceContext::new(content, "api.toml");
/// ctx.validation_error("namespace has no name");
/// ctx.unknown_type_error("Metadata", "files");
/// ```
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error without a span.
    pub fn validation_error(&self, message: impl Into<String>) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: None,
            message: message.into(),
        })
    }

    /// Create a validation error pointing at the definition of `name`.
    pub fn validation_error_for(&self, message: impl Into<String>, name: &str) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: find_name_span(&self.src, name),
            message: message.into(),
        })
    }

    /// Create an invalid identifier error.
    pub fn invalid_identifier_error(
        &self,
        name: impl Into<String>,
        context: impl Into<String>,
        reason: impl Into<String>,
    ) -> Box<Error> {
        let name = name.into();
        Box::new(Error::InvalidIdentifier {
            src: self.named_source(),
            span: find_name_span(&self.src, &name),
            name,
            context: context.into(),
            reason: reason.into(),
        })
    }

    /// Create an error for a reference to a type that is not defined.
    pub fn unknown_type_error(&self, name: impl Into<String>, namespace: &str) -> Box<Error> {
        let name = name.into();
        Box::new(Error::UnknownType {
            src: self.named_source(),
            span: find_type_ref_span(&self.src, &name),
            name,
            namespace: namespace.to_string(),
        })
    }

    /// Create an error for a type expression that does not parse.
    pub fn invalid_type_expr_error(
        &self,
        expr: impl Into<String>,
        reason: impl Into<String>,
    ) -> Box<Error> {
        let expr = expr.into();
        Box::new(Error::InvalidTypeExpr {
            src: self.named_source(),
            span: find_quoted_span(&self.src, &expr),
            expr,
            reason: reason.into(),
        })
    }

    /// Create an error for a name defined twice in the same scope.
    pub fn duplicate_name_error(
        &self,
        kind: impl Into<String>,
        name: impl Into<String>,
        scope: impl Into<String>,
    ) -> Box<Error> {
        let name = name.into();
        let spans = find_all_name_spans(&self.src, &name);
        Box::new(Error::DuplicateName {
            src: self.named_source(),
            first_span: spans.first().copied(),
            second_span: spans.get(1).copied(),
            kind: kind.into(),
            name,
            scope: scope.into(),
        })
    }

    /// Create an error for a type that contains itself.
    pub fn recursive_type_error(&self, cycle: &[String]) -> Box<Error> {
        let name = cycle.first().cloned().unwrap_or_default();
        let unqualified = name.rsplit('.').next().unwrap_or(&name).to_string();
        Box::new(Error::RecursiveType {
            src: self.named_source(),
            span: find_name_span(&self.src, &unqualified),
            name,
            cycle: cycle.join(" -> "),
        })
    }

    /// Create an error for a default value that does not fit its field.
    pub fn invalid_default_error(
        &self,
        owner: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Box<Error> {
        let field = field.into();
        Box::new(Error::InvalidDefault {
            src: self.named_source(),
            span: find_name_span(&self.src, &field),
            owner: owner.into(),
            field,
            reason: reason.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("check that the API description exists and is readable"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse API description")]
    #[diagnostic(code(tessera::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(tessera::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("invalid {context} name '{name}'")]
    #[diagnostic(
        code(tessera::invalid_identifier),
        help("{reason}. Use only letters, numbers, and underscores, starting with a letter or underscore.")
    )]
    InvalidIdentifier {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid identifier")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
        reason: String,
    },

    #[error("unknown type '{name}' referenced in namespace '{namespace}'")]
    #[diagnostic(
        code(tessera::unknown_type),
        help(
            "define the type in a [[namespaces.structs]] or [[namespaces.unions]] table, or use a primitive: Boolean, Bytes, Float32, Float64, Int32, Int64, UInt32, UInt64, String, Timestamp"
        )
    )]
    UnknownType {
        #[source_code]
        src: NamedSource<String>,
        #[label("not defined")]
        span: Option<SourceSpan>,
        name: String,
        namespace: String,
    },

    #[error("invalid type expression '{expr}': {reason}")]
    #[diagnostic(
        code(tessera::invalid_type),
        help("type expressions look like 'String', 'List(Metadata)', 'Map(String, Int64)', 'files.Metadata?' or 'Void'")
    )]
    InvalidTypeExpr {
        #[source_code]
        src: NamedSource<String>,
        #[label("{reason}")]
        span: Option<SourceSpan>,
        expr: String,
        reason: String,
    },

    #[error("duplicate {kind} '{name}' in {scope}")]
    #[diagnostic(code(tessera::duplicate_name), help("rename one of the definitions"))]
    DuplicateName {
        #[source_code]
        src: NamedSource<String>,
        #[label("first defined here")]
        first_span: Option<SourceSpan>,
        #[label("defined again here")]
        second_span: Option<SourceSpan>,
        kind: String,
        name: String,
        scope: String,
    },

    #[error("type '{name}' contains itself: {cycle}")]
    #[diagnostic(
        code(tessera::recursive_type),
        help("generated types are plain trees; break the cycle with an identifier field")
    )]
    RecursiveType {
        #[source_code]
        src: NamedSource<String>,
        #[label("part of a cycle")]
        span: Option<SourceSpan>,
        name: String,
        cycle: String,
    },

    #[error("invalid default for field '{field}' of '{owner}': {reason}")]
    #[diagnostic(code(tessera::invalid_default))]
    InvalidDefault {
        #[source_code]
        src: NamedSource<String>,
        #[label("{reason}")]
        span: Option<SourceSpan>,
        owner: String,
        field: String,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_name_labels_both_definitions() {
        let src = "[[namespaces]]\nname = \"files\"\n\n[[namespaces]]\nname = \"files\"\n";
        let ctx = SourceContext::new(src, "api.toml");
        let err = ctx.duplicate_name_error("namespace", "files", "the API");
        assert_eq!(err.to_string(), "duplicate namespace 'files' in the API");
        match *err {
            Error::DuplicateName {
                first_span,
                second_span,
                ..
            } => {
                assert_eq!(first_span.map(|s| s.offset()), Some(23));
                assert_eq!(second_span.map(|s| s.offset()), Some(54));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_recursive_type_message() {
        let ctx = SourceContext::new("", "api.toml");
        let cycle = vec!["files.Node".to_string(), "files.Node".to_string()];
        let err = ctx.recursive_type_error(&cycle);
        assert_eq!(
            err.to_string(),
            "type 'files.Node' contains itself: files.Node -> files.Node"
        );
    }
}
