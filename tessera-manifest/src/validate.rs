//! Validation context and utilities for API descriptions.

use std::sync::Arc;

use miette::SourceSpan;

use crate::{Result, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// This struct encapsulates the source content, filename, and current path
/// through the API description, making it easier to pass validation context
/// through nested definitions.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "api.toml");
/// ctx.validate_name("files", "namespace")?;
///
/// // For nested validation
/// let nested = ctx.push("files").push("Metadata");
/// nested.validate_name("path_lower", "field")?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    /// Path segments for nested validation (e.g., ["files", "Metadata"])
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    /// Create a new parse context with the given source and filename.
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        self.source.src()
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        self.source.filename()
    }

    /// Get the source context for error creation.
    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut new_path = self.path.clone();
        new_path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path: new_path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages.
    ///
    /// For example: "field in 'files.Metadata'" or just "namespace" if no path.
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Validate that a name is a valid identifier.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        if let Some(reason) = validate_identifier(name) {
            return Err(self
                .source
                .invalid_identifier_error(name, self.context_for(kind), reason));
        }
        Ok(())
    }
}

/// Find the span of a definition's name in the TOML source.
///
/// Definitions are array-of-tables entries, so the name appears as
/// `name = "value"` (or with single quotes).
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    find_all_name_spans(src, name).into_iter().next()
}

/// Every `name = "value"` occurrence of `name`, in source order.
pub(crate) fn find_all_name_spans(src: &str, name: &str) -> Vec<SourceSpan> {
    let mut spans = Vec::new();
    for pattern in [format!("name = \"{}\"", name), format!("name = '{}'", name)] {
        let mut from = 0;
        while let Some(pos) = src[from..].find(&pattern) {
            let start = from + pos;
            // The name starts after 'name = "' (8 characters)
            spans.push(SourceSpan::from((start + 8, name.len())));
            from = start + pattern.len();
        }
    }
    spans.sort_by_key(|span| span.offset());
    spans
}

/// Find `text` where it makes up a whole quoted string.
pub(crate) fn find_quoted_span(src: &str, text: &str) -> Option<SourceSpan> {
    [format!("\"{}\"", text), format!("'{}'", text)]
        .iter()
        .find_map(|pattern| src.find(pattern.as_str()))
        .map(|pos| SourceSpan::from((pos + 1, text.len())))
}

/// Find a type name used inside a type expression, e.g. `Metadata` in
/// `"List(Metadata)?"`.
pub(crate) fn find_type_ref_span(src: &str, name: &str) -> Option<SourceSpan> {
    const BEFORE: &[u8] = b"\"'(, .";
    const AFTER: &[u8] = b"\"'),? ";

    let bytes = src.as_bytes();
    let mut from = 0;
    while let Some(pos) = src[from..].find(name) {
        let start = from + pos;
        let end = start + name.len();
        let before_ok = start > 0 && BEFORE.contains(&bytes[start - 1]);
        let after_ok = end < bytes.len() && AFTER.contains(&bytes[end]);
        if before_ok && after_ok {
            return Some(SourceSpan::from((start, name.len())));
        }
        from = end;
    }
    None
}

/// Validate that a name is a valid identifier.
/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    // First character must be a letter or underscore
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '_')) {
        return Some("name must contain only letters, numbers, and underscores");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        assert!(validate_identifier("files").is_none());
        assert!(validate_identifier("get_metadata").is_none());
        assert!(validate_identifier("GetMetadataArg").is_none());
        assert!(validate_identifier("_private").is_none());
        assert!(validate_identifier("upload_session_v2").is_none());
    }

    #[test]
    fn test_invalid_identifiers() {
        assert!(validate_identifier("").is_some());
        assert!(validate_identifier("1st").is_some());
        assert!(validate_identifier("get-metadata").is_some());
        assert!(validate_identifier("files.list").is_some());
        assert!(validate_identifier("hello world").is_some());
    }

    #[test]
    fn test_find_name_span() {
        let src = r#"[[namespaces]]
name = "files""#;
        let span = find_name_span(src, "files").unwrap();
        assert_eq!(span.offset(), 23);
        assert_eq!(span.len(), 5);
    }

    #[test]
    fn test_find_name_span_single_quotes() {
        let src = "[[namespaces.routes]]\nname = 'upload'";
        let span = find_name_span(src, "upload").unwrap();
        assert_eq!(span.offset(), 30);
    }

    #[test]
    fn test_find_name_span_ignores_other_keys() {
        let src = r#"doc = "files"
type = "files""#;
        assert!(find_name_span(src, "files").is_none());
    }

    #[test]
    fn test_find_all_name_spans() {
        let src = "name = \"a\"\nname = 'a'\nname = \"a\"\n";
        let offsets: Vec<usize> = find_all_name_spans(src, "a")
            .iter()
            .map(|s| s.offset())
            .collect();
        assert_eq!(offsets, [8, 19, 30]);
    }

    #[test]
    fn test_find_quoted_span() {
        let src = r#"arg = "List(Foo"
result = "Foo""#;
        let span = find_quoted_span(src, "Foo").unwrap();
        assert_eq!(span.offset(), 27);
        assert!(find_quoted_span(src, "Bar").is_none());
    }

    #[test]
    fn test_find_type_ref_span() {
        let src = r#"doc = "Metadataless"
type = "List(Metadata)?""#;
        let span = find_type_ref_span(src, "Metadata").unwrap();
        assert_eq!(span.offset(), 34);
        assert_eq!(span.len(), 8);
    }

    #[test]
    fn test_parse_context_push() {
        let ctx = ParseContext::new("", "api.toml");
        let nested = ctx.push("files").push("Metadata");
        assert_eq!(nested.path_string(), "files.Metadata");
        assert_eq!(nested.context_for("field"), "field in 'files.Metadata'");
        assert_eq!(ctx.context_for("namespace"), "namespace");
    }

    #[test]
    fn test_parse_context_validate_name() {
        let ctx = ParseContext::new("[[namespaces]]\nname = \"bad-name\"", "api.toml");
        assert!(ctx.validate_name("files", "namespace").is_ok());

        let err = ctx.validate_name("bad-name", "namespace").unwrap_err();
        assert_eq!(err.to_string(), "invalid namespace name 'bad-name'");
    }
}
