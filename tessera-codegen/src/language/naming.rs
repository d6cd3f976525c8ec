//! Naming conventions for different programming languages.

/// Language-specific naming conventions.
///
/// Defines how to transform IR names into identifiers and handle reserved words.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Transform a type name to a class name (e.g., "get_metadata_arg" -> "GetMetadataArg")
    pub type_case: fn(&str) -> String,
    /// Transform a field, route or tag name to a variable/function name
    pub var_case: fn(&str) -> String,
    /// List of reserved words in the language
    pub reserved_words: &'static [&'static str],
    /// Escape a reserved word (e.g., "from" -> "from_" in Python)
    pub escape_reserved: fn(&str) -> String,
}

impl NamingConvention {
    /// Check if a name is a reserved word.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// Get a safe name, escaping if necessary.
    pub fn safe_name(&self, name: &str) -> String {
        if self.is_reserved(name) {
            (self.escape_reserved)(name)
        } else {
            name.to_string()
        }
    }

    /// Transform and make safe for use as a type name.
    pub fn type_name(&self, name: &str) -> String {
        let transformed = (self.type_case)(name);
        self.safe_name(&transformed)
    }

    /// Transform and make safe for use as a variable or function name.
    pub fn var_name(&self, name: &str) -> String {
        let transformed = (self.var_case)(name);
        self.safe_name(&transformed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upper(s: &str) -> String {
        s.to_uppercase()
    }

    fn lower(s: &str) -> String {
        s.to_lowercase()
    }

    fn suffix(s: &str) -> String {
        format!("{}_", s)
    }

    const NAMING: NamingConvention = NamingConvention {
        type_case: upper,
        var_case: lower,
        reserved_words: &["if", "ELSE"],
        escape_reserved: suffix,
    };

    #[test]
    fn test_safe_name() {
        assert!(NAMING.is_reserved("if"));
        assert_eq!(NAMING.safe_name("if"), "if_");
        assert_eq!(NAMING.safe_name("then"), "then");
    }

    #[test]
    fn test_reserved_check_after_transform() {
        assert_eq!(NAMING.var_name("IF"), "if_");
        assert_eq!(NAMING.type_name("else"), "ELSE_");
        assert_eq!(NAMING.type_name("meta"), "META");
    }
}
