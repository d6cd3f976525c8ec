//! Python-specific naming conventions.

use tessera_codegen::language::NamingConvention;
use tessera_core::{to_pascal_case, to_snake_case};

fn escape_python_reserved(name: &str) -> String {
    format!("{}_", name)
}

/// Python naming conventions.
pub const PYTHON_NAMING: NamingConvention = NamingConvention {
    // Classes use PascalCase
    type_case: to_pascal_case,
    // Variables, functions and union tags use snake_case
    var_case: to_snake_case,
    reserved_words: &[
        "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
        "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
        "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
        "try", "while", "with", "yield",
    ],
    escape_reserved: escape_python_reserved,
};

/// Name of the types module holding a namespace's classes.
pub(crate) fn namespace_name(name: &str) -> String {
    PYTHON_NAMING.safe_name(name)
}

pub(crate) fn class_name(name: &str) -> String {
    PYTHON_NAMING.type_name(name)
}

pub(crate) fn var_name(name: &str) -> String {
    PYTHON_NAMING.var_name(name)
}

/// Function name for a route version: `get_metadata`, `get_metadata_v2`.
pub fn route_function_name(name: &str, version: u32) -> String {
    let name = to_snake_case(name);
    if version > 1 {
        format!("{}_v{}", name, version)
    } else {
        name
    }
}

/// Client method name for a route: `files_get_metadata`, `files_download_to_file_v2`.
///
/// Depends only on its arguments, so doc references to a route resolve to
/// the same name the method is declared with.
pub fn route_method_name(namespace: &str, route: &str, version: u32, suffix: &str) -> String {
    format!(
        "{}_{}",
        to_snake_case(namespace),
        route_function_name(&format!("{}{}", route, suffix), version)
    )
}
