//! Python literals for default values.

use tessera_ir::Value;

use crate::naming::{class_name, namespace_name, var_name};

/// Render a default value as a Python expression.
///
/// A tag reference points at the union variant constant in the union's own
/// types module, e.g. `files.WriteMode.add`.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => python_float(*f),
        Value::String(s) => python_string(s),
        Value::List(items) => format!(
            "[{}]",
            items.iter().map(render_value).collect::<Vec<_>>().join(", ")
        ),
        Value::TagRef(tag_ref) => format!(
            "{}.{}.{}",
            namespace_name(&tag_ref.union.namespace),
            class_name(&tag_ref.union.name),
            var_name(&tag_ref.tag)
        ),
    }
}

fn python_float(f: f64) -> String {
    if f.is_nan() {
        return "float('nan')".to_string();
    }
    if f.is_infinite() {
        let sign = if f < 0.0 { "-" } else { "" };
        return format!("{}float('inf')", sign);
    }
    let s = f.to_string();
    if s.contains('.') { s } else { format!("{}.0", s) }
}

/// Quote a string the way Python's `repr` does.
///
/// Single quotes are preferred; double quotes are used when the string
/// contains a single quote but no double quote.
pub fn python_string(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tessera_ir::{DataType, Field, TagRef, Union};

    use super::*;

    #[test]
    fn test_scalars() {
        assert_eq!(render_value(&Value::Null), "None");
        assert_eq!(render_value(&Value::Bool(true)), "True");
        assert_eq!(render_value(&Value::Bool(false)), "False");
        assert_eq!(render_value(&Value::Int(-42)), "-42");
        assert_eq!(render_value(&Value::Float(1.5)), "1.5");
        assert_eq!(render_value(&Value::Float(3.0)), "3.0");
        assert_eq!(render_value(&Value::Float(f64::INFINITY)), "float('inf')");
    }

    #[test]
    fn test_strings_follow_repr_quoting() {
        assert_eq!(python_string("abc"), "'abc'");
        assert_eq!(python_string("it's"), "\"it's\"");
        assert_eq!(python_string("say \"hi\""), "'say \"hi\"'");
        assert_eq!(python_string("both ' and \""), "'both \\' and \"'");
        assert_eq!(python_string("a\\b\nc"), "'a\\\\b\\nc'");
        assert_eq!(python_string("\u{1}"), "'\\x01'");
    }

    #[test]
    fn test_list() {
        let value = Value::List(vec![Value::Int(1), Value::String("two".into())]);
        assert_eq!(render_value(&value), "[1, 'two']");
        assert_eq!(render_value(&Value::List(vec![])), "[]");
    }

    #[test]
    fn test_tag_ref_uses_union_namespace() {
        let union = Arc::new(Union {
            name: "WriteMode".into(),
            namespace: "files".into(),
            doc: None,
            variants: vec![
                Field::new("add", DataType::Void),
                Field::new("overwrite", DataType::Void),
            ],
        });
        let value = Value::TagRef(TagRef {
            union,
            tag: "overwrite".into(),
        });
        assert_eq!(render_value(&value), "files.WriteMode.overwrite");
    }
}
