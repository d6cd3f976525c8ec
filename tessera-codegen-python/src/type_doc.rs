//! Type references inside docstrings.

use tessera_codegen::language::TypeMapper;
use tessera_ir::DataType;

use crate::{
    DocContext, PythonTypeMapper,
    naming::class_name,
};

/// Render a data type the way Sphinx recognizes it in a docstring.
///
/// User-defined types become ``:class:`<types_package>.<namespace>.<Class>` ``
/// references; wrappers render as `Nullable[..]`, `List[..]` and `Map[.., ..]`.
pub fn format_type_in_doc(ctx: &DocContext, data_type: &DataType) -> String {
    match data_type {
        DataType::Void => PythonTypeMapper.void().to_string(),
        DataType::Primitive(p) => PythonTypeMapper.map_primitive(*p).to_string(),
        DataType::Struct(s) => class_ref(ctx, &s.namespace, &s.name),
        DataType::Union(u) => class_ref(ctx, &u.namespace, &u.name),
        DataType::Nullable(inner) => format!("Nullable[{}]", format_type_in_doc(ctx, inner)),
        DataType::List(elem) => format!("List[{}]", format_type_in_doc(ctx, elem)),
        DataType::Map(key, value) => format!(
            "Map[{}, {}]",
            format_type_in_doc(ctx, key),
            format_type_in_doc(ctx, value)
        ),
    }
}

fn class_ref(ctx: &DocContext, namespace: &str, name: &str) -> String {
    format!(
        ":class:`{}.{}.{}`",
        ctx.types_package,
        namespace,
        class_name(name)
    )
}
