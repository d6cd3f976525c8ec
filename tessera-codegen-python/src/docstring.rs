//! Docstrings for route methods.

use tessera_codegen::builder::{CodeBuilder, MultilineList};
use tessera_ir::{DataType, Field};

use crate::{
    DocContext, Result, doc_ref::process_doc, naming::var_name, type_doc::format_type_in_doc,
};

/// A documented parameter that is not a field of the route argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraParam {
    pub name: String,
    pub type_label: Option<String>,
    pub doc: String,
}

impl ExtraParam {
    pub fn new(name: impl Into<String>, type_label: Option<&str>, doc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_label: type_label.map(str::to_string),
            doc: doc.into(),
        }
    }
}

/// Everything a route method's docstring is assembled from.
#[derive(Debug, Clone)]
pub struct DocstringSpec<'a> {
    pub arg: &'a DataType,
    pub result: &'a DataType,
    pub error: &'a DataType,
    /// Route doc text; markers are resolved while composing.
    pub overview: Option<&'a str>,
    pub extra_params: Vec<ExtraParam>,
    /// Second element of the documented return pair.
    pub extra_return: Option<&'a str>,
    pub footer: Option<&'a str>,
}

impl<'a> DocstringSpec<'a> {
    pub fn new(arg: &'a DataType, result: &'a DataType, error: &'a DataType) -> Self {
        Self {
            arg,
            result,
            error,
            overview: None,
            extra_params: Vec::new(),
            extra_return: None,
            footer: None,
        }
    }
}

/// Write the docstring described by `spec`.
///
/// Returns `false` without writing anything when there is neither an
/// overview nor a parameter to document. Only fields the argument struct
/// declares itself are documented; inherited fields stay in the signature.
pub fn compose(b: &mut CodeBuilder, ctx: &DocContext, spec: &DocstringSpec) -> Result<bool> {
    let overview = spec
        .overview
        .filter(|doc| !doc.trim().is_empty())
        .map(|doc| process_doc(ctx, doc))
        .transpose()?;
    let fields: Vec<&Field> = match spec.arg {
        DataType::Struct(s) => s.fields.iter().collect(),
        DataType::Union(u) => u.variants.iter().collect(),
        _ => Vec::new(),
    };
    let has_params = !spec.extra_params.is_empty() || !fields.is_empty();

    if overview.is_none() && !has_params {
        return Ok(false);
    }

    b.push_line("\"\"\"");
    if let Some(overview) = &overview {
        b.push_wrapped(overview, "");
    }

    if has_params {
        if overview.is_some() {
            b.push_blank();
        }

        for extra in &spec.extra_params {
            let line = match &extra.type_label {
                Some(label) => format!(":param {} {}: {}", label, extra.name, extra.doc),
                None => format!(":param {}: {}", extra.name, extra.doc),
            };
            b.push_wrapped(&line, "    ");
        }

        match spec.arg {
            DataType::Struct(_) => {
                for field in &fields {
                    compose_field(b, ctx, field)?;
                }
            }
            DataType::Union(u) => {
                if let Some(doc) = u.doc.as_deref().filter(|d| !d.trim().is_empty()) {
                    b.push_wrapped(&format!(":param arg: {}", process_doc(ctx, doc)?), "    ");
                }
                b.push_line(&format!(":type arg: {}", format_type_in_doc(ctx, spec.arg)));
            }
            _ => {}
        }
    } else {
        b.push_blank();
    }

    let result = format_type_in_doc(ctx, spec.result);
    match spec.extra_return {
        Some(label) => {
            b.push_list(&MultilineList::new([result, label.to_string()]).before(":rtype: "));
        }
        None => {
            b.push_line(&format!(":rtype: {}", result));
        }
    }

    if !spec.error.is_void() && spec.error.field_count() > 0 {
        let error_class = ctx
            .error_class_path
            .rsplit('.')
            .next()
            .unwrap_or(ctx.error_class_path);
        b.push_line(&format!(":raises: :class:`{}`", ctx.error_class_path));
        b.push_blank();
        b.push_line(&format!("If this raises, {} will contain:", error_class));
        b.indented(|b| {
            b.push_line(&format_type_in_doc(ctx, spec.error));
        });
    }

    if let Some(footer) = spec.footer {
        b.push_blank();
        b.push_wrapped(footer, "");
    }
    b.push_line("\"\"\"");
    Ok(true)
}

fn compose_field(b: &mut CodeBuilder, ctx: &DocContext, field: &Field) -> Result<()> {
    let name = var_name(&field.name);
    let type_doc = format_type_in_doc(ctx, &field.data_type);

    match field.doc.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(doc) => {
            let doc = process_doc(ctx, doc)?;
            if field.data_type.is_user_defined() {
                b.push_wrapped(&format!(":param {}: {}", name, doc), "    ");
                // Composite types get their own line.
                b.push_line(&format!(":type {}: {}", name, type_doc));
            } else {
                b.push_wrapped(&format!(":param {} {}: {}", type_doc, name, doc), "    ");
            }
        }
        None => {
            b.push_wrapped(&format!(":type {}: {}", name, type_doc), "");
        }
    }
    Ok(())
}
