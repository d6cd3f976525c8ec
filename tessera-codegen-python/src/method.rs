//! Route method emission.

use tessera_codegen::builder::{CodeBuilder, MultilineList};
use tessera_ir::{DataType, Namespace, Route, RouteStyle};
use tracing::debug;

use crate::{
    DocContext, Error, Result, Variant,
    docstring::{DocstringSpec, ExtraParam, compose},
    naming::{class_name, namespace_name, route_function_name, var_name},
    signature::build_signature,
    value::python_string,
};

const RESPONSE_LABEL: &str = ":class:`requests.models.Response`";

const CLOSE_RESPONSE_NOTE: &str = "\
If you do not consume the entire response body, then you must call close on the
response object, otherwise you will max out your available connections. We
recommend using the `contextlib.closing
<https://docs.python.org/2/library/contextlib.html#contextlib.closing>`_
context manager to ensure this.";

/// Write one method for `route`: signature, docstring, optional deprecation
/// warning and the body calling `self.request`, followed by a blank line.
pub fn emit_route_method(
    b: &mut CodeBuilder,
    ctx: &DocContext,
    namespace: &Namespace,
    route: &Route,
    variant: Variant,
) -> Result<()> {
    let request_binary_body = route.attrs.style == RouteStyle::Upload;
    let response_binary_body = route.attrs.style == RouteStyle::Download;
    let to_file = variant == Variant::DownloadToFile;

    let extra_args: &[&str] = if to_file { &["download_path"] } else { &[] };
    let signature = build_signature(
        namespace,
        route,
        request_binary_body,
        extra_args,
        variant.suffix(),
    )?;
    debug!(namespace = %namespace.name, method = %signature.name, "emitting route method");
    b.push_list(&signature.to_list());

    b.indented(|b| {
        let mut doc = DocstringSpec::new(&route.arg, &route.result, &route.error);
        doc.overview = route.doc.as_deref();
        if request_binary_body {
            doc.extra_params = vec![ExtraParam::new("f", Some("bytes"), "Contents to upload.")];
        } else if to_file {
            doc.extra_params = vec![ExtraParam::new(
                "download_path",
                Some("str"),
                "Path on local machine to save file.",
            )];
        }
        if response_binary_body && !to_file {
            doc.extra_return = Some(RESPONSE_LABEL);
            doc.footer = Some(CLOSE_RESPONSE_NOTE);
        }
        compose(b, ctx, &doc)?;

        emit_deprecation_warning(b, route);
        emit_body(b, namespace, route, request_binary_body, to_file)
    })?;

    b.push_blank();
    Ok(())
}

fn emit_deprecation_warning(b: &mut CodeBuilder, route: &Route) {
    let Some(deprecation) = &route.deprecated else {
        return;
    };
    let mut message = format!("{} is deprecated.", route.name);
    if let Some(by) = &deprecation.by {
        message.push_str(&format!(" Use {}.", by.name));
    }
    b.push_list(
        &MultilineList::new([python_string(&message), "DeprecationWarning".to_string()])
            .before("warnings.warn")
            .expanded(),
    );
}

fn emit_body(
    b: &mut CodeBuilder,
    namespace: &Namespace,
    route: &Route,
    request_binary_body: bool,
    to_file: bool,
) -> Result<()> {
    match &route.arg {
        DataType::Void => {
            b.push_line("arg = None");
        }
        DataType::Struct(s) => {
            let fields = s.all_fields().into_iter().map(|f| var_name(&f.name));
            b.push_list(&MultilineList::new(fields).before(format!(
                "arg = {}.{}",
                namespace_name(&s.namespace),
                class_name(&s.name)
            )));
        }
        DataType::Union(_) => {}
        other => return Err(Error::unsupported_arg(&namespace.name, &route.name, other)),
    }

    let args = [
        format!(
            "{}.{}",
            namespace_name(&namespace.name),
            route_function_name(&route.name, route.version)
        ),
        python_string(&namespace.name),
        "arg".to_string(),
        if request_binary_body { "f" } else { "None" }.to_string(),
    ];
    b.push_list(&MultilineList::new(args).before("r = self.request").expanded());

    if to_file {
        b.push_line("self._save_body_to_file(download_path, r[1])");
        b.push_line(if route.result.is_void() {
            "return None"
        } else {
            "return r[0]"
        });
    } else {
        b.push_line(if route.result.is_void() {
            "return None"
        } else {
            "return r"
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tessera_ir::{Deprecation, Field, Primitive, RouteRef, Struct, Union};

    use super::*;

    const CTX: DocContext<'static> = DocContext {
        namespace: "files",
        types_package: "dropbox",
        error_class_path: ".exceptions.ApiError",
    };

    fn path_arg(name: &str) -> DataType {
        DataType::Struct(Arc::new(Struct {
            name: name.into(),
            namespace: "files".into(),
            doc: None,
            parent: None,
            fields: vec![Field::new("path", DataType::Primitive(Primitive::String))],
        }))
    }

    fn emit(route: &Route, variant: Variant) -> String {
        let ns = Namespace::new("files");
        let mut b = CodeBuilder::python();
        emit_route_method(&mut b, &CTX, &ns, route, variant).unwrap();
        b.build()
    }

    #[test]
    fn test_void_arg_and_result() {
        let route = Route::new("get_current_account");
        assert_eq!(
            emit(&route, Variant::Standard),
            "def files_get_current_account(self):\n\
             \x20   arg = None\n\
             \x20   r = self.request(\n\
             \x20       files.get_current_account,\n\
             \x20       'files',\n\
             \x20       arg,\n\
             \x20       None,\n\
             \x20   )\n\
             \x20   return None\n\
             \n"
        );
    }

    #[test]
    fn test_upload_passes_body() {
        let mut route = Route::new("upload");
        route.arg = path_arg("CommitInfo");
        route.result = path_arg("FileMetadata");
        route.attrs.style = RouteStyle::Upload;

        let out = emit(&route, Variant::Standard);
        assert!(out.starts_with("def files_upload(self,\n                 f,\n                 path):\n"));
        assert!(out.contains("    :param bytes f: Contents to upload.\n"));
        assert!(out.contains("    arg = files.CommitInfo(path)\n"));
        assert!(out.contains("        f,\n    )\n    return r\n"));
    }

    #[test]
    fn test_union_arg_is_passed_through() {
        let mut route = Route::new("get_thumbnail");
        route.arg = DataType::Union(Arc::new(Union {
            name: "PathOrLink".into(),
            namespace: "files".into(),
            doc: None,
            variants: vec![Field::new("path", DataType::Primitive(Primitive::String))],
        }));
        let out = emit(&route, Variant::Standard);
        assert!(out.starts_with("def files_get_thumbnail(self,\n"));
        assert!(!out.contains("arg = "));
        assert!(out.contains("    r = self.request(\n"));
    }

    #[test]
    fn test_deprecation_warning() {
        let mut route = Route::new("copy");
        route.deprecated = Some(Deprecation {
            by: Some(RouteRef {
                name: "copy".into(),
                version: 2,
            }),
        });
        let out = emit(&route, Variant::Standard);
        assert!(out.contains(
            "    warnings.warn(\n        'copy is deprecated. Use copy.',\n        DeprecationWarning,\n    )\n"
        ));

        route.deprecated = Some(Deprecation { by: None });
        let out = emit(&route, Variant::Standard);
        assert!(out.contains("        'copy is deprecated.',\n"));
    }

    #[test]
    fn test_versioned_route_object() {
        let mut route = Route::new("copy");
        route.version = 2;
        let out = emit(&route, Variant::Standard);
        assert!(out.starts_with("def files_copy_v2(self):\n"));
        assert!(out.contains("        files.copy_v2,\n"));
    }

    #[test]
    fn test_unsupported_arg_aborts() {
        let mut route = Route::new("bad");
        route.arg = DataType::Primitive(Primitive::String);
        let ns = Namespace::new("files");
        let mut b = CodeBuilder::python();
        let err = emit_route_method(&mut b, &CTX, &ns, &route, Variant::Standard).unwrap_err();
        assert!(matches!(err, Error::UnsupportedArgType { .. }));
    }
}
