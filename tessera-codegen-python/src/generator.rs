//! Python client module generator.

use std::{collections::HashMap, path::Path};

use eyre::Result;
use tessera_codegen::{
    builder::CodeBuilder,
    language::{GenerateResult, LanguageCodegen, PreviewFile, PreviewResult},
};
use tessera_core::GeneratedFile;
use tessera_ir::{Api, Namespace, Route};
use tracing::{debug, info_span};

use crate::{
    ClientConfig, DocContext, Error, Variant,
    files::ClientPy,
    method::emit_route_method,
    naming::{namespace_name, route_method_name},
    variants::route_variants,
};

const HEADER: &str = "\
# -*- coding: utf-8 -*-
# Auto-generated by Tessera, do not modify.
# flake8: noqa
# pylint: skip-file

from abc import ABCMeta, abstractmethod
";

/// A rendered client module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientModule {
    pub source: String,
    /// Methods emitted, counting both variants of download routes.
    pub method_count: usize,
    /// Routes left out by the auth filter, as `namespace/route`.
    pub filtered_routes: Vec<String>,
}

/// Python code generator producing an abstract client class.
pub struct Generator<'a> {
    api: &'a Api,
    config: &'a ClientConfig,
}

impl LanguageCodegen for Generator<'_> {
    fn language(&self) -> &'static str {
        "python"
    }

    fn preview(&self) -> Result<PreviewResult> {
        let module = self.render()?;
        let file = ClientPy::new(&self.config.module_name, module.source);

        Ok(PreviewResult {
            files: vec![PreviewFile {
                path: file.file_name(),
                content: file.render()?,
            }],
            method_count: module.method_count,
            filtered_routes: module.filtered_routes,
        })
    }

    fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        let module = self.render()?;
        let file = ClientPy::new(&self.config.module_name, module.source);
        let path = file.write(output_dir)?;

        Ok(GenerateResult {
            written: vec![path],
            method_count: module.method_count,
            filtered_routes: module.filtered_routes,
        })
    }
}

impl<'a> Generator<'a> {
    pub fn new(api: &'a Api, config: &'a ClientConfig) -> Self {
        Self { api, config }
    }

    /// Render the client module.
    ///
    /// Nothing is produced if any route fails to generate.
    pub fn render(&self) -> crate::Result<ClientModule> {
        let _span = info_span!("render", module = %self.config.module_name).entered();

        for namespace in &self.api.namespaces {
            check_route_name_conflict(namespace)?;
        }

        let filter = self.config.auth_filter();
        let mut filtered_routes = Vec::new();
        let mut plan: Vec<(&Namespace, Vec<(&Route, Vec<Variant>)>)> = Vec::new();
        for namespace in &self.api.namespaces {
            let mut routes = Vec::new();
            for route in &namespace.routes {
                let variants = route_variants(route, filter.as_ref());
                if variants.is_empty() {
                    debug!(namespace = %namespace.name, route = %route.name, "route filtered out");
                    filtered_routes.push(format!("{}/{}", namespace.name, route.name));
                } else {
                    routes.push((route, variants));
                }
            }
            plan.push((namespace, routes));
        }

        let any_deprecated = plan
            .iter()
            .flat_map(|(_, routes)| routes)
            .any(|(route, _)| route.deprecated.is_some());

        let mut b = CodeBuilder::python();
        b.push_raw(HEADER);
        if any_deprecated {
            b.push_line("import warnings");
        }
        b.push_blank();
        for namespace in self.api.namespaces.iter().filter(|ns| !ns.data_types.is_empty()) {
            b.push_line(&format!(
                "from {} import {}",
                self.config.types_package,
                namespace_name(&namespace.name)
            ));
        }
        b.push_blank();
        b.push_blank();

        let mut method_count = 0;
        b.push_line(&format!("class {}(object):", self.config.class_name));
        b.indented(|b| -> crate::Result<()> {
            b.push_line("__metaclass__ = ABCMeta");
            b.push_blank();
            b.push_line("@abstractmethod");
            b.push_line("def request(self, route, namespace, arg, arg_binary=None):");
            b.indented(|b| {
                b.push_line("pass");
            });
            b.push_blank();

            for (namespace, routes) in &plan {
                if routes.is_empty() {
                    continue;
                }
                let _span = info_span!("namespace", name = %namespace.name).entered();
                let ctx = DocContext {
                    namespace: &namespace.name,
                    types_package: &self.config.types_package,
                    error_class_path: &self.config.error_class_path,
                };

                b.push_line("# ------------------------------------------");
                b.push_line(&format!("# Routes in {} namespace", namespace.name));
                b.push_blank();
                for (route, variants) in routes {
                    for variant in variants {
                        emit_route_method(b, &ctx, namespace, route, *variant)?;
                        method_count += 1;
                    }
                }
            }
            Ok(())
        })?;

        debug!(method_count, filtered = filtered_routes.len(), "rendered client module");
        Ok(ClientModule {
            source: b.build(),
            method_count,
            filtered_routes,
        })
    }
}

/// Fail if two routes of `namespace` would be declared under the same
/// method name.
fn check_route_name_conflict(namespace: &Namespace) -> crate::Result<()> {
    let mut seen: HashMap<String, &Route> = HashMap::new();
    for route in &namespace.routes {
        for variant in route_variants(route, None) {
            let function =
                route_method_name(&namespace.name, &route.name, route.version, variant.suffix());
            if let Some(first) = seen.get(&function) {
                return Err(Error::RouteNameConflict {
                    namespace: namespace.name.clone(),
                    first: route_label(first),
                    second: route_label(route),
                    function,
                });
            }
            seen.insert(function, route);
        }
    }
    Ok(())
}

fn route_label(route: &Route) -> String {
    if route.version > 1 {
        format!("{}:{}", route.name, route.version)
    } else {
        route.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tessera_ir::{DataType, Field, Primitive, RouteAttrs, RouteStyle, Struct};

    use super::*;

    fn namespace(name: &str, routes: Vec<Route>) -> Namespace {
        let mut ns = Namespace::new(name);
        ns.routes = routes;
        ns
    }

    fn config() -> ClientConfig {
        ClientConfig::new("base", "DropboxBase", "dropbox")
    }

    #[test]
    fn test_empty_api() {
        let api = Api { namespaces: vec![] };
        let config = config();
        let module = Generator::new(&api, &config).render().unwrap();
        assert_eq!(module.method_count, 0);
        assert_eq!(
            module.source,
            "# -*- coding: utf-8 -*-\n\
             # Auto-generated by Tessera, do not modify.\n\
             # flake8: noqa\n\
             # pylint: skip-file\n\
             \n\
             from abc import ABCMeta, abstractmethod\n\
             \n\
             \n\
             \n\
             class DropboxBase(object):\n\
             \x20   __metaclass__ = ABCMeta\n\
             \n\
             \x20   @abstractmethod\n\
             \x20   def request(self, route, namespace, arg, arg_binary=None):\n\
             \x20       pass\n\
             \n"
        );
    }

    #[test]
    fn test_imports_only_namespaces_with_types() {
        let mut files = namespace("files", vec![Route::new("list")]);
        files.data_types.push(DataType::Struct(Arc::new(Struct {
            name: "Metadata".into(),
            namespace: "files".into(),
            doc: None,
            parent: None,
            fields: vec![Field::new("name", DataType::Primitive(Primitive::String))],
        })));
        let auth = namespace("auth", vec![Route::new("token_revoke")]);
        let api = Api {
            namespaces: vec![auth, files],
        };
        let config = config();
        let source = Generator::new(&api, &config).render().unwrap().source;
        assert!(source.contains("\nfrom dropbox import files\n"));
        assert!(!source.contains("import auth"));
        assert!(source.contains("    # Routes in auth namespace\n"));
        assert!(!source.contains("import warnings"));
    }

    #[test]
    fn test_auth_filter() {
        let mut user_route = Route::new("list");
        user_route.attrs = RouteAttrs {
            style: RouteStyle::Rpc,
            auth: Some(RouteAttrs::parse_auth("user, team")),
        };
        let mut team_route = Route::new("members");
        team_route.attrs.auth = Some(RouteAttrs::parse_auth("team"));
        let bare_route = Route::new("ping");
        let api = Api {
            namespaces: vec![namespace("files", vec![user_route, team_route, bare_route])],
        };

        let config = config().with_auth_type("User,app");
        let module = Generator::new(&api, &config).render().unwrap();
        assert_eq!(module.method_count, 1);
        assert_eq!(module.filtered_routes, ["files/members", "files/ping"]);
        assert_eq!(module.source.matches("def files_list(").count(), 1);
    }

    #[test]
    fn test_filtered_namespace_has_no_banner() {
        let mut route = Route::new("members");
        route.attrs.auth = Some(RouteAttrs::parse_auth("team"));
        let api = Api {
            namespaces: vec![namespace("team", vec![route])],
        };
        let config = config().with_auth_type("user");
        let source = Generator::new(&api, &config).render().unwrap().source;
        assert!(!source.contains("# Routes in team namespace"));
    }

    #[test]
    fn test_deprecated_route_imports_warnings() {
        let mut route = Route::new("copy");
        route.deprecated = Some(Default::default());
        let api = Api {
            namespaces: vec![namespace("files", vec![route])],
        };
        let config = config();
        let source = Generator::new(&api, &config).render().unwrap().source;
        assert!(source.contains("from abc import ABCMeta, abstractmethod\nimport warnings\n\n"));
    }

    #[test]
    fn test_route_name_conflict() {
        let mut v2 = Route::new("copy");
        v2.version = 2;
        let api = Api {
            namespaces: vec![namespace("files", vec![v2, Route::new("copy_v2")])],
        };
        let config = config();
        let err = Generator::new(&api, &config).render().unwrap_err();
        assert_eq!(
            err.to_string(),
            "routes 'copy:2' and 'copy_v2' in namespace 'files' both map to 'files_copy_v2'"
        );
    }

    #[test]
    fn test_download_to_file_conflict() {
        let mut download = Route::new("download");
        download.attrs.style = RouteStyle::Download;
        let api = Api {
            namespaces: vec![namespace(
                "files",
                vec![download, Route::new("download_to_file")],
            )],
        };
        let config = config();
        assert!(matches!(
            Generator::new(&api, &config).render(),
            Err(Error::RouteNameConflict { .. })
        ));
    }

    #[test]
    fn test_preview_file_name() {
        let api = Api { namespaces: vec![] };
        let config = config();
        let preview = Generator::new(&api, &config).preview().unwrap();
        assert_eq!(preview.files.len(), 1);
        assert_eq!(preview.files[0].path, "base.py");
        assert_eq!(preview.method_count, 0);
        assert!(preview.filtered_routes.is_empty());
    }
}
