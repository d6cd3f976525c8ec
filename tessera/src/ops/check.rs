//! Check operation - API description validation.

use eyre::{Context, Result};
use tessera_codegen_python::{ClientConfig, Generator, route_method_name, route_variants};
use tessera_ir::{DataType, RouteStyle};
use tessera_manifest::ApiFile;

use crate::reports::{CheckReport, NamespaceSummary, RouteSummary};

/// Execute the check operation.
///
/// Loading already validated the description; this also renders the client
/// once so problems in doc references and method names surface here.
pub fn check(api_file: &ApiFile) -> Result<CheckReport> {
    let api = api_file.api();
    let probe = ClientConfig::new("client", "Client", "types");
    Generator::new(api, &probe)
        .render()
        .wrap_err("The API description is valid but no client can be generated from it")?;

    let namespaces = api
        .namespaces
        .iter()
        .map(|ns| NamespaceSummary {
            name: ns.name.clone(),
            structs: ns
                .data_types
                .iter()
                .filter(|t| matches!(t, DataType::Struct(_)))
                .count(),
            unions: ns
                .data_types
                .iter()
                .filter(|t| matches!(t, DataType::Union(_)))
                .count(),
            routes: ns
                .routes
                .iter()
                .map(|route| RouteSummary {
                    name: route.name.clone(),
                    version: route.version,
                    style: style_name(&route.attrs.style).to_string(),
                    auth: route.attrs.auth.clone(),
                    deprecated: route.deprecated.is_some(),
                    methods: route_variants(route, None)
                        .into_iter()
                        .map(|v| route_method_name(&ns.name, &route.name, route.version, v.suffix()))
                        .collect(),
                })
                .collect(),
        })
        .collect();

    Ok(CheckReport {
        path: api_file.path().to_path_buf(),
        namespaces,
    })
}

fn style_name(style: &RouteStyle) -> &str {
    match style {
        RouteStyle::Rpc => "rpc",
        RouteStyle::Upload => "upload",
        RouteStyle::Download => "download",
        RouteStyle::Other(other) => other,
    }
}
