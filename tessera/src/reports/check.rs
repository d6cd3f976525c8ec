//! Check command report data structures.

use std::path::PathBuf;

use serde::Serialize;

use super::output::{Output, Report};

/// Report data from API description validation.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Path to the API description.
    pub path: PathBuf,
    pub namespaces: Vec<NamespaceSummary>,
}

#[derive(Debug, Serialize)]
pub struct NamespaceSummary {
    pub name: String,
    pub structs: usize,
    pub unions: usize,
    pub routes: Vec<RouteSummary>,
}

#[derive(Debug, Serialize)]
pub struct RouteSummary {
    pub name: String,
    pub version: u32,
    pub style: String,
    pub auth: Option<Vec<String>>,
    pub deprecated: bool,
    /// Client methods generated for the route when no auth filter is set.
    pub methods: Vec<String>,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!("✓ {} is valid", self.path.display()));

        for ns in &self.namespaces {
            out.newline();
            out.section(&format!(
                "{} ({} struct{}, {} union{}, {} route{})",
                ns.name,
                ns.structs,
                plural(ns.structs),
                ns.unions,
                plural(ns.unions),
                ns.routes.len(),
                plural(ns.routes.len()),
            ));
            for route in &ns.routes {
                out.list_item(&route.describe());
            }
        }
    }
}

impl RouteSummary {
    fn describe(&self) -> String {
        let mut text = self.name.clone();
        if self.version > 1 {
            text.push_str(&format!(":{}", self.version));
        }
        text.push_str(&format!(" [{}]", self.style));
        if let Some(auth) = &self.auth {
            text.push_str(&format!(" auth={}", auth.join(",")));
        }
        if self.deprecated {
            text.push_str(" (deprecated)");
        }
        text.push_str(&format!(" -> {}", self.methods.join(", ")));
        text
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    fn report() -> CheckReport {
        CheckReport {
            path: PathBuf::from("api.toml"),
            namespaces: vec![NamespaceSummary {
                name: "files".into(),
                structs: 2,
                unions: 1,
                routes: vec![RouteSummary {
                    name: "copy".into(),
                    version: 2,
                    style: "rpc".into(),
                    auth: Some(vec!["user".into(), "team".into()]),
                    deprecated: true,
                    methods: vec!["files_copy_v2".into()],
                }],
            }],
        }
    }

    #[test]
    fn test_render() {
        let mut out = BufferOutput::default();
        report().render(&mut out);
        assert_eq!(
            out.lines,
            [
                "✓ api.toml is valid",
                "",
                "files (2 structs, 1 union, 1 route):",
                "  - copy:2 [rpc] auth=user,team (deprecated) -> files_copy_v2",
            ]
        );
    }

    #[test]
    fn test_json() {
        let json = serde_json::to_value(report()).unwrap();
        assert_eq!(json["path"], "api.toml");
        assert_eq!(json["namespaces"][0]["routes"][0]["methods"][0], "files_copy_v2");
        assert_eq!(json["namespaces"][0]["routes"][0]["deprecated"], true);
    }
}
