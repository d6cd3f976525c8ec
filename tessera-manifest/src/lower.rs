//! Lowering of the raw description into the IR.
//!
//! Every type reference is resolved to exactly one definition and every
//! user-defined type is built once and shared, so the result is a tree of
//! `Arc`s. Definitions that contain themselves are rejected.

use std::{collections::HashMap, sync::Arc};

use indexmap::{IndexMap, IndexSet};
use tessera_ir::{
    Api, DataType, Deprecation, Field, Namespace, Primitive, Route, RouteAttrs, RouteRef,
    RouteStyle, Struct, TagRef, Union, Value,
};
use tracing::{debug, trace};

use crate::{
    Result,
    raw::{RawApi, RawDeprecated, RawField, RawRoute, RawStruct, RawUnion},
    type_expr::TypeExpr,
    validate::ParseContext,
};

/// Fully qualified type name: (namespace, name).
type TypeKey = (String, String);

#[derive(Clone, Copy)]
enum Definition<'r> {
    Struct(&'r RawStruct),
    Union(&'r RawUnion),
}

/// Lower a parsed description into an [`Api`].
pub(crate) fn lower(raw: &RawApi, ctx: &ParseContext<'_>) -> Result<Api> {
    let mut lowerer = Lowerer {
        ctx,
        definitions: IndexMap::new(),
        resolved: HashMap::new(),
        in_progress: IndexSet::new(),
    };
    lowerer.collect_definitions(raw)?;

    let namespaces = raw
        .namespaces
        .iter()
        .map(|ns| lowerer.lower_namespace(ns))
        .collect::<Result<Vec<_>>>()?;
    Ok(Api { namespaces })
}

struct Lowerer<'r, 'c> {
    ctx: &'c ParseContext<'r>,
    definitions: IndexMap<TypeKey, Definition<'r>>,
    resolved: HashMap<TypeKey, DataType>,
    /// Definitions being built, outermost first.
    in_progress: IndexSet<TypeKey>,
}

impl<'r> Lowerer<'r, '_> {
    fn source(&self) -> &crate::SourceContext {
        self.ctx.source_context()
    }

    /// Register every namespace and type name before anything is resolved,
    /// so references may point forward and across namespaces.
    fn collect_definitions(&mut self, raw: &'r RawApi) -> Result<()> {
        let mut namespaces = IndexSet::new();
        for ns in &raw.namespaces {
            self.ctx.validate_name(&ns.name, "namespace")?;
            if !namespaces.insert(ns.name.as_str()) {
                return Err(self
                    .source()
                    .duplicate_name_error("namespace", &ns.name, "the API"));
            }

            let ns_ctx = self.ctx.push(&ns.name);
            let definitions = ns
                .structs
                .iter()
                .map(|s| (s.name.as_str(), Definition::Struct(s)))
                .chain(ns.unions.iter().map(|u| (u.name.as_str(), Definition::Union(u))));
            for (name, definition) in definitions {
                ns_ctx.validate_name(name, "type")?;
                let key = (ns.name.clone(), name.to_string());
                if self.definitions.insert(key, definition).is_some() {
                    return Err(self.source().duplicate_name_error(
                        "type",
                        name,
                        format!("namespace '{}'", ns.name),
                    ));
                }
            }
        }
        Ok(())
    }

    fn lower_namespace(&mut self, raw: &'r crate::raw::RawNamespace) -> Result<Namespace> {
        let mut data_types = Vec::with_capacity(raw.structs.len() + raw.unions.len());
        for name in raw
            .structs
            .iter()
            .map(|s| &s.name)
            .chain(raw.unions.iter().map(|u| &u.name))
        {
            data_types.push(self.resolve_named(&raw.name, name)?);
        }

        let mut routes = Vec::with_capacity(raw.routes.len());
        let mut seen = IndexSet::new();
        for route in &raw.routes {
            let lowered = self.lower_route(&raw.name, route, &raw.routes)?;
            if !seen.insert((lowered.name.clone(), lowered.version)) {
                return Err(self.source().duplicate_name_error(
                    "route",
                    &route.name,
                    format!("namespace '{}' (version {})", raw.name, lowered.version),
                ));
            }
            routes.push(lowered);
        }

        debug!(
            namespace = %raw.name,
            data_types = data_types.len(),
            routes = routes.len(),
            "lowered namespace"
        );
        Ok(Namespace {
            name: raw.name.clone(),
            doc: raw.doc.clone(),
            data_types,
            routes,
        })
    }

    fn lower_route(
        &mut self,
        namespace: &str,
        raw: &'r RawRoute,
        siblings: &[RawRoute],
    ) -> Result<Route> {
        self.ctx
            .push(namespace)
            .validate_name(&raw.name, "route")?;
        let version = route_version(raw.version).ok_or_else(|| {
            self.source().validation_error_for(
                format!(
                    "route '{}' has version {}; versions start at 1",
                    raw.name, raw.version
                ),
                &raw.name,
            )
        })?;

        let arg = self.resolve_opt(namespace, raw.arg.as_deref())?;
        if !matches!(arg, DataType::Void | DataType::Struct(_) | DataType::Union(_)) {
            return Err(self.source().validation_error_for(
                format!(
                    "route '{}' takes '{}' as argument; arguments must be Void, a struct or a union",
                    raw.name,
                    raw.arg.as_deref().unwrap_or("Void")
                ),
                &raw.name,
            ));
        }
        let result = self.resolve_opt(namespace, raw.result.as_deref())?;
        let error = self.resolve_opt(namespace, raw.error.as_deref())?;

        let attrs = RouteAttrs {
            style: raw
                .attrs
                .style
                .as_deref()
                .map(RouteStyle::parse)
                .unwrap_or_default(),
            auth: raw.attrs.auth.as_deref().map(RouteAttrs::parse_auth),
        };

        let deprecated = match &raw.deprecated {
            None | Some(RawDeprecated::Flag(false)) => None,
            Some(RawDeprecated::Flag(true)) => Some(Deprecation { by: None }),
            Some(RawDeprecated::By { by }) => {
                let by = self.route_ref(namespace, &raw.name, by, siblings)?;
                Some(Deprecation { by: Some(by) })
            }
        };

        trace!(namespace, route = %raw.name, version, "lowered route");
        Ok(Route {
            name: raw.name.clone(),
            version,
            arg,
            result,
            error,
            doc: raw.doc.clone(),
            attrs,
            deprecated,
        })
    }

    /// Parse `name` or `name:version` and check it names a sibling route.
    fn route_ref(
        &self,
        namespace: &str,
        route: &str,
        by: &str,
        siblings: &[RawRoute],
    ) -> Result<RouteRef> {
        let invalid = |reason: String| {
            self.source().validation_error_for(
                format!("route '{}' is deprecated by '{}': {}", route, by, reason),
                route,
            )
        };

        let (name, version) = match by.split_once(':') {
            Some((name, version)) => {
                let version = version
                    .parse::<i64>()
                    .ok()
                    .and_then(route_version)
                    .ok_or_else(|| invalid("the version must be a positive integer".into()))?;
                (name, version)
            }
            None => (by, 1),
        };

        let exists = siblings
            .iter()
            .any(|r| r.name == name && route_version(r.version) == Some(version));
        if !exists {
            return Err(invalid(format!(
                "no such route in namespace '{}'",
                namespace
            )));
        }

        Ok(RouteRef {
            name: name.to_string(),
            version,
        })
    }

    fn resolve_opt(&mut self, namespace: &str, expr: Option<&str>) -> Result<DataType> {
        match expr {
            Some(expr) => self.resolve_str(namespace, expr),
            None => Ok(DataType::Void),
        }
    }

    fn resolve_str(&mut self, namespace: &str, expr: &str) -> Result<DataType> {
        let parsed: TypeExpr = expr
            .parse()
            .map_err(|reason: String| self.source().invalid_type_expr_error(expr, reason))?;
        self.resolve_expr(namespace, &parsed)
    }

    fn resolve_expr(&mut self, namespace: &str, expr: &TypeExpr) -> Result<DataType> {
        Ok(match expr {
            TypeExpr::Void => DataType::Void,
            TypeExpr::Named {
                namespace: None,
                name,
            } => match Primitive::from_name(name) {
                Some(primitive) => DataType::Primitive(primitive),
                None => self.resolve_named(namespace, name)?,
            },
            TypeExpr::Named {
                namespace: Some(other),
                name,
            } => {
                if !self.definitions.contains_key(&(other.clone(), name.clone())) {
                    return Err(self
                        .source()
                        .unknown_type_error(format!("{}.{}", other, name), namespace));
                }
                self.resolve_named(other, name)?
            }
            TypeExpr::List(inner) => DataType::List(Box::new(self.resolve_expr(namespace, inner)?)),
            TypeExpr::Map(key, value) => DataType::Map(
                Box::new(self.resolve_expr(namespace, key)?),
                Box::new(self.resolve_expr(namespace, value)?),
            ),
            TypeExpr::Nullable(inner) => {
                DataType::Nullable(Box::new(self.resolve_expr(namespace, inner)?))
            }
        })
    }

    fn resolve_named(&mut self, namespace: &str, name: &str) -> Result<DataType> {
        let key = (namespace.to_string(), name.to_string());
        if let Some(resolved) = self.resolved.get(&key) {
            return Ok(resolved.clone());
        }

        if let Some(start) = self.in_progress.get_index_of(&key) {
            let mut cycle: Vec<String> = self
                .in_progress
                .iter()
                .skip(start)
                .map(|(ns, name)| format!("{}.{}", ns, name))
                .collect();
            cycle.push(format!("{}.{}", namespace, name));
            return Err(self.source().recursive_type_error(&cycle));
        }

        let Some(definition) = self.definitions.get(&key).copied() else {
            return Err(self.source().unknown_type_error(name, namespace));
        };

        self.in_progress.insert(key.clone());
        let data_type = match definition {
            Definition::Struct(raw) => DataType::Struct(Arc::new(self.lower_struct(namespace, raw)?)),
            Definition::Union(raw) => DataType::Union(Arc::new(self.lower_union(namespace, raw)?)),
        };
        self.in_progress.pop();

        self.resolved.insert(key, data_type.clone());
        Ok(data_type)
    }

    fn lower_struct(&mut self, namespace: &str, raw: &'r RawStruct) -> Result<Struct> {
        let parent = match &raw.extends {
            Some(expr) => match self.resolve_str(namespace, expr)? {
                DataType::Struct(parent) => Some(parent),
                _ => {
                    return Err(self.source().validation_error_for(
                        format!("struct '{}' extends '{}', which is not a struct", raw.name, expr),
                        &raw.name,
                    ));
                }
            },
            None => None,
        };

        let owner = format!("{}.{}", namespace, raw.name);
        let mut names: IndexSet<String> = parent
            .iter()
            .flat_map(|p| p.all_fields())
            .map(|f| f.name.clone())
            .collect();
        let mut fields = Vec::with_capacity(raw.fields.len());
        for raw_field in &raw.fields {
            if !names.insert(raw_field.name.clone()) {
                return Err(self.source().duplicate_name_error(
                    "field",
                    &raw_field.name,
                    format!("struct '{}'", owner),
                ));
            }
            let Some(ty) = raw_field.ty.as_deref() else {
                return Err(self.source().validation_error_for(
                    format!("field '{}' of struct '{}' has no type", raw_field.name, owner),
                    &raw_field.name,
                ));
            };
            let data_type = self.resolve_str(namespace, ty)?;
            fields.push(self.lower_field(namespace, &owner, raw_field, data_type)?);
        }

        Ok(Struct {
            name: raw.name.clone(),
            namespace: namespace.to_string(),
            doc: raw.doc.clone(),
            parent,
            fields,
        })
    }

    fn lower_union(&mut self, namespace: &str, raw: &'r RawUnion) -> Result<Union> {
        let owner = format!("{}.{}", namespace, raw.name);
        let mut names = IndexSet::new();
        let mut variants = Vec::with_capacity(raw.variants.len());
        for raw_variant in &raw.variants {
            if !names.insert(raw_variant.name.as_str()) {
                return Err(self.source().duplicate_name_error(
                    "variant",
                    &raw_variant.name,
                    format!("union '{}'", owner),
                ));
            }
            if raw_variant.default.is_some() {
                return Err(self.source().invalid_default_error(
                    &owner,
                    &raw_variant.name,
                    "union variants cannot have defaults",
                ));
            }
            let data_type = self.resolve_opt(namespace, raw_variant.ty.as_deref())?;
            variants.push(self.lower_field(namespace, &owner, raw_variant, data_type)?);
        }

        Ok(Union {
            name: raw.name.clone(),
            namespace: namespace.to_string(),
            doc: raw.doc.clone(),
            variants,
        })
    }

    fn lower_field(
        &self,
        namespace: &str,
        owner: &str,
        raw: &RawField,
        data_type: DataType,
    ) -> Result<Field> {
        self.ctx
            .push(namespace)
            .validate_name(&raw.name, "field")?;

        let default = match &raw.default {
            Some(value) => Some(
                default_value(&data_type, value)
                    .map_err(|reason| self.source().invalid_default_error(owner, &raw.name, reason))?,
            ),
            None => None,
        };

        Ok(Field {
            name: raw.name.clone(),
            data_type,
            doc: raw.doc.clone(),
            default,
        })
    }
}

fn route_version(version: i64) -> Option<u32> {
    u32::try_from(version).ok().filter(|v| *v >= 1)
}

/// Convert a TOML default into a [`Value`] that fits `data_type`.
fn default_value(data_type: &DataType, value: &toml::Value) -> std::result::Result<Value, String> {
    let target = match data_type {
        DataType::Nullable(inner) => inner.as_ref(),
        other => other,
    };

    match (target, value) {
        (DataType::Primitive(Primitive::Boolean), toml::Value::Boolean(b)) => Ok(Value::Bool(*b)),
        (
            DataType::Primitive(p @ (Primitive::Int32 | Primitive::Int64 | Primitive::UInt32 | Primitive::UInt64)),
            toml::Value::Integer(i),
        ) => {
            let fits = match p {
                Primitive::Int32 => i32::try_from(*i).is_ok(),
                Primitive::UInt32 => u32::try_from(*i).is_ok(),
                Primitive::UInt64 => *i >= 0,
                _ => true,
            };
            if fits {
                Ok(Value::Int(*i))
            } else {
                Err(format!("{} is out of range for {}", i, p.as_str()))
            }
        }
        (DataType::Primitive(Primitive::Float32 | Primitive::Float64), toml::Value::Float(f)) => {
            Ok(Value::Float(*f))
        }
        (DataType::Primitive(Primitive::Float32 | Primitive::Float64), toml::Value::Integer(i)) => {
            Ok(Value::Float(*i as f64))
        }
        (
            DataType::Primitive(Primitive::String | Primitive::Timestamp | Primitive::Bytes),
            toml::Value::String(s),
        ) => Ok(Value::String(s.clone())),
        (DataType::List(element), toml::Value::Array(items)) => items
            .iter()
            .map(|item| default_value(element, item))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(Value::List),
        (DataType::Union(union), toml::Value::Table(table)) => {
            let tag = match (table.len(), table.get("tag")) {
                (1, Some(toml::Value::String(tag))) => tag,
                _ => return Err("a union default is written as { tag = \"<variant>\" }".into()),
            };
            match union.variants.iter().find(|v| &v.name == tag) {
                Some(variant) if variant.data_type.is_void() => Ok(Value::TagRef(TagRef {
                    union: Arc::clone(union),
                    tag: tag.clone(),
                })),
                Some(_) => Err(format!(
                    "variant '{}' of union '{}' carries a value",
                    tag, union.name
                )),
                None => Err(format!("union '{}' has no variant '{}'", union.name, tag)),
            }
        }
        (_, value) => Err(format!(
            "a {} does not fit this field's type",
            value.type_str()
        )),
    }
}
