//! Data type definitions.

use std::sync::Arc;

/// Built-in scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Boolean,
    Bytes,
    Float32,
    Float64,
    Int32,
    Int64,
    UInt32,
    UInt64,
    String,
    Timestamp,
}

impl Primitive {
    /// All primitives, in the order they are documented.
    pub const ALL: [Primitive; 10] = [
        Primitive::Boolean,
        Primitive::Bytes,
        Primitive::Float32,
        Primitive::Float64,
        Primitive::Int32,
        Primitive::Int64,
        Primitive::UInt32,
        Primitive::UInt64,
        Primitive::String,
        Primitive::Timestamp,
    ];

    /// Get the name used in API descriptions.
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::Boolean => "Boolean",
            Primitive::Bytes => "Bytes",
            Primitive::Float32 => "Float32",
            Primitive::Float64 => "Float64",
            Primitive::Int32 => "Int32",
            Primitive::Int64 => "Int64",
            Primitive::UInt32 => "UInt32",
            Primitive::UInt64 => "UInt64",
            Primitive::String => "String",
            Primitive::Timestamp => "Timestamp",
        }
    }

    /// Look up a primitive by its API-description name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }
}

/// A data type as seen by a route or a field.
///
/// `Nullable`, `List` and `Map` are structural wrappers and may nest to any
/// finite depth. `Struct` and `Union` are the user-defined types; they are
/// shared so that every reference points at the single definition.
#[derive(Debug, Clone, PartialEq)]
pub enum DataType {
    Void,
    Primitive(Primitive),
    Struct(Arc<Struct>),
    Union(Arc<Union>),
    List(Box<DataType>),
    Map(Box<DataType>, Box<DataType>),
    Nullable(Box<DataType>),
}

impl DataType {
    pub fn is_void(&self) -> bool {
        matches!(self, DataType::Void)
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, DataType::Nullable(_))
    }

    /// Returns true for struct and union types.
    pub fn is_user_defined(&self) -> bool {
        matches!(self, DataType::Struct(_) | DataType::Union(_))
    }

    /// Namespace and name of a user-defined type.
    pub fn user_defined_name(&self) -> Option<(&str, &str)> {
        match self {
            DataType::Struct(s) => Some((&s.namespace, &s.name)),
            DataType::Union(u) => Some((&u.namespace, &u.name)),
            _ => None,
        }
    }

    /// Number of fields a struct declares itself (inherited fields are not
    /// counted) or variants of a union; zero for every other type.
    pub fn field_count(&self) -> usize {
        match self {
            DataType::Struct(s) => s.fields.len(),
            DataType::Union(u) => u.variants.len(),
            _ => 0,
        }
    }
}

/// A user-defined record type.
#[derive(Debug, Clone, PartialEq)]
pub struct Struct {
    pub name: String,
    /// Name of the declaring namespace.
    pub namespace: String,
    pub doc: Option<String>,
    /// Struct this one extends; its fields come first.
    pub parent: Option<Arc<Struct>>,
    /// Fields declared by this struct, in declaration order.
    pub fields: Vec<Field>,
}

impl Struct {
    /// All fields including inherited ones, ancestors first.
    pub fn all_fields(&self) -> Vec<&Field> {
        let mut fields = match &self.parent {
            Some(parent) => parent.all_fields(),
            None => Vec::new(),
        };
        fields.extend(self.fields.iter());
        fields
    }
}

/// A user-defined tagged union: exactly one variant is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Union {
    pub name: String,
    /// Name of the declaring namespace.
    pub namespace: String,
    pub doc: Option<String>,
    /// Variants ("tags"); a variant without payload has type `Void`.
    pub variants: Vec<Field>,
}

impl Union {
    pub fn has_variant(&self, tag: &str) -> bool {
        self.variants.iter().any(|v| v.name == tag)
    }
}

/// A struct field or union variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub data_type: DataType,
    pub doc: Option<String>,
    pub default: Option<Value>,
}

impl Field {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            doc: None,
            default: None,
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// A default value attached to a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    /// Refers to a union variant rather than a plain literal.
    TagRef(TagRef),
}

/// "The variant named `tag` of union `union`".
#[derive(Debug, Clone, PartialEq)]
pub struct TagRef {
    pub union: Arc<Union>,
    pub tag: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Arc<Struct> {
        Arc::new(Struct {
            name: "PathArg".into(),
            namespace: "files".into(),
            doc: None,
            parent: None,
            fields: vec![Field::new("path", DataType::Primitive(Primitive::String))],
        })
    }

    #[test]
    fn test_primitive_names_round_trip() {
        for primitive in Primitive::ALL {
            assert_eq!(Primitive::from_name(primitive.as_str()), Some(primitive));
        }
        assert_eq!(Primitive::from_name("string"), None);
    }

    #[test]
    fn test_all_fields_puts_parent_first() {
        let child = Struct {
            name: "DownloadArg".into(),
            namespace: "files".into(),
            doc: None,
            parent: Some(base()),
            fields: vec![Field::new("rev", DataType::Primitive(Primitive::String))],
        };
        let names: Vec<_> = child.all_fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["path", "rev"]);
    }

    #[test]
    fn test_user_defined() {
        let ty = DataType::Struct(base());
        assert!(ty.is_user_defined());
        assert_eq!(ty.user_defined_name(), Some(("files", "PathArg")));
        assert_eq!(ty.field_count(), 1);

        let list = DataType::List(Box::new(ty));
        assert!(!list.is_user_defined());
        assert_eq!(list.field_count(), 0);
        assert!(DataType::Void.is_void());
    }

    #[test]
    fn test_field_count_ignores_inherited_fields() {
        let child = DataType::Struct(Arc::new(Struct {
            name: "DeleteArg".into(),
            namespace: "files".into(),
            doc: None,
            parent: Some(base()),
            fields: vec![],
        }));
        assert_eq!(child.field_count(), 0);
    }

    #[test]
    fn test_field_default() {
        let field = Field::new("limit", DataType::Primitive(Primitive::UInt32));
        assert!(!field.has_default());
        assert!(field.with_default(Value::Int(100)).has_default());
    }
}
