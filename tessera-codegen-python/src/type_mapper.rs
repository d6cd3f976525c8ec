//! Python type mapper implementation.

use tessera_codegen::language::TypeMapper;
use tessera_ir::Primitive;

/// Python type mapper implementation.
pub struct PythonTypeMapper;

impl TypeMapper for PythonTypeMapper {
    fn map_primitive(&self, primitive: Primitive) -> &'static str {
        match primitive {
            Primitive::Boolean => "bool",
            Primitive::Bytes => "bytes",
            Primitive::Float32 | Primitive::Float64 => "float",
            Primitive::Int32 | Primitive::Int64 | Primitive::UInt32 | Primitive::UInt64 => "int",
            Primitive::String => "str",
            Primitive::Timestamp => "datetime",
        }
    }

    fn void(&self) -> &'static str {
        "None"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_primitive() {
        let mapper = PythonTypeMapper;
        assert_eq!(mapper.map_primitive(Primitive::String), "str");
        assert_eq!(mapper.map_primitive(Primitive::UInt64), "int");
        assert_eq!(mapper.map_primitive(Primitive::Float32), "float");
        assert_eq!(mapper.map_primitive(Primitive::Timestamp), "datetime");
        assert_eq!(mapper.map_primitive(Primitive::Bytes), "bytes");
        assert_eq!(mapper.void(), "None");
    }
}
