//! The generated client module.

use std::path::{Path, PathBuf};

use eyre::Result;
use tessera_core::GeneratedFile;

/// `<module_name>.py`, holding the rendered client class.
pub struct ClientPy {
    module_name: String,
    source: String,
}

impl ClientPy {
    pub fn new(module_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            source: source.into(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.py", self.module_name)
    }
}

impl GeneratedFile for ClientPy {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(self.file_name())
    }

    fn render(&self) -> Result<String> {
        Ok(self.source.clone())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_writes_module_file() {
        let dir = TempDir::new().unwrap();
        let file = ClientPy::new("base", "class Base(object):\n    pass\n");

        let path = file.write(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("base.py"));
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "class Base(object):\n    pass\n"
        );
    }
}
