use std::path::{Path, PathBuf};

use eyre::Result;

/// Trait for types that represent a generated file
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Render the file content
    fn render(&self) -> Result<String>;

    /// Render and write the file to disk, returning the written path.
    ///
    /// Nothing is written when rendering fails.
    fn write(&self, base: &Path) -> Result<PathBuf> {
        let content = self.render()?;
        let path = self.path(base);
        write_file(&path, &content)?;
        Ok(path)
    }
}

/// Write `content` to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use eyre::eyre;
    use tempfile::TempDir;

    use super::*;

    struct Fixed(&'static str);

    impl GeneratedFile for Fixed {
        fn path(&self, base: &Path) -> PathBuf {
            base.join("pkg").join("client.py")
        }

        fn render(&self) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct Broken;

    impl GeneratedFile for Broken {
        fn path(&self, base: &Path) -> PathBuf {
            base.join("broken.py")
        }

        fn render(&self) -> Result<String> {
            Err(eyre!("render failed"))
        }
    }

    #[test]
    fn test_write_file_creates_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.txt");

        write_file(&path, "hello").unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("c").join("test.txt");

        write_file(&path, "nested").unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_write_file_overwrites_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.txt");

        write_file(&path, "first").unwrap();
        write_file(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_generated_file_write() {
        let temp = TempDir::new().unwrap();

        let written = Fixed("class Base(object):\n    pass\n")
            .write(temp.path())
            .unwrap();

        assert_eq!(written, temp.path().join("pkg").join("client.py"));
        assert_eq!(
            fs::read_to_string(&written).unwrap(),
            "class Base(object):\n    pass\n"
        );
    }

    #[test]
    fn test_generated_file_render_failure_writes_nothing() {
        let temp = TempDir::new().unwrap();

        assert!(Broken.write(temp.path()).is_err());
        assert!(!temp.path().join("broken.py").exists());
    }
}
