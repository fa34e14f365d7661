use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::Path;

/// 生成結果（文字、預覽 HTML）寫到本地目錄
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&full_path, data).await?;
        Ok(full_path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_then_read_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().display().to_string());

        let written = storage
            .write_file("run_20240101/content.txt", b"SOLAR INSIGHTS")
            .await
            .unwrap();

        assert!(written.ends_with("content.txt"));
        assert_eq!(
            storage.read_file("run_20240101/content.txt").await.unwrap(),
            b"SOLAR INSIGHTS"
        );
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let storage = LocalStorage::new("/definitely/missing".to_string());
        let result = tokio_test::block_on(storage.read_file("nothing.txt"));
        assert!(matches!(result, Err(crate::utils::error::CrewError::IoError(_))));
    }
}
