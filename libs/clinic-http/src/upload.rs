//! Disk-backed storage for multipart uploads.
//!
//! Files land under `<root>/<category>/` with a random name; the relative
//! path is what gets persisted on the owning record.

use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Writes uploaded files into per-resource subdirectories of one root.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Persist `bytes` under `category`, keeping the original extension.
    /// Returns the relative path to store on the owning record.
    pub async fn save(
        &self,
        category: &str,
        original_name: &str,
        bytes: &[u8],
    ) -> std::io::Result<String> {
        let mut file_name = Uuid::new_v4().to_string();
        if let Some(ext) = Path::new(original_name).extension().and_then(|e| e.to_str()) {
            file_name.push('.');
            file_name.push_str(ext);
        }

        let dir = self.root.join(category);
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&file_name), bytes).await?;

        Ok(format!("{category}/{file_name}"))
    }
}
