use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&full_path, data)?;
        Ok(full_path.display().to_string())
    }

    async fn clear(&self) -> Result<usize> {
        let dir = Path::new(&self.base_path);
        fs::create_dir_all(dir)?;

        let mut removed = 0;
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            if !entry.file_type()?.is_file() {
                tracing::debug!("Skipping non-file entry {}", path.display());
                continue;
            }

            match fs::remove_file(&path) {
                Ok(()) => removed += 1,
                // keep going, the remaining files can still be removed
                Err(e) => tracing::error!("Failed to remove {}: {}", path.display(), e),
            }
        }

        Ok(removed)
    }
}
