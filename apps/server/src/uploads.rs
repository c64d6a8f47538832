//! On-disk store for uploaded images.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tokio::{fs, io::AsyncWriteExt};
use wishlist_core::constants::UPLOADS_PREFIX;

/// Writes uploaded files into one directory that is served under `/uploads`.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Opens the store, creating the directory when it is missing.
    pub async fn open(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Saves `bytes` under a timestamp-prefixed, sanitized name and returns the
    /// public path, e.g. `/uploads/1718000000000_photo.jpg`.
    ///
    /// Existing files are never overwritten: a name already taken within the
    /// same millisecond gets a counter, e.g. `1718000000000_1_photo.jpg`.
    pub async fn save(&self, original_name: Option<&str>, bytes: &[u8]) -> std::io::Result<String> {
        let millis = chrono::Utc::now().timestamp_millis();
        let original_name = original_name.unwrap_or_default();

        let mut attempt = 0;
        let (file_name, mut file) = loop {
            let file_name = stored_file_name(millis, attempt, original_name);
            let opened = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.dir.join(&file_name))
                .await;
            match opened {
                Ok(file) => break (file_name, file),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => return Err(e),
            }
        };

        file.write_all(bytes).await?;
        file.flush().await?;
        tracing::debug!("Stored upload {} ({} bytes)", file_name, bytes.len());
        Ok(format!("{}{}", UPLOADS_PREFIX, file_name))
    }

    /// Removes a previously saved upload given its public path. Missing files
    /// and paths outside the store are ignored.
    pub async fn discard(&self, public_path: &str) {
        let Some(name) = public_path.strip_prefix(UPLOADS_PREFIX) else {
            return;
        };
        if name != sanitize_file_name(name) {
            return;
        }
        if let Err(e) = fs::remove_file(self.dir.join(name)).await {
            tracing::warn!("Failed to remove upload {}: {}", name, e);
        }
    }
}

/// Replaces every character outside `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    // Only the last path component is kept; browsers may send full paths
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        "file".to_string()
    } else {
        cleaned
    }
}

fn stored_file_name(millis: i64, attempt: u32, original_name: &str) -> String {
    let name = sanitize_file_name(original_name);
    if attempt == 0 {
        format!("{}_{}", millis, name)
    } else {
        format!("{}_{}_{}", millis, attempt, name)
    }
}
