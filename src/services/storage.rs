//! Media file persistence. Uploaded files are stored under generated
//! names so client-supplied filenames never touch the filesystem.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::StorageConfig;
use crate::constants::{IMAGE_EXTENSIONS, VIDEO_EXTENSIONS};

#[derive(Clone)]
pub struct MediaStorage {
    media_path: PathBuf,
    profile_images_path: PathBuf,
}

impl MediaStorage {
    #[must_use]
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            media_path: PathBuf::from(&config.media_path),
            profile_images_path: PathBuf::from(&config.profile_images_path),
        }
    }

    #[must_use]
    pub fn media_path(&self) -> &Path {
        &self.media_path
    }

    #[must_use]
    pub fn profile_images_path(&self) -> &Path {
        &self.profile_images_path
    }

    /// Save an uploaded video and return its stored filename.
    pub async fn save_video(&self, original_filename: &str, bytes: &[u8]) -> Result<String> {
        Self::save_into(&self.media_path, original_filename, bytes).await
    }

    /// Save an uploaded profile image and return its stored filename.
    pub async fn save_profile_image(
        &self,
        original_filename: &str,
        bytes: &[u8],
    ) -> Result<String> {
        Self::save_into(&self.profile_images_path, original_filename, bytes).await
    }

    async fn save_into(dir: &Path, original_filename: &str, bytes: &[u8]) -> Result<String> {
        if !dir.exists() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        }

        let stored = stored_name(original_filename);
        let file_path = dir.join(&stored);

        fs::write(&file_path, bytes)
            .await
            .with_context(|| format!("Failed to write {}", file_path.display()))?;

        info!(original = %original_filename, path = %file_path.display(), "Stored uploaded file");
        Ok(stored)
    }

    /// Remove a stored video file. Best-effort: a missing or locked file is
    /// logged and swallowed, never surfaced to the caller.
    pub async fn remove_video(&self, stored: &str) {
        let file_path = self.media_path.join(stored);
        match fs::remove_file(&file_path).await {
            Ok(()) => info!(path = %file_path.display(), "Removed media file"),
            Err(e) => warn!(path = %file_path.display(), error = %e, "Failed to remove media file"),
        }
    }
}

/// Lowercased extension of a client-supplied filename, if any.
#[must_use]
pub fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
}

#[must_use]
pub fn is_allowed_video(filename: &str) -> bool {
    extension_of(filename).is_some_and(|ext| VIDEO_EXTENSIONS.contains(&ext.as_str()))
}

#[must_use]
pub fn is_allowed_image(filename: &str) -> bool {
    extension_of(filename).is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Collision-free stored name: uuid + the original's lowercased extension.
fn stored_name(original_filename: &str) -> String {
    let id = Uuid::new_v4().simple();
    match extension_of(original_filename) {
        Some(ext) => format!("{id}.{ext}"),
        None => id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_extension_acceptance() {
        assert!(is_allowed_video("clip.mp4"));
        assert!(is_allowed_video("CLIP.MP4"));
        assert!(is_allowed_video("holiday.mkv"));
        assert!(!is_allowed_video("malware.exe"));
        assert!(!is_allowed_video("noextension"));
        assert!(!is_allowed_video("archive.tar.gz"));
    }

    #[test]
    fn test_image_extension_acceptance() {
        assert!(is_allowed_image("me.png"));
        assert!(is_allowed_image("me.JPEG"));
        assert!(!is_allowed_image("me.bmp"));
        assert!(!is_allowed_image("me.mp4"));
    }

    #[test]
    fn test_stored_name_keeps_extension_only() {
        let stored = stored_name("../../etc/passwd.mp4");
        assert!(stored.ends_with(".mp4"));
        assert!(!stored.contains('/'));
        assert!(!stored.contains(".."));
    }

    #[test]
    fn test_stored_names_are_unique() {
        assert_ne!(stored_name("a.mp4"), stored_name("a.mp4"));
    }
}
