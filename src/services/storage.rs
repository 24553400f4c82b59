use chrono::Utc;
use regex::Regex;
use std::{
    path::{Path, PathBuf},
    sync::OnceLock,
};

/// What an upload is for; each purpose gets its own directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPurpose {
    ProfilePhoto,
    VerificationPhoto,
    AgeDocument,
}

impl UploadPurpose {
    pub fn directory(self) -> &'static str {
        match self {
            Self::ProfilePhoto => "profiles",
            Self::VerificationPhoto => "verification",
            Self::AgeDocument => "age_verification",
        }
    }

    fn file_prefix(self) -> &'static str {
        match self {
            Self::ProfilePhoto => "profile",
            Self::VerificationPhoto => "verification",
            Self::AgeDocument => "age_verification",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Uploaded file is empty")]
    EmptyFile,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct StoredFile {
    pub file_name: String,
    /// Path as recorded on the user / verification rows.
    pub path: String,
}

/// Local-disk stand-in for object storage.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn directory(&self, purpose: UploadPurpose) -> PathBuf {
        self.root.join(purpose.directory())
    }

    /// Writes `bytes` to `<root>/<purpose dir>/<prefix>_<user>_<unix secs>_<name>`.
    /// Two uploads of the same name by the same user within one second
    /// overwrite each other.
    pub async fn save(
        &self,
        purpose: UploadPurpose,
        user_id: i64,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<StoredFile, StorageError> {
        if bytes.is_empty() {
            return Err(StorageError::EmptyFile);
        }

        let dir = self.directory(purpose);
        tokio::fs::create_dir_all(&dir).await?;

        let file_name = stored_file_name(purpose, user_id, Utc::now().timestamp(), original_name);
        let full_path = dir.join(&file_name);
        tokio::fs::write(&full_path, bytes).await?;

        tracing::debug!(path = %full_path.display(), size = bytes.len(), "Stored upload");

        Ok(StoredFile {
            path: full_path.to_string_lossy().replace('\\', "/"),
            file_name,
        })
    }

    /// Removes a file written by [`save`](Self::save) whose database record
    /// could not be written. Failures are logged and otherwise ignored.
    pub async fn discard(&self, stored: &StoredFile) {
        if let Err(e) = tokio::fs::remove_file(&stored.path).await {
            tracing::warn!(path = %stored.path, error = %e, "Failed to remove orphaned upload");
        }
    }
}

fn stored_file_name(purpose: UploadPurpose, user_id: i64, unix_secs: i64, original: &str) -> String {
    format!(
        "{}_{}_{}_{}",
        purpose.file_prefix(),
        user_id,
        unix_secs,
        sanitize_file_name(original)
    )
}

fn unsafe_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9._-]").expect("static pattern"))
}

/// Keeps the last path component and replaces anything outside `[A-Za-z0-9._-]`.
pub fn sanitize_file_name(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim_start_matches('.');

    let cleaned = unsafe_chars().replace_all(base, "_");
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.into_owned()
    }
}
