use serde::{Deserialize, Serialize};

use crate::error::{DealflowError, Result};

/// Limits applied to files uploaded on the documents screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadPolicy {
    /// Lowercase extensions including the dot, e.g. `".pdf"`
    pub allowed_extensions: Vec<String>,
    pub max_size_mb: u64,
}

impl UploadPolicy {
    pub const DEFAULT_MAX_SIZE_MB: u64 = 10;

    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_mb.saturating_mul(1024 * 1024)
    }

    fn allows(&self, extension: &str) -> bool {
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.to_lowercase() == extension)
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            allowed_extensions: [".doc", ".docx", ".pdf", ".xls", ".xlsx"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            max_size_mb: Self::DEFAULT_MAX_SIZE_MB,
        }
    }
}

/// Extension of a file name as `.ext`, lowercased
///
/// A name without a dot is treated as all extension, so `"README"`
/// yields `".readme"` and is rejected by any sensible allowlist.
fn extension_of(name: &str) -> String {
    let last = name.rsplit('.').next().unwrap_or(name);
    format!(".{}", last.to_lowercase())
}

/// Checks a file picked for upload against `policy`
///
/// The size limit is checked before the file type.
pub fn validate_upload(name: &str, size: u64, policy: &UploadPolicy) -> Result<()> {
    if size > policy.max_size_bytes() {
        return Err(DealflowError::FileTooLarge {
            size,
            limit_mb: policy.max_size_mb,
        });
    }

    let extension = extension_of(name);
    if !policy.allows(&extension) {
        return Err(DealflowError::UnsupportedFileType {
            extension,
            allowed: policy.allowed_extensions.join(", "),
        });
    }

    tracing::trace!(name, size, "Upload accepted");
    Ok(())
}
