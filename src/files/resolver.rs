use std::path::{Component, Path, PathBuf};

use crate::config::StaticFilesConfig;

/// Resolves request paths against a content root.
///
/// `/` maps to the index document; any other path is appended to the root.
/// Paths containing `..` never resolve.
#[derive(Debug, Clone)]
pub struct FileResolver {
    root: PathBuf,
    index: String,
    error_page: PathBuf,
}

impl FileResolver {
    pub fn new(config: StaticFilesConfig) -> Self {
        Self {
            root: config.root,
            index: config.index,
            error_page: config.error_page,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The file `path` refers to, or `None` when it would leave the root.
    pub fn target(&self, path: &str) -> Option<PathBuf> {
        if path == "/" {
            return Some(self.root.join(&self.index));
        }

        let relative = Path::new(path.trim_start_matches('/'));
        let confined = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !confined {
            tracing::warn!(path = %path, "rejected path outside content root");
            return None;
        }

        Some(self.root.join(relative))
    }

    /// Reads the whole file for `path`.
    ///
    /// Returns `None` if the path is rejected or the file cannot be opened or
    /// read, without distinguishing the cause.
    pub async fn resolve(&self, path: &str) -> Option<Vec<u8>> {
        let target = self.target(path)?;
        match tokio::fs::read(&target).await {
            Ok(content) => Some(content),
            Err(e) => {
                tracing::debug!(file = %target.display(), error = %e, "file not resolved");
                None
            }
        }
    }

    /// Bytes of the error page. Empty if the page itself is missing.
    pub async fn error_page(&self) -> Vec<u8> {
        match tokio::fs::read(&self.error_page).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(
                    file = %self.error_page.display(),
                    error = %e,
                    "error page unreadable, sending empty 404 body"
                );
                Vec::new()
            }
        }
    }
}
