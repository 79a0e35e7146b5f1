//! Downloadable artifacts.
//!
//! The TXT generator and the results export both hand the user a file. In
//! the browser that file is a `Blob` behind an object URL; on the command
//! line it is written to disk. [`ObjectUrlFactory`] is the platform port,
//! [`DownloadSlot`] owns the single live URL and revokes the previous one
//! whenever the content changes.

use crate::error::ArtifactResult;

/// A file ready to be offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub mime_type: String,
    pub contents: String,
}

impl Artifact {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        contents: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            contents: contents.into(),
        }
    }

    /// Plain text artifact (`text/plain;charset=utf8`).
    pub fn plain_text(file_name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self::new(file_name, "text/plain;charset=utf8", contents)
    }

    /// CSV artifact (`text/csv;charset=utf8`).
    pub fn csv(file_name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self::new(file_name, "text/csv;charset=utf8", contents)
    }

    /// Write the artifact contents to `path`.
    #[cfg(feature = "native")]
    pub fn write_to(&self, path: &std::path::Path) -> ArtifactResult<()> {
        std::fs::write(path, &self.contents)?;
        Ok(())
    }
}

/// Creates and revokes object URLs for artifacts.
pub trait ObjectUrlFactory {
    fn create(&self, artifact: &Artifact) -> ArtifactResult<String>;
    fn revoke(&self, url: &str);
}

/// Holds at most one live object URL.
pub struct DownloadSlot<F: ObjectUrlFactory> {
    factory: F,
    current: Option<String>,
}

impl<F: ObjectUrlFactory> DownloadSlot<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            current: None,
        }
    }

    /// URL of the current artifact, if any.
    pub fn url(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Publish a new artifact, revoking the URL it supersedes.
    pub fn replace(&mut self, artifact: &Artifact) -> ArtifactResult<&str> {
        let url = self.factory.create(artifact)?;
        if let Some(previous) = self.current.replace(url) {
            log::debug!("Revoking superseded download URL {}", previous);
            self.factory.revoke(&previous);
        }
        Ok(self.current.as_deref().unwrap_or_default())
    }

    /// Revoke the current URL.
    pub fn clear(&mut self) {
        if let Some(previous) = self.current.take() {
            self.factory.revoke(&previous);
        }
    }
}

impl<F: ObjectUrlFactory> Drop for DownloadSlot<F> {
    fn drop(&mut self) {
        self.clear();
    }
}
