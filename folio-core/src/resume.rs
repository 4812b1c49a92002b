//! Sources for the read-only resume document.
//!
//! Every provider degrades to `None` instead of failing; the caller decides
//! whether a missing resume is worth mentioning.

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::client::ApiClient;
use crate::config::{FolioConfig, ResumeSourceKind};
use crate::error::{FolioError, FolioResult};
use crate::models::ResumeData;

const BUNDLED_RESUME: &str = include_str!("../data/resume.json");

#[async_trait]
pub trait ResumeProvider: Send + Sync {
    /// Loads the document. Not memoized: each call reads the source again.
    async fn load(&self) -> Option<ResumeData>;

    fn describe(&self) -> String;
}

/// The document compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledResume;

impl BundledResume {
    pub fn parse() -> FolioResult<ResumeData> {
        serde_json::from_str(BUNDLED_RESUME).map_err(|e| FolioError::ResumeParseError {
            origin: "bundled".to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl ResumeProvider for BundledResume {
    async fn load(&self) -> Option<ResumeData> {
        match Self::parse() {
            Ok(resume) => Some(resume),
            Err(e) => {
                e.log();
                None
            }
        }
    }

    fn describe(&self) -> String {
        "bundled".to_string()
    }
}

#[derive(Debug, Clone)]
pub struct FileResume {
    path: PathBuf,
}

impl FileResume {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    pub async fn try_load(&self) -> FolioResult<ResumeData> {
        debug!(path = %self.path.display(), "Reading resume file");
        let raw = tokio::fs::read_to_string(&self.path).await?;
        serde_json::from_str(&raw).map_err(|e| FolioError::ResumeParseError {
            origin: self.path.display().to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl ResumeProvider for FileResume {
    async fn load(&self) -> Option<ResumeData> {
        match self.try_load().await {
            Ok(resume) => Some(resume),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error_code = e.error_code(),
                    "Resume file unavailable: {}",
                    e
                );
                None
            }
        }
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// The server-hosted mirror behind `GET /api/resume`.
#[derive(Debug, Clone)]
pub struct RemoteResume {
    client: ApiClient,
}

impl RemoteResume {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResumeProvider for RemoteResume {
    async fn load(&self) -> Option<ResumeData> {
        self.client.fetch_resume().await
    }

    fn describe(&self) -> String {
        format!("remote {}/api/resume", self.client.base_url())
    }
}

/// Builds the provider selected by `resume.source`.
pub fn provider_from_config(config: &FolioConfig) -> FolioResult<Box<dyn ResumeProvider>> {
    match config.resume.source {
        ResumeSourceKind::Bundled => Ok(Box::new(BundledResume)),
        ResumeSourceKind::File => {
            let path = config
                .resume
                .path
                .clone()
                .ok_or_else(|| FolioError::InvalidConfigValue {
                    key: "resume.path".to_string(),
                    message: "required when resume.source is \"file\"".to_string(),
                })?;
            Ok(Box::new(FileResume::new(path)))
        }
        ResumeSourceKind::Remote => Ok(Box::new(RemoteResume::new(ApiClient::from_config(
            &config.api,
        )))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bundled_resume_parses() {
        let resume = BundledResume::parse().unwrap();
        assert!(!resume.name.is_empty());
        assert!(resume.skills.get("frontend").is_some());
        assert!(!resume.projects.is_empty());
    }

    #[tokio::test]
    async fn test_bundled_provider_loads() {
        let resume = BundledResume.load().await;
        assert!(resume.is_some());
        assert_eq!(BundledResume.describe(), "bundled");
    }

    #[tokio::test]
    async fn test_file_provider_reads_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BUNDLED_RESUME.as_bytes()).unwrap();

        let provider = FileResume::new(file.path());
        let resume = provider.load().await.unwrap();
        assert_eq!(resume, BundledResume::parse().unwrap());
    }

    #[tokio::test]
    async fn test_file_provider_missing_file_is_none() {
        let provider = FileResume::new("/nonexistent/resume.json");
        assert!(provider.load().await.is_none());
        assert!(matches!(
            provider.try_load().await,
            Err(FolioError::IoError(_))
        ));
    }

    #[tokio::test]
    async fn test_file_provider_malformed_is_none() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"name\": 42}").unwrap();

        let provider = FileResume::new(file.path());
        assert!(provider.load().await.is_none());
        assert!(matches!(
            provider.try_load().await,
            Err(FolioError::ResumeParseError { .. })
        ));
    }

    #[test]
    fn test_provider_from_config() {
        let mut config = FolioConfig::default();
        assert_eq!(provider_from_config(&config).unwrap().describe(), "bundled");

        config.resume.source = ResumeSourceKind::Remote;
        config.api.base_url = "http://example.test".to_string();
        assert_eq!(
            provider_from_config(&config).unwrap().describe(),
            "remote http://example.test/api/resume"
        );

        config.resume.source = ResumeSourceKind::File;
        assert!(provider_from_config(&config).is_err());
    }
}
