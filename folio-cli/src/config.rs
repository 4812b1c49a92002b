use anyhow::{Context, Result};
use folio_core::{FolioConfig, ResumeSourceKind};
use std::path::PathBuf;

/// Settings given on the command line, applied over the loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub api_url: Option<String>,
    pub no_color: bool,
}

pub fn load(overrides: &CliOverrides) -> Result<FolioConfig> {
    let mut config = FolioConfig::load().context(
        "Could not load configuration.\n\
         Check folio.toml, ~/.folio/config.toml and FOLIO_* environment variables",
    )?;

    if let Some(url) = &overrides.api_url {
        config.api.base_url = url.trim_end_matches('/').to_string();
    }
    if overrides.no_color {
        config.display.color = false;
    }

    config.validate().context("Invalid command-line override")?;
    Ok(config)
}

/// Applies `--source`/`--path` for the resume command.
pub fn with_resume_source(
    mut config: FolioConfig,
    source: Option<ResumeSourceKind>,
    path: Option<PathBuf>,
) -> Result<FolioConfig> {
    if let Some(path) = path {
        config.resume.path = Some(path);
        if source.is_none() {
            config.resume.source = ResumeSourceKind::File;
        }
    }
    if let Some(source) = source {
        config.resume.source = source;
    }

    config.validate()?;
    Ok(config)
}
