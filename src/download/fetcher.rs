//! Model archive download and extraction.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use bzip2::read::BzDecoder;
use tracing::info;

use crate::config::{AppConfig, models};

/// Make sure the configured model is present, downloading it when allowed.
///
/// Blocking; call it off the async runtime.
///
/// # Errors
/// Returns an error if the model is missing and `--download` is off, if no
/// archive URL is known, or if the download or extraction fails.
pub fn ensure_model(config: &AppConfig) -> Result<()> {
    if config.required_model_files().iter().all(|p| p.exists()) {
        return Ok(());
    }

    if !config.download {
        return Ok(()); // validate() reports the missing files
    }

    let url = config
        .model_url
        .clone()
        .or_else(|| models::archive_url(&config.model))
        .ok_or_else(|| anyhow::anyhow!("No archive is published for model '{}'; pass --model-url or install it under {}", config.model, config.tts_dir().display()))?;

    let dest = config.model_dir.join("tts");
    std::fs::create_dir_all(&dest).with_context(|| format!("Failed to create {}", dest.display()))?;

    info!("⬇️  Downloading {} from {}", config.model, url);
    let response = reqwest::blocking::get(&url)
        .and_then(|r| r.error_for_status())
        .with_context(|| format!("Failed to download {}", url))?;

    unpack_archive(response, &dest)?;

    if let Some(missing) = config.required_model_files().into_iter().find(|p| !p.exists()) {
        anyhow::bail!("Archive from {} did not contain {}", url, missing.display());
    }

    info!("✅ Model {} installed in {}", config.model, config.tts_dir().display());
    Ok(())
}

/// Unpack a `.tar.bz2` stream into `dest`.
pub fn unpack_archive<R: Read>(reader: R, dest: &Path) -> Result<()> {
    let mut archive = tar::Archive::new(BzDecoder::new(reader));
    archive.unpack(dest).with_context(|| format!("Failed to unpack model archive into {}", dest.display()))
}
