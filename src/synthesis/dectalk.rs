use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;
use tracing::{debug, info, warn};

use super::{AudioHandle, Synthesizer};
use crate::config::TtsConfig;
use crate::process::{run_checked, run_checked_with_env};

/// Install location handed to the install script
const INSTALL_DIR_VAR: &str = "DECTALK_DIR";

/// DECtalk `say` driven as a child process
pub struct DecTalkSynthesizer {
    config: TtsConfig,
}

impl DecTalkSynthesizer {
    pub fn new(config: TtsConfig) -> Self {
        Self { config }
    }

    pub fn is_installed(&self) -> bool {
        self.config.install_dir.is_dir()
    }

    /// Run the install script when the engine directory is missing.
    pub async fn ensure_installed(&self) -> Result<()> {
        if self.is_installed() {
            debug!("DECtalk found at {}", self.config.install_dir.display());
            return Ok(());
        }
        info!("📦 Installing DECtalk synthesizer. This may take a few minutes...");
        self.install().await
    }

    async fn install(&self) -> Result<()> {
        run_checked_with_env(
            "bash",
            [self.config.install_script.as_os_str()],
            [(INSTALL_DIR_VAR, self.config.install_dir.as_os_str())],
        )
        .await
        .with_context(|| {
            format!("DECtalk install script {} failed", self.config.install_script.display())
        })?;
        Ok(())
    }

    fn command_args(&self, text: &str, output: &Path) -> Vec<OsString> {
        vec![
            "-a".into(),
            text.into(),
            "-fo".into(),
            output.as_os_str().to_owned(),
            "-s".into(),
            self.config.speaker.to_string().into(),
            "-r".into(),
            self.config.rate.to_string().into(),
        ]
    }
}

impl Default for DecTalkSynthesizer {
    fn default() -> Self {
        Self::new(TtsConfig::default())
    }
}

#[async_trait]
impl Synthesizer for DecTalkSynthesizer {
    async fn synthesize(&self, text: &str, output: &Path) -> Result<AudioHandle> {
        run_checked(self.config.binary_path(), self.command_args(text, output)).await?;
        if !output.exists() {
            bail!("DECtalk exited cleanly but wrote no audio to {}", output.display());
        }
        Ok(AudioHandle::new(output))
    }

    /// Remove the installation and run the install script again.
    async fn repair(&self) -> Result<()> {
        warn!("Attempting to remove and reinstall DECtalk...");
        if self.is_installed() {
            tokio::fs::remove_dir_all(&self.config.install_dir)
                .await
                .with_context(|| format!("Failed to remove {}", self.config.install_dir.display()))?;
        }
        self.install().await
    }
}
