//! Option loading for the CLI
//!
//! Layers, lowest precedence first: defaults, the `--options` JSON file,
//! then `BADGEKIT_LABEL` / `BADGEKIT_STYLE` and command-line flags (clap
//! resolves those two against each other, flags win).

use anyhow::{Context, Result};
use clap::Args;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

use badgekit_core::{BadgeOptions, BadgeStyle, Platform};

#[derive(Args, Debug, Default, Clone)]
pub struct OptionArgs {
    /// JSON file with badge options (camelCase keys)
    #[arg(long, value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Left-hand badge text
    #[arg(long, env = "BADGEKIT_LABEL")]
    pub label: Option<String>,

    /// shields.io style (flat, flat-square, plastic, for-the-badge, social)
    #[arg(long, env = "BADGEKIT_STYLE")]
    pub style: Option<BadgeStyle>,

    /// Platform to render a badge for (repeatable)
    #[arg(long = "badge-platform", value_name = "PLATFORM")]
    pub badge_platforms: Vec<Platform>,

    /// Platform to write README instructions for (repeatable)
    #[arg(long = "readme-platform", value_name = "PLATFORM")]
    pub readme_platforms: Vec<Platform>,

    /// Leave the manual mcp.json block out of the README
    #[arg(long)]
    pub no_manual_config: bool,
}

impl OptionArgs {
    pub fn resolve(&self) -> Result<BadgeOptions> {
        let mut options = match &self.options {
            Some(path) => load_options_file(path)?,
            None => BadgeOptions::default(),
        };

        if let Some(label) = &self.label {
            options.label = label.clone();
        }
        if let Some(style) = self.style {
            options.style = style;
        }
        if !self.badge_platforms.is_empty() {
            options.badge_platforms = self.badge_platforms.clone();
        }
        if !self.readme_platforms.is_empty() {
            options.readme_platforms = self.readme_platforms.clone();
        }
        if self.no_manual_config {
            options.include_manual_config = false;
        }

        debug!(?options, "Resolved badge options");
        Ok(options)
    }
}

pub fn load_options_file(path: &Path) -> Result<BadgeOptions> {
    let raw = read_source(path)?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid options file: {}", path.display()))
}

/// Read a file, or stdin when the path is `-`.
pub fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
