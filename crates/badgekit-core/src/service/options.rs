//! Generation options
//!
//! Badge text, style, and the two independent platform selections: one for
//! one-click badges, one for README install instructions.

use serde::{Deserialize, Serialize};

use crate::shields::BadgeStyle;

use super::encoder::Platform;

pub const DEFAULT_BADGE_LABEL: &str = "Install Server";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BadgeOptions {
    /// Left-hand badge text. Only spaces are escaped in the shields.io path,
    /// so `-`, `/`, `?` and `#` in a label break the badge URL.
    pub label: String,

    pub style: BadgeStyle,

    /// Platforms rendered as one-click install badges
    pub badge_platforms: Vec<Platform>,

    /// Platforms that get a section in the README instructions
    pub readme_platforms: Vec<Platform>,

    /// Append the manual `mcp.json` block to the README
    pub include_manual_config: bool,
}

impl Default for BadgeOptions {
    fn default() -> Self {
        Self {
            label: DEFAULT_BADGE_LABEL.to_string(),
            style: BadgeStyle::default(),
            badge_platforms: vec![Platform::VsCode, Platform::VsCodeInsiders],
            readme_platforms: Platform::ALL.to_vec(),
            include_manual_config: true,
        }
    }
}

impl BadgeOptions {
    /// Selected badge platforms, first occurrence of each, in the given order.
    pub fn badge_platforms(&self) -> Vec<Platform> {
        dedup(&self.badge_platforms)
    }

    pub fn readme_platforms(&self) -> Vec<Platform> {
        dedup(&self.readme_platforms)
    }

    pub fn badge_enabled(&self, platform: Platform) -> bool {
        self.badge_platforms.contains(&platform)
    }

    /// Badge text, falling back to the default when blank.
    pub fn label(&self) -> &str {
        let label = self.label.trim();
        if label.is_empty() {
            DEFAULT_BADGE_LABEL
        } else {
            label
        }
    }
}

fn dedup(platforms: &[Platform]) -> Vec<Platform> {
    let mut out = Vec::with_capacity(platforms.len());
    for platform in platforms {
        if !out.contains(platform) {
            out.push(*platform);
        }
    }
    out
}
