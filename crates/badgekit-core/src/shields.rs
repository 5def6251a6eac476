//! shields.io badge URLs and Markdown
//!
//! Every badge this crate produces is a shields.io image (or a fixed asset
//! published by the host) optionally wrapped in a link.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const SHIELDS_BASE_URL: &str = "https://img.shields.io";

/// shields.io `style` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BadgeStyle {
    Flat,
    #[default]
    FlatSquare,
    Plastic,
    ForTheBadge,
    Social,
}

impl BadgeStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeStyle::Flat => "flat",
            BadgeStyle::FlatSquare => "flat-square",
            BadgeStyle::Plastic => "plastic",
            BadgeStyle::ForTheBadge => "for-the-badge",
            BadgeStyle::Social => "social",
        }
    }
}

impl fmt::Display for BadgeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BadgeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" => Ok(BadgeStyle::Flat),
            "flat-square" => Ok(BadgeStyle::FlatSquare),
            "plastic" => Ok(BadgeStyle::Plastic),
            "for-the-badge" => Ok(BadgeStyle::ForTheBadge),
            "social" => Ok(BadgeStyle::Social),
            other => Err(format!("unknown badge style: {}", other)),
        }
    }
}

/// Badge text as a shields.io path segment: spaces become underscores.
pub fn path_segment(text: &str) -> String {
    text.replace(' ', "_")
}

/// Static badge: `/badge/<label>-<message>-<color>?style=..&logo=..&logoColor=white`.
///
/// `color` may be given with or without a leading `#`.
pub fn static_badge_url(
    label: &str,
    message: &str,
    color: &str,
    style: BadgeStyle,
    logo: Option<&str>,
) -> String {
    let mut url = format!(
        "{}/badge/{}-{}-{}?style={}",
        SHIELDS_BASE_URL,
        path_segment(label),
        path_segment(message),
        color.trim_start_matches('#'),
        style
    );
    if let Some(logo) = logo {
        url.push_str(&format!("&logo={}&logoColor=white", logo));
    }
    url
}

/// Dynamic badge served by one of the shields.io integrations, e.g. `npm/v/react`.
pub fn dynamic_badge_url(path: &str, style: BadgeStyle) -> String {
    format!(
        "{}/{}?style={}",
        SHIELDS_BASE_URL,
        path.trim_start_matches('/'),
        style
    )
}

/// `![alt](url)`
pub fn markdown_image(alt: &str, image_url: &str) -> String {
    format!("![{}]({})", alt, image_url)
}

/// An image plus the page it links to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub alt: String,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Badge {
    pub fn new(alt: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            alt: alt.into(),
            image_url: image_url.into(),
            link: None,
        }
    }

    pub fn linked(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// `[![alt](image)](link)`, or the bare image form when there is no link.
    pub fn markdown(&self) -> String {
        let image = markdown_image(&self.alt, &self.image_url);
        match &self.link {
            Some(link) => format!("[{}]({})", image, link),
            None => image,
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.markdown())
    }
}
