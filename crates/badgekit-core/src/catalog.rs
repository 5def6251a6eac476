//! Catalog badges
//!
//! Informational badges for extensions, packages, repositories and social
//! profiles. Each one is a shields.io integration path plus the page it links
//! to; shields.io does the data fetching.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::shields::{dynamic_badge_url, static_badge_url, Badge, BadgeStyle};

/// VS Code Marketplace extension metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtensionMetric {
    Version,
    Installs,
    Downloads,
    Rating,
}

impl ExtensionMetric {
    pub const ALL: [ExtensionMetric; 4] = [
        ExtensionMetric::Version,
        ExtensionMetric::Installs,
        ExtensionMetric::Downloads,
        ExtensionMetric::Rating,
    ];

    fn path_and_alt(&self) -> (&'static str, &'static str) {
        match self {
            ExtensionMetric::Version => ("v", "Marketplace version"),
            ExtensionMetric::Installs => ("i", "Marketplace installs"),
            ExtensionMetric::Downloads => ("d", "Marketplace downloads"),
            ExtensionMetric::Rating => ("r", "Marketplace rating"),
        }
    }
}

/// Badge for a VS Code Marketplace extension, `extension_id` is `publisher.name`.
pub fn extension_badge(extension_id: &str, metric: ExtensionMetric, style: BadgeStyle) -> Badge {
    let (segment, alt) = metric.path_and_alt();
    Badge::new(
        alt,
        dynamic_badge_url(
            &format!("visual-studio-marketplace/{}/{}", segment, extension_id),
            style,
        ),
    )
    .linked(format!(
        "https://marketplace.visualstudio.com/items?itemName={}",
        extension_id
    ))
}

/// Package registries with shields.io integrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Registry {
    Npm,
    PyPi,
    Crates,
    NuGet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageMetric {
    Version,
    Downloads,
    License,
}

impl PackageMetric {
    pub const ALL: [PackageMetric; 3] = [
        PackageMetric::Version,
        PackageMetric::Downloads,
        PackageMetric::License,
    ];
}

struct RegistrySpec {
    name: &'static str,
    shields: &'static str,
    version: &'static str,
    downloads: &'static str,
    /// shields.io has no license badge for every registry
    license: Option<&'static str>,
    page: &'static str,
}

static REGISTRIES: [RegistrySpec; 4] = [
    RegistrySpec {
        name: "npm",
        shields: "npm",
        version: "v",
        downloads: "dm",
        license: Some("l"),
        page: "https://www.npmjs.com/package/",
    },
    RegistrySpec {
        name: "PyPI",
        shields: "pypi",
        version: "v",
        downloads: "dm",
        license: Some("l"),
        page: "https://pypi.org/project/",
    },
    RegistrySpec {
        name: "crates.io",
        shields: "crates",
        version: "v",
        downloads: "d",
        license: Some("l"),
        page: "https://crates.io/crates/",
    },
    RegistrySpec {
        name: "NuGet",
        shields: "nuget",
        version: "v",
        downloads: "dt",
        license: None,
        page: "https://www.nuget.org/packages/",
    },
];

impl Registry {
    fn spec(&self) -> &'static RegistrySpec {
        &REGISTRIES[*self as usize]
    }

    pub fn tag(&self) -> &'static str {
        self.spec().shields
    }
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Registry {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "npm" => Ok(Registry::Npm),
            "pypi" => Ok(Registry::PyPi),
            "crates" | "crates.io" => Ok(Registry::Crates),
            "nuget" => Ok(Registry::NuGet),
            other => Err(format!("unknown registry: {}", other)),
        }
    }
}

/// Package badge, or `None` when the registry has no such shields.io badge.
pub fn package_badge(
    registry: Registry,
    package: &str,
    metric: PackageMetric,
    style: BadgeStyle,
) -> Option<Badge> {
    let spec = registry.spec();
    let (segment, what) = match metric {
        PackageMetric::Version => (spec.version, "version"),
        PackageMetric::Downloads => (spec.downloads, "downloads"),
        PackageMetric::License => match spec.license {
            Some(segment) => (segment, "license"),
            None => {
                debug!(registry = %registry, "No license badge for registry");
                return None;
            }
        },
    };

    let page = match registry {
        Registry::PyPi => format!("{}{}/", spec.page, package),
        _ => format!("{}{}", spec.page, package),
    };
    Some(
        Badge::new(
            format!("{} {}", spec.name, what),
            dynamic_badge_url(&format!("{}/{}/{}", spec.shields, segment, package), style),
        )
        .linked(page),
    )
}

/// Every available metric for a package, in `PackageMetric::ALL` order.
pub fn package_badges(registry: Registry, package: &str, style: BadgeStyle) -> Vec<Badge> {
    PackageMetric::ALL
        .iter()
        .filter_map(|metric| package_badge(registry, package, *metric, style))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepoMetric {
    Stars,
    Forks,
    Issues,
    License,
    LastCommit,
    Release,
}

impl RepoMetric {
    pub const ALL: [RepoMetric; 6] = [
        RepoMetric::Stars,
        RepoMetric::Forks,
        RepoMetric::Issues,
        RepoMetric::License,
        RepoMetric::LastCommit,
        RepoMetric::Release,
    ];
}

/// GitHub repository badge for `owner/repo`.
pub fn repo_badge(owner: &str, repo: &str, metric: RepoMetric, style: BadgeStyle) -> Badge {
    let slug = format!("{}/{}", owner, repo);
    let home = format!("https://github.com/{}", slug);
    let (path, alt, link) = match metric {
        RepoMetric::Stars => ("github/stars", "GitHub stars", format!("{}/stargazers", home)),
        RepoMetric::Forks => ("github/forks", "GitHub forks", format!("{}/forks", home)),
        RepoMetric::Issues => ("github/issues", "GitHub issues", format!("{}/issues", home)),
        RepoMetric::License => ("github/license", "License", home.clone()),
        RepoMetric::LastCommit => (
            "github/last-commit",
            "Last commit",
            format!("{}/commits", home),
        ),
        RepoMetric::Release => (
            "github/v/release",
            "GitHub release",
            format!("{}/releases", home),
        ),
    };
    Badge::new(alt, dynamic_badge_url(&format!("{}/{}", path, slug), style)).linked(link)
}

/// Social profile badges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Profile {
    GitHubFollowers(String),
    XFollow(String),
    /// YouTube channel id
    YouTubeSubscribers(String),
    Bluesky(String),
}

const BLUESKY_COLOR: &str = "0285FF";

pub fn profile_badge(profile: &Profile, style: BadgeStyle) -> Badge {
    match profile {
        Profile::GitHubFollowers(user) => Badge::new(
            "GitHub followers",
            dynamic_badge_url(&format!("github/followers/{}", user), style),
        )
        .linked(format!("https://github.com/{}", user)),
        Profile::XFollow(handle) => {
            let handle = handle.trim_start_matches('@');
            Badge::new(
                "Follow on X",
                dynamic_badge_url(&format!("twitter/follow/{}", handle), style),
            )
            .linked(format!("https://x.com/{}", handle))
        }
        Profile::YouTubeSubscribers(channel) => Badge::new(
            "YouTube subscribers",
            dynamic_badge_url(&format!("youtube/channel/subscribers/{}", channel), style),
        )
        .linked(format!("https://www.youtube.com/channel/{}", channel)),
        Profile::Bluesky(handle) => {
            let handle = handle.trim_start_matches('@');
            Badge::new(
                "Bluesky",
                static_badge_url(
                    "Bluesky",
                    &handle.replace('-', "--"),
                    BLUESKY_COLOR,
                    style,
                    Some("bluesky"),
                ),
            )
            .linked(format!("https://bsky.app/profile/{}", handle))
        }
    }
}
