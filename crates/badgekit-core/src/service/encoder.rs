//! Multi-target encoder
//!
//! Renders one [`ConfigurationModel`] for every supported host: one-click
//! install deep links with their badges, `code --add-mcp` commands and the
//! `mcp.json` document.
//!
//! The query parameter names and encodings below are a compatibility
//! contract with the host applications and must not change:
//!
//! | platform        | payload encoding                 | link                                                   |
//! |-----------------|----------------------------------|--------------------------------------------------------|
//! | VS Code         | URI-encoded JSON, no name        | `vscode.dev/redirect/mcp/install?name=..&config=..`    |
//! | VS Code Insiders| same                             | same plus `&quality=insiders`                          |
//! | Visual Studio   | URI-encoded JSON, no name        | `vs-open.link/mcp-install?<json>`                      |
//! | Cursor          | base64 JSON with name            | `cursor.com/en/install-mcp?name=..&config=..`          |
//! | LM Studio       | base64 JSON with name            | `lmstudio.ai/install-mcp?name=..&config=..`            |
//! | Goose           | cmd/arg query params             | `block.github.io/goose/extension?cmd=..&arg=..`        |

use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::domain::{ConfigurationModel, ServerTransport};
use crate::shields::{static_badge_url, Badge};

use super::options::BadgeOptions;

/// Host application with a one-click install link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "vscode")]
    VsCode,
    #[serde(rename = "vscode-insiders")]
    VsCodeInsiders,
    #[serde(rename = "visual-studio")]
    VisualStudio,
    #[serde(rename = "cursor")]
    Cursor,
    #[serde(rename = "lmstudio")]
    LmStudio,
    #[serde(rename = "goose")]
    Goose,
}

impl Platform {
    pub const ALL: [Platform; 6] = [
        Platform::VsCode,
        Platform::VsCodeInsiders,
        Platform::VisualStudio,
        Platform::Cursor,
        Platform::LmStudio,
        Platform::Goose,
    ];

    fn spec(self) -> &'static PlatformSpec {
        let spec = &PLATFORMS[self as usize];
        debug_assert_eq!(spec.platform, self);
        spec
    }

    pub fn tag(&self) -> &'static str {
        self.spec().tag
    }

    /// Human-readable host name, e.g. "VS Code Insiders"
    pub fn display_name(&self) -> &'static str {
        self.spec().name
    }

    /// Badge alt text, e.g. "Install in Cursor"
    pub fn install_label(&self) -> String {
        format!("Install in {}", self.display_name())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        Platform::ALL
            .into_iter()
            .find(|p| p.tag() == tag)
            .ok_or_else(|| format!("unknown platform: {}", s))
    }
}

enum BadgeArt {
    /// shields.io static badge
    Shield {
        color: &'static str,
        logo: &'static str,
    },
    /// Fixed image published by the host
    Asset(&'static str),
}

enum LinkScheme {
    VsCode { insiders: bool },
    VisualStudio,
    Base64Config { base: &'static str },
    Goose,
}

struct PlatformSpec {
    platform: Platform,
    tag: &'static str,
    name: &'static str,
    art: BadgeArt,
    link: LinkScheme,
}

/// Indexed by `Platform as usize`.
static PLATFORMS: [PlatformSpec; 6] = [
    PlatformSpec {
        platform: Platform::VsCode,
        tag: "vscode",
        name: "VS Code",
        art: BadgeArt::Shield {
            color: "0098FF",
            logo: "visualstudiocode",
        },
        link: LinkScheme::VsCode { insiders: false },
    },
    PlatformSpec {
        platform: Platform::VsCodeInsiders,
        tag: "vscode-insiders",
        name: "VS Code Insiders",
        art: BadgeArt::Shield {
            color: "24bfa5",
            logo: "visualstudiocode",
        },
        link: LinkScheme::VsCode { insiders: true },
    },
    PlatformSpec {
        platform: Platform::VisualStudio,
        tag: "visual-studio",
        name: "Visual Studio",
        art: BadgeArt::Shield {
            color: "C16FDE",
            logo: "visualstudio",
        },
        link: LinkScheme::VisualStudio,
    },
    PlatformSpec {
        platform: Platform::Cursor,
        tag: "cursor",
        name: "Cursor",
        art: BadgeArt::Shield {
            color: "000000",
            logo: "cursor",
        },
        link: LinkScheme::Base64Config {
            base: "https://cursor.com/en/install-mcp",
        },
    },
    PlatformSpec {
        platform: Platform::LmStudio,
        tag: "lmstudio",
        name: "LM Studio",
        art: BadgeArt::Asset("https://files.lmstudio.ai/deeplink/mcp-install-light.svg"),
        link: LinkScheme::Base64Config {
            base: "https://lmstudio.ai/install-mcp",
        },
    },
    PlatformSpec {
        platform: Platform::Goose,
        tag: "goose",
        name: "Goose",
        art: BadgeArt::Asset("https://block.github.io/goose/img/extension-install-dark.svg"),
        link: LinkScheme::Goose,
    },
];

const VSCODE_INSTALL_URL: &str = "https://vscode.dev/redirect/mcp/install";
const VISUAL_STUDIO_INSTALL_URL: &str = "https://vs-open.link/mcp-install";
const GOOSE_INSTALL_URL: &str = "https://block.github.io/goose/extension";

/// Everything [`encode`] can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    #[serde(rename = "vscode")]
    VsCode,
    #[serde(rename = "vscode-insiders")]
    VsCodeInsiders,
    #[serde(rename = "visual-studio")]
    VisualStudio,
    #[serde(rename = "cursor")]
    Cursor,
    #[serde(rename = "lmstudio")]
    LmStudio,
    #[serde(rename = "goose")]
    Goose,
    #[serde(rename = "cli-vscode")]
    CliVsCode,
    #[serde(rename = "cli-vscode-insiders")]
    CliVsCodeInsiders,
    #[serde(rename = "readme")]
    Readme,
    #[serde(rename = "raw-json")]
    RawJson,
}

impl Target {
    pub const ALL: [Target; 10] = [
        Target::VsCode,
        Target::VsCodeInsiders,
        Target::VisualStudio,
        Target::Cursor,
        Target::LmStudio,
        Target::Goose,
        Target::CliVsCode,
        Target::CliVsCodeInsiders,
        Target::Readme,
        Target::RawJson,
    ];

    /// Platform of a one-click install target.
    pub fn platform(&self) -> Option<Platform> {
        match self {
            Target::VsCode => Some(Platform::VsCode),
            Target::VsCodeInsiders => Some(Platform::VsCodeInsiders),
            Target::VisualStudio => Some(Platform::VisualStudio),
            Target::Cursor => Some(Platform::Cursor),
            Target::LmStudio => Some(Platform::LmStudio),
            Target::Goose => Some(Platform::Goose),
            Target::CliVsCode | Target::CliVsCodeInsiders | Target::Readme | Target::RawJson => {
                None
            }
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Target::CliVsCode => "cli-vscode",
            Target::CliVsCodeInsiders => "cli-vscode-insiders",
            Target::Readme => "readme",
            Target::RawJson => "raw-json",
            install => install.platform().map_or("", |p| p.tag()),
        }
    }
}

impl From<Platform> for Target {
    fn from(platform: Platform) -> Self {
        match platform {
            Platform::VsCode => Target::VsCode,
            Platform::VsCodeInsiders => Target::VsCodeInsiders,
            Platform::VisualStudio => Target::VisualStudio,
            Platform::Cursor => Target::Cursor,
            Platform::LmStudio => Target::LmStudio,
            Platform::Goose => Target::Goose,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        Target::ALL
            .into_iter()
            .find(|t| t.tag() == tag)
            .ok_or_else(|| format!("unknown target: {}", s))
    }
}

/// Output of one encoding pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedArtifact {
    /// Install badge linking to the platform's deep link
    Badge { platform: Platform, badge: Badge },
    /// Shell command
    Command(String),
    /// JSON document or Markdown block
    Document(String),
    /// Nothing applies to this server (e.g. a CLI command for an HTTP server)
    Empty,
}

impl EncodedArtifact {
    /// Text form: badge Markdown, the command, the document, or `""`.
    pub fn render(&self) -> String {
        match self {
            EncodedArtifact::Badge { badge, .. } => badge.markdown(),
            EncodedArtifact::Command(text) | EncodedArtifact::Document(text) => text.clone(),
            EncodedArtifact::Empty => String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, EncodedArtifact::Empty)
    }
}

impl fmt::Display for EncodedArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Encode a model for one target. Never fails; inapplicable targets yield
/// [`EncodedArtifact::Empty`].
pub fn encode(model: &ConfigurationModel, options: &BadgeOptions, target: Target) -> EncodedArtifact {
    let artifact = match target {
        Target::CliVsCode => cli_command(model, false).map(EncodedArtifact::Command),
        Target::CliVsCodeInsiders => cli_command(model, true).map(EncodedArtifact::Command),
        Target::Readme => Some(EncodedArtifact::Document(format!(
            "```json\n{}\n```",
            mcp_json(model)
        ))),
        Target::RawJson => Some(EncodedArtifact::Document(mcp_json(model))),
        install => install.platform().and_then(|platform| {
            install_badge(model, options, platform)
                .map(|badge| EncodedArtifact::Badge { platform, badge })
        }),
    };

    artifact.unwrap_or_else(|| {
        debug!(
            server = %model.server_name,
            target = %target,
            "Target not applicable to this server"
        );
        EncodedArtifact::Empty
    })
}

/// Encode every badge platform selected in `options`, in selection order.
pub fn encode_all(model: &ConfigurationModel, options: &BadgeOptions) -> Vec<(Target, EncodedArtifact)> {
    options
        .badge_platforms()
        .into_iter()
        .map(Target::from)
        .map(|target| (target, encode(model, options, target)))
        .collect()
}

/// One-click install badge for a platform.
pub fn install_badge(
    model: &ConfigurationModel,
    options: &BadgeOptions,
    platform: Platform,
) -> Option<Badge> {
    let link = deep_link(model, platform)?;
    let spec = platform.spec();
    let image_url = match spec.art {
        BadgeArt::Shield { color, logo } => {
            static_badge_url(options.label(), spec.name, color, options.style, Some(logo))
        }
        BadgeArt::Asset(url) => url.to_string(),
    };
    Some(Badge::new(platform.install_label(), image_url).linked(link))
}

/// Install deep link for a platform, `None` when the platform cannot
/// install this kind of server.
pub fn deep_link(model: &ConfigurationModel, platform: Platform) -> Option<String> {
    let name = encode_uri_component(&model.server_name);

    match platform.spec().link {
        LinkScheme::VsCode { insiders } => {
            let config = encode_uri_component(&compact_json(&model.entry(false, true)));
            let mut link = format!("{}?name={}&config={}", VSCODE_INSTALL_URL, name, config);
            if insiders {
                link.push_str("&quality=insiders");
            }
            Some(link)
        }
        LinkScheme::VisualStudio => {
            let config = encode_uri_component(&compact_json(&model.entry(false, true)));
            Some(format!("{}?{}", VISUAL_STUDIO_INSTALL_URL, config))
        }
        LinkScheme::Base64Config { base } => {
            let config = base64::engine::general_purpose::STANDARD
                .encode(compact_json(&model.entry(true, true)));
            Some(format!("{}?name={}&config={}", base, name, config))
        }
        LinkScheme::Goose => match &model.transport {
            ServerTransport::Stdio { command, args, .. } => {
                let args = args
                    .iter()
                    .map(|arg| encode_uri_component(arg))
                    .collect::<Vec<_>>()
                    .join("%20");
                let description =
                    encode_uri_component(&format!("{} MCP server", model.server_name));
                Some(format!(
                    "{}?cmd={}&arg={}&id={}&name={}&description={}",
                    GOOSE_INSTALL_URL,
                    encode_uri_component(command),
                    args,
                    name,
                    name,
                    description
                ))
            }
            ServerTransport::Http { .. } => None,
        },
    }
}

/// `code --add-mcp '<json>'` with every `"` escaped as `\"`.
///
/// `None` for HTTP servers, which have no command to launch.
pub fn cli_command(model: &ConfigurationModel, insiders: bool) -> Option<String> {
    if model.transport.is_http() {
        return None;
    }
    let binary = if insiders { "code-insiders" } else { "code" };
    let json = compact_json(&model.entry(true, true));
    Some(format!("{} --add-mcp '{}'", binary, json.replace('"', "\\\"")))
}

/// Pretty-printed `mcp.json`: `inputs` (when present) then `servers`.
pub fn mcp_json(model: &ConfigurationModel) -> String {
    pretty_json(&model.document())
}

/// JavaScript `encodeURIComponent`: like `urlencoding::encode` but keeps
/// `!'()*` literal.
pub fn encode_uri_component(text: &str) -> String {
    urlencoding::encode(text)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

fn compact_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        warn!("Failed to serialize server configuration: {}", e);
        String::new()
    })
}

pub(crate) fn pretty_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        warn!("Failed to serialize server configuration: {}", e);
        String::new()
    })
}
