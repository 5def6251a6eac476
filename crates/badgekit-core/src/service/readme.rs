//! Markdown generators
//!
//! Top-level entry points driven by the form: the badge row and the README
//! installation section. A form that is not ready yet (no server name, no
//! package, ...) renders as the empty string.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::domain::{ConfigurationModel, ServerEntry, ServerForm};

use super::builder::build_config;
use super::encoder::{
    cli_command, deep_link, encode, mcp_json, pretty_json, EncodedArtifact, Platform, Target,
};
use super::options::BadgeOptions;

/// `~/.cursor/mcp.json` shape
#[derive(Serialize)]
struct CursorDocument<'a> {
    #[serde(rename = "mcpServers")]
    mcp_servers: IndexMap<&'a str, ServerEntry<'a>>,
}

fn ready_model(form: &ServerForm) -> Option<ConfigurationModel> {
    if form.server_name.trim().is_empty() {
        debug!("No server name yet, nothing to render");
        return None;
    }
    match build_config(form) {
        Ok(model) => Some(model),
        Err(e) => {
            debug!(server = %form.server_name, "Form not ready: {}", e);
            None
        }
    }
}

/// Space-separated install badges for every selected badge platform.
pub fn generate_badges_markdown(form: &ServerForm, options: &BadgeOptions) -> String {
    ready_model(form)
        .map(|model| badge_row(&model, options))
        .unwrap_or_default()
}

/// Full README installation section for the form.
pub fn generate_readme(form: &ServerForm, options: &BadgeOptions) -> String {
    ready_model(form)
        .map(|model| readme_section(&model, options))
        .unwrap_or_default()
}

/// Badge row for an already built model.
pub fn badge_row(model: &ConfigurationModel, options: &BadgeOptions) -> String {
    options
        .badge_platforms()
        .into_iter()
        .map(|platform| encode(model, options, Target::from(platform)))
        .filter(|artifact| !artifact.is_empty())
        .map(|artifact| artifact.render())
        .collect::<Vec<_>>()
        .join(" ")
}

/// README installation section for an already built model.
///
/// Badge row first, then one subsection per README platform, then the
/// manual `mcp.json` block when enabled.
pub fn readme_section(model: &ConfigurationModel, options: &BadgeOptions) -> String {
    let mut blocks = vec!["## Installation".to_string()];

    let badges = badge_row(model, options);
    if !badges.is_empty() {
        blocks.push(badges);
    }

    for platform in options.readme_platforms() {
        blocks.push(format!("### {}", platform.display_name()));
        blocks.extend(platform_instructions(model, options, platform));
    }

    if options.include_manual_config {
        blocks.push("### Manual configuration".to_string());
        blocks.push("Add the following to your `mcp.json`:".to_string());
        blocks.push(fenced("json", &mcp_json(model)));
    }

    let mut readme = blocks.join("\n\n");
    readme.push('\n');
    readme
}

fn platform_instructions(
    model: &ConfigurationModel,
    options: &BadgeOptions,
    platform: Platform,
) -> Vec<String> {
    let has_badge = options.badge_enabled(platform)
        && !encode(model, options, Target::from(platform)).is_empty();
    let badge_hint = |action: &str| {
        if has_badge {
            format!(
                "Click the **{}** badge above, or {}:",
                platform.install_label(),
                action
            )
        } else {
            format!("{}:", capitalize(action))
        }
    };

    match platform {
        Platform::VsCode | Platform::VsCodeInsiders => {
            let insiders = platform == Platform::VsCodeInsiders;
            match cli_command(model, insiders) {
                Some(command) => vec![badge_hint("run"), fenced("bash", &command)],
                None => vec![
                    badge_hint("add the server to `.vscode/mcp.json` in your workspace"),
                    fenced("json", &mcp_json(model)),
                ],
            }
        }
        Platform::VisualStudio => vec![
            link_line(model, platform),
            "Or add the server to `.mcp.json` in your solution directory using the manual configuration below.".to_string(),
        ],
        Platform::Cursor => {
            let mut servers = IndexMap::new();
            servers.insert(model.server_name.as_str(), model.entry(false, false));
            let document = CursorDocument {
                mcp_servers: servers,
            };
            vec![
                link_line(model, platform),
                "Or add the following to `~/.cursor/mcp.json`:".to_string(),
                fenced("json", &pretty_json(&document)),
            ]
        }
        Platform::LmStudio => vec![link_line(model, platform)],
        Platform::Goose => match deep_link(model, platform) {
            Some(_) => vec![link_line(model, platform)],
            None => vec![
                "Goose one-click install supports command-based servers only; add this server with `goose configure`.".to_string(),
            ],
        },
    }
}

fn link_line(model: &ConfigurationModel, platform: Platform) -> String {
    match deep_link(model, platform) {
        Some(link) => format!("[{}]({})", platform.install_label(), link),
        None => String::new(),
    }
}

fn fenced(language: &str, body: &str) -> String {
    format!("```{}\n{}\n```", language, body)
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Text for one target, used by callers that only want a single artifact.
pub fn render_target(form: &ServerForm, options: &BadgeOptions, target: Target) -> String {
    ready_model(form)
        .map(|model| encode(&model, options, target))
        .map(|artifact: EncodedArtifact| artifact.render())
        .unwrap_or_default()
}
