//! badgekit - install badges and README snippets for MCP servers
//!
//! Usage:
//!   badgekit generate --form server.json            # badge row
//!   badgekit generate --form server.json --readme   # README installation section
//!   badgekit generate --form server.json --target cli-vscode
//!   badgekit import --config .vscode/mcp.json       # config back to form JSON
//!   badgekit badge package npm @acme/mcp            # catalog badges

mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use badgekit_core::catalog::{
    extension_badge, package_badge, package_badges, profile_badge, repo_badge, ExtensionMetric,
    PackageMetric, Profile, Registry, RepoMetric,
};
use badgekit_core::{
    build_config, encode_all, generate_badges_markdown, generate_readme, import_config,
    render_target, Badge, BadgeStyle, ServerForm, Target,
};

use crate::config::{read_source, OptionArgs};

#[derive(Parser)]
#[command(name = "badgekit")]
#[command(about = "Install badges and README snippets for MCP servers", long_about = None)]
struct Cli {
    /// Debug logging for badgekit itself
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render badges, a README section, or one target from a server form
    Generate {
        /// Server form JSON (`-` for stdin)
        #[arg(long, value_name = "FILE")]
        form: PathBuf,

        /// Single target (vscode, cursor, cli-vscode, raw-json, ...)
        #[arg(long, conflicts_with = "readme")]
        target: Option<Target>,

        /// Full README installation section
        #[arg(long)]
        readme: bool,

        /// Every selected badge, one per line, prefixed with its target
        #[arg(long, conflicts_with_all = ["readme", "target"])]
        all: bool,

        #[command(flatten)]
        options: OptionArgs,
    },

    /// Turn an existing mcp.json (or server object) back into form JSON
    Import {
        /// Configuration JSON (`-` for stdin)
        #[arg(long, value_name = "FILE")]
        config: PathBuf,
    },

    /// Informational badges for packages, repositories and profiles
    Badge {
        /// shields.io style
        #[arg(long, env = "BADGEKIT_STYLE", default_value = "flat-square")]
        style: BadgeStyle,

        #[command(subcommand)]
        kind: BadgeKind,
    },
}

#[derive(Subcommand)]
enum BadgeKind {
    /// VS Code Marketplace extension (`publisher.name`)
    Extension {
        id: String,
        /// Only this metric (version, installs, downloads, rating)
        #[arg(long)]
        metric: Option<String>,
    },

    /// Registry package
    Package {
        /// npm, pypi, crates, nuget
        registry: Registry,
        name: String,
        /// Only this metric (version, downloads, license)
        #[arg(long)]
        metric: Option<String>,
    },

    /// GitHub repository (`owner/repo`)
    Repo {
        slug: String,
        /// Only this metric (stars, forks, issues, license, last-commit, release)
        #[arg(long)]
        metric: Option<String>,
    },

    /// Social profile
    Profile {
        /// github, x, youtube, bluesky
        network: String,
        /// User, handle, or YouTube channel id
        handle: String,
    },
}

fn init_tracing(verbose: bool) {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // RUST_LOG takes precedence
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("info,badgekit_core=debug,badgekit=debug")
        } else {
            EnvFilter::new("info")
        }
    });

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .compact()
        .with_line_number(false)
        .with_file(false)
        .with_target(verbose);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate {
            form,
            target,
            readme,
            all,
            options,
        } => run_generate(form, target, readme, all, &options),
        Commands::Import { config } => run_import(config),
        Commands::Badge { style, kind } => run_badge(style, kind),
    }
}

fn run_generate(
    form_path: PathBuf,
    target: Option<Target>,
    readme: bool,
    all: bool,
    options: &OptionArgs,
) -> Result<()> {
    let raw = read_source(&form_path)?;
    let form: ServerForm = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid server form: {}", form_path.display()))?;
    let options = options.resolve()?;

    // Surface the reason here; the generators below render "" for bad forms
    let model = build_config(&form).context("Server form is incomplete")?;
    debug!(server = %model.server_name, "Built configuration model");

    let output = if all {
        encode_all(&model, &options)
            .into_iter()
            .filter(|(_, artifact)| !artifact.is_empty())
            .map(|(target, artifact)| format!("{}: {}", target, artifact))
            .collect::<Vec<_>>()
            .join("\n")
    } else if readme {
        generate_readme(&form, &options)
    } else if let Some(target) = target {
        render_target(&form, &options, target)
    } else {
        generate_badges_markdown(&form, &options)
    };

    if output.is_empty() {
        warn!("Nothing to render for this server and selection");
        return Ok(());
    }
    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn run_import(config_path: PathBuf) -> Result<()> {
    let raw = read_source(&config_path)?;
    let result = import_config(&raw)
        .with_context(|| format!("Failed to import {}", config_path.display()))?;

    info!(
        shape = ?result.shape,
        server = %result.form.server_name,
        "Imported configuration"
    );
    for input in result.standalone_inputs() {
        info!(id = %input.id, "Input declared but not referenced by env or headers");
    }

    println!("{}", serde_json::to_string_pretty(&result.form)?);
    Ok(())
}

fn run_badge(style: BadgeStyle, kind: BadgeKind) -> Result<()> {
    let badges: Vec<Badge> = match kind {
        BadgeKind::Extension { id, metric } => match metric {
            Some(metric) => vec![extension_badge(&id, parse_tag(&metric)?, style)],
            None => ExtensionMetric::ALL
                .iter()
                .map(|metric| extension_badge(&id, *metric, style))
                .collect(),
        },
        BadgeKind::Package {
            registry,
            name,
            metric,
        } => match metric {
            Some(metric) => {
                let metric: PackageMetric = parse_tag(&metric)?;
                match package_badge(registry, &name, metric, style) {
                    Some(badge) => vec![badge],
                    None => bail!("{} has no {:?} badge", registry, metric),
                }
            }
            None => package_badges(registry, &name, style),
        },
        BadgeKind::Repo { slug, metric } => {
            let Some((owner, repo)) = slug.split_once('/') else {
                bail!("Expected owner/repo, got `{}`", slug);
            };
            match metric {
                Some(metric) => vec![repo_badge(owner, repo, parse_tag(&metric)?, style)],
                None => RepoMetric::ALL
                    .iter()
                    .map(|metric| repo_badge(owner, repo, *metric, style))
                    .collect(),
            }
        }
        BadgeKind::Profile { network, handle } => {
            let profile = match network.to_ascii_lowercase().as_str() {
                "github" => Profile::GitHubFollowers(handle),
                "x" | "twitter" => Profile::XFollow(handle),
                "youtube" => Profile::YouTubeSubscribers(handle),
                "bluesky" | "bsky" => Profile::Bluesky(handle),
                other => bail!("Unknown profile network: {}", other),
            };
            vec![profile_badge(&profile, style)]
        }
    };

    let line = badges
        .iter()
        .map(Badge::markdown)
        .collect::<Vec<_>>()
        .join(" ");
    println!("{}", line);
    Ok(())
}

/// Parse a metric tag through its serde name, e.g. `last-commit`.
fn parse_tag<T: serde::de::DeserializeOwned>(tag: &str) -> Result<T> {
    serde_json::from_value(serde_json::Value::String(tag.trim().to_ascii_lowercase()))
        .with_context(|| format!("Unknown metric: {}", tag))
}
