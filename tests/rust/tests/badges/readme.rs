//! Tests for the top-level markdown generators

use badgekit_core::{generate_badges_markdown, generate_readme, render_target};
use pretty_assertions::assert_eq;
use tests::{forms, BadgeOptions, Platform, Target};

#[test]
fn nothing_renders_without_a_server_name() {
    let mut form = forms::docker_secret();
    form.server_name.clear();
    let options = BadgeOptions::default();

    assert_eq!(generate_badges_markdown(&form, &options), "");
    assert_eq!(generate_readme(&form, &options), "");
}

#[test]
fn badge_row_only_contains_selected_platforms() {
    let options = BadgeOptions {
        badge_platforms: vec![Platform::Cursor, Platform::Goose],
        ..Default::default()
    };
    let markdown = generate_badges_markdown(&forms::uvx_from_git(), &options);
    let badges: Vec<&str> = markdown.split(" [![").collect();

    assert_eq!(badges.len(), 2);
    assert!(badges[0].starts_with("[![Install in Cursor]"));
    assert!(badges[1].starts_with("Install in Goose]"));
}

#[test]
fn readme_sections_in_selection_order() {
    let options = BadgeOptions {
        badge_platforms: vec![],
        readme_platforms: vec![Platform::Goose, Platform::VisualStudio, Platform::LmStudio],
        ..Default::default()
    };
    let readme = generate_readme(&forms::dnx_package(), &options);

    let goose = readme.find("### Goose").unwrap();
    let visual_studio = readme.find("### Visual Studio").unwrap();
    let lmstudio = readme.find("### LM Studio").unwrap();
    let manual = readme.find("### Manual configuration").unwrap();
    assert!(goose < visual_studio && visual_studio < lmstudio && lmstudio < manual);
    assert!(readme.contains("[Install in Visual Studio](https://vs-open.link/mcp-install?"));
    assert!(!readme.contains("![Install"));
}

#[test]
fn readme_platform_without_badge_still_documented() {
    let options = BadgeOptions {
        badge_platforms: vec![Platform::VsCode],
        readme_platforms: vec![Platform::VsCodeInsiders],
        include_manual_config: false,
        ..Default::default()
    };
    let readme = generate_readme(&forms::npx_filesystem(), &options);

    assert!(readme.contains("### VS Code Insiders\n\nRun:\n\n```bash\ncode-insiders --add-mcp '"));
    assert!(readme.starts_with("## Installation\n\n[![Install in VS Code]("));
}

#[test]
fn readme_manual_block_is_the_full_document() {
    let options = BadgeOptions {
        badge_platforms: vec![],
        readme_platforms: vec![],
        ..Default::default()
    };
    let readme = generate_readme(&forms::docker_secret(), &options);
    let raw = render_target(&forms::docker_secret(), &options, Target::RawJson);

    assert_eq!(
        readme,
        format!(
            "## Installation\n\n### Manual configuration\n\nAdd the following to your `mcp.json`:\n\n```json\n{}\n```\n",
            raw
        )
    );
}

#[test]
fn readme_target_is_fenced_json() {
    let options = BadgeOptions::default();
    let block = render_target(&forms::http_remote(), &options, Target::Readme);

    assert!(block.starts_with("```json\n{\n  \"inputs\": ["));
    assert!(block.ends_with("\n```"));
}

#[test]
fn generators_are_idempotent() {
    let options = BadgeOptions::default();
    for form in forms::all() {
        assert_eq!(
            generate_readme(&form, &options),
            generate_readme(&form, &options)
        );
        assert_eq!(
            generate_badges_markdown(&form, &options),
            generate_badges_markdown(&form, &options)
        );
    }
}
