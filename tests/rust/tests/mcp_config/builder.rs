//! Tests for build_config and the mcp.json it serializes to

use badgekit_core::{build_config, mcp_json, resolve_inputs, ValidationError};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tests::forms;
use tests::{FieldBinding, SecretInput, ServerForm, TransportFields};

fn document(form: &ServerForm) -> Value {
    let model = build_config(form).expect("form should build");
    serde_json::from_str(&mcp_json(&model)).expect("mcp.json should parse")
}

#[test]
fn npx_server_has_empty_env_and_no_inputs() {
    let doc = document(&forms::npx_filesystem());

    assert_eq!(
        doc,
        json!({
            "servers": {
                "fs-server": {
                    "command": "npx",
                    "args": ["-y", "@modelcontextprotocol/server-filesystem"],
                    "env": {}
                }
            }
        })
    );
    assert!(doc.get("inputs").is_none());
}

#[test]
fn docker_secret_scenario() {
    let doc = document(&forms::docker_secret());

    assert_eq!(
        doc,
        json!({
            "inputs": [{
                "id": "api_key",
                "type": "promptString",
                "description": "Enter API_KEY",
                "password": true
            }],
            "servers": {
                "img": {
                    "command": "docker",
                    "args": ["run", "-i", "--rm", "-e", "API_KEY", "my/image"],
                    "env": {}
                }
            }
        })
    );
}

#[test]
fn docker_env_always_travels_in_args() {
    let doc = document(&forms::docker_mixed());
    let server = &doc["servers"]["searcher"];

    assert_eq!(server["env"], json!({}));
    assert_eq!(
        server["args"],
        json!([
            "run", "-i", "--rm",
            "-p", "8080:8080",
            "-e", "LOG_LEVEL=debug",
            "-e", "SEARCH_KEY",
            "-e", "EMPTY",
            "ghcr.io/acme/search:1.2"
        ])
    );
}

#[test]
fn secrets_become_placeholders_and_literals_stay() {
    let doc = document(&forms::npx_github());
    let env = &doc["servers"]["github"]["env"];

    assert_eq!(env["GITHUB_TOKEN"], "${input:github_token}");
    assert_eq!(env["GITHUB_HOST"], "github.com");

    let ids: Vec<&str> = doc["inputs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|input| input["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["github_token", "workspace"]);
}

#[test]
fn secret_value_never_leaks() {
    let mut secret = FieldBinding::secret("TOKEN");
    secret.value = "hunter2".to_string();
    let form = ServerForm::new(
        "leaky",
        TransportFields::Npx {
            package: "pkg".to_string(),
        },
    )
    .with_env(secret);

    let text = mcp_json(&build_config(&form).unwrap());
    assert!(!text.contains("hunter2"));
    assert!(text.contains("\"TOKEN\": \"${input:token}\""));
}

#[test]
fn http_headers_and_type() {
    let doc = document(&forms::http_remote());

    assert_eq!(
        doc["servers"]["remote"],
        json!({
            "type": "http",
            "url": "https://example.com/mcp",
            "headers": {
                "Authorization": "${input:authorization}",
                "X-Client": "badgekit"
            }
        })
    );
    assert_eq!(doc["inputs"][0]["description"], "Bearer token");
}

#[test]
fn input_key_order_is_stable() {
    let model = build_config(&forms::docker_secret()).unwrap();
    let text = mcp_json(&model);

    let id = text.find("\"id\"").unwrap();
    let kind = text.find("\"type\"").unwrap();
    let description = text.find("\"description\"").unwrap();
    let password = text.find("\"password\"").unwrap();
    let servers = text.find("\"servers\"").unwrap();
    assert!(id < kind && kind < description && description < password && password < servers);
}

#[test]
fn input_ordering_env_then_headers_then_standalone() {
    let env = vec![FieldBinding::secret("A"), FieldBinding::plain("B", "b")];
    let headers = vec![FieldBinding::secret("C")];
    let standalone = vec![SecretInput::new("d", "Enter D", false)];

    let ids: Vec<String> = resolve_inputs(&headers, &env, &standalone)
        .unwrap()
        .into_iter()
        .map(|input| input.id)
        .collect();
    assert_eq!(ids, vec!["a", "c", "d"]);
}

#[test]
fn build_is_idempotent() {
    for form in forms::all() {
        let first = build_config(&form).unwrap();
        let second = build_config(&form).unwrap();
        assert_eq!(first, second);
        assert_eq!(mcp_json(&first), mcp_json(&second));
    }
}

#[test]
fn missing_required_fields() {
    let mut form = forms::npx_filesystem();
    form.server_name = "  ".to_string();
    assert_eq!(build_config(&form), Err(ValidationError::MissingServerName));

    let form = ServerForm::new(
        "s",
        TransportFields::Docker {
            image: String::new(),
        },
    );
    assert_eq!(build_config(&form), Err(ValidationError::MissingField("image")));

    let form = ServerForm::new("s", TransportFields::Http { url: " ".into() });
    assert_eq!(build_config(&form), Err(ValidationError::MissingField("url")));
}

#[test]
fn form_json_uses_camel_case() {
    let form: ServerForm = serde_json::from_value(json!({
        "serverName": "from-json",
        "transport": {"type": "uvx", "package": "acme-mcp"},
        "env": [{"key": "TOKEN", "password": true, "inputId": "tok"}]
    }))
    .unwrap();

    let doc = document(&form);
    assert_eq!(doc["servers"]["from-json"]["args"], json!(["acme-mcp"]));
    assert_eq!(doc["servers"]["from-json"]["env"]["TOKEN"], "${input:tok}");
}
