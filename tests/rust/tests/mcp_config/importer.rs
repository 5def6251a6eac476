//! Tests for import_config against hand-written documents

use badgekit_core::{import_config, ConfigShape, ImportError, TransportKind};
use pretty_assertions::assert_eq;
use serde_json::json;
use tests::{DynamicArg, FieldBinding, SecretInput, TransportFields};

#[test]
fn docker_placeholder_with_empty_inputs_array() {
    let raw = r#"{"servers":{"x":{"command":"docker","args":["run","-i","--rm","-e","KEY=${input:key}","img"]},"inputs":[]}}"#;
    let result = import_config(raw).unwrap();

    assert_eq!(result.shape, ConfigShape::Servers);
    assert_eq!(result.form.transport.kind(), TransportKind::Docker);
    assert_eq!(
        result.form.transport,
        TransportFields::Docker {
            image: "img".to_string()
        }
    );
    assert_eq!(
        result.form.env,
        vec![FieldBinding::secret("KEY").with_input_id("key")]
    );
    assert!(result.standalone_inputs().is_empty());
}

#[test]
fn cursor_shape_with_flag_pairs() {
    let raw = json!({
        "mcpServers": {
            "browser": {
                "command": "npx",
                "args": ["-y", "@acme/browser-mcp", "--headless", "--port", "3333"],
                "env": {"BROWSER": "chromium"}
            }
        }
    })
    .to_string();
    let result = import_config(&raw).unwrap();

    assert_eq!(result.shape, ConfigShape::McpServers);
    assert_eq!(result.form.server_name, "browser");
    assert_eq!(
        result.form.args,
        vec![
            DynamicArg::new("--headless", ""),
            DynamicArg::new("--port", "3333")
        ]
    );
    assert_eq!(
        result.form.env,
        vec![FieldBinding::plain("BROWSER", "chromium")]
    );
}

#[test]
fn bare_server_object() {
    let raw = json!({
        "name": "bare",
        "type": "http",
        "url": "https://mcp.example.com",
        "headers": {"X-Key": "${input:x_key}"}
    })
    .to_string();
    let result = import_config(&raw).unwrap();

    assert_eq!(result.shape, ConfigShape::Bare);
    assert_eq!(result.form.server_name, "bare");
    assert_eq!(
        result.form.headers,
        vec![FieldBinding::secret("X-Key").with_input_id("x_key")]
    );
}

#[test]
fn unreferenced_inputs_are_standalone() {
    let raw = json!({
        "inputs": [
            {"id": "token", "type": "promptString", "description": "Token", "password": true},
            {"id": "region", "type": "promptString", "description": "Region"}
        ],
        "servers": {
            "svc": {
                "command": "uvx",
                "args": ["svc-mcp"],
                "env": {"TOKEN": "${input:token}"}
            }
        }
    })
    .to_string();
    let result = import_config(&raw).unwrap();

    assert_eq!(
        result.standalone_inputs(),
        &[SecretInput::new("region", "Region", false)]
    );
    assert_eq!(
        result.form.env,
        vec![FieldBinding::secret("TOKEN")
            .with_input_id("token")
            .with_description("Token")]
    );
}

#[test]
fn docker_image_after_custom_flags() {
    let raw = json!({
        "servers": {
            "db": {
                "command": "docker",
                "args": [
                    "run", "-i", "--rm",
                    "--network", "host",
                    "-e", "PGHOST=localhost",
                    "-e", "PGPASSWORD",
                    "postgres-mcp:latest"
                ],
                "env": {}
            }
        }
    })
    .to_string();
    let result = import_config(&raw).unwrap();

    assert_eq!(
        result.form.transport,
        TransportFields::Docker {
            image: "postgres-mcp:latest".to_string()
        }
    );
    assert_eq!(result.form.args, vec![DynamicArg::new("--network", "host")]);
    assert_eq!(
        result.form.env,
        vec![
            FieldBinding::plain("PGHOST", "localhost"),
            FieldBinding::plain("PGPASSWORD", ""),
        ]
    );
}

#[test]
fn malformed_documents() {
    assert!(matches!(
        import_config("{\"servers\": "),
        Err(ImportError::InvalidJson(_))
    ));
    assert!(matches!(import_config("42"), Err(ImportError::Unparseable(_))));
    assert!(matches!(
        import_config(r#"{"servers": {"x": "docker"}}"#),
        Err(ImportError::Unparseable(_))
    ));
    assert!(matches!(
        import_config(r#"{"description": "no server here"}"#),
        Err(ImportError::Unparseable(_))
    ));
}

#[test]
fn import_is_idempotent() {
    let raw = r#"{"mcpServers":{"a":{"command":"python","args":["server.py"],"env":{"X":"1"}}}}"#;
    assert_eq!(import_config(raw), import_config(raw));
}
