//! Shared fixtures for badgekit integration tests.

pub use badgekit_core::{
    BadgeOptions, DynamicArg, FieldBinding, Platform, SecretInput, ServerForm, Target,
    TransportFields,
};

/// Server forms covering every transport kind
pub mod forms {
    use super::*;

    pub fn npx_filesystem() -> ServerForm {
        ServerForm::new(
            "fs-server",
            TransportFields::Npx {
                package: "@modelcontextprotocol/server-filesystem".to_string(),
            },
        )
    }

    pub fn npx_github() -> ServerForm {
        ServerForm::new(
            "github",
            TransportFields::Npx {
                package: "@modelcontextprotocol/server-github".to_string(),
            },
        )
        .with_arg(DynamicArg::new("--toolsets", "repos,issues"))
        .with_arg(DynamicArg::new("--read-only", ""))
        .with_env(FieldBinding::secret("GITHUB_TOKEN").with_description("GitHub token"))
        .with_env(FieldBinding::plain("GITHUB_HOST", "github.com"))
        .with_input(SecretInput::new("workspace", "Workspace path", false))
    }

    pub fn docker_secret() -> ServerForm {
        ServerForm::new(
            "img",
            TransportFields::Docker {
                image: "my/image".to_string(),
            },
        )
        .with_env(FieldBinding::secret("API_KEY"))
    }

    pub fn docker_mixed() -> ServerForm {
        ServerForm::new(
            "searcher",
            TransportFields::Docker {
                image: "ghcr.io/acme/search:1.2".to_string(),
            },
        )
        .with_arg(DynamicArg::new("-p", "8080:8080"))
        .with_env(FieldBinding::plain("LOG_LEVEL", "debug"))
        .with_env(FieldBinding::secret("SEARCH_KEY"))
        .with_env(FieldBinding::plain("EMPTY", ""))
    }

    pub fn uvx_from_git() -> ServerForm {
        ServerForm::new(
            "acme-tools",
            TransportFields::Uvx {
                package: "acme-mcp".to_string(),
                from: Some("git+https://github.com/acme/tools".to_string()),
            },
        )
        .with_arg(DynamicArg::new("--port", "9000"))
    }

    pub fn dnx_package() -> ServerForm {
        ServerForm::new(
            "dotnet-tools",
            TransportFields::Dnx {
                package: "Acme.Mcp".to_string(),
            },
        )
        .with_env(FieldBinding::plain("DOTNET_ENVIRONMENT", "Production"))
    }

    pub fn local_python() -> ServerForm {
        ServerForm::new(
            "py",
            TransportFields::Local {
                command: "python".to_string(),
                args: "-m, server".to_string(),
            },
        )
        .with_arg(DynamicArg::new("--stdio", ""))
    }

    /// Dynamic arg whose value holds a comma
    pub fn local_tagged() -> ServerForm {
        local_python().with_arg(DynamicArg::new("--tags", "a,b"))
    }

    /// Placeholder embedded in a literal header; the input is standalone
    pub fn http_bearer() -> ServerForm {
        ServerForm::new(
            "bearer",
            TransportFields::Http {
                url: "https://example.com/mcp".to_string(),
            },
        )
        .with_header(FieldBinding::plain("Authorization", "Bearer ${input:token}"))
        .with_input(SecretInput::new("token", "API token", true))
    }

    pub fn http_remote() -> ServerForm {
        ServerForm::new(
            "remote",
            TransportFields::Http {
                url: "https://example.com/mcp".to_string(),
            },
        )
        .with_header(FieldBinding::secret("Authorization").with_description("Bearer token"))
        .with_header(FieldBinding::plain("X-Client", "badgekit"))
    }

    /// Every transport kind, plus the import edge cases
    pub fn all() -> Vec<ServerForm> {
        vec![
            npx_filesystem(),
            npx_github(),
            docker_secret(),
            docker_mixed(),
            uvx_from_git(),
            dnx_package(),
            local_python(),
            local_tagged(),
            http_remote(),
            http_bearer(),
        ]
    }
}

/// Deep-link payload helpers
pub mod links {
    use base64::Engine;

    /// Value of a query parameter, still percent-encoded.
    pub fn query_param<'a>(link: &'a str, key: &str) -> Option<&'a str> {
        let (_, query) = link.split_once('?')?;
        query.split('&').find_map(|pair| {
            let (k, v) = pair.split_once('=')?;
            (k == key).then_some(v)
        })
    }

    pub fn decode_component(value: &str) -> String {
        urlencoding::decode(value)
            .expect("valid percent-encoding")
            .into_owned()
    }

    pub fn decode_base64_json(value: &str) -> serde_json::Value {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(value)
            .expect("valid base64");
        serde_json::from_slice(&bytes).expect("valid JSON payload")
    }
}
