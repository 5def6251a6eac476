use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered string map used for env vars and HTTP headers.
///
/// Insertion order is kept so that emitted JSON follows the order the user
/// declared the fields in.
pub type FieldMap = IndexMap<String, String>;

/// How a host application reaches one MCP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerTransport {
    /// Remote server via Streamable HTTP
    Http { url: String, headers: FieldMap },
    /// Local process via stdio (docker, npx, uvx, dnx or a local executable)
    Stdio {
        command: String,
        args: Vec<String>,
        env: FieldMap,
    },
}

impl ServerTransport {
    pub fn is_http(&self) -> bool {
        matches!(self, ServerTransport::Http { .. })
    }

    /// Command for stdio transports, `None` for HTTP.
    pub fn command(&self) -> Option<&str> {
        match self {
            ServerTransport::Stdio { command, .. } => Some(command.as_str()),
            ServerTransport::Http { .. } => None,
        }
    }

    pub fn args(&self) -> &[String] {
        match self {
            ServerTransport::Stdio { args, .. } => args,
            ServerTransport::Http { .. } => &[],
        }
    }
}

/// Kind of prompt a host shows for an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputKind {
    #[default]
    PromptString,
}

/// Root-level `inputs` entry; the host prompts for it and substitutes
/// every `${input:<id>}` placeholder with the answer.
///
/// Field order is significant: `id`, `type`, `description`, `password`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretInput {
    pub id: String,

    #[serde(rename = "type", default)]
    pub kind: InputKind,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "is_false")]
    pub password: bool,
}

impl SecretInput {
    pub fn new(id: impl Into<String>, description: impl Into<String>, password: bool) -> Self {
        Self {
            id: id.into(),
            kind: InputKind::PromptString,
            description: description.into(),
            password,
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// One fully built MCP server description.
///
/// Rebuilt wholesale from the form on every change and never mutated
/// afterwards. `inputs` is `None` when the server declares no inputs; an
/// empty list is never stored so the `inputs` key is omitted on output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationModel {
    pub server_name: String,
    pub transport: ServerTransport,
    pub inputs: Option<Vec<SecretInput>>,
}

impl ConfigurationModel {
    /// Serializable view of the server entry.
    ///
    /// `with_name` embeds `name` as the first key (CLI, Cursor, LM Studio);
    /// `with_inputs` appends the `inputs` list (one-click install payloads).
    pub fn entry(&self, with_name: bool, with_inputs: bool) -> ServerEntry<'_> {
        let name = with_name.then_some(self.server_name.as_str());
        let inputs = if with_inputs {
            self.inputs.as_deref()
        } else {
            None
        };

        match &self.transport {
            ServerTransport::Http { url, headers } => ServerEntry {
                name,
                kind: Some("http"),
                url: Some(url.as_str()),
                headers: (!headers.is_empty()).then_some(headers),
                command: None,
                args: None,
                env: None,
                inputs,
            },
            ServerTransport::Stdio { command, args, env } => ServerEntry {
                name,
                kind: None,
                url: None,
                headers: None,
                command: Some(command.as_str()),
                args: Some(args.as_slice()),
                env: Some(env),
                inputs,
            },
        }
    }

    /// The `mcp.json` document: root `inputs` (when present) then `servers`.
    pub fn document(&self) -> McpDocument<'_> {
        let mut servers = IndexMap::new();
        servers.insert(self.server_name.as_str(), self.entry(false, false));
        McpDocument {
            inputs: self.inputs.as_deref(),
            servers,
        }
    }
}

/// Borrowed JSON shape of a server entry.
#[derive(Debug, Serialize)]
pub struct ServerEntry<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<&'a FieldMap>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<&'a [String]>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<&'a FieldMap>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<&'a [SecretInput]>,
}

/// Borrowed JSON shape of a whole `mcp.json` file.
#[derive(Debug, Serialize)]
pub struct McpDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<&'a [SecretInput]>,
    pub servers: IndexMap<&'a str, ServerEntry<'a>>,
}
