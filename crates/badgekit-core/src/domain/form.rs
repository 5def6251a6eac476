//! Editable form state for one MCP server.
//!
//! The builder turns a [`ServerForm`] into a [`ConfigurationModel`](super::ConfigurationModel);
//! the importer produces a [`ServerForm`] from an external `mcp.json`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::SecretInput;

/// Runtime the server is launched with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    Http,
    Docker,
    Npx,
    Uvx,
    Dnx,
    Local,
}

impl TransportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportKind::Http => "http",
            TransportKind::Docker => "docker",
            TransportKind::Npx => "npx",
            TransportKind::Uvx => "uvx",
            TransportKind::Dnx => "dnx",
            TransportKind::Local => "local",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport-specific form fields; only the fields of the chosen kind exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportFields {
    Http {
        url: String,
    },
    Docker {
        image: String,
    },
    Npx {
        package: String,
    },
    Uvx {
        package: String,
        /// Package passed via `--from` when the executable lives in another package
        #[serde(default, skip_serializing_if = "Option::is_none")]
        from: Option<String>,
    },
    Dnx {
        package: String,
    },
    Local {
        command: String,
        /// Comma-separated argument list
        #[serde(default)]
        args: String,
    },
}

impl TransportFields {
    pub fn kind(&self) -> TransportKind {
        match self {
            TransportFields::Http { .. } => TransportKind::Http,
            TransportFields::Docker { .. } => TransportKind::Docker,
            TransportFields::Npx { .. } => TransportKind::Npx,
            TransportFields::Uvx { .. } => TransportKind::Uvx,
            TransportFields::Dnx { .. } => TransportKind::Dnx,
            TransportFields::Local { .. } => TransportKind::Local,
        }
    }
}

/// Extra command-line argument appended after the transport prefix.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DynamicArg {
    pub flag: String,
    #[serde(default)]
    pub value: String,
}

impl DynamicArg {
    pub fn new(flag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            flag: flag.into(),
            value: value.into(),
        }
    }
}

/// Environment variable or HTTP header row.
///
/// A `password` binding never has its value written out; a `${input:<id>}`
/// placeholder is emitted instead, with `id` taken from `input_id` or
/// derived from `key`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldBinding {
    pub key: String,

    #[serde(default)]
    pub value: String,

    #[serde(default)]
    pub password: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_id: Option<String>,

    /// Prompt text for the generated input; empty means "Enter {key}"
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl FieldBinding {
    pub fn plain(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn secret(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            password: true,
            ..Default::default()
        }
    }

    pub fn with_input_id(mut self, id: impl Into<String>) -> Self {
        self.input_id = Some(id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Rows without a key are unfinished form rows and are skipped.
    pub fn is_blank(&self) -> bool {
        self.key.trim().is_empty()
    }
}

/// Everything the user entered for one server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerForm {
    pub server_name: String,

    pub transport: TransportFields,

    #[serde(default)]
    pub args: Vec<DynamicArg>,

    #[serde(default)]
    pub env: Vec<FieldBinding>,

    #[serde(default)]
    pub headers: Vec<FieldBinding>,

    /// Standalone inputs not tied to a specific env var or header
    #[serde(default)]
    pub inputs: Vec<SecretInput>,
}

impl ServerForm {
    pub fn new(server_name: impl Into<String>, transport: TransportFields) -> Self {
        Self {
            server_name: server_name.into(),
            transport,
            args: Vec::new(),
            env: Vec::new(),
            headers: Vec::new(),
            inputs: Vec::new(),
        }
    }

    pub fn with_arg(mut self, arg: DynamicArg) -> Self {
        self.args.push(arg);
        self
    }

    pub fn with_env(mut self, binding: FieldBinding) -> Self {
        self.env.push(binding);
        self
    }

    pub fn with_header(mut self, binding: FieldBinding) -> Self {
        self.headers.push(binding);
        self
    }

    pub fn with_input(mut self, input: SecretInput) -> Self {
        self.inputs.push(input);
        self
    }
}
