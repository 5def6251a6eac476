//! Configuration importer
//!
//! Parses an externally authored `mcp.json` (or a single server object) back
//! into an editable [`ServerForm`]. Accepted shapes:
//!
//! - `{"mcpServers": {"<name>": {...}}}` (Cursor, Claude Desktop)
//! - `{"servers": {"<name>": {...}}, "inputs": [...]}` (VS Code)
//! - a bare server object
//!
//! Only the first server of a document is imported.

use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::domain::{
    DynamicArg, FieldBinding, SecretInput, ServerForm, TransportFields, TransportKind,
};
use crate::error::ImportError;

use super::inputs::{parse_placeholder, slugify};

/// Top-level shape the server was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigShape {
    McpServers,
    Servers,
    Bare,
}

/// Form recovered from an imported document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedImportResult {
    pub form: ServerForm,
    pub shape: ConfigShape,
}

impl ParsedImportResult {
    /// Declared inputs not claimed by a secret env var or header, including
    /// inputs only used inside a longer value such as `Bearer ${input:token}`.
    pub fn standalone_inputs(&self) -> &[SecretInput] {
        &self.form.inputs
    }
}

/// Import the first server of a configuration document.
///
/// On failure nothing is produced, so callers keep their current form.
pub fn import_config(raw: &str) -> Result<ParsedImportResult, ImportError> {
    let document: Value =
        serde_json::from_str(raw).map_err(|e| ImportError::InvalidJson(e.to_string()))?;
    let root = document
        .as_object()
        .ok_or_else(|| ImportError::unparseable("document is not a JSON object"))?;

    let (shape, server_name, server) = extract_server(root)?;
    let declared = declared_inputs(root);

    let mut referenced = HashSet::new();
    let mut recovered = if is_http(server) {
        recover_http(server, &declared, &mut referenced)
    } else if let Some(command) = server.get("command").and_then(Value::as_str) {
        recover_stdio(command, server, &declared, &mut referenced)
    } else {
        return Err(ImportError::unparseable(
            "server has neither a command nor a url",
        ));
    };

    if recovered.fields.kind() == TransportKind::Docker {
        link_bare_docker_secrets(&mut recovered.env, &declared, &mut referenced);
    }

    let standalone: Vec<SecretInput> = declared
        .into_iter()
        .filter(|input| !referenced.contains(&input.id))
        .collect();

    debug!(
        server = %server_name,
        shape = ?shape,
        kind = %recovered.fields.kind(),
        standalone = standalone.len(),
        "Imported server configuration"
    );

    Ok(ParsedImportResult {
        form: ServerForm {
            server_name,
            transport: recovered.fields,
            args: recovered.args,
            env: recovered.env,
            headers: recovered.headers,
            inputs: standalone,
        },
        shape,
    })
}

struct Recovered {
    fields: TransportFields,
    args: Vec<DynamicArg>,
    env: Vec<FieldBinding>,
    headers: Vec<FieldBinding>,
}

fn extract_server(
    root: &Map<String, Value>,
) -> Result<(ConfigShape, String, &Map<String, Value>), ImportError> {
    for (key, shape) in [
        ("mcpServers", ConfigShape::McpServers),
        ("servers", ConfigShape::Servers),
    ] {
        let Some(servers) = root.get(key).and_then(Value::as_object) else {
            continue;
        };
        let (name, server) = servers
            .iter()
            .next()
            .ok_or_else(|| ImportError::unparseable(format!("`{}` is empty", key)))?;
        let server = server
            .as_object()
            .ok_or_else(|| ImportError::unparseable(format!("server `{}` is not an object", name)))?;
        if servers.len() > 1 {
            debug!(
                count = servers.len(),
                "Document defines several servers, importing `{}`", name
            );
        }
        return Ok((shape, name.clone(), server));
    }

    let name = root
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Ok((ConfigShape::Bare, name, root))
}

/// Root `inputs` entries with a string `id`; anything else is ignored.
fn declared_inputs(root: &Map<String, Value>) -> Vec<SecretInput> {
    root.get("inputs")
        .and_then(Value::as_array)
        .map(|inputs| {
            inputs
                .iter()
                .filter_map(|input| {
                    let id = input.get("id")?.as_str()?;
                    let description = input
                        .get("description")
                        .and_then(Value::as_str)
                        .unwrap_or_default();
                    let password = input
                        .get("password")
                        .and_then(Value::as_bool)
                        .unwrap_or(false);
                    Some(SecretInput::new(id, description, password))
                })
                .collect()
        })
        .unwrap_or_default()
}

fn is_http(server: &Map<String, Value>) -> bool {
    server.get("type").and_then(Value::as_str) == Some("http") || server.contains_key("url")
}

fn recover_http(
    server: &Map<String, Value>,
    declared: &[SecretInput],
    referenced: &mut HashSet<String>,
) -> Recovered {
    let url = server
        .get("url")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let headers = string_map(server.get("headers"))
        .into_iter()
        .map(|(key, value)| recover_binding(key, value, declared, referenced))
        .collect();

    Recovered {
        fields: TransportFields::Http { url },
        args: Vec::new(),
        env: Vec::new(),
        headers,
    }
}

fn recover_stdio(
    command: &str,
    server: &Map<String, Value>,
    declared: &[SecretInput],
    referenced: &mut HashSet<String>,
) -> Recovered {
    let args = string_list(server.get("args"));
    let env_bindings = |referenced: &mut HashSet<String>| -> Vec<FieldBinding> {
        string_map(server.get("env"))
            .into_iter()
            .map(|(key, value)| recover_binding(key, value, declared, referenced))
            .collect()
    };

    let (fields, dynamic, env) = match command {
        "npx" => {
            let rest = match args.first().map(String::as_str) {
                Some("-y") | Some("--yes") => &args[1..],
                _ => &args[..],
            };
            let (package, rest) = split_first(rest);
            (TransportFields::Npx { package }, pair_args(rest), env_bindings(referenced))
        }
        "uvx" => {
            let (from, rest) = match args.first().map(String::as_str) {
                Some("--from") if args.len() >= 3 => (Some(args[1].clone()), &args[2..]),
                _ => (None, &args[..]),
            };
            let (package, rest) = split_first(rest);
            (
                TransportFields::Uvx { package, from },
                pair_args(rest),
                env_bindings(referenced),
            )
        }
        "dnx" => {
            let (package, rest) = split_first(&args);
            let rest = match rest.first().map(String::as_str) {
                Some("--yes") | Some("-y") => &rest[1..],
                _ => rest,
            };
            (TransportFields::Dnx { package }, pair_args(rest), env_bindings(referenced))
        }
        "docker" => recover_docker(&args, declared, referenced),
        _ => {
            // The comma-separated field cannot carry commas or padded tokens
            let (joined, dynamic) = if args.iter().all(|arg| comma_safe(arg)) {
                (args.join(","), Vec::new())
            } else {
                (String::new(), pair_args(&args))
            };
            (
                TransportFields::Local {
                    command: command.to_string(),
                    args: joined,
                },
                dynamic,
                env_bindings(referenced),
            )
        }
    };

    Recovered {
        fields,
        args: dynamic,
        env,
        headers: Vec::new(),
    }
}

fn comma_safe(arg: &str) -> bool {
    !arg.is_empty() && !arg.contains(',') && arg.trim() == arg
}

/// Docker keeps env vars in `-e` args; the env object is ignored.
fn recover_docker(
    args: &[String],
    declared: &[SecretInput],
    referenced: &mut HashSet<String>,
) -> (TransportFields, Vec<DynamicArg>, Vec<FieldBinding>) {
    let image_index = docker_image_index(args);
    let image = image_index.map(|i| args[i].clone()).unwrap_or_default();
    let end = image_index.unwrap_or(args.len());
    if end + 1 < args.len() {
        warn!(
            ignored = args.len() - end - 1,
            "Ignoring arguments after the docker image"
        );
    }

    let body = strip_docker_prefix(&args[..end]);
    let mut env = Vec::new();
    let mut rest = Vec::new();
    let mut tokens = body.iter();
    while let Some(token) = tokens.next() {
        if is_env_flag(token) {
            if let Some(pair) = tokens.next() {
                let (key, value) = pair.split_once('=').unwrap_or((pair.as_str(), ""));
                env.push(recover_binding(key.to_string(), value.to_string(), declared, referenced));
            }
        } else {
            rest.push(token.clone());
        }
    }

    (TransportFields::Docker { image }, pair_args(&rest), env)
}

/// Image reference: scanning right to left, the first token that is not a
/// flag, not `run`, and not the operand of `-e`.
pub fn docker_image_index(args: &[String]) -> Option<usize> {
    (0..args.len()).rev().find(|&i| {
        let token = args[i].as_str();
        let follows_env_flag = i > 0 && is_env_flag(&args[i - 1]);
        !(token.starts_with('-') || token == "run" || follows_env_flag)
    })
}

fn is_env_flag(token: &str) -> bool {
    token == "-e" || token == "--env"
}

fn strip_docker_prefix(args: &[String]) -> &[String] {
    let prefix = ["run", "-i", "--rm"];
    let matched = args
        .iter()
        .zip(prefix)
        .take_while(|(arg, expected)| arg.as_str() == *expected)
        .count();
    &args[matched..]
}

/// A bare `-e KEY` is a secret passed through by docker when a declared,
/// otherwise unreferenced input carries the key's derived id.
fn link_bare_docker_secrets(
    env: &mut [FieldBinding],
    declared: &[SecretInput],
    referenced: &mut HashSet<String>,
) {
    for binding in env.iter_mut().filter(|b| !b.password && b.value.is_empty()) {
        let id = slugify(&binding.key);
        if referenced.contains(&id) {
            continue;
        }
        if let Some(input) = declared.iter().find(|input| input.id == id) {
            binding.password = true;
            binding.description = input.description.clone();
            binding.input_id = Some(id.clone());
            referenced.insert(id);
        }
    }
}

fn recover_binding(
    key: String,
    value: String,
    declared: &[SecretInput],
    referenced: &mut HashSet<String>,
) -> FieldBinding {
    match parse_placeholder(&value) {
        Some(id) => {
            referenced.insert(id.to_string());
            let description = declared
                .iter()
                .find(|input| input.id == id)
                .map(|input| input.description.clone())
                .unwrap_or_default();
            FieldBinding {
                key,
                value: String::new(),
                password: true,
                input_id: Some(id.to_string()),
                description,
            }
        }
        None => FieldBinding::plain(key, value),
    }
}

/// Rebuild `[flag, value]` pairs: a flag takes the next token as its value
/// unless that token is itself a flag.
fn pair_args(tokens: &[String]) -> Vec<DynamicArg> {
    let mut pairs = Vec::new();
    let mut iter = tokens.iter().peekable();
    while let Some(token) = iter.next() {
        let value = if token.starts_with('-') {
            iter.next_if(|next| !next.starts_with('-')).cloned()
        } else {
            None
        };
        pairs.push(DynamicArg::new(token.clone(), value.unwrap_or_default()));
    }
    pairs
}

fn split_first(args: &[String]) -> (String, &[String]) {
    match args.split_first() {
        Some((first, rest)) => (first.clone(), rest),
        None => (String::new(), args),
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().map(scalar_to_string).collect())
        .unwrap_or_default()
}

fn string_map(value: Option<&Value>) -> Vec<(String, String)> {
    value
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .map(|(key, value)| (key.clone(), scalar_to_string(value)))
                .collect()
        })
        .unwrap_or_default()
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
