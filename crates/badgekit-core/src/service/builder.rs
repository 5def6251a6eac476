//! Config builder
//!
//! Turns a [`ServerForm`] into a [`ConfigurationModel`]. Argument shaping per
//! transport kind must match what VS Code, Cursor and friends expect:
//!
//! | kind   | command  | args                                                        | env          |
//! |--------|----------|-------------------------------------------------------------|--------------|
//! | docker | `docker` | `run -i --rm <dynamic> (-e KEY[=VALUE])* <image>`          | always `{}`  |
//! | npx    | `npx`    | `-y <package> <dynamic>`                                    | env map      |
//! | uvx    | `uvx`    | `[--from <from>] <package> <dynamic>`                       | env map      |
//! | dnx    | `dnx`    | `<package> --yes <dynamic>`                                 | env map      |
//! | local  | command  | `<comma-separated args> <dynamic>`                          | env map      |
//!
//! HTTP servers carry `url` and `headers` and never env vars.

use tracing::debug;

use crate::domain::{
    ConfigurationModel, DynamicArg, FieldBinding, FieldMap, ServerForm, ServerTransport,
    TransportFields,
};
use crate::error::ValidationError;

use super::inputs::{binding_value, resolve_inputs};

/// Build the configuration model for a form.
///
/// Fails only when a required field (server name, url, image, package,
/// command) is blank.
pub fn build_config(form: &ServerForm) -> Result<ConfigurationModel, ValidationError> {
    let server_name = form.server_name.trim();
    if server_name.is_empty() {
        return Err(ValidationError::MissingServerName);
    }

    let transport = build_transport(form)?;
    let inputs = match &transport {
        ServerTransport::Http { .. } => resolve_inputs(&form.headers, &[], &form.inputs),
        ServerTransport::Stdio { .. } => resolve_inputs(&[], &form.env, &form.inputs),
    };

    debug!(
        server = %server_name,
        kind = %form.transport.kind(),
        inputs = inputs.as_ref().map_or(0, Vec::len),
        "Built server configuration"
    );

    Ok(ConfigurationModel {
        server_name: server_name.to_string(),
        transport,
        inputs,
    })
}

fn build_transport(form: &ServerForm) -> Result<ServerTransport, ValidationError> {
    let dynamic = dynamic_args(&form.args);

    let (command, args, env): (String, Vec<String>, FieldMap) = match &form.transport {
        TransportFields::Http { url } => {
            return Ok(ServerTransport::Http {
                url: required("url", url)?,
                headers: field_map(&form.headers),
            });
        }
        TransportFields::Docker { image } => {
            let image = required("image", image)?;
            let args = ["run", "-i", "--rm"]
                .into_iter()
                .map(String::from)
                .chain(dynamic)
                .chain(docker_env_args(&form.env))
                .chain(std::iter::once(image))
                .collect();
            // Docker receives env vars through `-e`, the env object stays empty
            ("docker".to_string(), args, FieldMap::new())
        }
        TransportFields::Npx { package } => {
            let package = required("package", package)?;
            let args = vec!["-y".to_string(), package]
                .into_iter()
                .chain(dynamic)
                .collect();
            ("npx".to_string(), args, field_map(&form.env))
        }
        TransportFields::Uvx { package, from } => {
            let package = required("package", package)?;
            let from = from
                .as_deref()
                .map(str::trim)
                .filter(|from| !from.is_empty());
            let prefix = match from {
                Some(from) => vec!["--from".to_string(), from.to_string(), package],
                None => vec![package],
            };
            let args = prefix.into_iter().chain(dynamic).collect();
            ("uvx".to_string(), args, field_map(&form.env))
        }
        TransportFields::Dnx { package } => {
            let package = required("package", package)?;
            let args = vec![package, "--yes".to_string()]
                .into_iter()
                .chain(dynamic)
                .collect();
            ("dnx".to_string(), args, field_map(&form.env))
        }
        TransportFields::Local { command, args } => {
            let command = required("command", command)?;
            let args = split_comma_args(args).chain(dynamic).collect();
            (command, args, field_map(&form.env))
        }
    };

    Ok(ServerTransport::Stdio { command, args, env })
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(value.to_string())
    }
}

/// `[flag, value]` pairs; the value is omitted when empty.
fn dynamic_args(args: &[DynamicArg]) -> impl Iterator<Item = String> + '_ {
    args.iter()
        .filter(|arg| !arg.flag.trim().is_empty())
        .flat_map(|arg| {
            let value = (!arg.value.is_empty()).then(|| arg.value.clone());
            std::iter::once(arg.flag.trim().to_string()).chain(value)
        })
}

/// `-e KEY=VALUE` for literals, bare `-e KEY` for secrets and empty values.
///
/// Secret values are never written into args; the matching input is still
/// declared at the root so the host prompts for it. Nothing in the document
/// maps that input onto the bare `-e KEY`, and `env` stays `{}`, so `KEY`
/// must already be set in the environment the host launches docker from.
fn docker_env_args(env: &[FieldBinding]) -> impl Iterator<Item = String> + '_ {
    env.iter().filter(|b| !b.is_blank()).flat_map(|binding| {
        let key = binding.key.trim();
        let pair = if binding.password || binding.value.is_empty() {
            key.to_string()
        } else {
            format!("{}={}", key, binding.value)
        };
        ["-e".to_string(), pair]
    })
}

fn field_map(bindings: &[FieldBinding]) -> FieldMap {
    bindings
        .iter()
        .filter(|b| !b.is_blank())
        .map(|b| (b.key.trim().to_string(), binding_value(b)))
        .collect()
}

fn split_comma_args(args: &str) -> impl Iterator<Item = String> + '_ {
    args.split(',')
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
        .map(String::from)
}
