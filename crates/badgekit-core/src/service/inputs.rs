//! Input placeholders
//!
//! Password-marked env vars and headers are written as `${input:<id>}` and
//! declared once in the root `inputs` list, which the host resolves at
//! install time.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use tracing::warn;

use crate::domain::{FieldBinding, SecretInput};

lazy_static! {
    static ref PLACEHOLDER_REGEX: Regex = Regex::new(r"^\$\{input:([^}]+)\}$").unwrap();
}

/// Derive an input id from a human field name.
///
/// Lower-cases and replaces every character outside `[a-z0-9_]` with `_`.
/// Distinct names can map to the same id (`API-KEY` and `API_KEY`).
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// `${input:<id>}`
pub fn placeholder(id: &str) -> String {
    format!("${{input:{}}}", id)
}

/// Id of a value that is exactly one placeholder, e.g. `${input:token}` -> `token`.
pub fn parse_placeholder(value: &str) -> Option<&str> {
    PLACEHOLDER_REGEX
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Input id a password binding is written with.
pub fn input_id_for(binding: &FieldBinding) -> String {
    binding
        .input_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| slugify(binding.key.trim()))
}

/// Value a binding is written with: the literal, or a placeholder for secrets.
pub fn binding_value(binding: &FieldBinding) -> String {
    if binding.password {
        placeholder(&input_id_for(binding))
    } else {
        binding.value.clone()
    }
}

fn declared_input(binding: &FieldBinding) -> SecretInput {
    let key = binding.key.trim();
    let description = if binding.description.trim().is_empty() {
        format!("Enter {}", key)
    } else {
        binding.description.clone()
    };
    SecretInput::new(input_id_for(binding), description, true)
}

/// Collect the root `inputs` list for a server.
///
/// Order: env-derived, then header-derived, then standalone inputs. Only
/// password bindings contribute. An id already declared is not declared
/// again; the first declaration wins. Returns `None` when nothing is
/// declared so that the `inputs` key is omitted entirely.
pub fn resolve_inputs(
    headers: &[FieldBinding],
    env: &[FieldBinding],
    standalone: &[SecretInput],
) -> Option<Vec<SecretInput>> {
    let mut seen = HashSet::new();
    let mut inputs = Vec::new();

    let derived = env
        .iter()
        .chain(headers)
        .filter(|b| b.password && !b.is_blank())
        .map(declared_input);
    let explicit = standalone
        .iter()
        .filter(|input| !input.id.trim().is_empty())
        .cloned();

    for input in derived.chain(explicit) {
        if seen.insert(input.id.clone()) {
            inputs.push(input);
        } else {
            warn!(
                input_id = %input.id,
                "Input id declared more than once; keeping the first declaration"
            );
        }
    }

    if inputs.is_empty() {
        None
    } else {
        Some(inputs)
    }
}
