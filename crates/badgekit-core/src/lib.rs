//! # Badgekit Core Library
//!
//! Badge, deep-link and configuration generation for MCP servers and other
//! published artifacts.
//!
//! ## Modules
//!
//! - `domain` - MCP server configuration model and the editable form it is built from
//! - `service` - Config builder, input resolver, multi-target encoder, README generator, importer
//! - `shields` - shields.io badge URL and Markdown primitives
//! - `catalog` - Badges for extensions, packages, repositories and profiles
//! - `error` - Validation and import errors

pub mod catalog;
pub mod domain;
pub mod error;
pub mod service;
pub mod shields;

// Re-export commonly used types
pub use domain::*;
pub use error::{ImportError, ValidationError};
pub use service::*;
pub use shields::{Badge, BadgeStyle};
