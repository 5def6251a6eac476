//! Domain types
//!
//! - Configuration model (ServerTransport, SecretInput, ConfigurationModel)
//! - Form model the builder consumes and the importer produces (ServerForm and friends)

mod form;
mod server;

pub use form::*;
pub use server::*;
