//! Domain services
//!
//! Pure functions over the configuration model: build, resolve inputs,
//! encode for each host, render README sections, import.

mod builder;
mod encoder;
mod importer;
pub mod inputs;
mod options;
mod readme;

pub use builder::build_config;
pub use encoder::*;
pub use importer::*;
pub use inputs::{resolve_inputs, slugify};
pub use options::BadgeOptions;
pub use readme::*;
