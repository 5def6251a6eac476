//! MCP configuration tests
//!
//! Builder output shapes, input placeholders, and the importer's
//! ability to recover a form from what the builder wrote.

mod builder;
mod importer;
