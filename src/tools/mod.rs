//! Umami Tools module
//!
//! MCP tool implementations for the Umami Workbench.

pub mod compositions;
pub mod ingredients;
pub mod status;
