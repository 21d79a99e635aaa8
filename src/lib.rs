//! Umami Workbench Library
//!
//! Umami synergy and flavor composition analysis over an ingredient catalog.

pub mod analysis;
pub mod build_info;
pub mod db;
pub mod mcp;
pub mod models;
pub mod tools;
