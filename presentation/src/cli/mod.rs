//! Command line surface

pub mod arguments;
pub mod commands;
