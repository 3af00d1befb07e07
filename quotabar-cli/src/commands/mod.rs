//! CLI commands.

pub mod quota;
