//! Output formatting for CLI.

mod json;
mod swiftbar;

pub use json::JsonFormatter;
pub use swiftbar::{render_error, render_no_accounts, SwiftBarFormatter};
#[cfg(test)]
mod tests;
