//! Domain models for the dental chart widgets.

mod assessment;
mod treatment;

pub use assessment::*;
pub use treatment::*;

use thiserror::Error;

/// Errors raised while parsing constrained model values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid {kind}: {value}")]
    InvalidChoice { kind: &'static str, value: String },
}
