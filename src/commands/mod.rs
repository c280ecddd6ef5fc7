//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `submit.rs` — Fritz lookup through MMT queue submission.
//! - `finder.rs` — batch finder chart and starlist download.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod finder;
pub mod submit;

pub use finder::handle_finder;
pub use submit::handle_submit;
