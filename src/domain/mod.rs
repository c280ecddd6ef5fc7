//! Shared data model layer (structs/constants only).
//!
//! ## Files
//! - `models.rs` — Fritz responses, observation request, report/output structs.
//! - `constants.rs` — endpoints, environment variable names, instrument tables.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! `ObservationRequest` field names are the MMT catalog target schema and the
//! report structs are the `--json` output; rename with care.

pub mod constants;
pub mod models;
