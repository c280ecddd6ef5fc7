//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `angle.rs` — decimal degrees to sexagesimal RA/Dec strings.
//! - `fritz.rs` — authenticated Fritz source/photometry/finder/offsets calls.
//! - `lookup.rs` — coordinates and latest ZTF magnitude of a source.
//! - `finder.rs` — per-source chart and starlist fetch, batch aggregation.
//! - `request.rs` — MMT catalog target assembly and slit mask table.
//! - `mmt.rs` — MMT queue validation, posting, finder upload, description.
//! - `storage.rs` — finder chart and starlist files.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod angle;
pub mod finder;
pub mod fritz;
pub mod lookup;
pub mod mmt;
pub mod output;
pub mod request;
pub mod storage;
