//! Core types and error handling for the hullscan ecosystem.
//!
//! This crate carries everything the other hullscan crates share:
//!
//! - [`Error`] / [`Result`] - the error taxonomy for the whole run
//! - [`Platform`], [`Os`], [`Arch`] - immutable platform identification
//! - [`Severity`] - the total order over scanner severity names
//! - [`Report`] / [`Finding`] - the structured scan report model

pub mod error;
pub mod platform;
pub mod report;
pub mod severity;

pub use error::{Error, Result};
pub use platform::{Arch, Os, Platform};
pub use report::{Finding, RawVulnerability, Report, ScanTarget, TITLE_BACKFILL_MAX};
pub use severity::{AnnotationLevel, Severity};
