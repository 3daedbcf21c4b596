//! Scan execution, report aggregation and severity classification.
//!
//! The scan session flows strictly forward: a [`ScanRequest`] drives the
//! [`ScanExecutor`] once per output format, the JSON artifact is aggregated
//! into findings, and [`classify`] decides which findings breach the
//! configured severity threshold.

pub mod aggregate;
pub mod classify;
pub mod executor;
pub mod process;
pub mod request;
pub mod sarif;

pub use aggregate::aggregate as aggregate_report;
pub use classify::{
    AnnotationSink, Classification, ClassifySummary, classify, emit_annotations, parse_threshold,
    render_table_line,
};
pub use executor::{ScanExecutor, ScanFormat, ScanOutcome};
pub use process::{ProcessOutput, ProcessRunner};
pub use request::{ScanRequest, ScanTargetRef};
