//! Severity model: a strict total order over scanner severity names.
//!
//! The scanner reports severities as uppercase strings. The five canonical
//! tokens map onto a 5-level total order used for threshold comparison.
//! Strings outside the model are excluded from threshold evaluation entirely
//! rather than coerced to `Unknown`; such findings stay informational and
//! never contribute to pass/fail.

use serde::{Deserialize, Serialize};

/// Ordered severity level. Comparison follows the integer value:
/// `Unknown < Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Unknown = 1,
    Low = 2,
    Medium = 3,
    High = 4,
    Critical = 5,
}

impl Severity {
    /// All levels, lowest first.
    pub const ALL: [Self; 5] = [
        Self::Unknown,
        Self::Low,
        Self::Medium,
        Self::High,
        Self::Critical,
    ];

    /// Map a canonical uppercase severity token to its level.
    ///
    /// Returns `None` for anything outside the five canonical tokens;
    /// callers must exclude such findings from threshold evaluation.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "UNKNOWN" => Some(Self::Unknown),
            "LOW" => Some(Self::Low),
            "MEDIUM" => Some(Self::Medium),
            "HIGH" => Some(Self::High),
            "CRITICAL" => Some(Self::Critical),
            _ => None,
        }
    }

    /// The canonical uppercase token for this level.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }

    /// The annotation channel a finding at this level is routed to.
    #[must_use]
    pub fn annotation_level(&self) -> AnnotationLevel {
        match self {
            Self::Unknown | Self::Low => AnnotationLevel::Notice,
            Self::Medium => AnnotationLevel::Warning,
            Self::High | Self::Critical => AnnotationLevel::Error,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Display channel for a classified finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationLevel {
    Notice,
    Warning,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_order() {
        assert!(Severity::Unknown < Severity::Low);
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn order_is_reflexive_for_threshold_comparison() {
        for level in Severity::ALL {
            assert!(level >= level);
        }
    }

    #[test]
    fn canonical_names_round_trip() {
        for level in Severity::ALL {
            assert_eq!(Severity::from_name(level.name()), Some(level));
        }
    }

    #[test]
    fn unrecognized_names_are_absent_not_unknown() {
        assert_eq!(Severity::from_name("NEGLIGIBLE"), None);
        assert_eq!(Severity::from_name("high"), None);
        assert_eq!(Severity::from_name(""), None);
    }

    #[test]
    fn annotation_routing_is_exhaustive() {
        assert_eq!(
            Severity::Unknown.annotation_level(),
            AnnotationLevel::Notice
        );
        assert_eq!(Severity::Low.annotation_level(), AnnotationLevel::Notice);
        assert_eq!(
            Severity::Medium.annotation_level(),
            AnnotationLevel::Warning
        );
        assert_eq!(Severity::High.annotation_level(), AnnotationLevel::Error);
        assert_eq!(
            Severity::Critical.annotation_level(),
            AnnotationLevel::Error
        );
    }
}
