//! Non-fatal warning model.

use serde::{Deserialize, Serialize};

/// The severity of a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational.
    Low,
    /// Worth a look.
    Medium,
    /// Requires human review.
    High,
}

/// A warning generated during computation.
///
/// Warnings flag conditions that are legally suspect but can be
/// legitimate (partial periods, authorized long shifts); computation
/// completes and a human reviews them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description.
    pub message: String,
    /// The severity level.
    pub severity: Severity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_serialization() {
        let warning = EngineWarning {
            code: "MAX_DAILY_HOURS".to_string(),
            message: "Shift exceeds 12 hours".to_string(),
            severity: Severity::High,
        };

        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("\"code\":\"MAX_DAILY_HOURS\""));
        assert!(json.contains("\"severity\":\"high\""));
    }
}
