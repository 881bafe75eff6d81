//! Audit trace models.
//!
//! Every credit calculation and report records the rules it applied so a
//! reviewer can trace each figure on the printed document back to its
//! inputs.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag likely data-entry mistakes without failing the
/// calculation.
///
/// # Example
///
/// ```
/// use angka_kredit::models::AuditWarning;
///
/// let warning = AuditWarning::new("UNKNOWN_RATING", "Rating 'Excellent' is not registered");
/// assert_eq!(warning.severity, "medium");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a medium-severity warning.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: "medium".to_string(),
        }
    }

    /// Creates a low-severity warning.
    pub fn low(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: "low".to_string(),
            ..Self::new(code, message)
        }
    }
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// Returns the step number the next recorded step will get.
    pub fn next_step_number(&self) -> u32 {
        self.steps.len() as u32 + 1
    }

    /// Appends a step, numbering it after the existing ones.
    pub fn record(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: impl Into<String>,
    ) {
        let step_number = self.next_step_number();
        self.steps.push(AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input,
            output,
            reasoning: reasoning.into(),
        });
    }

    /// Appends a warning.
    pub fn warn(&mut self, warning: AuditWarning) {
        self.warnings.push(warning);
    }

    /// Returns true if a warning with the given code was recorded.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_numbers_steps_sequentially() {
        let mut trace = AuditTrace::default();
        trace.record("a", "Rule A", json!({}), json!({}), "first");
        trace.record("b", "Rule B", json!({}), json!({}), "second");

        assert_eq!(trace.steps[0].step_number, 1);
        assert_eq!(trace.steps[1].step_number, 2);
        assert_eq!(trace.next_step_number(), 3);
    }

    #[test]
    fn test_has_warning() {
        let mut trace = AuditTrace::default();
        trace.warn(AuditWarning::low("NO_ASSESSMENTS", "nothing to sum"));

        assert!(trace.has_warning("NO_ASSESSMENTS"));
        assert!(!trace.has_warning("UNKNOWN_RATING"));
        assert_eq!(trace.warnings[0].severity, "low");
    }

    #[test]
    fn test_audit_trace_serialization() {
        let mut trace = AuditTrace::default();
        trace.record(
            "credit_calculation",
            "Credit Calculation",
            json!({"rating": "Baik"}),
            json!({"credit": "5.010"}),
            "366 days at 5 x 100%",
        );

        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["steps"][0]["rule_id"], "credit_calculation");
        assert_eq!(json["steps"][0]["output"]["credit"], "5.010");
        assert!(json["warnings"].as_array().unwrap().is_empty());
    }
}
