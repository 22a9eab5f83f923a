use crate::evaluator::Gate;
use crate::models::Rule;
use crate::types::RuleId;
use thiserror::Error;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum EvaluationError {
    #[error("Invalid threshold [{text}] after [{pattern}] in rule [{rule_id}]")]
    InvalidThreshold {
        rule_id: RuleId,
        pattern: &'static str,
        text: String
    },
    #[error("Missing or unterminated value after [{pattern}] in rule [{rule_id}]")]
    MissingValue {
        rule_id: RuleId,
        pattern: &'static str
    }
}

impl EvaluationError {
    pub fn invalid_threshold(rule: &Rule, gate: Gate, text: &str) -> Self {
        Self::InvalidThreshold {
            rule_id: rule.id.clone(),
            pattern: gate.pattern(),
            text: text.to_string(),
        }
    }

    pub fn missing_value(rule: &Rule, gate: Gate) -> Self {
        Self::MissingValue {
            rule_id: rule.id.clone(),
            pattern: gate.pattern(),
        }
    }
}
