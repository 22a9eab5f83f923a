use crate::models::{ConditionBlock, ConditionType, Operator};
use crate::types::RuleId;
use thiserror::Error;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum RuleError {
    #[error("Rule name is required")]
    NameRequired,
    #[error("Rule condition is required")]
    ConditionRequired,
    #[error("At least one condition is required")]
    ConditionsRequired,
    #[error("Operator [{operator}] is not allowed for [{condition_type:?}] condition [{block_id}]")]
    OperatorNotAllowed {
        block_id: String,
        condition_type: ConditionType,
        operator: Operator
    },
    #[error("Rule [{rule_id}] was not found")]
    RuleNotFound {
        rule_id: RuleId
    }
}

impl RuleError {
    pub fn operator_not_allowed(block: &ConditionBlock) -> Self {
        Self::OperatorNotAllowed {
            block_id: block.id.clone(),
            condition_type: block.condition_type,
            operator: block.operator,
        }
    }

    pub fn rule_not_found(rule_id: &str) -> Self {
        Self::RuleNotFound { rule_id: rule_id.to_string() }
    }
}
