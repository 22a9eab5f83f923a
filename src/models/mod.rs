mod builder;
mod condition;
mod errors;
mod rule;
#[cfg(test)]
mod tests;
mod transaction;

use std::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

pub use builder::RuleBuilder;
pub use condition::{build_condition, ConditionBlock, ConditionType, Conjunction, Operator};
pub use errors::RuleError;
pub use rule::{Rule, RuleDraft};
pub use transaction::Transaction;

/// What the host application should do with a transaction that matches a rule.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleAction {
    #[default]
    FlagHighRisk,
    FlagMediumRisk,
    BlockTransaction,
    RequireReview
}

impl Display for RuleAction {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let label = match self {
            RuleAction::FlagHighRisk => "FLAG_HIGH_RISK",
            RuleAction::FlagMediumRisk => "FLAG_MEDIUM_RISK",
            RuleAction::BlockTransaction => "BLOCK_TRANSACTION",
            RuleAction::RequireReview => "REQUIRE_REVIEW"
        };

        formatter.write_str(label)
    }
}
