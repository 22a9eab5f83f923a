mod rule_storage;

use crate::models::{Rule, RuleDraft, RuleError};

pub use rule_storage::RuleStorage;

pub trait Storage: Send + Sync + 'static {
    fn load(&self, rule_id: &str) -> Option<Rule>;
    fn save(&self, draft: RuleDraft) -> Result<Rule, RuleError>;
    fn toggle(&self, rule_id: &str, enabled: bool) -> Result<Rule, RuleError>;
    fn delete(&self, rule_id: &str) -> Result<Rule, RuleError>;
    fn enabled_by_priority(&self) -> Vec<Rule>;
}
