use crate::models::{Rule, RuleDraft, RuleError};
use crate::storage::Storage;
use crate::types::RuleId;
use chrono::Utc;
use csv::{ReaderBuilder, Trim};
use dashmap::iter::Iter;
use dashmap::DashMap;
use std::io::Read;
use tracing::{debug, warn};
use uuid::Uuid;

/// In-memory rule repository keyed by rule id.
pub struct RuleStorage {
    rules: DashMap<RuleId, Rule>
}

impl Default for RuleStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleStorage {
    pub fn new() -> Self {
        Self {
            rules: DashMap::new()
        }
    }

    pub fn iter(&self) -> Iter<'_, RuleId, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Saves every valid rule row of a CSV document and returns how many were stored.
    ///
    /// Rows that fail to deserialize or validate are logged and skipped.
    pub fn import_csv<R: Read>(&self, reader: R) -> usize {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut imported = 0;

        for result in reader.deserialize::<RuleDraft>() {
            match result {
                Ok(draft) => match self.save(draft) {
                    Ok(rule) => {
                        debug!("Rule [{}]:[{}] imported", rule.id, rule.name);
                        imported += 1;
                    }
                    Err(error) => warn!("Rule rejected: {error}")
                },
                Err(error) => warn!("Rule CSV deserialization error: {error}")
            }
        }

        imported
    }
}

impl Storage for RuleStorage {
    fn load(&self, rule_id: &str) -> Option<Rule> {
        self.rules.get(rule_id).map(|rule| rule.value().clone())
    }

    /// Creates a rule when the draft has no id, otherwise revises the existing one.
    ///
    /// # Errors
    /// Returns `RuleError` if:
    /// - The name or condition is blank.
    /// - The draft names a rule id that does not exist.
    fn save(&self, draft: RuleDraft) -> Result<Rule, RuleError> {
        draft.validate()?;

        let now = Utc::now();

        match draft.id.clone() {
            Some(rule_id) => {
                let mut rule = self.rules.get_mut(&rule_id)
                    .ok_or_else(|| RuleError::rule_not_found(&rule_id))?;

                rule.revise(draft, now);

                Ok(rule.clone())
            }
            None => {
                let rule = Rule::create(Uuid::new_v4().to_string(), draft, now);
                self.rules.insert(rule.id.clone(), rule.clone());

                Ok(rule)
            }
        }
    }

    fn toggle(&self, rule_id: &str, enabled: bool) -> Result<Rule, RuleError> {
        let mut rule = self.rules.get_mut(rule_id)
            .ok_or_else(|| RuleError::rule_not_found(rule_id))?;

        rule.enabled = enabled;
        rule.updated_at = Utc::now();

        Ok(rule.clone())
    }

    fn delete(&self, rule_id: &str) -> Result<Rule, RuleError> {
        self.rules.remove(rule_id)
            .map(|(_, rule)| rule)
            .ok_or_else(|| RuleError::rule_not_found(rule_id))
    }

    /// Enabled rules, highest priority (`0`) first and then by name.
    fn enabled_by_priority(&self) -> Vec<Rule> {
        let mut rules: Vec<Rule> = self.rules.iter()
            .filter(|rule| rule.enabled)
            .map(|rule| rule.value().clone())
            .collect();

        rules.sort_by(|left, right| left.priority.cmp(&right.priority).then_with(|| left.name.cmp(&right.name)));

        rules
    }
}
