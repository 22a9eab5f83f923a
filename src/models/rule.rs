use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::errors::RuleError;
use crate::models::RuleAction;
use crate::types::{Priority, RuleId};

/// A named, prioritised mapping from a condition expression to an action.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub id: RuleId,
    pub name: String,
    pub description: String,
    /// Clause expression such as `amount > 10000 AND channel = 'Web'`.
    pub condition: String,
    pub action: RuleAction,
    pub priority: Priority,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>
}

impl Rule {
    /// Materialises a validated draft under a freshly assigned id.
    pub(crate) fn create(id: RuleId, draft: RuleDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            condition: draft.condition,
            action: draft.action,
            priority: draft.priority,
            enabled: draft.enabled,
            created_at: now,
            updated_at: now
        }
    }

    /// Overwrites the editable fields from a draft, keeping `id` and `created_at`.
    pub(crate) fn revise(&mut self, draft: RuleDraft, now: DateTime<Utc>) {
        self.name = draft.name;
        self.description = draft.description;
        self.condition = draft.condition;
        self.action = draft.action;
        self.priority = draft.priority;
        self.enabled = draft.enabled;
        self.updated_at = now;
    }
}

/// An unsaved rule, either brand new (`id` is `None`) or an edit of an existing one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RuleDraft {
    #[serde(default)]
    pub id: Option<RuleId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub condition: String,
    #[serde(default)]
    pub action: RuleAction,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool
}

fn enabled_by_default() -> bool {
    true
}

impl RuleDraft {
    pub fn new(name: impl Into<String>, condition: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            condition: condition.into(),
            action: RuleAction::default(),
            priority: Priority::default(),
            enabled: enabled_by_default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_action(mut self, action: RuleAction) -> Self {
        self.action = action;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Checks the fields that must be present before a rule may be stored.
    pub fn validate(&self) -> Result<(), RuleError> {
        if self.name.trim().is_empty() {
            return Err(RuleError::NameRequired)
        }

        if self.condition.trim().is_empty() {
            return Err(RuleError::ConditionRequired)
        }

        Ok(())
    }
}

impl From<&Rule> for RuleDraft {
    fn from(rule: &Rule) -> Self {
        Self {
            id: Some(rule.id.clone()),
            name: rule.name.clone(),
            description: rule.description.clone(),
            condition: rule.condition.clone(),
            action: rule.action,
            priority: rule.priority,
            enabled: rule.enabled
        }
    }
}
