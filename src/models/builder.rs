use crate::models::condition::{build_condition, ConditionBlock, ConditionType, Conjunction, Operator};
use crate::models::errors::RuleError;
use crate::models::{RuleAction, RuleDraft};
use crate::types::Priority;

/// Form state of the visual rule builder.
///
/// Holds the rule metadata together with an ordered list of condition blocks and
/// turns them into a `RuleDraft` once the form is valid.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleBuilder {
    pub name: String,
    pub description: String,
    pub action: RuleAction,
    pub priority: Priority,
    conditions: Vec<ConditionBlock>
}

impl Default for RuleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleBuilder {
    /// Creates a builder seeded with a single `amount > 10000` block.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            action: RuleAction::default(),
            priority: Priority::default(),
            conditions: vec![initial_condition()]
        }
    }

    pub fn conditions(&self) -> &[ConditionBlock] {
        &self.conditions
    }

    /// Appends an empty amount block and returns its id.
    pub fn add_condition(&mut self) -> String {
        let id = self.next_condition_id().to_string();

        self.conditions.push(
            ConditionBlock::new(id.clone(), ConditionType::Amount, Operator::GreaterThan, "")
                .with_conjunction(Conjunction::And)
        );

        id
    }

    /// Removes the block with the given id, returning whether one was found.
    pub fn remove_condition(&mut self, id: &str) -> bool {
        let before = self.conditions.len();
        self.conditions.retain(|condition| condition.id != id);
        self.conditions.len() != before
    }

    /// Replaces the block sharing `block.id`, returning whether one was found.
    pub fn update_condition(&mut self, block: ConditionBlock) -> bool {
        match self.conditions.iter_mut().find(|condition| condition.id == block.id) {
            Some(condition) => {
                *condition = block;
                true
            }
            None => false
        }
    }

    pub fn condition_string(&self) -> Result<String, RuleError> {
        build_condition(&self.conditions)
    }

    /// Validates the form and produces an enabled rule draft.
    ///
    /// # Errors
    /// Returns `RuleError` if:
    /// - The name is blank.
    /// - There are no condition blocks.
    /// - A block uses an operator its type does not allow.
    pub fn build(&self) -> Result<RuleDraft, RuleError> {
        if self.name.trim().is_empty() {
            return Err(RuleError::NameRequired)
        }

        if self.conditions.is_empty() {
            return Err(RuleError::ConditionsRequired)
        }

        let condition = self.condition_string()?;

        Ok(RuleDraft::new(self.name.clone(), condition)
            .with_description(self.description.clone())
            .with_action(self.action)
            .with_priority(self.priority)
            .with_enabled(true))
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn next_condition_id(&self) -> u64 {
        self.conditions.iter()
            .filter_map(|condition| condition.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0) + 1
    }
}

fn initial_condition() -> ConditionBlock {
    ConditionBlock::new("1", ConditionType::Amount, Operator::GreaterThan, "10000")
        .with_conjunction(Conjunction::And)
}
