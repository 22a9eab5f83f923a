use std::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::models::errors::RuleError;

const NUMERIC_OPERATORS: [Operator; 4] = [
    Operator::GreaterThan,
    Operator::LessThan,
    Operator::Equals,
    Operator::NotEquals
];

const ALL_OPERATORS: [Operator; 7] = [
    Operator::GreaterThan,
    Operator::LessThan,
    Operator::Equals,
    Operator::NotEquals,
    Operator::Contains,
    Operator::StartsWith,
    Operator::EndsWith
];

/// The transaction attribute a condition block talks about.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionType {
    Amount,
    Country,
    Time,
    PaymentMode,
    Channel,
    /// Free text, injected into the expression verbatim.
    Custom
}

impl ConditionType {
    /// Name of the field as written in a condition expression.
    /// `Custom` has none because it carries its own clause text.
    pub fn field_name(self) -> Option<&'static str> {
        match self {
            ConditionType::Amount => Some("amount"),
            ConditionType::Country => Some("country"),
            ConditionType::Time => Some("timestamp"),
            ConditionType::PaymentMode => Some("paymentMode"),
            ConditionType::Channel => Some("channel"),
            ConditionType::Custom => None
        }
    }

    pub fn allowed_operators(self) -> &'static [Operator] {
        match self {
            ConditionType::Amount => &NUMERIC_OPERATORS,
            _ => &ALL_OPERATORS
        }
    }

    pub fn allows(self, operator: Operator) -> bool {
        self.allowed_operators().contains(&operator)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "=")]
    Equals,
    #[serde(rename = "!=")]
    NotEquals,
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "startsWith")]
    StartsWith,
    #[serde(rename = "endsWith")]
    EndsWith
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
            Operator::Equals => "=",
            Operator::NotEquals => "!=",
            Operator::Contains => "contains",
            Operator::StartsWith => "startsWith",
            Operator::EndsWith => "endsWith"
        }
    }
}

impl Display for Operator {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Conjunction {
    And,
    Or
}

impl Display for Conjunction {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Conjunction::And => formatter.write_str("AND"),
            Conjunction::Or => formatter.write_str("OR")
        }
    }
}

/// One structured clause of the visual rule builder.
///
/// The `conjunction` joins this block to the one after it, so the conjunction
/// on the final block of a sequence is never rendered.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ConditionBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub condition_type: ConditionType,
    pub operator: Operator,
    pub value: String,
    #[serde(default)]
    pub conjunction: Option<Conjunction>
}

impl ConditionBlock {
    pub fn new(id: impl Into<String>, condition_type: ConditionType, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            condition_type,
            operator,
            value: value.into(),
            conjunction: None
        }
    }

    pub fn with_conjunction(mut self, conjunction: Conjunction) -> Self {
        self.conjunction = Some(conjunction);
        self
    }

    /// Renders this block as a single clause, without its conjunction.
    pub fn render(&self) -> String {
        match (self.condition_type, self.condition_type.field_name()) {
            (ConditionType::Amount, Some(field)) => format!("{} {} {}", field, self.operator, self.value),
            (_, Some(field)) => format!("{} {} '{}'", field, self.operator, self.value),
            (_, None) => self.value.clone()
        }
    }
}

/// Assembles an ordered sequence of condition blocks into one condition expression.
///
/// # Errors
/// Returns `RuleError` if:
/// - The sequence is empty.
/// - A block uses an operator its condition type does not allow.
pub fn build_condition(blocks: &[ConditionBlock]) -> Result<String, RuleError> {
    if blocks.is_empty() {
        return Err(RuleError::ConditionsRequired)
    }

    let last = blocks.len() - 1;
    let mut expression = String::new();

    for (index, block) in blocks.iter().enumerate() {
        if block.condition_type != ConditionType::Custom && !block.condition_type.allows(block.operator) {
            return Err(RuleError::operator_not_allowed(block))
        }

        expression.push_str(&block.render());

        if index < last {
            if let Some(conjunction) = block.conjunction {
                expression.push_str(&format!(" {conjunction} "));
            }
        }
    }

    Ok(expression)
}
