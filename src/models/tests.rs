use super::{build_condition, ConditionBlock, ConditionType, Conjunction, Operator, RuleAction, RuleBuilder, RuleDraft, RuleError};

use anyhow::Result;

use crate::types::Priority;

fn block(id: &str, condition_type: ConditionType, operator: Operator, value: &str) -> ConditionBlock {
    ConditionBlock::new(id, condition_type, operator, value)
}

#[test]
fn test_single_amount_block_renders_unquoted_value() -> Result<()> {
    let blocks = vec![block("1", ConditionType::Amount, Operator::GreaterThan, "10000")];

    assert_eq!(build_condition(&blocks)?, "amount > 10000");

    Ok(())
}

#[test]
fn test_blocks_are_joined_by_their_conjunctions_in_order() -> Result<()> {
    let blocks = vec![
        block("1", ConditionType::Channel, Operator::Equals, "Web").with_conjunction(Conjunction::And),
        block("2", ConditionType::PaymentMode, Operator::Equals, "UPI")
    ];

    assert_eq!(build_condition(&blocks)?, "channel = 'Web' AND paymentMode = 'UPI'");

    Ok(())
}

#[test]
fn test_conjunction_on_last_block_is_not_rendered() -> Result<()> {
    let blocks = vec![
        block("1", ConditionType::Amount, Operator::LessThan, "50").with_conjunction(Conjunction::Or),
        block("2", ConditionType::Country, Operator::NotEquals, "US").with_conjunction(Conjunction::And)
    ];

    assert_eq!(build_condition(&blocks)?, "amount < 50 OR country != 'US'");

    Ok(())
}

#[test]
fn test_time_block_uses_timestamp_field_name() -> Result<()> {
    let blocks = vec![block("1", ConditionType::Time, Operator::StartsWith, "2024-01")];

    assert_eq!(build_condition(&blocks)?, "timestamp startsWith '2024-01'");

    Ok(())
}

#[test]
fn test_custom_block_is_injected_verbatim() -> Result<()> {
    let blocks = vec![
        block("1", ConditionType::Custom, Operator::Contains, "payerBank = 'HDFC'").with_conjunction(Conjunction::And),
        block("2", ConditionType::Channel, Operator::EndsWith, "ile")
    ];

    assert_eq!(build_condition(&blocks)?, "payerBank = 'HDFC' AND channel endsWith 'ile'");

    Ok(())
}

#[test]
fn test_missing_conjunction_concatenates_clauses() -> Result<()> {
    let blocks = vec![
        block("1", ConditionType::Amount, Operator::GreaterThan, "1"),
        block("2", ConditionType::Amount, Operator::LessThan, "9")
    ];

    assert_eq!(build_condition(&blocks)?, "amount > 1amount < 9");

    Ok(())
}

#[test]
fn test_empty_block_sequence_is_rejected() {
    assert_eq!(build_condition(&[]), Err(RuleError::ConditionsRequired));
}

#[test]
fn test_amount_block_rejects_text_operators() {
    let blocks = vec![block("7", ConditionType::Amount, Operator::Contains, "100")];
    let result = build_condition(&blocks);

    assert!(matches!(
        result,
        Err(RuleError::OperatorNotAllowed { ref block_id, condition_type: ConditionType::Amount, operator: Operator::Contains }) if block_id == "7"
    ));
}

#[test]
fn test_operator_sets_depend_on_condition_type() {
    assert_eq!(ConditionType::Amount.allowed_operators().len(), 4);
    assert!(!ConditionType::Amount.allows(Operator::StartsWith));
    assert!(ConditionType::Country.allows(Operator::StartsWith));
    assert!(ConditionType::PaymentMode.allows(Operator::EndsWith));
    assert_eq!(ConditionType::Channel.allowed_operators().len(), 7);
}

#[test]
fn test_builder_starts_with_default_amount_condition() -> Result<()> {
    let builder = RuleBuilder::new();

    assert_eq!(builder.conditions().len(), 1);
    assert_eq!(builder.condition_string()?, "amount > 10000");
    assert_eq!(builder.action, RuleAction::FlagHighRisk);
    assert_eq!(builder.priority, Priority::HIGH);

    Ok(())
}

#[test]
fn test_builder_assigns_increasing_condition_ids() {
    let mut builder = RuleBuilder::new();

    assert_eq!(builder.add_condition(), "2");
    assert_eq!(builder.add_condition(), "3");
    assert!(builder.remove_condition("2"));
    assert_eq!(builder.add_condition(), "4");
    assert!(!builder.remove_condition("99"));

    let ids: Vec<&str> = builder.conditions().iter().map(|condition| condition.id.as_str()).collect();

    assert_eq!(ids, vec!["1", "3", "4"]);
}

#[test]
fn test_builder_produces_enabled_draft_from_conditions() -> Result<()> {
    let mut builder = RuleBuilder::new();
    builder.name = "Large web UPI payments".to_string();
    builder.description = "Large UPI payments made on the web".to_string();
    builder.action = RuleAction::RequireReview;
    builder.priority = Priority::HIGHEST;

    let second = builder.add_condition();
    assert!(builder.update_condition(block(&second, ConditionType::PaymentMode, Operator::Equals, "UPI")));

    let draft = builder.build()?;

    assert_eq!(draft.id, None);
    assert_eq!(draft.name, "Large web UPI payments");
    assert_eq!(draft.condition, "amount > 10000 AND paymentMode = 'UPI'");
    assert_eq!(draft.action, RuleAction::RequireReview);
    assert_eq!(draft.priority, Priority::HIGHEST);
    assert!(draft.enabled);

    Ok(())
}

#[test]
fn test_builder_requires_name_and_conditions() {
    let mut builder = RuleBuilder::new();
    builder.name = "   ".to_string();

    assert_eq!(builder.build(), Err(RuleError::NameRequired));

    builder.name = "No conditions".to_string();
    assert!(builder.remove_condition("1"));

    assert_eq!(builder.build(), Err(RuleError::ConditionsRequired));
}

#[test]
fn test_builder_reset_restores_initial_form() {
    let mut builder = RuleBuilder::new();
    builder.name = "Temporary".to_string();
    builder.add_condition();
    builder.reset();

    assert_eq!(builder, RuleBuilder::default());
}

#[test]
fn test_draft_validation_rejects_blank_fields() {
    assert_eq!(RuleDraft::new("", "amount > 1").validate(), Err(RuleError::NameRequired));
    assert_eq!(RuleDraft::new("Blank condition", "  ").validate(), Err(RuleError::ConditionRequired));
    assert!(RuleDraft::new("Valid", "amount > 1").validate().is_ok());
}

#[test]
fn test_rule_action_displays_wire_name() {
    assert_eq!(RuleAction::FlagMediumRisk.to_string(), "FLAG_MEDIUM_RISK");
    assert_eq!(RuleAction::BlockTransaction.to_string(), "BLOCK_TRANSACTION");
}
