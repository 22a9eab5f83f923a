mod errors;
mod rule_evaluator;

pub use errors::EvaluationError;
pub use rule_evaluator::{backtest_rule, count_matches, evaluate_rule, explain_rule, Gate, RuleTestReport, Verdict};
