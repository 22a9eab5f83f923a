//! Fraud rule engine: a small condition language for flagging transactions.
//!
//! Rules are assembled from condition blocks by [`RuleBuilder`], stored in
//! [`storage::RuleStorage`] and matched against transactions by
//! [`evaluate_rule`]. [`engine::RuleEngine`] applies every enabled rule to a
//! CSV stream of transactions.

pub mod engine;
pub mod evaluator;
pub mod models;
pub mod storage;
pub mod types;

pub use evaluator::{backtest_rule, count_matches, evaluate_rule, explain_rule};
pub use models::{build_condition, RuleBuilder};
