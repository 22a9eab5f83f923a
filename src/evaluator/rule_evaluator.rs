use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::{error, trace};

use crate::evaluator::errors::EvaluationError;
use crate::models::{Rule, Transaction};

/// A clause pattern the evaluator recognises inside a condition expression.
///
/// Gates are checked in declaration order. Each one present anywhere in the
/// lower-cased condition must admit the transaction; absent gates are skipped
/// and written conjunctions are not interpreted.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Gate {
    AmountAbove,
    AmountBelow,
    CountryEquals,
    CountryNotEquals,
    PaymentModeEquals,
    ChannelEquals
}

impl Gate {
    const ORDERED: [Gate; 6] = [
        Gate::AmountAbove,
        Gate::AmountBelow,
        Gate::CountryEquals,
        Gate::CountryNotEquals,
        Gate::PaymentModeEquals,
        Gate::ChannelEquals
    ];

    pub fn pattern(self) -> &'static str {
        match self {
            Gate::AmountAbove => "amount >",
            Gate::AmountBelow => "amount <",
            Gate::CountryEquals => "country =",
            Gate::CountryNotEquals => "country !=",
            Gate::PaymentModeEquals => "paymentmode =",
            Gate::ChannelEquals => "channel ="
        }
    }

    /// Tests the transaction against the text that follows this gate's pattern.
    fn admits(self, rule: &Rule, remainder: &str, transaction: &Transaction) -> Result<bool, EvaluationError> {
        match self {
            Gate::AmountAbove => Ok(transaction.amount > parse_threshold(rule, self, remainder)?),
            Gate::AmountBelow => Ok(transaction.amount < parse_threshold(rule, self, remainder)?),
            Gate::CountryEquals => Ok(transaction.payer_bank.to_lowercase() == extract_value(rule, self, remainder)?),
            Gate::CountryNotEquals => Ok(transaction.payer_bank.to_lowercase() != extract_value(rule, self, remainder)?),
            Gate::PaymentModeEquals => Ok(transaction.payment_mode.to_lowercase() == extract_value(rule, self, remainder)?),
            Gate::ChannelEquals => Ok(transaction.channel.to_lowercase() == extract_value(rule, self, remainder)?)
        }
    }
}

/// Outcome of evaluating one rule against one transaction.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Verdict {
    Matched,
    /// The first gate that turned the transaction away.
    Rejected(Gate),
    /// The condition could not be read; treated as a non-match.
    Failed(EvaluationError)
}

impl Verdict {
    pub fn is_match(&self) -> bool {
        matches!(self, Verdict::Matched)
    }
}

/// Result of running a rule over a set of past transactions.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct RuleTestReport {
    pub matched: usize,
    pub tested: usize
}

/// Evaluates a rule and reports which gate, if any, rejected the transaction.
///
/// Malformed conditions are logged and reported as `Verdict::Failed`, never propagated.
pub fn explain_rule(rule: &Rule, transaction: &Transaction) -> Verdict {
    match first_rejecting_gate(rule, transaction) {
        Ok(None) => Verdict::Matched,
        Ok(Some(gate)) => {
            trace!("Rule [{}] rejected transaction [{}] at [{:?}]", rule.id, transaction.transaction_id, gate);
            Verdict::Rejected(gate)
        }
        Err(error) => {
            error!("Error evaluating rule: {error}");
            Verdict::Failed(error)
        }
    }
}

/// Returns whether the transaction satisfies the rule's condition. Fails closed.
pub fn evaluate_rule(rule: &Rule, transaction: &Transaction) -> bool {
    explain_rule(rule, transaction).is_match()
}

pub fn count_matches<'a, I>(rule: &Rule, transactions: I) -> usize
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions.into_iter()
        .filter(|transaction| evaluate_rule(rule, transaction))
        .count()
}

/// Runs a rule over past transactions, e.g. to preview a rule before saving it.
pub fn backtest_rule(rule: &Rule, transactions: &[Transaction]) -> RuleTestReport {
    RuleTestReport {
        matched: count_matches(rule, transactions),
        tested: transactions.len()
    }
}

fn first_rejecting_gate(rule: &Rule, transaction: &Transaction) -> Result<Option<Gate>, EvaluationError> {
    let condition = rule.condition.to_lowercase();

    for gate in Gate::ORDERED {
        let Some((_, remainder)) = condition.split_once(gate.pattern()) else {
            continue
        };

        if !gate.admits(rule, remainder, transaction)? {
            return Ok(Some(gate))
        }
    }

    Ok(None)
}

fn is_numeric_char(character: char) -> bool {
    character.is_ascii_digit() || matches!(character, '.' | '-' | '+' | 'e')
}

/// Reads the leading numeric token, e.g. `10000` from ` 10000 and channel = 'web'`.
fn parse_threshold(rule: &Rule, gate: Gate, remainder: &str) -> Result<Decimal, EvaluationError> {
    let remainder = remainder.trim_start();
    let end = remainder.find(|character: char| !is_numeric_char(character)).unwrap_or(remainder.len());
    let token = &remainder[..end];

    Decimal::from_str(token)
        .or_else(|_| Decimal::from_scientific(token))
        .map_err(|_| EvaluationError::invalid_threshold(rule, gate, token))
}

/// Reads a `'quoted'` or `"quoted"` literal, or failing that the next bare word.
fn extract_value<'a>(rule: &Rule, gate: Gate, remainder: &'a str) -> Result<&'a str, EvaluationError> {
    let remainder = remainder.trim_start();

    match remainder.chars().next() {
        Some(quote @ ('\'' | '"')) => {
            let body = &remainder[1..];
            body.find(quote)
                .map(|end| &body[..end])
                .ok_or_else(|| EvaluationError::missing_value(rule, gate))
        }
        Some(_) => remainder.split_whitespace().next()
            .ok_or_else(|| EvaluationError::missing_value(rule, gate)),
        None => Err(EvaluationError::missing_value(rule, gate))
    }
}
