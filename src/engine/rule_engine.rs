use crate::evaluator::evaluate_rule;
use crate::models::{Rule, RuleAction, Transaction};
use crate::storage::{RuleStorage, Storage};
use crate::types::{Priority, RuleId, TransactionId};
use csv::{ReaderBuilder, Trim};
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{debug, error, info};

/// A single (transaction, rule) pair for which the rule matched.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct RuleMatch {
    #[serde(rename = "transaction")]
    pub transaction_id: TransactionId,
    #[serde(skip)]
    pub rule_id: RuleId,
    #[serde(rename = "rule")]
    pub rule_name: String,
    pub action: RuleAction,
    pub priority: Priority
}

impl RuleMatch {
    fn new(transaction: &Transaction, rule: &Rule) -> Self {
        Self {
            transaction_id: transaction.transaction_id.clone(),
            rule_id: rule.id.clone(),
            rule_name: rule.name.clone(),
            action: rule.action,
            priority: rule.priority
        }
    }
}

/// Streams transactions from a CSV file and evaluates every enabled rule against each one.
pub struct RuleEngine {
    storage: Arc<RuleStorage>,
    backpressure: usize
}

impl RuleEngine {
    /// Creates a new engine instance over the provided rule storage.
    pub fn new(storage: Arc<RuleStorage>) -> Self {
        Self {
            storage,
            backpressure: 256
        }
    }

    /// Bounds how many parsed transactions may wait for evaluation.
    pub fn with_backpressure(mut self, backpressure: usize) -> Self {
        self.backpressure = backpressure.max(1);
        self
    }

    /// Evaluates the transactions CSV at `path` and returns matches in input order,
    /// with the rules of each transaction ordered by priority.
    pub async fn run(&self, path: &str) -> anyhow::Result<Vec<RuleMatch>> {
        let (sender, receiver) = mpsc::channel::<Transaction>(self.backpressure);
        let csv_handle = self.spawn_csv_reader(path.to_string(), sender);
        let matches = self.evaluate_transactions(receiver).await;

        if let Err(error) = csv_handle.await {
            error!("CSV ingestion failed: {error}");
        }

        Ok(matches)
    }

    fn spawn_csv_reader(&self, path: String, sender: mpsc::Sender<Transaction>) -> JoinHandle<()> {
        spawn_blocking(move || {
            let file = match File::open(&path) {
                Ok(file) => file,
                Err(error) => {
                    error!("Error opening CSV at path: {path} | {error}");
                    return;
                }
            };

            let mut reader = ReaderBuilder::new()
                .trim(Trim::All)
                .flexible(true)
                .from_reader(BufReader::new(file));

            for result in reader.deserialize::<Transaction>() {
                match result {
                    Ok(transaction) => {
                        if sender.blocking_send(transaction).is_err() {
                            break;
                        }
                    }
                    Err(error) => {
                        error!("CSV deserialization error: {error}");
                    }
                }
            }
        })
    }

    async fn evaluate_transactions(&self, mut receiver: mpsc::Receiver<Transaction>) -> Vec<RuleMatch> {
        //NOTE: The rule set is snapshotted once so every transaction in a run sees the same rules
        let rules = self.storage.enabled_by_priority();
        let mut matches = Vec::new();
        let mut evaluated = 0usize;

        while let Some(transaction) = receiver.recv().await {
            evaluated += 1;

            for rule in &rules {
                if evaluate_rule(rule, &transaction) {
                    debug!("Transaction [{}] matched rule [{}]:[{}]", transaction.transaction_id, rule.id, rule.name);
                    matches.push(RuleMatch::new(&transaction, rule));
                }
            }
        }

        info!("Evaluated {evaluated} transactions against {} rules, {} matches", rules.len(), matches.len());

        matches
    }
}
