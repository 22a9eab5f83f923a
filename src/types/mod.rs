mod errors;
mod priority;

pub use errors::PriorityError;
pub use priority::Priority;

pub type RuleId = String;
pub type TransactionId = String;
