use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PriorityError {
    #[error("Priority error: {0}")]
    InvalidFormat(String),
    #[error("Priority error: {0}")]
    ParseInt(#[from] ParseIntError),
    #[error("Priority error: [{0}] is outside of the range 0..=3")]
    OutOfRange(u8)
}
