#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod model;
pub mod ports;
pub mod processor;
pub mod validation;

pub use error::{ExpenseValidationError, FailureKind, PortError, ProcessingError};
pub use model::{ExpenseRecord, ParticipantBalance, SettlementRecord, ShareRecord};
pub use ports::{ExpenseSource, SettlementStore};
pub use processor::SettlementProcessor;
pub use validation::{validate_expenses, ValidationContext};
