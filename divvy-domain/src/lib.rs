#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{Balances, Expense, Money, Share, Transfer};
pub use services::{BalanceAggregator, SettlementPlanner};
