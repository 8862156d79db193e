pub mod balance_aggregator;
pub mod settlement_planner;

pub use balance_aggregator::BalanceAggregator;
pub use settlement_planner::SettlementPlanner;
