use crate::{
    error::PortError,
    model::{ExpenseRecord, SettlementRecord},
};

/// Supplies the full expense history for a group, in recorded order.
///
/// The order matters: balances key order, and through it the settlement
/// plan, follow the order expenses are supplied in.
pub trait ExpenseSource: Send + Sync {
    fn expenses_for_group(&self, group_id: &str) -> Result<Vec<ExpenseRecord>, PortError>;
}

/// Persists settlement plans for a group.
///
/// `replace_settlements` must replace the group's stored set wholesale
/// (delete all, then insert), never merge with a previous plan.
pub trait SettlementStore: Send + Sync {
    fn replace_settlements(
        &self,
        group_id: &str,
        settlements: &[SettlementRecord],
    ) -> Result<(), PortError>;
}
