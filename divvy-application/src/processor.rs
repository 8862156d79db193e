use divvy_domain::{BalanceAggregator, Expense, SettlementPlanner};

use crate::{
    error::ProcessingError,
    model::{ExpenseRecord, ParticipantBalance, SettlementRecord},
    ports::{ExpenseSource, SettlementStore},
    validation::{validate_expenses, ValidationContext},
};

/// Composes the engine with its collaborators: read a group's expense
/// snapshot, validate it, aggregate balances, plan transfers, and replace
/// the stored settlement set.
pub struct SettlementProcessor<'a> {
    source: &'a dyn ExpenseSource,
    store: &'a dyn SettlementStore,
    validation: Option<ValidationContext>,
}

impl<'a> SettlementProcessor<'a> {
    pub fn new(source: &'a dyn ExpenseSource, store: &'a dyn SettlementStore) -> Self {
        Self {
            source,
            store,
            validation: Some(ValidationContext::default()),
        }
    }

    /// Skip boundary validation and feed snapshots to the engine as-is.
    /// Imbalanced histories then settle partially instead of failing.
    pub fn permissive(source: &'a dyn ExpenseSource, store: &'a dyn SettlementStore) -> Self {
        Self {
            source,
            store,
            validation: None,
        }
    }

    pub fn with_validation(mut self, context: ValidationContext) -> Self {
        self.validation = Some(context);
        self
    }

    fn load_group(&self, group_id: &str) -> Result<Vec<ExpenseRecord>, ProcessingError> {
        self.source
            .expenses_for_group(group_id)
            .map_err(ProcessingError::Source)
    }

    fn checked_views<'r>(
        &self,
        records: &'r [ExpenseRecord],
    ) -> Result<Vec<Expense<'r>>, ProcessingError> {
        let expenses: Vec<Expense<'r>> = records.iter().map(ExpenseRecord::as_expense).collect();
        if let Some(context) = self.validation {
            validate_expenses(&expenses, context)?;
        }
        Ok(expenses)
    }

    /// Outstanding (non-zero) balances for a group.
    pub fn outstanding_balances(
        &self,
        group_id: &str,
    ) -> Result<Vec<ParticipantBalance>, ProcessingError> {
        let records = self.load_group(group_id)?;
        let expenses = self.checked_views(&records)?;
        let balances = BalanceAggregator.aggregate(&expenses);

        Ok(balances
            .non_zero()
            .iter()
            .map(|(id, balance)| ParticipantBalance {
                id: id.to_string(),
                balance,
            })
            .collect())
    }

    /// Settlement plan for a group's current expense snapshot.
    pub fn settlement_plan(&self, group_id: &str) -> Result<Vec<SettlementRecord>, ProcessingError> {
        let records = self.load_group(group_id)?;
        let expenses = self.checked_views(&records)?;
        Ok(plan_records(&expenses))
    }

    /// Recompute a group's settlements and replace the stored set.
    ///
    /// The read-compute-replace sequence is not transactional; callers must
    /// ensure two refreshes of the same group do not interleave, or the
    /// later write wins.
    pub fn refresh_group(&self, group_id: &str) -> Result<Vec<SettlementRecord>, ProcessingError> {
        let plan = self.settlement_plan(group_id)?;
        self.store
            .replace_settlements(group_id, &plan)
            .map_err(ProcessingError::Store)?;

        tracing::info!(
            group_id,
            transfer_count = plan.len(),
            "Replaced stored settlements for group"
        );
        Ok(plan)
    }
}

fn plan_records(expenses: &[Expense<'_>]) -> Vec<SettlementRecord> {
    let balances = BalanceAggregator.aggregate(expenses);
    SettlementPlanner
        .plan(&balances)
        .into_iter()
        .map(|transfer| SettlementRecord {
            from: transfer.from.to_string(),
            to: transfer.to.to_string(),
            amount: transfer.amount,
        })
        .collect()
}
