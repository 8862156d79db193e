use divvy_domain::{Expense, Money, Share};

/// One participant's share of a stored expense.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareRecord {
    pub participant: String,
    pub amount: Money,
}

/// An expense as supplied by a collaborator, with owned identifiers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseRecord {
    pub payer: String,
    pub amount: Money,
    pub shares: Vec<ShareRecord>,
}

impl ExpenseRecord {
    /// Borrowed view for the domain engine.
    pub fn as_expense(&self) -> Expense<'_> {
        Expense {
            payer: &self.payer,
            amount: self.amount,
            shares: self
                .shares
                .iter()
                .map(|share| Share {
                    participant: &share.participant,
                    amount: share.amount,
                })
                .collect(),
        }
    }
}

/// A participant's outstanding balance, as reported to collaborators.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParticipantBalance {
    pub id: String,
    pub balance: Money,
}

/// A planned transfer, as handed to the settlement store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettlementRecord {
    pub from: String,
    pub to: String,
    pub amount: Money,
}
