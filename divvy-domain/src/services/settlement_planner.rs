use crate::model::{Balances, Money, Transfer};

/// A participant still owing or still owed money during planning.
struct Outstanding<'a> {
    id: &'a str,
    remaining: Money,
}

/// Settlement planning service.
pub struct SettlementPlanner;

impl SettlementPlanner {
    /// Produce transfers that drive every non-zero balance to exactly zero,
    /// assuming the balances sum to zero.
    ///
    /// Debtors are visited in mapping-insertion order and matched against
    /// creditors starting from the last-inserted one, each pairing settling
    /// `min(debtor.remaining, creditor.remaining)`. The pairing is therefore
    /// order-sensitive: the same balances in a different key order yield a
    /// different (equally valid) plan. This greedy pass keeps the transfer
    /// count small but is not the optimal minimum-cash-flow solution, which
    /// is NP-hard.
    ///
    /// Balances that do not sum to zero are not rejected: the plan settles
    /// what it can and the last debtor or creditor keeps the residual.
    pub fn plan<'a>(&self, balances: &Balances<'a>) -> Vec<Transfer<'a>> {
        let mut debtors: Vec<Outstanding<'a>> = Vec::new();
        let mut creditors: Vec<Outstanding<'a>> = Vec::new();

        for (id, balance) in balances.iter() {
            match balance.signum() {
                s if s < 0 => debtors.push(Outstanding {
                    id,
                    remaining: balance.abs(),
                }),
                s if s > 0 => creditors.push(Outstanding {
                    id,
                    remaining: balance,
                }),
                _ => {}
            }
        }

        let mut transfers = Vec::new();

        for debtor in &mut debtors {
            // Exhausted creditors only ever accumulate at the tail of the
            // working list, so the backward scan reduces to popping it.
            while !debtor.remaining.is_zero() {
                let Some(creditor) = creditors.last_mut() else {
                    break;
                };
                if creditor.remaining.is_zero() {
                    creditors.pop();
                    continue;
                }

                let amount = debtor.remaining.min(creditor.remaining);
                transfers.push(Transfer {
                    from: debtor.id,
                    to: creditor.id,
                    amount,
                });
                debtor.remaining -= amount;
                creditor.remaining -= amount;

                if creditor.remaining.is_zero() {
                    creditors.pop();
                }
            }
        }

        let residual: Money = debtors.iter().map(|d| d.remaining).sum::<Money>()
            + creditors.iter().map(|c| c.remaining).sum::<Money>();
        if residual.is_zero() {
            tracing::debug!(
                transfer_count = transfers.len(),
                "Planned full settlement"
            );
        } else {
            tracing::warn!(
                transfer_count = transfers.len(),
                residual = %residual,
                "Balances did not sum to zero; settlement plan leaves a residual"
            );
        }

        transfers
    }
}
