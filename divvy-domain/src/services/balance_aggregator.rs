use crate::model::{Balances, Expense};

/// Balance aggregation service.
pub struct BalanceAggregator;

impl BalanceAggregator {
    /// Fold an ordered expense sequence into net balances per participant.
    ///
    /// For each expense, in input order, the payer is credited the full paid
    /// amount and every share participant is debited their share. A payer
    /// who also appears among the shares nets out against their own share.
    /// Keys appear in the order they are first encountered, payer before
    /// shares within an expense.
    ///
    /// Balances are recomputed from the full history on every call; nothing
    /// is cached between invocations.
    pub fn aggregate<'a>(&self, expenses: &[Expense<'a>]) -> Balances<'a> {
        let mut balances = Balances::new();

        for expense in expenses {
            balances.credit(expense.payer, expense.amount);
            for share in &expense.shares {
                balances.debit(share.participant, share.amount);
            }
        }

        tracing::debug!(
            expense_count = expenses.len(),
            participant_count = balances.len(),
            total = %balances.total(),
            "Aggregated expense balances"
        );

        balances
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Money, Share};
    use rstest::{fixture, rstest};

    #[fixture]
    fn aggregator() -> BalanceAggregator {
        BalanceAggregator
    }

    fn expense<'a>(payer: &'a str, amount: i64, shares: &[(&'a str, i64)]) -> Expense<'a> {
        Expense {
            payer,
            amount: Money::from_i64(amount),
            shares: shares
                .iter()
                .map(|&(participant, amount)| Share {
                    participant,
                    amount: Money::from_i64(amount),
                })
                .collect(),
        }
    }

    #[rstest]
    #[case::equal_three_way_split(
        vec![expense("A", 90, &[("A", 30), ("B", 30), ("C", 30)])],
        vec![("A", 60), ("B", -30), ("C", -30)]
    )]
    #[case::two_expenses_netting_to_single_debt(
        vec![
            expense("B", 100, &[("A", 50), ("B", 25), ("C", 25)]),
            expense("A", 50, &[("A", 25), ("C", 25)]),
        ],
        vec![("B", 75), ("A", -25), ("C", -50)]
    )]
    #[case::counter_payment_nets_to_single_pair(
        vec![
            expense("B", 100, &[("A", 50), ("B", 50)]),
            expense("A", 50, &[("A", 25), ("B", 25)]),
        ],
        vec![("A", -25), ("B", 25)]
    )]
    #[case::self_paid_full_share(
        vec![expense("A", 40, &[("A", 40)])],
        vec![("A", 0)]
    )]
    #[case::empty_history(vec![], vec![])]
    fn aggregates_net_balances(
        aggregator: BalanceAggregator,
        #[case] expenses: Vec<Expense<'static>>,
        #[case] expected: Vec<(&str, i64)>,
    ) {
        let balances = aggregator.aggregate(&expenses);

        assert_eq!(balances.len(), expected.len());
        for (id, amount) in expected {
            assert_eq!(balances.get_or_zero(id), Money::from_i64(amount), "{id}");
        }
    }

    #[rstest]
    fn keys_follow_first_encounter_order(aggregator: BalanceAggregator) {
        let expenses = vec![
            expense("C", 30, &[("A", 15), ("B", 15)]),
            expense("A", 10, &[("D", 10)]),
        ];

        let balances = aggregator.aggregate(&expenses);
        let order: Vec<&str> = balances.iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec!["C", "A", "B", "D"]);
    }

    #[rstest]
    fn duplicate_share_entries_are_additive(aggregator: BalanceAggregator) {
        let expenses = vec![expense("A", 30, &[("B", 10), ("B", 20)])];

        let balances = aggregator.aggregate(&expenses);
        assert_eq!(balances.get_or_zero("A"), Money::from_i64(30));
        assert_eq!(balances.get_or_zero("B"), Money::from_i64(-30));
    }

    #[rstest]
    fn fractional_shares_stay_exact(aggregator: BalanceAggregator) {
        let shares = [("A", Money::new(3333, 2)), ("B", Money::new(3333, 2)), ("C", Money::new(3334, 2))];
        let expenses = vec![Expense {
            payer: "A",
            amount: Money::from_i64(100),
            shares: shares
                .iter()
                .map(|&(participant, amount)| Share { participant, amount })
                .collect(),
        }];

        let balances = aggregator.aggregate(&expenses);
        assert_eq!(balances.get_or_zero("A"), Money::new(6667, 2));
        assert_eq!(balances.get_or_zero("B"), Money::new(-3333, 2));
        assert_eq!(balances.get_or_zero("C"), Money::new(-3334, 2));
        assert!(balances.total().is_zero());
    }

    #[rstest]
    fn imbalanced_shares_propagate_without_rejection(aggregator: BalanceAggregator) {
        // Shares that do not sum to the amount are the caller's problem;
        // the aggregator reports the resulting drift as-is.
        let expenses = vec![expense("A", 100, &[("B", 40)])];

        let balances = aggregator.aggregate(&expenses);
        assert_eq!(balances.total(), Money::from_i64(60));
    }
}
