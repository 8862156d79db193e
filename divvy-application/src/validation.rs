use divvy_domain::{Expense, Money};
use fxhash::FxHashSet;

use crate::error::ExpenseValidationError;

/// Tolerance applied when comparing an expense's share total to its paid
/// amount. The engine itself stays permissive; this check runs at the
/// boundary, before the engine is invoked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidationContext {
    pub tolerance: Money,
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self {
            tolerance: Money::new(1, 6),
        }
    }
}

/// Check an expense snapshot before handing it to the engine.
///
/// Rejects negative amounts, negative shares, and per-expense share totals
/// further than `tolerance` from the paid amount. Duplicate participant
/// entries within one expense are deliberately allowed (their shares add
/// up); they are logged since they are usually a data-entry mistake.
pub fn validate_expenses(
    expenses: &[Expense<'_>],
    context: ValidationContext,
) -> Result<(), ExpenseValidationError> {
    for (index, expense) in expenses.iter().enumerate() {
        if expense.amount.signum() < 0 {
            return Err(ExpenseValidationError::NegativeAmount {
                index,
                amount: expense.amount,
            });
        }

        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut share_total = Money::ZERO;
        for share in &expense.shares {
            if share.amount.signum() < 0 {
                return Err(ExpenseValidationError::NegativeShare {
                    index,
                    participant: share.participant.to_string(),
                    share: share.amount,
                });
            }
            if !seen.insert(share.participant) {
                tracing::warn!(
                    expense_index = index,
                    participant = share.participant,
                    "Duplicate participant entry within one expense; shares are additive"
                );
            }
            share_total += share.amount;
        }

        if (share_total - expense.amount).abs() > context.tolerance {
            return Err(ExpenseValidationError::ShareSumMismatch {
                index,
                amount: expense.amount,
                share_total,
                tolerance: context.tolerance,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use divvy_domain::Share;
    use rstest::rstest;

    fn expense<'a>(payer: &'a str, amount: Money, shares: &[(&'a str, Money)]) -> Expense<'a> {
        Expense {
            payer,
            amount,
            shares: shares
                .iter()
                .map(|&(participant, amount)| Share {
                    participant,
                    amount,
                })
                .collect(),
        }
    }

    #[rstest]
    #[case::balanced(expense("A", Money::from_i64(90), &[
        ("A", Money::from_i64(30)),
        ("B", Money::from_i64(30)),
        ("C", Money::from_i64(30)),
    ]))]
    #[case::at_tolerance_boundary(expense("A", Money::from_i64(100), &[
        ("B", Money::new(33_333_333, 6)),
        ("C", Money::new(33_333_333, 6)),
        ("D", Money::new(33_333_335, 6)),
    ]))]
    #[case::duplicate_participants_allowed(expense("A", Money::from_i64(30), &[
        ("B", Money::from_i64(10)),
        ("B", Money::from_i64(20)),
    ]))]
    #[case::zero_amount(expense("A", Money::ZERO, &[]))]
    fn accepts_well_formed_expenses(#[case] expense: Expense<'static>) {
        let result = validate_expenses(&[expense], ValidationContext::default());
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn rejects_negative_amount() {
        let expenses = [expense("A", Money::from_i64(-10), &[])];

        let result = validate_expenses(&expenses, ValidationContext::default());
        assert_eq!(
            result,
            Err(ExpenseValidationError::NegativeAmount {
                index: 0,
                amount: Money::from_i64(-10),
            })
        );
    }

    #[test]
    fn rejects_negative_share() {
        let expenses = [
            expense("A", Money::from_i64(10), &[("B", Money::from_i64(10))]),
            expense(
                "B",
                Money::from_i64(10),
                &[("A", Money::from_i64(20)), ("C", Money::from_i64(-10))],
            ),
        ];

        let result = validate_expenses(&expenses, ValidationContext::default());
        assert_eq!(
            result,
            Err(ExpenseValidationError::NegativeShare {
                index: 1,
                participant: "C".to_string(),
                share: Money::from_i64(-10),
            })
        );
    }

    #[test]
    fn rejects_share_total_outside_tolerance() {
        let expenses = [expense(
            "A",
            Money::from_i64(100),
            &[("B", Money::from_i64(40))],
        )];

        let result = validate_expenses(&expenses, ValidationContext::default());
        assert_eq!(
            result,
            Err(ExpenseValidationError::ShareSumMismatch {
                index: 0,
                amount: Money::from_i64(100),
                share_total: Money::from_i64(40),
                tolerance: Money::new(1, 6),
            })
        );
    }

    #[rstest]
    #[case::loose(Money::from_i64(100), true)]
    #[case::strict(Money::new(1, 2), false)]
    fn tolerance_is_configurable(#[case] tolerance: Money, #[case] accepted: bool) {
        let expenses = [expense(
            "A",
            Money::from_i64(100),
            &[("B", Money::from_i64(99))],
        )];

        let result = validate_expenses(&expenses, ValidationContext { tolerance });
        assert_eq!(result.is_ok(), accepted);
    }
}
