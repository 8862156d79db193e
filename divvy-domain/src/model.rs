use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use indexmap::IndexMap;
use rust_decimal::Decimal;

/// Exact decimal amount of money, currency-agnostic.
///
/// Positive values are amounts owed *to* a participant, negative values
/// amounts owed *by* them. Decimal arithmetic keeps repeated aggregation
/// free of binary-float drift.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// `num / 10^scale`, e.g. `Money::new(2550, 2)` is 25.50.
    pub fn new(num: i64, scale: u32) -> Self {
        Self(Decimal::new(num, scale))
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn min(self, other: Self) -> Self {
        Self(self.0.min(other.0))
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn signum(self) -> i64 {
        if self.0.is_zero() {
            0
        } else if self.0.is_sign_negative() {
            -1
        } else {
            1
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// One participant's share of an expense.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Share<'a> {
    pub participant: &'a str,
    pub amount: Money,
}

/// An immutable expense fact: who paid, how much, and how the cost is split.
///
/// Identifiers are opaque, case-sensitive keys. The engine consumes the paid
/// amount and each share independently and does not check that shares sum to
/// the amount; that invariant belongs to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense<'a> {
    pub payer: &'a str,
    pub amount: Money,
    pub shares: Vec<Share<'a>>,
}

/// A proposed payment: `from` should transfer `amount` to `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transfer<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub amount: Money,
}

/// Net balance per participant, keyed in first-encounter order.
///
/// Insertion order is load-bearing: the settlement planner pairs debtors and
/// creditors by it, so two aggregations over the same expense sequence must
/// produce the same key order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Balances<'a> {
    entries: IndexMap<&'a str, Money>,
}

impl<'a> Balances<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance for `id`, defaulting to zero for unknown participants.
    pub fn get_or_zero(&self, id: &str) -> Money {
        self.entries.get(id).copied().unwrap_or(Money::ZERO)
    }

    pub fn credit(&mut self, id: &'a str, amount: Money) {
        *self.entries.entry(id).or_insert(Money::ZERO) += amount;
    }

    pub fn debit(&mut self, id: &'a str, amount: Money) {
        *self.entries.entry(id).or_insert(Money::ZERO) -= amount;
    }

    /// The same mapping with exact-zero balances filtered out, order preserved.
    pub fn non_zero(&self) -> Balances<'a> {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(_, balance)| !balance.is_zero())
                .map(|(id, balance)| (*id, *balance))
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, Money)> + '_ {
        self.entries.iter().map(|(id, balance)| (*id, *balance))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> Money {
        self.entries.values().sum()
    }
}

impl<'a> FromIterator<(&'a str, Money)> for Balances<'a> {
    fn from_iter<I: IntoIterator<Item = (&'a str, Money)>>(iter: I) -> Self {
        let mut balances = Self::new();
        for (id, amount) in iter {
            balances.credit(id, amount);
        }
        balances
    }
}
