use std::collections::BTreeMap;

use rust_decimal::Decimal;

/// A registered profile: credentials plus per-category income and expense
/// ledgers. The balance is computed on demand, never stored.
#[derive(Debug, Clone)]
pub struct Account {
    username: String,
    /// Kept in clear text; real credential handling is out of scope.
    password: String,
    income: BTreeMap<String, Decimal>,
    expenses: BTreeMap<String, Decimal>,
}

impl Account {
    pub(crate) fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            income: BTreeMap::new(),
            expenses: BTreeMap::new(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }

    /// Adds to the category's running total, creating it at zero if absent.
    pub(crate) fn record_income(&mut self, amount: Decimal, category: &str) {
        *self.income.entry(category.to_owned()).or_insert(Decimal::ZERO) += amount;
    }

    pub(crate) fn record_expense(&mut self, amount: Decimal, category: &str) {
        *self.expenses.entry(category.to_owned()).or_insert(Decimal::ZERO) += amount;
    }

    /// Total income minus total expenses.
    pub fn balance(&self) -> Decimal {
        self.income.values().sum::<Decimal>() - self.expenses.values().sum::<Decimal>()
    }

    pub fn income(&self) -> &BTreeMap<String, Decimal> {
        &self.income
    }

    pub fn expenses(&self) -> &BTreeMap<String, Decimal> {
        &self.expenses
    }
}
