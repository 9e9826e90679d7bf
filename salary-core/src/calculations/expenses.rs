use rust_decimal::Decimal;

use crate::Expense;

/// Handle to one entry added to an [`Expenses`] list.
///
/// Ids are assigned in insertion order and never reused by the same list,
/// so two entries with equal name and value stay distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExpenseId(u64);

/// An ordered list of monthly expenses.
#[derive(Debug, Clone, Default)]
pub struct Expenses {
    entries: Vec<(ExpenseId, Expense)>,
    next_id: u64,
}

impl Expenses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an expense and returns its id.
    pub fn add_expense(
        &mut self,
        expense: Expense,
    ) -> ExpenseId {
        let id = ExpenseId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, expense));
        id
    }

    /// Appends every expense in order, returning their ids.
    pub fn add_expenses(
        &mut self,
        expenses: impl IntoIterator<Item = Expense>,
    ) -> Vec<ExpenseId> {
        expenses
            .into_iter()
            .map(|expense| self.add_expense(expense))
            .collect()
    }

    /// Removes the entry with `id`, returning it if it was present.
    pub fn remove_expense(
        &mut self,
        id: ExpenseId,
    ) -> Option<Expense> {
        let position = self.entries.iter().position(|(entry_id, _)| *entry_id == id)?;
        Some(self.entries.remove(position).1)
    }

    /// Removes every listed entry and returns how many were present.
    pub fn remove_expenses(
        &mut self,
        ids: &[ExpenseId],
    ) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(id, _)| !ids.contains(id));
        before - self.entries.len()
    }

    /// The remaining expenses in insertion order.
    pub fn expenses(&self) -> impl Iterator<Item = &Expense> {
        self.entries.iter().map(|(_, expense)| expense)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all expense values; zero when empty, `None` on overflow.
    pub fn total(&self) -> Option<Decimal> {
        self.expenses()
            .try_fold(Decimal::ZERO, |total, expense| total.checked_add(expense.value))
    }
}

impl FromIterator<Expense> for Expenses {
    fn from_iter<I: IntoIterator<Item = Expense>>(iter: I) -> Self {
        let mut expenses = Self::new();
        expenses.add_expenses(iter);
        expenses
    }
}
