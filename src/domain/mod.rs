//! Record types for expenses, recurring templates, and salaries.

pub mod category;
pub mod common;
pub mod expense;
pub mod month;
pub mod predefined;
pub mod salary;

pub use category::{Category, EntryType};
pub use common::Identifiable;
pub use expense::{Expense, ExpensePatch, NewExpense};
pub use month::Month;
pub use predefined::{NewPredefinedExpense, PredefinedExpense, PredefinedExpensePatch};
pub use salary::Salary;
