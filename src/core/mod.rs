//! Service layer: store contracts, clock, and the business operations built on them.

pub mod services;
pub mod storage;
pub mod time;

pub use storage::{
    ExpenseFilter, ExpenseStore, PredefinedExpenseFilter, PredefinedExpenseStore, SalaryStore,
    Stores,
};
pub use time::{Clock, FixedClock, SystemClock};
