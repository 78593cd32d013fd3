pub mod expense_service;
pub mod predefined_service;
pub mod recurrence_service;
pub mod salary_service;

pub use expense_service::ExpenseService;
pub use predefined_service::PredefinedExpenseService;
pub use recurrence_service::{
    FailureKind, MonthApplication, MonthSummary, RangeApplication, RangeFailure,
    RecurrenceService, TemplateFailure, TemplateSelection, ALREADY_EXISTS, MAX_RANGE_MONTHS,
};
pub use salary_service::SalaryService;
