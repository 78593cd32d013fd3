use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed set of spending categories shared by expenses and predefined expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Bills,
    Entertainment,
    Healthcare,
    Education,
    Rent,
    Loan,
    #[serde(rename = "RD")]
    Rd,
    #[serde(rename = "Emi -Arya")]
    EmiArya,
    #[serde(rename = "Emi -Amma")]
    EmiAmma,
    Other,
}

impl Category {
    pub const ALL: [Category; 13] = [
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Bills,
        Category::Entertainment,
        Category::Healthcare,
        Category::Education,
        Category::Rent,
        Category::Loan,
        Category::Rd,
        Category::EmiArya,
        Category::EmiAmma,
        Category::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Shopping => "Shopping",
            Category::Bills => "Bills",
            Category::Entertainment => "Entertainment",
            Category::Healthcare => "Healthcare",
            Category::Education => "Education",
            Category::Rent => "Rent",
            Category::Loan => "Loan",
            Category::Rd => "RD",
            Category::EmiArya => "Emi -Arya",
            Category::EmiAmma => "Emi -Amma",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Direction of money movement for a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    #[default]
    Expense,
    Income,
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntryType::Expense => "expense",
            EntryType::Income => "income",
        };
        f.write_str(label)
    }
}
