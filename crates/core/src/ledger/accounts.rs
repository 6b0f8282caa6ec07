//! The fixed chart of accounts.
//!
//! Every ledger line posts to one of these accounts. Keeping the chart as a
//! closed enum is what lets each synthesis template hard-code its offsetting
//! pair: balance is structural, not checked after the fact.

use serde::{Deserialize, Serialize};

/// An account in the fixed chart of accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountCode {
    /// 1010 - Fund Balance With Treasury.
    FundBalanceWithTreasury,
    /// 1310 - Accounts Receivable.
    AccountsReceivable,
    /// 1750 - General Property, Plant & Equipment.
    GeneralPpe,
    /// 1759 - Accumulated Depreciation.
    AccumulatedDepreciation,
    /// 2110 - Accounts Payable.
    AccountsPayable,
    /// 3220 - Invested Capital.
    InvestedCapital,
    /// 4801 - Obligations Outstanding (undelivered orders).
    ObligationsOutstanding,
    /// 5100 - Earned Revenue.
    EarnedRevenue,
    /// 5200 - Rental Revenue (outgrants).
    RentalRevenue,
    /// 6100 - Operating Expense.
    OperatingExpense,
    /// 6120 - Travel Expense.
    TravelExpense,
    /// 6140 - Project Expense.
    ProjectExpense,
    /// 6710 - Depreciation Expense.
    DepreciationExpense,
    /// 6999 - Contingency Cost Clearing.
    ContingencyClearing,
}

impl AccountCode {
    /// Returns the numeric account code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::FundBalanceWithTreasury => "1010",
            Self::AccountsReceivable => "1310",
            Self::GeneralPpe => "1750",
            Self::AccumulatedDepreciation => "1759",
            Self::AccountsPayable => "2110",
            Self::InvestedCapital => "3220",
            Self::ObligationsOutstanding => "4801",
            Self::EarnedRevenue => "5100",
            Self::RentalRevenue => "5200",
            Self::OperatingExpense => "6100",
            Self::TravelExpense => "6120",
            Self::ProjectExpense => "6140",
            Self::DepreciationExpense => "6710",
            Self::ContingencyClearing => "6999",
        }
    }

    /// Returns the account's display name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::FundBalanceWithTreasury => "Fund Balance With Treasury",
            Self::AccountsReceivable => "Accounts Receivable",
            Self::GeneralPpe => "General Property, Plant & Equipment",
            Self::AccumulatedDepreciation => "Accumulated Depreciation",
            Self::AccountsPayable => "Accounts Payable",
            Self::InvestedCapital => "Invested Capital",
            Self::ObligationsOutstanding => "Obligations Outstanding",
            Self::EarnedRevenue => "Earned Revenue",
            Self::RentalRevenue => "Rental Revenue",
            Self::OperatingExpense => "Operating Expense",
            Self::TravelExpense => "Travel Expense",
            Self::ProjectExpense => "Project Expense",
            Self::DepreciationExpense => "Depreciation Expense",
            Self::ContingencyClearing => "Contingency Cost Clearing",
        }
    }

    /// Returns true for expense accounts (6xxx series).
    #[must_use]
    pub fn is_expense(&self) -> bool {
        self.code().starts_with('6')
    }
}

impl std::fmt::Display for AccountCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.code(), self.name())
    }
}
