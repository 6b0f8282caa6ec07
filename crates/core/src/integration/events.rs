//! Domain events raised by independent modules.
//!
//! Each module emits exactly one strongly-typed event into the engine; the
//! synthesis templates in [`super::service`] turn them into balanced ledger
//! entries. Fields carry the effective date so synthesis stays
//! deterministic for identical inputs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fundbook_shared::types::{AssetId, DocumentRef, FundCode, ProjectId, UnitCode};

/// An expense accrual event (goods or services received).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Expense document id.
    pub id: DocumentRef,
    /// What was received.
    pub description: String,
    /// Accrued amount.
    pub amount: Decimal,
    /// Vendor, when known.
    pub vendor: Option<String>,
    /// Fund the expense executes against.
    pub fund: FundCode,
    /// Cost center charged.
    pub cost_center: UnitCode,
    /// Effective date.
    pub date: NaiveDate,
}

/// A Treasury disbursement against a previously accrued payable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisbursementNotice {
    /// Disbursement reference (voucher/EFT number).
    pub reference: DocumentRef,
    /// Who was paid.
    pub payee: String,
    /// Amount paid out.
    pub amount: Decimal,
    /// Fund charged.
    pub fund: FundCode,
    /// Cost center charged.
    pub cost_center: UnitCode,
    /// Payment date.
    pub date: NaiveDate,
}

/// An accountable asset, as carried by the asset module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Asset id.
    pub id: AssetId,
    /// Description.
    pub description: String,
    /// Original acquisition cost.
    pub acquisition_cost: Decimal,
    /// Useful life in years.
    pub useful_life_years: u32,
    /// Depreciation taken to date.
    pub accumulated_depreciation: Decimal,
    /// Fund that acquired the asset.
    pub fund: FundCode,
    /// Cost center accountable for it.
    pub cost_center: UnitCode,
    /// Event effective date.
    pub date: NaiveDate,
}

/// A travel order creating an obligation at estimated cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelOrder {
    /// Travel order number.
    pub id: DocumentRef,
    /// Traveler identity.
    pub traveler: String,
    /// Purpose of travel.
    pub purpose: String,
    /// Estimated cost to obligate.
    pub estimated_cost: Decimal,
    /// Fund obligated.
    pub fund: FundCode,
    /// Cost center charged.
    pub cost_center: UnitCode,
    /// Order date.
    pub date: NaiveDate,
}

/// A travel voucher settling a previously obligated order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelSettlement {
    /// The travel order being settled.
    pub order_id: DocumentRef,
    /// Traveler identity.
    pub traveler: String,
    /// Actual cost claimed.
    pub actual_cost: Decimal,
    /// Amount originally obligated.
    pub obligated_cost: Decimal,
    /// Fund charged.
    pub fund: FundCode,
    /// Cost center charged.
    pub cost_center: UnitCode,
    /// Settlement date.
    pub date: NaiveDate,
}

/// A cost transfer between two cost centers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostTransfer {
    /// Transfer document id.
    pub id: DocumentRef,
    /// Justification.
    pub description: String,
    /// Amount moved.
    pub amount: Decimal,
    /// Cost center giving up the cost.
    pub from_cost_center: UnitCode,
    /// Cost center receiving the cost.
    pub to_cost_center: UnitCode,
    /// Fund both sides execute against.
    pub fund: FundCode,
    /// Effective date.
    pub date: NaiveDate,
}

/// One reported cost category of a contingency operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContingencyCost {
    /// Category label ("Airlift", "Sustainment", …).
    pub category: String,
    /// Reported amount.
    pub amount: Decimal,
}

/// A contingency operation reporting incremental costs for tagging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContingencyOperation {
    /// Operation id.
    pub id: DocumentRef,
    /// Operation name.
    pub name: String,
    /// Fund charged.
    pub fund: FundCode,
    /// Reporting cost center.
    pub cost_center: UnitCode,
    /// Reported cost categories.
    pub costs: Vec<ContingencyCost>,
    /// Reporting date.
    pub date: NaiveDate,
}

/// A reimbursable project order creating an obligation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectOrder {
    /// Order number.
    pub id: DocumentRef,
    /// Project the order executes.
    pub project: ProjectId,
    /// Work description.
    pub description: String,
    /// Ordered amount.
    pub amount: Decimal,
    /// Fund obligated.
    pub fund: FundCode,
    /// Performing cost center.
    pub cost_center: UnitCode,
    /// Order date.
    pub date: NaiveDate,
}

/// Revenue earned and recognizable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueRecognition {
    /// Billing document id.
    pub id: DocumentRef,
    /// Customer billed.
    pub customer: String,
    /// What was delivered.
    pub description: String,
    /// Earned amount.
    pub amount: Decimal,
    /// Fund credited.
    pub fund: FundCode,
    /// Performing cost center.
    pub cost_center: UnitCode,
    /// Recognition date.
    pub date: NaiveDate,
}

/// An outgrant (real property lease) billing event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutgrantBilling {
    /// Billing id.
    pub id: DocumentRef,
    /// Grantee billed.
    pub grantee: String,
    /// Property under outgrant.
    pub property: String,
    /// Billed amount.
    pub amount: Decimal,
    /// Fund credited.
    pub fund: FundCode,
    /// Managing cost center.
    pub cost_center: UnitCode,
    /// Billing date.
    pub date: NaiveDate,
}

/// A purchase request awaiting fund certification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    /// PR number.
    pub id: DocumentRef,
    /// What is being bought.
    pub description: String,
    /// Requested amount.
    pub amount: Decimal,
    /// Fund to certify against.
    pub fund: FundCode,
    /// Requesting cost center.
    pub cost_center: UnitCode,
}

/// An inventory drawdown request to validate against stock on hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryDrawdown {
    /// Item identifier.
    pub item: String,
    /// Quantity on hand.
    pub on_hand: u32,
    /// Quantity requested.
    pub requested: u32,
}

/// An overhead cost pool rate, looked up by function name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverheadPool {
    /// Function the pool covers ("Engineering", "Program Management", …).
    pub function: String,
    /// Rate as a percentage of labor cost.
    pub rate: Decimal,
}
