//! The integration orchestrator.
//!
//! Stateless synthesis layer: one function per recognized business event.
//! Every posting template hard-codes its offsetting account pair, so the
//! produced entry balances by construction. Posting functions push the
//! entry into the ledger store and return it - callers must not post it
//! again. Advisory functions return a decision or a derived number and
//! write nothing.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use fundbook_shared::types::{DocumentRef, TransactionId};

use crate::fund::FundControlNode;
use crate::ledger::{
    AccountCode, AuditEvent, LedgerStore, SourceModule, Transaction, TransactionKind,
    TransactionLine, TransactionStatus,
};

use super::error::IntegrationError;
use super::events::{
    AssetRecord, ContingencyOperation, CostTransfer, DisbursementNotice, Expense,
    InventoryDrawdown, OutgrantBilling, OverheadPool, ProjectOrder, PurchaseRequest,
    RevenueRecognition, TravelOrder, TravelSettlement,
};

/// Outcome of pre-award fund certification of a purchase request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundCertification {
    /// Whether funds were certified as available.
    pub certified: bool,
    /// Human-readable basis for the decision.
    pub reason: String,
}

/// A fully described entry ready for posting.
struct Template<'a> {
    prefix: &'static str,
    kind: TransactionKind,
    source: SourceModule,
    document: DocumentRef,
    date: NaiveDate,
    description: String,
    actor: &'a str,
    lines: Vec<TransactionLine>,
}

/// Stateless synthesis service.
///
/// Owns no state; reads from and writes into the stores passed per call
/// and holds no reference longer than that call.
pub struct IntegrationService;

impl IntegrationService {
    /// Synthesizes an expense accrual.
    ///
    /// Template: debit Operating Expense / credit Accounts Payable.
    ///
    /// # Errors
    ///
    /// `MalformedEvent` for an empty id or non-positive amount; ledger
    /// errors if the store refuses the entry.
    pub fn accrue_expense(
        ledger: &LedgerStore,
        expense: &Expense,
        actor: &str,
    ) -> Result<Arc<Transaction>, IntegrationError> {
        require(!expense.id.is_empty(), "expense id is empty")?;
        require_positive(expense.amount, "expense amount must be positive")?;

        Self::post(
            ledger,
            Template {
                prefix: "ACR",
                kind: TransactionKind::Accrual,
                source: SourceModule::Acquisition,
                document: expense.id.clone(),
                date: expense.date,
                description: format!("Expense accrual: {}", expense.description),
                actor,
                lines: vec![
                    TransactionLine::debit(
                        AccountCode::OperatingExpense,
                        expense.amount,
                        expense.fund.clone(),
                        expense.cost_center.clone(),
                        Some(expense.description.clone()),
                    ),
                    TransactionLine::credit(
                        AccountCode::AccountsPayable,
                        expense.amount,
                        expense.fund.clone(),
                        expense.cost_center.clone(),
                        expense.vendor.clone(),
                    ),
                ],
            },
        )
    }

    /// Synthesizes a disbursement against a previously accrued payable.
    ///
    /// Template: debit Accounts Payable / credit Fund Balance With Treasury.
    ///
    /// # Errors
    ///
    /// `MalformedEvent` or ledger errors as for [`Self::accrue_expense`].
    pub fn record_disbursement(
        ledger: &LedgerStore,
        notice: &DisbursementNotice,
        actor: &str,
    ) -> Result<Arc<Transaction>, IntegrationError> {
        require(!notice.reference.is_empty(), "disbursement reference is empty")?;
        require_positive(notice.amount, "disbursement amount must be positive")?;

        Self::post(
            ledger,
            Template {
                prefix: "DSB",
                kind: TransactionKind::Disbursement,
                source: SourceModule::Acquisition,
                document: notice.reference.clone(),
                date: notice.date,
                description: format!("Disbursement to {}", notice.payee),
                actor,
                lines: vec![
                    TransactionLine::debit(
                        AccountCode::AccountsPayable,
                        notice.amount,
                        notice.fund.clone(),
                        notice.cost_center.clone(),
                        Some(format!("Payment to {}", notice.payee)),
                    ),
                    TransactionLine::credit(
                        AccountCode::FundBalanceWithTreasury,
                        notice.amount,
                        notice.fund.clone(),
                        notice.cost_center.clone(),
                        None,
                    ),
                ],
            },
        )
    }

    /// Synthesizes one quarter of straight-line depreciation.
    ///
    /// Quarterly amount is `(acquisition_cost / useful_life) / 4`, rounded
    /// to cents. Template: debit Depreciation Expense / credit Accumulated
    /// Depreciation.
    ///
    /// # Errors
    ///
    /// `MalformedEvent` for a zero useful life or non-positive cost.
    pub fn record_depreciation(
        ledger: &LedgerStore,
        asset: &AssetRecord,
        actor: &str,
    ) -> Result<Arc<Transaction>, IntegrationError> {
        require(asset.useful_life_years > 0, "asset useful life is zero")?;
        require_positive(asset.acquisition_cost, "asset cost must be positive")?;

        let quarterly = (asset.acquisition_cost / Decimal::from(asset.useful_life_years)
            / Decimal::from(4u32))
        .round_dp(2);

        Self::post(
            ledger,
            Template {
                prefix: "DEP",
                kind: TransactionKind::Accrual,
                source: SourceModule::Assets,
                document: DocumentRef::new(asset.id.as_str()),
                date: asset.date,
                description: format!("Quarterly depreciation: {}", asset.description),
                actor,
                lines: vec![
                    TransactionLine::debit(
                        AccountCode::DepreciationExpense,
                        quarterly,
                        asset.fund.clone(),
                        asset.cost_center.clone(),
                        Some(asset.description.clone()),
                    ),
                    TransactionLine::credit(
                        AccountCode::AccumulatedDepreciation,
                        quarterly,
                        asset.fund.clone(),
                        asset.cost_center.clone(),
                        None,
                    ),
                ],
            },
        )
    }

    /// Synthesizes a travel obligation at estimated cost.
    ///
    /// Template: debit Travel Expense / credit Obligations Outstanding.
    ///
    /// # Errors
    ///
    /// `MalformedEvent` for an empty order id or non-positive estimate.
    pub fn obligate_travel(
        ledger: &LedgerStore,
        order: &TravelOrder,
        actor: &str,
    ) -> Result<Arc<Transaction>, IntegrationError> {
        require(!order.id.is_empty(), "travel order id is empty")?;
        require_positive(order.estimated_cost, "travel estimate must be positive")?;

        Self::post(
            ledger,
            Template {
                prefix: "TRV",
                kind: TransactionKind::Obligation,
                source: SourceModule::Travel,
                document: order.id.clone(),
                date: order.date,
                description: format!("Travel obligation for {}: {}", order.traveler, order.purpose),
                actor,
                lines: vec![
                    TransactionLine::debit(
                        AccountCode::TravelExpense,
                        order.estimated_cost,
                        order.fund.clone(),
                        order.cost_center.clone(),
                        Some(order.purpose.clone()),
                    ),
                    TransactionLine::credit(
                        AccountCode::ObligationsOutstanding,
                        order.estimated_cost,
                        order.fund.clone(),
                        order.cost_center.clone(),
                        None,
                    ),
                ],
            },
        )
    }

    /// Synthesizes a travel settlement, liquidating the obligation and
    /// truing up the expense when actuals differ from the estimate.
    ///
    /// Template: debit Obligations Outstanding (obligated amount) / credit
    /// Fund Balance With Treasury (actual amount), with a Travel Expense
    /// line absorbing any difference.
    ///
    /// # Errors
    ///
    /// `MalformedEvent` for non-positive amounts.
    pub fn settle_travel(
        ledger: &LedgerStore,
        settlement: &TravelSettlement,
        actor: &str,
    ) -> Result<Arc<Transaction>, IntegrationError> {
        require(!settlement.order_id.is_empty(), "travel order id is empty")?;
        require_positive(settlement.actual_cost, "actual cost must be positive")?;
        require_positive(settlement.obligated_cost, "obligated cost must be positive")?;

        let mut lines = vec![TransactionLine::debit(
            AccountCode::ObligationsOutstanding,
            settlement.obligated_cost,
            settlement.fund.clone(),
            settlement.cost_center.clone(),
            Some("Liquidate obligation".to_string()),
        )];
        if settlement.actual_cost > settlement.obligated_cost {
            lines.push(TransactionLine::debit(
                AccountCode::TravelExpense,
                settlement.actual_cost - settlement.obligated_cost,
                settlement.fund.clone(),
                settlement.cost_center.clone(),
                Some("Cost over obligation".to_string()),
            ));
        } else if settlement.actual_cost < settlement.obligated_cost {
            lines.push(TransactionLine::credit(
                AccountCode::TravelExpense,
                settlement.obligated_cost - settlement.actual_cost,
                settlement.fund.clone(),
                settlement.cost_center.clone(),
                Some("Cost under obligation".to_string()),
            ));
        }
        lines.push(TransactionLine::credit(
            AccountCode::FundBalanceWithTreasury,
            settlement.actual_cost,
            settlement.fund.clone(),
            settlement.cost_center.clone(),
            Some(format!("Payment to {}", settlement.traveler)),
        ));

        Self::post(
            ledger,
            Template {
                prefix: "TRS",
                kind: TransactionKind::Disbursement,
                source: SourceModule::Travel,
                document: settlement.order_id.clone(),
                date: settlement.date,
                description: format!("Travel settlement for {}", settlement.traveler),
                actor,
                lines,
            },
        )
    }

    /// Synthesizes a cost transfer between two cost centers.
    ///
    /// Template: debit Operating Expense at the receiving cost center /
    /// credit Operating Expense at the giving cost center.
    ///
    /// # Errors
    ///
    /// `MalformedEvent` when both endpoints name the same cost center or
    /// the amount is non-positive.
    pub fn transfer_costs(
        ledger: &LedgerStore,
        transfer: &CostTransfer,
        actor: &str,
    ) -> Result<Arc<Transaction>, IntegrationError> {
        require(!transfer.id.is_empty(), "cost transfer id is empty")?;
        require(
            transfer.from_cost_center != transfer.to_cost_center,
            "cost transfer endpoints must differ",
        )?;
        require_positive(transfer.amount, "cost transfer amount must be positive")?;

        Self::post(
            ledger,
            Template {
                prefix: "CTR",
                kind: TransactionKind::Transfer,
                source: SourceModule::CostTransfer,
                document: transfer.id.clone(),
                date: transfer.date,
                description: format!("Cost transfer: {}", transfer.description),
                actor,
                lines: vec![
                    TransactionLine::debit(
                        AccountCode::OperatingExpense,
                        transfer.amount,
                        transfer.fund.clone(),
                        transfer.to_cost_center.clone(),
                        Some(format!("Cost in from {}", transfer.from_cost_center)),
                    ),
                    TransactionLine::credit(
                        AccountCode::OperatingExpense,
                        transfer.amount,
                        transfer.fund.clone(),
                        transfer.from_cost_center.clone(),
                        Some(format!("Cost out to {}", transfer.to_cost_center)),
                    ),
                ],
            },
        )
    }

    /// Synthesizes a contingency cost-tagging entry: one debit line per
    /// reported cost category, offset to Contingency Cost Clearing.
    ///
    /// # Errors
    ///
    /// `MalformedEvent` when no costs are reported or any category amount
    /// is non-positive.
    pub fn tag_contingency_costs(
        ledger: &LedgerStore,
        operation: &ContingencyOperation,
        actor: &str,
    ) -> Result<Arc<Transaction>, IntegrationError> {
        require(!operation.id.is_empty(), "contingency operation id is empty")?;
        require(!operation.costs.is_empty(), "contingency operation reports no costs")?;
        for cost in &operation.costs {
            require_positive(cost.amount, "contingency cost must be positive")?;
        }

        let total: Decimal = operation.costs.iter().map(|cost| cost.amount).sum();
        let mut lines: Vec<TransactionLine> = operation
            .costs
            .iter()
            .map(|cost| {
                TransactionLine::debit(
                    AccountCode::OperatingExpense,
                    cost.amount,
                    operation.fund.clone(),
                    operation.cost_center.clone(),
                    Some(cost.category.clone()),
                )
            })
            .collect();
        lines.push(TransactionLine::credit(
            AccountCode::ContingencyClearing,
            total,
            operation.fund.clone(),
            operation.cost_center.clone(),
            Some(operation.name.clone()),
        ));

        Self::post(
            ledger,
            Template {
                prefix: "CTG",
                kind: TransactionKind::ContingencyTag,
                source: SourceModule::Contingency,
                document: operation.id.clone(),
                date: operation.date,
                description: format!("Contingency cost tagging: {}", operation.name),
                actor,
                lines,
            },
        )
    }

    /// Synthesizes a project-order obligation.
    ///
    /// Template: debit Project Expense / credit Obligations Outstanding.
    ///
    /// # Errors
    ///
    /// `MalformedEvent` for an empty order id or non-positive amount.
    pub fn obligate_project_order(
        ledger: &LedgerStore,
        order: &ProjectOrder,
        actor: &str,
    ) -> Result<Arc<Transaction>, IntegrationError> {
        require(!order.id.is_empty(), "project order id is empty")?;
        require_positive(order.amount, "project order amount must be positive")?;

        Self::post(
            ledger,
            Template {
                prefix: "POB",
                kind: TransactionKind::Obligation,
                source: SourceModule::ProjectOrders,
                document: order.id.clone(),
                date: order.date,
                description: format!("Project order obligation: {}", order.description),
                actor,
                lines: vec![
                    TransactionLine::debit(
                        AccountCode::ProjectExpense,
                        order.amount,
                        order.fund.clone(),
                        order.cost_center.clone(),
                        Some(format!("Project {}", order.project)),
                    ),
                    TransactionLine::credit(
                        AccountCode::ObligationsOutstanding,
                        order.amount,
                        order.fund.clone(),
                        order.cost_center.clone(),
                        None,
                    ),
                ],
            },
        )
    }

    /// Synthesizes a revenue recognition entry.
    ///
    /// Template: debit Accounts Receivable / credit Earned Revenue.
    ///
    /// # Errors
    ///
    /// `MalformedEvent` for an empty id or non-positive amount.
    pub fn recognize_revenue(
        ledger: &LedgerStore,
        revenue: &RevenueRecognition,
        actor: &str,
    ) -> Result<Arc<Transaction>, IntegrationError> {
        require(!revenue.id.is_empty(), "revenue document id is empty")?;
        require_positive(revenue.amount, "revenue amount must be positive")?;

        Self::post(
            ledger,
            Template {
                prefix: "REV",
                kind: TransactionKind::Revenue,
                source: SourceModule::Revenue,
                document: revenue.id.clone(),
                date: revenue.date,
                description: format!("Revenue earned from {}", revenue.customer),
                actor,
                lines: vec![
                    TransactionLine::debit(
                        AccountCode::AccountsReceivable,
                        revenue.amount,
                        revenue.fund.clone(),
                        revenue.cost_center.clone(),
                        Some(revenue.customer.clone()),
                    ),
                    TransactionLine::credit(
                        AccountCode::EarnedRevenue,
                        revenue.amount,
                        revenue.fund.clone(),
                        revenue.cost_center.clone(),
                        Some(revenue.description.clone()),
                    ),
                ],
            },
        )
    }

    /// Synthesizes an outgrant billing entry.
    ///
    /// Template: debit Accounts Receivable / credit Rental Revenue.
    ///
    /// # Errors
    ///
    /// `MalformedEvent` for an empty id or non-positive amount.
    pub fn bill_outgrant(
        ledger: &LedgerStore,
        billing: &OutgrantBilling,
        actor: &str,
    ) -> Result<Arc<Transaction>, IntegrationError> {
        require(!billing.id.is_empty(), "outgrant billing id is empty")?;
        require_positive(billing.amount, "outgrant amount must be positive")?;

        Self::post(
            ledger,
            Template {
                prefix: "OGB",
                kind: TransactionKind::Revenue,
                source: SourceModule::Outgrants,
                document: billing.id.clone(),
                date: billing.date,
                description: format!("Outgrant billing: {} to {}", billing.property, billing.grantee),
                actor,
                lines: vec![
                    TransactionLine::debit(
                        AccountCode::AccountsReceivable,
                        billing.amount,
                        billing.fund.clone(),
                        billing.cost_center.clone(),
                        Some(billing.grantee.clone()),
                    ),
                    TransactionLine::credit(
                        AccountCode::RentalRevenue,
                        billing.amount,
                        billing.fund.clone(),
                        billing.cost_center.clone(),
                        Some(billing.property.clone()),
                    ),
                ],
            },
        )
    }

    /// Synthesizes an asset capitalization entry.
    ///
    /// Template: debit General PP&E / credit Invested Capital.
    ///
    /// # Errors
    ///
    /// `MalformedEvent` for a non-positive acquisition cost.
    pub fn capitalize_asset(
        ledger: &LedgerStore,
        asset: &AssetRecord,
        actor: &str,
    ) -> Result<Arc<Transaction>, IntegrationError> {
        require(!asset.id.is_empty(), "asset id is empty")?;
        require_positive(asset.acquisition_cost, "asset cost must be positive")?;

        Self::post(
            ledger,
            Template {
                prefix: "CAP",
                kind: TransactionKind::Capitalization,
                source: SourceModule::Assets,
                document: DocumentRef::new(asset.id.as_str()),
                date: asset.date,
                description: format!("Asset capitalization: {}", asset.description),
                actor,
                lines: vec![
                    TransactionLine::debit(
                        AccountCode::GeneralPpe,
                        asset.acquisition_cost,
                        asset.fund.clone(),
                        asset.cost_center.clone(),
                        Some(asset.description.clone()),
                    ),
                    TransactionLine::credit(
                        AccountCode::InvestedCapital,
                        asset.acquisition_cost,
                        asset.fund.clone(),
                        asset.cost_center.clone(),
                        None,
                    ),
                ],
            },
        )
    }

    /// Synthesizes an asset disposal entry, writing off accumulated
    /// depreciation and the remaining net book value.
    ///
    /// Template: debit Accumulated Depreciation (taken to date) and
    /// Invested Capital (net book value) / credit General PP&E (cost).
    ///
    /// # Errors
    ///
    /// `MalformedEvent` when depreciation exceeds cost or cost is
    /// non-positive.
    pub fn dispose_asset(
        ledger: &LedgerStore,
        asset: &AssetRecord,
        actor: &str,
    ) -> Result<Arc<Transaction>, IntegrationError> {
        require(!asset.id.is_empty(), "asset id is empty")?;
        require_positive(asset.acquisition_cost, "asset cost must be positive")?;
        require(
            asset.accumulated_depreciation <= asset.acquisition_cost,
            "accumulated depreciation exceeds cost",
        )?;
        require(
            asset.accumulated_depreciation >= Decimal::ZERO,
            "accumulated depreciation is negative",
        )?;

        let net_book_value = asset.acquisition_cost - asset.accumulated_depreciation;
        let mut lines = Vec::with_capacity(3);
        if asset.accumulated_depreciation > Decimal::ZERO {
            lines.push(TransactionLine::debit(
                AccountCode::AccumulatedDepreciation,
                asset.accumulated_depreciation,
                asset.fund.clone(),
                asset.cost_center.clone(),
                Some("Write off depreciation taken".to_string()),
            ));
        }
        if net_book_value > Decimal::ZERO {
            lines.push(TransactionLine::debit(
                AccountCode::InvestedCapital,
                net_book_value,
                asset.fund.clone(),
                asset.cost_center.clone(),
                Some("Write off net book value".to_string()),
            ));
        }
        lines.push(TransactionLine::credit(
            AccountCode::GeneralPpe,
            asset.acquisition_cost,
            asset.fund.clone(),
            asset.cost_center.clone(),
            Some(asset.description.clone()),
        ));

        Self::post(
            ledger,
            Template {
                prefix: "DSP",
                kind: TransactionKind::Disposal,
                source: SourceModule::Assets,
                document: DocumentRef::new(asset.id.as_str()),
                date: asset.date,
                description: format!("Asset disposal: {}", asset.description),
                actor,
                lines,
            },
        )
    }

    /// Certifies whether a purchase request fits within the requesting
    /// unit's available authority. Advisory: touches no store.
    ///
    /// # Errors
    ///
    /// `MalformedEvent` for a non-positive requested amount.
    pub fn certify_purchase_request(
        request: &PurchaseRequest,
        hierarchy: &FundControlNode,
    ) -> Result<FundCertification, IntegrationError> {
        require(!request.id.is_empty(), "purchase request id is empty")?;
        require_positive(request.amount, "purchase request amount must be positive")?;

        let Some(node) = hierarchy.find(&request.cost_center) else {
            return Ok(FundCertification {
                certified: false,
                reason: format!("No fund control node for unit {}", request.cost_center),
            });
        };

        let available = node.available();
        if request.amount <= available {
            Ok(FundCertification {
                certified: true,
                reason: format!("Funds available: {available} at {}", node.name),
            })
        } else {
            Ok(FundCertification {
                certified: false,
                reason: format!(
                    "Insufficient authority at {}: requested {}, available {available}",
                    node.name, request.amount
                ),
            })
        }
    }

    /// Validates an inventory drawdown against stock on hand. Advisory.
    ///
    /// # Errors
    ///
    /// `MalformedEvent` for a zero request; `InsufficientStock` when the
    /// request exceeds what is on hand.
    pub fn validate_inventory_drawdown(
        drawdown: &InventoryDrawdown,
    ) -> Result<(), IntegrationError> {
        require(drawdown.requested > 0, "drawdown quantity is zero")?;
        if drawdown.requested > drawdown.on_hand {
            return Err(IntegrationError::InsufficientStock {
                item: drawdown.item.clone(),
                on_hand: drawdown.on_hand,
                requested: drawdown.requested,
            });
        }
        Ok(())
    }

    /// Computes the overhead allocation for a labor cost:
    /// `labor_cost * (pool_rate / 100)`, rounded to cents.
    ///
    /// An unknown cost pool contributes nothing: the lookup falls back to
    /// zero rather than failing, so functions without an overhead pool
    /// simply carry no burden.
    #[must_use]
    pub fn overhead_allocation(
        labor_cost: Decimal,
        function: &str,
        pools: &[OverheadPool],
    ) -> Decimal {
        pools
            .iter()
            .find(|pool| pool.function == function)
            .map(|pool| (labor_cost * pool.rate / Decimal::ONE_HUNDRED).round_dp(2))
            .unwrap_or(Decimal::ZERO)
    }

    /// Builds the transaction from a template and posts it.
    fn post(
        ledger: &LedgerStore,
        template: Template<'_>,
    ) -> Result<Arc<Transaction>, IntegrationError> {
        let total_amount = template.lines.iter().map(|line| line.debit).sum();
        let transaction = Transaction {
            id: TransactionId::generated(template.prefix),
            date: template.date,
            description: template.description,
            kind: template.kind,
            source: template.source,
            document: template.document,
            total_amount,
            status: TransactionStatus::Posted,
            created_by: template.actor.to_string(),
            lines: template.lines,
            audit: vec![AuditEvent::now(template.actor, "synthesized")],
        };
        Ok(ledger.add_transaction(transaction)?)
    }
}

fn require(condition: bool, message: &'static str) -> Result<(), IntegrationError> {
    if condition {
        Ok(())
    } else {
        Err(IntegrationError::MalformedEvent(message))
    }
}

fn require_positive(amount: Decimal, message: &'static str) -> Result<(), IntegrationError> {
    require(amount > Decimal::ZERO, message)
}
