//! End-to-end flow across the stores, orchestrator, validator, and
//! projector: the path a real posting takes through the engine.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use fundbook_core::ada;
use fundbook_core::context::FinanceContext;
use fundbook_core::fund::{FundControlNode, TransferAction};
use fundbook_core::integration::{Expense, IntegrationService, PurchaseRequest};
use fundbook_core::ledger::{
    AccountCode, SourceModule, Transaction, TransactionKind, TransactionLine, TransactionStatus,
};
use fundbook_core::trace::{ProjectRecord, TraceabilityService};
use fundbook_shared::types::{DocumentRef, FundCode, ProjectId, TransactionId, UnitCode};

const SEED: &str = r#"{
    "id": "CMD",
    "name": "Command",
    "total_authority": "100000",
    "amount_distributed": "20000",
    "children": [
        {
            "id": "CC-100",
            "name": "Cost Center 100",
            "total_authority": "20000",
            "amount_distributed": "15000"
        }
    ]
}"#;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()
}

#[test]
fn certify_then_accrue_then_trace() {
    let context = FinanceContext::from_seed_json(SEED).unwrap();

    let ledger_changes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&ledger_changes);
    context.ledger.subscribe(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    // 1. Certify the purchase request against available authority.
    let request = PurchaseRequest {
        id: DocumentRef::new("PR-88"),
        description: "Materials".to_string(),
        amount: dec!(1000),
        fund: FundCode::from("OMA-2026"),
        cost_center: UnitCode::from("CC-100"),
    };
    let certification =
        IntegrationService::certify_purchase_request(&request, &context.funds.hierarchy()).unwrap();
    assert!(certification.certified, "{}", certification.reason);
    assert_eq!(ledger_changes.load(Ordering::SeqCst), 0, "advisory op wrote nothing");

    // 2. The acquisition module accrues the expense; the entry posts.
    let accrual = IntegrationService::accrue_expense(
        &context.ledger,
        &Expense {
            id: DocumentRef::new("EXP-1"),
            description: "Materials".to_string(),
            amount: dec!(1000),
            vendor: Some("Acme Supply".to_string()),
            fund: FundCode::from("OMA-2026"),
            cost_center: UnitCode::from("CC-100"),
            date: date(),
        },
        "system",
    )
    .unwrap();
    assert!(accrual.is_balanced());
    assert_eq!(ledger_changes.load(Ordering::SeqCst), 1);

    // 3. A manual draft that would breach fund control is caught pre-flight.
    let draft = Transaction {
        id: TransactionId::new("MJE-1"),
        date: date(),
        description: "Year-end push".to_string(),
        kind: TransactionKind::ManualJournal,
        source: SourceModule::Manual,
        document: DocumentRef::new("MEMO-12"),
        total_amount: dec!(9000),
        status: TransactionStatus::PendingApproval,
        created_by: "clerk".to_string(),
        lines: vec![
            TransactionLine::debit(
                AccountCode::OperatingExpense,
                dec!(9000),
                FundCode::from("OMA-2026"),
                UnitCode::from("CC-100"),
                None,
            ),
            TransactionLine::credit(
                AccountCode::AccountsPayable,
                dec!(9000),
                FundCode::from("OMA-2026"),
                UnitCode::from("CC-100"),
                None,
            ),
        ],
        audit: vec![],
    };
    let verdict = ada::validate(&draft, &context.funds.hierarchy());
    assert!(!verdict.valid);
    assert!(verdict.message.contains("fund control"));

    // 4. A governed transfer moves authority from the command down to
    //    CC-100. The log records the action; both endpoints are adjusted
    //    through update_node, per the usage discipline.
    context
        .funds
        .add_transfer(TransferAction {
            from_unit: UnitCode::from("CMD"),
            to_unit: UnitCode::from("CC-100"),
            amount: dec!(10000),
            reason: "Year-end realignment".to_string(),
            date: date(),
        })
        .unwrap();
    let mut cc = FundControlNode::clone(&context.funds.find(&UnitCode::from("CC-100")).unwrap());
    cc.total_authority += dec!(10000);
    context.funds.update_node(cc).unwrap();
    let mut cmd = FundControlNode::clone(&context.funds.hierarchy());
    cmd.total_authority -= dec!(10000);
    context.funds.update_node(cmd).unwrap();
    assert_eq!(context.funds.transfers().len(), 1);

    let verdict = ada::validate(&draft, &context.funds.hierarchy());
    assert!(verdict.valid, "{}", verdict.message);

    // 5. Post the draft through the governed transition.
    context.ledger.add_transaction(draft).unwrap();
    let posted = context
        .ledger
        .post_transaction(&TransactionId::new("MJE-1"), "approver")
        .unwrap();
    assert!(posted.status.is_posted());

    // 6. The projector ties funding, accounting, and execution together.
    let trace = TraceabilityService::project_traceability(
        &ProjectRecord {
            id: ProjectId::new("PRJ-1"),
            name: "Materials buy".to_string(),
            fund: FundCode::from("OMA-2026"),
            cost_center: UnitCode::from("CC-100"),
            purchase_request: Some(DocumentRef::new("PR-88")),
            contract: None,
            assets: vec![],
        },
        &context.ledger,
        &context.funds,
    );
    let funding = trace.funding.expect("funding leg");
    assert_eq!(funding.total_authority, dec!(30000));
    assert_eq!(trace.accounting.transactions.len(), 2);
    assert_eq!(trace.execution.expensed, dec!(10000));

    // Every posted entry in the store balances.
    for tx in context.ledger.transactions() {
        assert!(tx.is_balanced());
    }
}
