//! Business rule validation for ledger lines.

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::TransactionLine;

/// Debit and credit totals for a set of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineTotals {
    /// Sum of debit amounts.
    pub debits: Decimal,
    /// Sum of credit amounts.
    pub credits: Decimal,
}

impl LineTotals {
    /// Returns true when debits equal credits.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.debits == self.credits
    }

    /// Returns the debit-minus-credit difference.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.debits - self.credits
    }
}

/// Calculates debit and credit totals for a set of lines.
#[must_use]
pub fn totals(lines: &[TransactionLine]) -> LineTotals {
    LineTotals {
        debits: lines.iter().map(|line| line.debit).sum(),
        credits: lines.iter().map(|line| line.credit).sum(),
    }
}

/// Validates that a set of lines may be posted.
///
/// Checks, in order: at least one line, all amounts non-negative, every
/// line carries a debit or a credit, and debits equal credits exactly.
///
/// # Errors
///
/// Returns the first violated rule.
pub fn validate_lines(lines: &[TransactionLine]) -> Result<(), LedgerError> {
    if lines.is_empty() {
        return Err(LedgerError::NoLines);
    }

    for line in lines {
        if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount);
        }
        if line.debit == Decimal::ZERO && line.credit == Decimal::ZERO {
            return Err(LedgerError::EmptyLine);
        }
    }

    let totals = totals(lines);
    if !totals.is_balanced() {
        return Err(LedgerError::Unbalanced {
            debits: totals.debits,
            credits: totals.credits,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::accounts::AccountCode;
    use fundbook_shared::types::{FundCode, UnitCode};
    use rust_decimal_macros::dec;

    fn line(debit: Decimal, credit: Decimal) -> TransactionLine {
        TransactionLine {
            account: AccountCode::OperatingExpense,
            memo: None,
            debit,
            credit,
            fund: FundCode::from("OMA-2026"),
            cost_center: UnitCode::from("CC-100"),
        }
    }

    #[test]
    fn test_balanced_lines_accepted() {
        let lines = vec![line(dec!(100), dec!(0)), line(dec!(0), dec!(100))];
        assert!(validate_lines(&lines).is_ok());
    }

    #[test]
    fn test_unbalanced_lines_rejected() {
        let lines = vec![line(dec!(100), dec!(0)), line(dec!(0), dec!(80))];
        assert!(matches!(
            validate_lines(&lines),
            Err(LedgerError::Unbalanced { .. })
        ));
    }

    #[test]
    fn test_no_lines_rejected() {
        assert!(matches!(validate_lines(&[]), Err(LedgerError::NoLines)));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let lines = vec![line(dec!(-100), dec!(0)), line(dec!(0), dec!(100))];
        assert!(matches!(
            validate_lines(&lines),
            Err(LedgerError::NegativeAmount)
        ));
    }

    #[test]
    fn test_empty_line_rejected() {
        let lines = vec![line(dec!(0), dec!(0)), line(dec!(0), dec!(0))];
        assert!(matches!(validate_lines(&lines), Err(LedgerError::EmptyLine)));
    }

    #[test]
    fn test_both_sides_on_one_line_permitted() {
        // The model permits a line carrying both a debit and a credit.
        let lines = vec![line(dec!(100), dec!(25)), line(dec!(0), dec!(75))];
        assert!(validate_lines(&lines).is_ok());
    }

    #[test]
    fn test_totals_difference() {
        let t = totals(&[line(dec!(100), dec!(0)), line(dec!(0), dec!(80))]);
        assert_eq!(t.debits, dec!(100));
        assert_eq!(t.credits, dec!(80));
        assert_eq!(t.difference(), dec!(20));
        assert!(!t.is_balanced());
    }
}
