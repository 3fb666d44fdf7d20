use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currencies::{ConvertedValues, Currency, CurrencyMap};

/// The two transaction variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Expense,
    Income,
}

/// Domain model representing a ledger transaction.
///
/// `amount` is always the positive magnitude; the sign of its effect is
/// implied by `kind` and computed in one place, [`Transaction::signed_amount`].
/// `converted_values` is engine-computed, never caller-supplied; for an
/// expense with compensations it holds the net value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    pub kind: TransactionKind,
    pub amount: Decimal,
    /// Currency of the owning account, stamped by the engine at conversion time.
    pub currency: Currency,
    /// Instant of economic effect, independent of when the record was created.
    pub executed_at: NaiveDateTime,
    #[serde(default)]
    pub converted_values: CurrencyMap,
    pub note: Option<String>,
    pub canceled_at: Option<NaiveDateTime>,
    pub is_draft: bool,
    pub debt_id: Option<String>,
    /// For an income: the expense this transaction compensates.
    pub compensates: Option<String>,
}

impl Transaction {
    pub fn new(
        account_id: impl Into<String>,
        kind: TransactionKind,
        amount: Decimal,
        currency: Currency,
        executed_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            account_id: account_id.into(),
            kind,
            amount,
            currency,
            executed_at,
            converted_values: CurrencyMap::new(),
            note: None,
            canceled_at: None,
            is_draft: false,
            debt_id: None,
            compensates: None,
        }
    }

    /// The transaction's effect on its account balance, signed by variant.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Expense => -self.amount,
            TransactionKind::Income => self.amount,
        }
    }

    /// Effect on a linked debt balance: the mirror of the account sign
    /// (an expense increases what is owed, an income repays it).
    pub fn debt_signed(&self, converted_amount: Decimal) -> Decimal {
        match self.kind {
            TransactionKind::Expense => converted_amount,
            TransactionKind::Income => -converted_amount,
        }
    }

    /// Whether this transaction participates in balances and history.
    pub fn affects_balance(&self) -> bool {
        !self.is_draft && self.canceled_at.is_none()
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }
}

impl ConvertedValues for Transaction {
    fn converted_values(&self) -> &CurrencyMap {
        &self.converted_values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 3, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn expense_effect_is_negative_income_positive() {
        let expense =
            Transaction::new("a1", TransactionKind::Expense, dec!(100), Currency::Uah, at(1));
        let income =
            Transaction::new("a1", TransactionKind::Income, dec!(40), Currency::Uah, at(1));

        assert_eq!(expense.signed_amount(), dec!(-100));
        assert_eq!(income.signed_amount(), dec!(40));
    }

    #[test]
    fn debt_sign_mirrors_account_sign() {
        let expense =
            Transaction::new("a1", TransactionKind::Expense, dec!(100), Currency::Uah, at(1));
        let income =
            Transaction::new("a1", TransactionKind::Income, dec!(40), Currency::Uah, at(1));

        assert_eq!(expense.debt_signed(dec!(3.33)), dec!(3.33));
        assert_eq!(income.debt_signed(dec!(1.33)), dec!(-1.33));
    }

    #[test]
    fn drafts_and_canceled_do_not_affect_balances() {
        let mut tx =
            Transaction::new("a1", TransactionKind::Expense, dec!(10), Currency::Uah, at(1));
        assert!(tx.affects_balance());

        tx.is_draft = true;
        assert!(!tx.affects_balance());

        tx.is_draft = false;
        tx.canceled_at = Some(at(2));
        assert!(!tx.affects_balance());
    }
}
