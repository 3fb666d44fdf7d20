use std::sync::Arc;

use log::debug;

use super::transactions_model::Transaction;
use crate::currencies::{Currency, CurrencyMap};
use crate::errors::Result;
use crate::fx::FxServiceTrait;

/// Computes the net converted value of an expense with linked compensations.
///
/// The net value is the expense's own converted value minus the converted
/// value of each live compensation, per currency. Compensations are symmetric
/// and unordered. Both sides are converted fresh from amount, currency and
/// execution date, so a stale stored map never leaks into the result.
#[derive(Clone)]
pub struct CompensationNetter {
    fx: Arc<dyn FxServiceTrait>,
}

impl CompensationNetter {
    pub fn new(fx: Arc<dyn FxServiceTrait>) -> Self {
        Self { fx }
    }

    /// Net value of `expense` against `compensations`.
    ///
    /// Canceled compensations never contribute; a compensation that is being
    /// removed must already be absent from the slice, even when the
    /// underlying record still exists in storage.
    pub fn net_value(
        &self,
        expense: &Transaction,
        compensations: &[Transaction],
    ) -> Result<CurrencyMap> {
        let mut net = self.fx.convert(
            expense.amount,
            expense.currency,
            Some(expense.executed_at.date()),
        )?;

        for compensation in compensations {
            if compensation.canceled_at.is_some() {
                continue;
            }
            let values = self.fx.convert(
                compensation.amount,
                compensation.currency,
                Some(compensation.executed_at.date()),
            )?;
            for currency in Currency::ALL {
                let compensated = values.get(&currency).copied().unwrap_or_default();
                if let Some(value) = net.get_mut(&currency) {
                    *value -= compensated;
                }
            }
        }

        debug!(
            "Netted expense {} against {} compensation(s)",
            expense.id,
            compensations.len()
        );
        Ok(net)
    }
}
