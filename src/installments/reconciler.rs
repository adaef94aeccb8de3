use chrono::{DateTime, Utc};
use tracing::debug;

use super::Installment;
use crate::config::ReconciliationConfig;
use crate::decimal::Money;
use crate::types::{InstallmentId, Term};

/// outcome of a reconciliation pass that settled a row
#[derive(Debug, Clone, PartialEq)]
pub struct SettledInstallment {
    pub id: InstallmentId,
    pub term: Term,
    pub amount: Money,
}

/// attributes a newly observed payment increment to one unpaid installment
///
/// The increment is the cumulative `amount_paid` minus the stored
/// down-payment and minus installments already settled. A first pass looks
/// for an installment whose amount matches the increment within the
/// configured tolerance; only if none matches does a second pass settle
/// the first installment the increment at least covers. Both passes walk
/// terms in canonical order and settle at most one row per call.
pub struct InstallmentReconciler {
    tolerance: Money,
}

impl InstallmentReconciler {
    pub fn new(config: ReconciliationConfig) -> Self {
        Self {
            tolerance: config.tolerance,
        }
    }

    pub fn reconcile(
        &self,
        installments: &mut [Installment],
        cumulative_paid: Money,
        downpayment: Money,
        now: DateTime<Utc>,
    ) -> Option<SettledInstallment> {
        if installments.is_empty() {
            return None;
        }

        installments.sort_by_key(|i| i.term);

        let already_settled: Money = installments
            .iter()
            .filter(|i| i.is_paid())
            .map(|i| i.amount)
            .sum();

        let increment = cumulative_paid - downpayment - already_settled;

        if !increment.is_positive() {
            debug!(%cumulative_paid, %downpayment, %already_settled, "no new increment to attribute");
            return None;
        }

        // exact match first
        for inst in installments.iter_mut() {
            if inst.is_paid() {
                continue;
            }
            if (increment - inst.amount).abs() <= self.tolerance {
                inst.mark_paid(now);
                return Some(SettledInstallment {
                    id: inst.id,
                    term: inst.term,
                    amount: inst.amount,
                });
            }
        }

        // fallback: first term the increment covers, even with overshoot
        for inst in installments.iter_mut() {
            if inst.is_paid() {
                continue;
            }
            if increment >= inst.amount - self.tolerance {
                inst.mark_paid(now);
                return Some(SettledInstallment {
                    id: inst.id,
                    term: inst.term,
                    amount: inst.amount,
                });
            }
        }

        debug!(%increment, "no installment matched the payment increment");
        None
    }
}
