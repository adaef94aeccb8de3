pub mod planner;
pub mod reconciler;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::types::{AssessmentId, InstallmentId, InstallmentStatus, Term};

pub use planner::plan_installments;
pub use reconciler::{InstallmentReconciler, SettledInstallment};

/// one of the three per-term sub-payments an unpaid remainder is split into
///
/// At most one row exists per `(assessment, term)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    pub id: InstallmentId,
    pub assessment_id: AssessmentId,
    pub term: Term,
    pub amount: Money,
    pub status: InstallmentStatus,
    pub paid_at: Option<DateTime<Utc>>,
}

impl Installment {
    pub fn new_unpaid(assessment_id: AssessmentId, term: Term, amount: Money) -> Self {
        Self {
            id: Uuid::new_v4(),
            assessment_id,
            term,
            amount,
            status: InstallmentStatus::Unpaid,
            paid_at: None,
        }
    }

    pub fn is_paid(&self) -> bool {
        self.status == InstallmentStatus::Paid
    }

    /// stamp this row as settled; never called twice for the same row
    pub fn mark_paid(&mut self, paid_at: DateTime<Utc>) {
        self.status = InstallmentStatus::Paid;
        self.paid_at = Some(paid_at);
    }
}
