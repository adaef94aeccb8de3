use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{AssessmentId, PaymentMethod, PaymentStatus, StudentId, Term};

/// all events emitted by the billing workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BillingEvent {
    // assessment lifecycle
    AssessmentCreated {
        assessment_id: AssessmentId,
        student_id: StudentId,
        tuition: Money,
        other_fees_total: Money,
        total_amount: Money,
        timestamp: DateTime<Utc>,
    },
    StudentApproved {
        student_id: StudentId,
        timestamp: DateTime<Utc>,
    },

    // payment submissions
    PaymentSubmitted {
        assessment_id: AssessmentId,
        amount: Money,
        method: PaymentMethod,
        amount_paid: Money,
        remaining: Money,
        timestamp: DateTime<Utc>,
    },
    DownpaymentSubmitted {
        assessment_id: AssessmentId,
        amount: Money,
        method: PaymentMethod,
        remaining: Money,
        timestamp: DateTime<Utc>,
    },

    // cashier approvals
    PaymentApproved {
        assessment_id: AssessmentId,
        amount_paid: Money,
        timestamp: DateTime<Utc>,
    },
    PartialPaymentApproved {
        assessment_id: AssessmentId,
        amount_paid: Money,
        remaining: Money,
        timestamp: DateTime<Utc>,
    },

    // installment accounting
    InstallmentsPlanned {
        assessment_id: AssessmentId,
        terms: Vec<Term>,
        remaining: Money,
        timestamp: DateTime<Utc>,
    },
    InstallmentSettled {
        assessment_id: AssessmentId,
        term: Term,
        amount: Money,
        timestamp: DateTime<Utc>,
    },

    // status transitions
    StatusChanged {
        assessment_id: AssessmentId,
        old_status: PaymentStatus,
        new_status: PaymentStatus,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<BillingEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: BillingEvent) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<BillingEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[BillingEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
