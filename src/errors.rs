use thiserror::Error;
use uuid::Uuid;

use crate::decimal::Money;
use crate::types::PaymentStatus;

#[derive(Error, Debug)]
pub enum BillingError {
    #[error("student not found: {student_no}")]
    StudentNotFound {
        student_no: String,
    },

    #[error("assessment not found: {id}")]
    AssessmentNotFound {
        id: Uuid,
    },

    #[error("no pending payment for assessment {id}: current status is {status:?}")]
    NoPendingPayment {
        id: Uuid,
        status: PaymentStatus,
    },

    #[error("assessment already exists for student {student_no} in {period}")]
    AssessmentAlreadyExists {
        student_no: String,
        period: String,
    },

    #[error("invalid payment amount: {amount}")]
    InvalidPaymentAmount {
        amount: Money,
    },

    #[error("payment exceeds remaining balance: remaining {remaining}, submitted {submitted}")]
    PaymentExceedsBalance {
        remaining: Money,
        submitted: Money,
    },

    #[error("downpayment already recorded for assessment {id}")]
    DownpaymentAlreadyRecorded {
        id: Uuid,
    },

    #[error("downpayment must be below the total amount: total {total}, submitted {submitted}")]
    DownpaymentNotBelowTotal {
        total: Money,
        submitted: Money,
    },

    #[error("invalid state: current {current}, expected {expected}")]
    InvalidState {
        current: String,
        expected: String,
    },

    #[error("storage error: {message}")]
    Storage {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, BillingError>;
