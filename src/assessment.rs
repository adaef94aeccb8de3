use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{BillingError, Result};
use crate::types::{
    AssessmentId, EnrollmentPeriod, FeeLineItem, PaymentMethod, PaymentStatus, StudentId,
};

/// billing record for one student for one enrollment period
///
/// `total_amount` is fixed at creation; `amount_paid` only moves upward
/// through submissions, and never past `total_amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: AssessmentId,
    pub student_id: StudentId,
    pub period: EnrollmentPeriod,
    pub tuition: Money,
    pub other_fees: Vec<FeeLineItem>,
    pub total_amount: Money,
    pub amount_paid: Money,
    /// first payment recorded before any installment rows existed;
    /// excluded from installment attribution arithmetic
    pub downpayment_amount: Money,
    pub status: PaymentStatus,
    pub method: Option<PaymentMethod>,
    pub created_at: DateTime<Utc>,
}

impl Assessment {
    pub fn new(
        id: AssessmentId,
        student_id: StudentId,
        period: EnrollmentPeriod,
        tuition: Money,
        other_fees: Vec<FeeLineItem>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let other_total: Money = other_fees.iter().map(|f| f.amount).sum();

        Self {
            id,
            student_id,
            period,
            tuition,
            other_fees,
            total_amount: tuition + other_total,
            amount_paid: Money::ZERO,
            downpayment_amount: Money::ZERO,
            status: PaymentStatus::Unpaid,
            method: None,
            created_at,
        }
    }

    /// sum of persisted fee line items
    pub fn other_fees_total(&self) -> Money {
        self.other_fees.iter().map(|f| f.amount).sum()
    }

    /// outstanding balance
    pub fn remaining(&self) -> Money {
        self.total_amount - self.amount_paid
    }

    pub fn is_fully_paid(&self) -> bool {
        self.amount_paid >= self.total_amount
    }

    pub fn is_pending(&self) -> bool {
        self.status == PaymentStatus::Pending
    }

    /// record a payment submission (a proposal awaiting cashier approval)
    ///
    /// Validated before any state moves: a submission that would push
    /// `amount_paid` past `total_amount` is rejected outright.
    pub fn record_submission(&mut self, amount: Money, method: PaymentMethod) -> Result<()> {
        if !amount.is_positive() {
            return Err(BillingError::InvalidPaymentAmount { amount });
        }

        let new_amount_paid = self.amount_paid + amount;
        if new_amount_paid > self.total_amount {
            return Err(BillingError::PaymentExceedsBalance {
                remaining: self.remaining(),
                submitted: amount,
            });
        }

        self.amount_paid = new_amount_paid;
        self.method = Some(method);
        self.status = PaymentStatus::Pending;

        Ok(())
    }

    /// record the one-and-only down-payment
    ///
    /// A down-payment must be the first money on the assessment and must
    /// be strictly below the total; the amount is stored on its own field
    /// so later installment reconciliation can exclude it.
    pub fn record_downpayment(&mut self, amount: Money, method: PaymentMethod) -> Result<()> {
        if !amount.is_positive() {
            return Err(BillingError::InvalidPaymentAmount { amount });
        }

        if self.amount_paid.is_positive() {
            return Err(BillingError::DownpaymentAlreadyRecorded { id: self.id });
        }

        if amount >= self.total_amount {
            return Err(BillingError::DownpaymentNotBelowTotal {
                total: self.total_amount,
                submitted: amount,
            });
        }

        self.amount_paid = amount;
        self.downpayment_amount = amount;
        self.method = Some(method);
        self.status = PaymentStatus::Pending;

        Ok(())
    }

    /// move to a new ledger status
    pub fn update_status(&mut self, new_status: PaymentStatus) {
        self.status = new_status;
    }
}
