use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use thiserror::Error;

use crate::decimal::Money;
use crate::types::EnrollmentPeriod;

/// billing statement pushed to the student after an assessment is issued
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingNotice {
    pub student_email: String,
    pub period: EnrollmentPeriod,
    pub total_units: u32,
    pub tuition: Money,
    pub other_fees_total: Money,
    pub total_amount: Money,
}

#[derive(Debug, Error)]
#[error("notice delivery failed: {message}")]
pub struct NoticeError {
    pub message: String,
}

/// outbound delivery seam for billing notices
///
/// Delivery is fire-and-forget from the workflow's perspective: a failed
/// send is logged and never rolls back the assessment it announces.
pub trait NoticeSender {
    fn send(&self, notice: &BillingNotice) -> Result<(), NoticeError>;
}

impl<T: NoticeSender + ?Sized> NoticeSender for std::rc::Rc<T> {
    fn send(&self, notice: &BillingNotice) -> Result<(), NoticeError> {
        (**self).send(notice)
    }
}

/// sender that drops every notice; useful when no delivery channel exists
#[derive(Debug, Default)]
pub struct NullNoticeSender;

impl NoticeSender for NullNoticeSender {
    fn send(&self, _notice: &BillingNotice) -> Result<(), NoticeError> {
        Ok(())
    }
}

/// in-memory sender for testing
#[derive(Debug, Default)]
pub struct MemoryNoticeSender {
    sent: RefCell<Vec<BillingNotice>>,
    fail: RefCell<bool>,
}

impl MemoryNoticeSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<BillingNotice> {
        self.sent.borrow().clone()
    }

    pub fn fail_next_sends(&self, fail: bool) {
        *self.fail.borrow_mut() = fail;
    }
}

impl NoticeSender for MemoryNoticeSender {
    fn send(&self, notice: &BillingNotice) -> Result<(), NoticeError> {
        if *self.fail.borrow() {
            return Err(NoticeError {
                message: "mail relay unavailable".to_string(),
            });
        }
        self.sent.borrow_mut().push(notice.clone());
        Ok(())
    }
}
