pub mod assessment;
pub mod config;
pub mod decimal;
pub mod engine;
pub mod errors;
pub mod events;
pub mod installments;
pub mod ledger;
pub mod notice;
pub mod tuition;
pub mod types;

// re-export key types
pub use decimal::Money;
pub use errors::{BillingError, Result};
pub use events::{BillingEvent, EventStore};
pub use assessment::Assessment;
pub use config::{BillingConfig, ReconciliationConfig, TuitionSchedule};
pub use engine::{
    ApprovalOutcome, AssessmentSummary, BillingEngine, InstallmentSummary, PaymentReceipt,
    PendingPayment, StatementEntry,
};
pub use installments::{
    plan_installments, Installment, InstallmentReconciler, SettledInstallment,
};
pub use ledger::{BillingLedger, StudentRecord};
pub use notice::{BillingNotice, MemoryNoticeSender, NoticeError, NoticeSender, NullNoticeSender};
pub use tuition::{aggregate_fees, TuitionCalculator};
pub use types::{
    AssessmentId, EnrollmentPeriod, EnrollmentStatus, FeeLineItem, InstallmentId,
    InstallmentStatus, PaymentMethod, PaymentStatus, ScholarshipStatus, Semester, StudentId, Term,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
