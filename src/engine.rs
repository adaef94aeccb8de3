use hourglass_rs::SafeTimeProvider;
use tracing::warn;
use uuid::Uuid;

use crate::assessment::Assessment;
use crate::config::BillingConfig;
use crate::decimal::Money;
use crate::errors::{BillingError, Result};
use crate::events::{BillingEvent, EventStore};
use crate::installments::{plan_installments, Installment, InstallmentReconciler};
use crate::ledger::{BillingLedger, StudentRecord};
use crate::notice::{BillingNotice, NoticeSender, NullNoticeSender};
use crate::tuition::{aggregate_fees, TuitionCalculator};
use crate::types::{
    AssessmentId, EnrollmentPeriod, FeeLineItem, PaymentMethod, PaymentStatus, Term,
};

/// result of issuing an initial assessment
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentSummary {
    pub assessment_id: AssessmentId,
    pub tuition: Money,
    pub other_fees_total: Money,
    pub total_amount: Money,
    pub status: PaymentStatus,
}

/// result of a payment or down-payment submission
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentReceipt {
    pub assessment_id: AssessmentId,
    pub amount_paid: Money,
    pub remaining: Money,
    pub status: PaymentStatus,
}

/// result of a cashier approval
#[derive(Debug, Clone, PartialEq)]
pub struct ApprovalOutcome {
    pub assessment_id: AssessmentId,
    pub status: PaymentStatus,
    /// the installment settled by this approval's increment, if any
    pub settled_term: Option<Term>,
}

/// installment position of one assessment
#[derive(Debug, Clone, PartialEq)]
pub struct InstallmentSummary {
    pub assessment_id: AssessmentId,
    pub installments: Vec<Installment>,
    pub remaining: Money,
    pub status: PaymentStatus,
}

/// cashier queue row: one pending submission awaiting approval
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPayment {
    pub assessment_id: AssessmentId,
    pub total_amount: Money,
    pub amount_paid: Money,
    pub remaining: Money,
    pub method: Option<PaymentMethod>,
}

/// student-facing bill for one assessment
#[derive(Debug, Clone, PartialEq)]
pub struct StatementEntry {
    pub assessment_id: AssessmentId,
    pub period: EnrollmentPeriod,
    pub other_fees: Vec<FeeLineItem>,
    pub total_amount: Money,
    pub amount_paid: Money,
    pub remaining: Money,
    pub status: PaymentStatus,
}

/// billing workflow orchestrator
///
/// Owns the ledger and runs every mutating operation inside one scoped
/// transaction; events and the billing notice are emitted only after the
/// transaction commits.
pub struct BillingEngine {
    pub config: BillingConfig,
    pub ledger: BillingLedger,
    pub events: EventStore,
    sender: Box<dyn NoticeSender>,
}

impl BillingEngine {
    pub fn new(config: BillingConfig, sender: Box<dyn NoticeSender>) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            ledger: BillingLedger::new(),
            events: EventStore::new(),
            sender,
        })
    }

    /// standard configuration with no outbound notice channel
    pub fn standard() -> Self {
        Self {
            config: BillingConfig::standard(),
            ledger: BillingLedger::new(),
            events: EventStore::new(),
            sender: Box::new(NullNoticeSender),
        }
    }

    /// seed a student row (normally synced from the enrollment system)
    pub fn register_student(&mut self, record: StudentRecord) {
        self.ledger.insert_student(record);
    }

    /// registrar action: compute tuition and fees, open the payment
    /// ledger row, and approve the student's enrollment, atomically
    pub fn create_assessment(
        &mut self,
        student_no: &str,
        period: EnrollmentPeriod,
        other_fees: &[FeeLineItem],
        time_provider: &SafeTimeProvider,
    ) -> Result<AssessmentSummary> {
        let now = time_provider.now();
        let calculator = TuitionCalculator::new(self.config.tuition.clone());

        let (summary, student) = self.ledger.transaction(|tx| {
            let student = tx
                .student_by_no(student_no)
                .cloned()
                .ok_or_else(|| BillingError::StudentNotFound {
                    student_no: student_no.to_string(),
                })?;

            if tx.assessment_for_period(student.id, &period).is_some() {
                return Err(BillingError::AssessmentAlreadyExists {
                    student_no: student_no.to_string(),
                    period: period.to_string(),
                });
            }

            let tuition = calculator.tuition_for(student.total_units, student.scholarship_status);
            let (fees, other_fees_total) = aggregate_fees(other_fees);

            let assessment = Assessment::new(
                Uuid::new_v4(),
                student.id,
                period.clone(),
                tuition,
                fees,
                now,
            );

            let summary = AssessmentSummary {
                assessment_id: assessment.id,
                tuition,
                other_fees_total,
                total_amount: assessment.total_amount,
                status: assessment.status,
            };

            tx.insert_assessment(assessment);
            tx.approve_student(student.id)?;

            Ok((summary, student))
        })?;

        self.events.emit(BillingEvent::AssessmentCreated {
            assessment_id: summary.assessment_id,
            student_id: student.id,
            tuition: summary.tuition,
            other_fees_total: summary.other_fees_total,
            total_amount: summary.total_amount,
            timestamp: now,
        });
        self.events.emit(BillingEvent::StudentApproved {
            student_id: student.id,
            timestamp: now,
        });

        // fire-and-forget: a failed delivery never unwinds the assessment
        let notice = BillingNotice {
            student_email: student.email,
            period,
            total_units: student.total_units,
            tuition: summary.tuition,
            other_fees_total: summary.other_fees_total,
            total_amount: summary.total_amount,
        };
        if let Err(e) = self.sender.send(&notice) {
            warn!(assessment_id = %summary.assessment_id, error = %e, "billing notice not delivered");
        }

        Ok(summary)
    }

    /// student action: submit a payment proposal for cashier approval
    pub fn submit_payment(
        &mut self,
        assessment_id: AssessmentId,
        amount: Money,
        method: PaymentMethod,
        time_provider: &SafeTimeProvider,
    ) -> Result<PaymentReceipt> {
        let receipt = self.ledger.transaction(|tx| {
            let assessment = tx.assessment_mut(assessment_id)?;
            assessment.record_submission(amount, method)?;

            Ok(PaymentReceipt {
                assessment_id,
                amount_paid: assessment.amount_paid,
                remaining: assessment.remaining(),
                status: assessment.status,
            })
        })?;

        self.events.emit(BillingEvent::PaymentSubmitted {
            assessment_id,
            amount,
            method,
            amount_paid: receipt.amount_paid,
            remaining: receipt.remaining,
            timestamp: time_provider.now(),
        });

        Ok(receipt)
    }

    /// student action: submit the one-and-only down-payment
    pub fn submit_downpayment(
        &mut self,
        assessment_id: AssessmentId,
        amount: Money,
        method: PaymentMethod,
        time_provider: &SafeTimeProvider,
    ) -> Result<PaymentReceipt> {
        let receipt = self.ledger.transaction(|tx| {
            let assessment = tx.assessment_mut(assessment_id)?;
            assessment.record_downpayment(amount, method)?;

            Ok(PaymentReceipt {
                assessment_id,
                amount_paid: assessment.amount_paid,
                remaining: assessment.remaining(),
                status: assessment.status,
            })
        })?;

        self.events.emit(BillingEvent::DownpaymentSubmitted {
            assessment_id,
            amount,
            method,
            remaining: receipt.remaining,
            timestamp: time_provider.now(),
        });

        Ok(receipt)
    }

    /// cashier action: finalize a pending submission
    ///
    /// Full payments settle the ledger row. Partial payments move it to
    /// `Partial` and plan installment rows for any missing terms; the new
    /// increment is reconciled against the rows only when some already
    /// existed before this approval cycle. The first approval after a
    /// down-payment therefore never settles a term: that increment is the
    /// down-payment itself.
    pub fn approve_payment(
        &mut self,
        assessment_id: AssessmentId,
        time_provider: &SafeTimeProvider,
    ) -> Result<ApprovalOutcome> {
        let now = time_provider.now();
        let reconciler = InstallmentReconciler::new(self.config.reconciliation.clone());

        let (outcome, events) = self.ledger.transaction(|tx| {
            let mut events = Vec::new();
            let snapshot = tx.assessment(assessment_id)?.clone();

            if !snapshot.is_pending() {
                return Err(BillingError::NoPendingPayment {
                    id: assessment_id,
                    status: snapshot.status,
                });
            }

            if snapshot.is_fully_paid() {
                tx.assessment_mut(assessment_id)?
                    .update_status(PaymentStatus::Paid);

                events.push(BillingEvent::StatusChanged {
                    assessment_id,
                    old_status: PaymentStatus::Pending,
                    new_status: PaymentStatus::Paid,
                    timestamp: now,
                });
                events.push(BillingEvent::PaymentApproved {
                    assessment_id,
                    amount_paid: snapshot.amount_paid,
                    timestamp: now,
                });

                return Ok((
                    ApprovalOutcome {
                        assessment_id,
                        status: PaymentStatus::Paid,
                        settled_term: None,
                    },
                    events,
                ));
            }

            let remaining = snapshot.remaining();

            tx.assessment_mut(assessment_id)?
                .update_status(PaymentStatus::Partial);

            events.push(BillingEvent::StatusChanged {
                assessment_id,
                old_status: PaymentStatus::Pending,
                new_status: PaymentStatus::Partial,
                timestamp: now,
            });
            events.push(BillingEvent::PartialPaymentApproved {
                assessment_id,
                amount_paid: snapshot.amount_paid,
                remaining,
                timestamp: now,
            });

            let existing = tx.installments_for(assessment_id);
            let had_existing_installments = !existing.is_empty();

            let planned = plan_installments(assessment_id, &existing, remaining);
            if !planned.is_empty() {
                events.push(BillingEvent::InstallmentsPlanned {
                    assessment_id,
                    terms: planned.iter().map(|p| p.term).collect(),
                    remaining,
                    timestamp: now,
                });
                tx.append_installments(assessment_id, planned);
            }

            let mut settled_term = None;
            if had_existing_installments {
                let mut rows = tx.installments_for(assessment_id);
                if let Some(settled) = reconciler.reconcile(
                    &mut rows,
                    snapshot.amount_paid,
                    snapshot.downpayment_amount,
                    now,
                ) {
                    events.push(BillingEvent::InstallmentSettled {
                        assessment_id,
                        term: settled.term,
                        amount: settled.amount,
                        timestamp: now,
                    });
                    settled_term = Some(settled.term);
                    tx.store_installments(assessment_id, rows);
                }
            }

            Ok((
                ApprovalOutcome {
                    assessment_id,
                    status: PaymentStatus::Partial,
                    settled_term,
                },
                events,
            ))
        })?;

        for event in events {
            self.events.emit(event);
        }

        Ok(outcome)
    }

    /// installments, remaining balance, and status for one assessment
    pub fn installment_summary(&self, assessment_id: AssessmentId) -> Result<InstallmentSummary> {
        let assessment = self.ledger.assessment(assessment_id)?;

        Ok(InstallmentSummary {
            assessment_id,
            installments: self.ledger.installments_for(assessment_id),
            remaining: assessment.remaining(),
            status: assessment.status,
        })
    }

    /// cashier view: a student's submissions awaiting approval
    pub fn pending_payments(&self, student_no: &str) -> Result<Vec<PendingPayment>> {
        let student =
            self.ledger
                .student_by_no(student_no)
                .ok_or_else(|| BillingError::StudentNotFound {
                    student_no: student_no.to_string(),
                })?;

        Ok(self
            .ledger
            .assessments_for_student(student.id)
            .into_iter()
            .filter(|a| a.is_pending())
            .map(|a| PendingPayment {
                assessment_id: a.id,
                total_amount: a.total_amount,
                amount_paid: a.amount_paid,
                remaining: a.remaining(),
                method: a.method,
            })
            .collect())
    }

    /// student view: every assessment with its fee breakdown
    pub fn statement(&self, student_no: &str) -> Result<Vec<StatementEntry>> {
        let student =
            self.ledger
                .student_by_no(student_no)
                .ok_or_else(|| BillingError::StudentNotFound {
                    student_no: student_no.to_string(),
                })?;

        Ok(self
            .ledger
            .assessments_for_student(student.id)
            .into_iter()
            .map(|a| StatementEntry {
                assessment_id: a.id,
                period: a.period.clone(),
                other_fees: a.other_fees.clone(),
                total_amount: a.total_amount,
                amount_paid: a.amount_paid,
                remaining: a.remaining(),
                status: a.status,
            })
            .collect())
    }

    /// drain events collected since the last call
    pub fn take_events(&mut self) -> Vec<BillingEvent> {
        self.events.take_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::MemoryNoticeSender;
    use crate::types::{EnrollmentStatus, ScholarshipStatus, Semester};
    use chrono::{TimeZone, Utc};
    use hourglass_rs::TimeSource;

    fn test_time() -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2025, 8, 1, 9, 0, 0).unwrap(),
        ))
    }

    fn period() -> EnrollmentPeriod {
        EnrollmentPeriod::new(Semester::First, "2025-2026")
    }

    fn student(no: &str, units: u32, status: ScholarshipStatus) -> StudentRecord {
        StudentRecord {
            id: Uuid::new_v4(),
            student_no: no.to_string(),
            email: format!("{}@school.test", no),
            total_units: units,
            scholarship_status: status,
            enrollment_status: EnrollmentStatus::Pending,
        }
    }

    fn engine_with_student(no: &str, units: u32, status: ScholarshipStatus) -> BillingEngine {
        let mut engine = BillingEngine::standard();
        engine.register_student(student(no, units, status));
        engine
    }

    #[test]
    fn test_assessment_for_thirty_units_regular() {
        let mut engine = engine_with_student("2025-0001", 30, ScholarshipStatus::Regular);
        let time = test_time();

        let summary = engine
            .create_assessment("2025-0001", period(), &[], &time)
            .unwrap();

        assert_eq!(summary.tuition, Money::from_major(24_000));
        assert_eq!(summary.other_fees_total, Money::ZERO);
        assert_eq!(summary.total_amount, Money::from_major(24_000));
        assert_eq!(summary.status, PaymentStatus::Unpaid);

        // enrollment flips to approved in the same transaction
        let s = engine.ledger.student_by_no("2025-0001").unwrap();
        assert_eq!(s.enrollment_status, EnrollmentStatus::Approved);
    }

    #[test]
    fn test_assessment_uses_scholar_rate_and_fees() {
        let mut engine = engine_with_student("2025-0002", 24, ScholarshipStatus::Scholar);
        let time = test_time();

        let fees = vec![
            FeeLineItem {
                name: "laboratory".to_string(),
                amount: Money::from_major(1_500),
            },
            FeeLineItem {
                name: "void".to_string(),
                amount: Money::ZERO,
            },
        ];

        let summary = engine
            .create_assessment("2025-0002", period(), &fees, &time)
            .unwrap();

        assert_eq!(summary.tuition, Money::from_major(12_000));
        assert_eq!(summary.other_fees_total, Money::from_major(1_500));
        assert_eq!(summary.total_amount, Money::from_major(13_500));

        // the zero-amount entry was dropped, not persisted
        let statement = engine.statement("2025-0002").unwrap();
        assert_eq!(statement[0].other_fees.len(), 1);
    }

    #[test]
    fn test_assessment_unknown_student_rejected() {
        let mut engine = BillingEngine::standard();
        let err = engine
            .create_assessment("2025-9999", period(), &[], &test_time())
            .unwrap_err();
        assert!(matches!(err, BillingError::StudentNotFound { .. }));
    }

    #[test]
    fn test_duplicate_assessment_for_period_rejected() {
        let mut engine = engine_with_student("2025-0001", 30, ScholarshipStatus::Regular);
        let time = test_time();

        engine
            .create_assessment("2025-0001", period(), &[], &time)
            .unwrap();
        let err = engine
            .create_assessment("2025-0001", period(), &[], &time)
            .unwrap_err();
        assert!(matches!(err, BillingError::AssessmentAlreadyExists { .. }));

        // a different period is fine
        engine
            .create_assessment(
                "2025-0001",
                EnrollmentPeriod::new(Semester::Second, "2025-2026"),
                &[],
                &time,
            )
            .unwrap();
    }

    #[test]
    fn test_billing_notice_carries_breakdown() {
        let sender = std::rc::Rc::new(MemoryNoticeSender::new());
        let mut engine =
            BillingEngine::new(BillingConfig::standard(), Box::new(sender.clone())).unwrap();
        engine.register_student(student("2025-0001", 30, ScholarshipStatus::Regular));

        engine
            .create_assessment("2025-0001", period(), &[], &test_time())
            .unwrap();

        let sent = sender.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].tuition, Money::from_major(24_000));
        assert_eq!(sent[0].total_units, 30);
        assert_eq!(sent[0].student_email, "2025-0001@school.test");
    }

    #[test]
    fn test_notice_failure_does_not_unwind_assessment() {
        let sender = std::rc::Rc::new(MemoryNoticeSender::new());
        sender.fail_next_sends(true);
        let mut engine =
            BillingEngine::new(BillingConfig::standard(), Box::new(sender.clone())).unwrap();
        engine.register_student(student("2025-0001", 30, ScholarshipStatus::Regular));

        let summary = engine
            .create_assessment("2025-0001", period(), &[], &test_time())
            .unwrap();

        assert!(engine.ledger.assessment(summary.assessment_id).is_ok());
        assert!(sender.sent().is_empty());
    }

    #[test]
    fn test_full_payment_approval_settles_ledger() {
        let mut engine = engine_with_student("2025-0001", 30, ScholarshipStatus::Regular);
        let time = test_time();

        let summary = engine
            .create_assessment("2025-0001", period(), &[], &time)
            .unwrap();
        engine
            .submit_payment(
                summary.assessment_id,
                Money::from_major(24_000),
                PaymentMethod::Cash,
                &time,
            )
            .unwrap();

        let outcome = engine.approve_payment(summary.assessment_id, &time).unwrap();

        assert_eq!(outcome.status, PaymentStatus::Paid);
        assert_eq!(outcome.settled_term, None);
        // no installment rows for a fully paid assessment
        assert!(engine
            .installment_summary(summary.assessment_id)
            .unwrap()
            .installments
            .is_empty());
    }

    #[test]
    fn test_downpayment_approval_plans_installments_without_settling() {
        let mut engine = engine_with_student("2025-0001", 30, ScholarshipStatus::Regular);
        let time = test_time();

        let summary = engine
            .create_assessment("2025-0001", period(), &[], &time)
            .unwrap();
        let receipt = engine
            .submit_downpayment(
                summary.assessment_id,
                Money::from_major(8_000),
                PaymentMethod::BankDeposit,
                &time,
            )
            .unwrap();
        assert_eq!(receipt.status, PaymentStatus::Pending);
        assert_eq!(receipt.remaining, Money::from_major(16_000));

        let outcome = engine.approve_payment(summary.assessment_id, &time).unwrap();
        assert_eq!(outcome.status, PaymentStatus::Partial);
        // the down-payment increment never settles a term
        assert_eq!(outcome.settled_term, None);

        let installments = engine
            .installment_summary(summary.assessment_id)
            .unwrap()
            .installments;
        assert_eq!(installments.len(), 3);
        assert!(installments.iter().all(|i| !i.is_paid()));

        let base = Money::from_str_exact("5333.33").unwrap();
        assert_eq!(installments[0].amount, base);
        assert_eq!(installments[1].amount, base);
        assert_eq!(
            installments[2].amount,
            Money::from_major(16_000) - base - base
        );
    }

    #[test]
    fn test_second_partial_payment_settles_prelim() {
        let mut engine = engine_with_student("2025-0001", 30, ScholarshipStatus::Regular);
        let time = test_time();

        let summary = engine
            .create_assessment("2025-0001", period(), &[], &time)
            .unwrap();
        engine
            .submit_downpayment(
                summary.assessment_id,
                Money::from_major(8_000),
                PaymentMethod::Cash,
                &time,
            )
            .unwrap();
        engine.approve_payment(summary.assessment_id, &time).unwrap();

        // second submission brings cumulative paid to 13,333
        engine
            .submit_payment(
                summary.assessment_id,
                Money::from_major(5_333),
                PaymentMethod::Cash,
                &time,
            )
            .unwrap();
        let outcome = engine.approve_payment(summary.assessment_id, &time).unwrap();

        assert_eq!(outcome.status, PaymentStatus::Partial);
        assert_eq!(outcome.settled_term, Some(Term::Prelim));

        let summary_view = engine.installment_summary(summary.assessment_id).unwrap();
        let prelim = &summary_view.installments[0];
        assert!(prelim.is_paid());
        assert_eq!(prelim.paid_at, Some(time.now()));
        assert_eq!(
            summary_view
                .installments
                .iter()
                .filter(|i| i.is_paid())
                .count(),
            1
        );
    }

    #[test]
    fn test_approving_settled_assessment_rejected() {
        let mut engine = engine_with_student("2025-0001", 30, ScholarshipStatus::Regular);
        let time = test_time();

        let summary = engine
            .create_assessment("2025-0001", period(), &[], &time)
            .unwrap();
        engine
            .submit_payment(
                summary.assessment_id,
                Money::from_major(24_000),
                PaymentMethod::Cash,
                &time,
            )
            .unwrap();
        engine.approve_payment(summary.assessment_id, &time).unwrap();

        let before = engine.ledger.export_state().unwrap();
        let err = engine
            .approve_payment(summary.assessment_id, &time)
            .unwrap_err();

        assert!(matches!(err, BillingError::NoPendingPayment { .. }));
        // rejected with no state change
        assert_eq!(engine.ledger.export_state().unwrap(), before);
    }

    #[test]
    fn test_overpayment_rejected_before_any_write() {
        let mut engine = engine_with_student("2025-0001", 30, ScholarshipStatus::Regular);
        let time = test_time();

        let summary = engine
            .create_assessment("2025-0001", period(), &[], &time)
            .unwrap();
        let before = engine.ledger.export_state().unwrap();

        let err = engine
            .submit_payment(
                summary.assessment_id,
                Money::from_major(30_000),
                PaymentMethod::Cash,
                &time,
            )
            .unwrap_err();

        assert!(matches!(err, BillingError::PaymentExceedsBalance { .. }));
        assert_eq!(engine.ledger.export_state().unwrap(), before);
    }

    #[test]
    fn test_pending_payments_view() {
        let mut engine = engine_with_student("2025-0001", 30, ScholarshipStatus::Regular);
        let time = test_time();

        let summary = engine
            .create_assessment("2025-0001", period(), &[], &time)
            .unwrap();
        assert!(engine.pending_payments("2025-0001").unwrap().is_empty());

        engine
            .submit_downpayment(
                summary.assessment_id,
                Money::from_major(8_000),
                PaymentMethod::Online,
                &time,
            )
            .unwrap();

        let pending = engine.pending_payments("2025-0001").unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].remaining, Money::from_major(16_000));
        assert_eq!(pending[0].method, Some(PaymentMethod::Online));

        engine.approve_payment(summary.assessment_id, &time).unwrap();
        assert!(engine.pending_payments("2025-0001").unwrap().is_empty());
    }

    #[test]
    fn test_events_emitted_for_partial_flow() {
        let mut engine = engine_with_student("2025-0001", 30, ScholarshipStatus::Regular);
        let time = test_time();

        let summary = engine
            .create_assessment("2025-0001", period(), &[], &time)
            .unwrap();
        engine
            .submit_downpayment(
                summary.assessment_id,
                Money::from_major(8_000),
                PaymentMethod::Cash,
                &time,
            )
            .unwrap();
        engine.take_events();

        engine.approve_payment(summary.assessment_id, &time).unwrap();
        let events = engine.take_events();

        assert!(events.iter().any(|e| matches!(
            e,
            BillingEvent::StatusChanged {
                new_status: PaymentStatus::Partial,
                ..
            }
        )));
        assert!(events.iter().any(|e| matches!(
            e,
            BillingEvent::InstallmentsPlanned { terms, .. } if terms.len() == 3
        )));
        // no settlement event on the down-payment approval
        assert!(!events
            .iter()
            .any(|e| matches!(e, BillingEvent::InstallmentSettled { .. })));
    }

    #[test]
    fn test_failed_approval_emits_no_events() {
        let mut engine = engine_with_student("2025-0001", 30, ScholarshipStatus::Regular);
        let time = test_time();

        let summary = engine
            .create_assessment("2025-0001", period(), &[], &time)
            .unwrap();
        engine.take_events();

        assert!(engine.approve_payment(summary.assessment_id, &time).is_err());
        assert!(engine.take_events().is_empty());
    }
}
