use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::assessment::Assessment;
use crate::errors::{BillingError, Result};
use crate::installments::Installment;
use crate::types::{
    AssessmentId, EnrollmentPeriod, EnrollmentStatus, ScholarshipStatus, StudentId,
};

/// student row the billing workflow reads and approves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: StudentId,
    pub student_no: String,
    pub email: String,
    pub total_units: u32,
    pub scholarship_status: ScholarshipStatus,
    pub enrollment_status: EnrollmentStatus,
}

/// the three tables of the billing schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LedgerState {
    students: HashMap<StudentId, StudentRecord>,
    assessments: HashMap<AssessmentId, Assessment>,
    installments: HashMap<AssessmentId, Vec<Installment>>,
}

/// in-memory relational-style store with scoped transactions
///
/// Mutations inside `transaction` run against a working copy; the live
/// state is replaced only after the closure succeeds, so an error (or a
/// panic) on any path leaves the ledger exactly as it was.
#[derive(Debug, Default)]
pub struct BillingLedger {
    state: LedgerState,
}

impl BillingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// run `f` atomically: commit on Ok, roll back wholesale on Err
    pub fn transaction<T>(&mut self, f: impl FnOnce(&mut BillingLedger) -> Result<T>) -> Result<T> {
        let mut working = BillingLedger {
            state: self.state.clone(),
        };

        let value = f(&mut working)?;
        self.state = working.state;

        Ok(value)
    }

    // ---- students ----

    pub fn insert_student(&mut self, student: StudentRecord) {
        self.state.students.insert(student.id, student);
    }

    pub fn student(&self, id: StudentId) -> Option<&StudentRecord> {
        self.state.students.get(&id)
    }

    pub fn student_by_no(&self, student_no: &str) -> Option<&StudentRecord> {
        self.state
            .students
            .values()
            .find(|s| s.student_no == student_no)
    }

    pub fn approve_student(&mut self, id: StudentId) -> Result<()> {
        let student = self
            .state
            .students
            .get_mut(&id)
            .ok_or_else(|| BillingError::Storage {
                message: format!("student row vanished: {}", id),
            })?;
        student.enrollment_status = EnrollmentStatus::Approved;
        Ok(())
    }

    // ---- assessments ----

    pub fn insert_assessment(&mut self, assessment: Assessment) {
        self.state.assessments.insert(assessment.id, assessment);
    }

    pub fn assessment(&self, id: AssessmentId) -> Result<&Assessment> {
        self.state
            .assessments
            .get(&id)
            .ok_or(BillingError::AssessmentNotFound { id })
    }

    pub fn assessment_mut(&mut self, id: AssessmentId) -> Result<&mut Assessment> {
        self.state
            .assessments
            .get_mut(&id)
            .ok_or(BillingError::AssessmentNotFound { id })
    }

    /// the assessment already issued for a student and period, if any
    pub fn assessment_for_period(
        &self,
        student_id: StudentId,
        period: &EnrollmentPeriod,
    ) -> Option<&Assessment> {
        self.state
            .assessments
            .values()
            .find(|a| a.student_id == student_id && &a.period == period)
    }

    pub fn assessments_for_student(&self, student_id: StudentId) -> Vec<&Assessment> {
        let mut rows: Vec<&Assessment> = self
            .state
            .assessments
            .values()
            .filter(|a| a.student_id == student_id)
            .collect();
        rows.sort_by_key(|a| a.created_at);
        rows
    }

    // ---- installments ----

    /// installment rows for an assessment, in canonical term order
    pub fn installments_for(&self, assessment_id: AssessmentId) -> Vec<Installment> {
        let mut rows = self
            .state
            .installments
            .get(&assessment_id)
            .cloned()
            .unwrap_or_default();
        rows.sort_by_key(|i| i.term);
        rows
    }

    pub fn append_installments(&mut self, assessment_id: AssessmentId, rows: Vec<Installment>) {
        self.state
            .installments
            .entry(assessment_id)
            .or_default()
            .extend(rows);
    }

    /// replace an assessment's installment rows after reconciliation
    pub fn store_installments(&mut self, assessment_id: AssessmentId, rows: Vec<Installment>) {
        self.state.installments.insert(assessment_id, rows);
    }

    // ---- checkpointing ----

    /// serialize the whole ledger to JSON
    pub fn export_state(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.state).map_err(|e| BillingError::Storage {
            message: format!("checkpoint export failed: {}", e),
        })
    }

    /// restore a ledger from an exported checkpoint
    pub fn import_state(json: &str) -> Result<Self> {
        let state: LedgerState = serde_json::from_str(json).map_err(|e| BillingError::Storage {
            message: format!("checkpoint import failed: {}", e),
        })?;
        Ok(Self { state })
    }
}
