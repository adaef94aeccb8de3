use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::decimal::Money;

/// unique identifier for an assessment (one billing record per student per period)
pub type AssessmentId = Uuid;

/// unique identifier for a student
pub type StudentId = Uuid;

/// unique identifier for an installment row
pub type InstallmentId = Uuid;

/// payment ledger status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// assessment issued, nothing submitted yet
    Unpaid,
    /// student submitted an amount, awaiting cashier approval
    Pending,
    /// cashier approved a payment below the total
    Partial,
    /// fully settled
    Paid,
}

/// academic term an installment falls due in
///
/// Declaration order is the canonical processing order; `Ord` follows it,
/// so sorting installments by term always yields prelim, midterm, finals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Term {
    Prelim,
    Midterm,
    Finals,
}

impl Term {
    /// all terms in canonical order
    pub const ALL: [Term; 3] = [Term::Prelim, Term::Midterm, Term::Finals];
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Term::Prelim => "prelim",
            Term::Midterm => "midterm",
            Term::Finals => "finals",
        };
        write!(f, "{}", name)
    }
}

/// installment row status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallmentStatus {
    Unpaid,
    Paid,
}

/// scholarship classification driving the per-unit tuition rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScholarshipStatus {
    #[default]
    Regular,
    Scholar,
}

impl ScholarshipStatus {
    /// parse free-text classification; anything other than "scholar"
    /// (case-insensitive), including an empty string, is `Regular`
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("scholar") {
            ScholarshipStatus::Scholar
        } else {
            ScholarshipStatus::Regular
        }
    }
}

/// how a submitted payment was tendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    BankDeposit,
    Online,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::BankDeposit => "bank_deposit",
            PaymentMethod::Online => "online",
        };
        write!(f, "{}", name)
    }
}

/// semester within a school year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Semester {
    First,
    Second,
    Summer,
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Semester::First => "1st semester",
            Semester::Second => "2nd semester",
            Semester::Summer => "summer",
        };
        write!(f, "{}", name)
    }
}

/// enrollment period an assessment belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnrollmentPeriod {
    pub semester: Semester,
    pub school_year: String,
}

impl EnrollmentPeriod {
    pub fn new(semester: Semester, school_year: impl Into<String>) -> Self {
        Self {
            semester,
            school_year: school_year.into(),
        }
    }
}

impl fmt::Display for EnrollmentPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.semester, self.school_year)
    }
}

/// student enrollment status, flipped to approved when the registrar
/// issues the initial assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnrollmentStatus {
    Pending,
    Approved,
}

/// itemized fee attached to an assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeLineItem {
    pub name: String,
    pub amount: Money,
}
