use rust_decimal::Decimal;
use std::collections::HashSet;

use super::Installment;
use crate::decimal::Money;
use crate::types::{AssessmentId, Term};

/// split an outstanding balance into per-term installment rows
///
/// Only terms with no existing row are planned, in canonical order, so a
/// repeated call is a no-op. The balance is divided evenly, with the last
/// missing term taking `remaining - already assigned` so the rows always
/// sum exactly to `remaining` despite per-term rounding.
pub fn plan_installments(
    assessment_id: AssessmentId,
    existing: &[Installment],
    remaining: Money,
) -> Vec<Installment> {
    let existing_terms: HashSet<Term> = existing.iter().map(|i| i.term).collect();

    let missing_terms: Vec<Term> = Term::ALL
        .iter()
        .copied()
        .filter(|t| !existing_terms.contains(t))
        .collect();

    if missing_terms.is_empty() {
        return Vec::new();
    }

    let base = remaining / Decimal::from(missing_terms.len());

    let mut rows = Vec::with_capacity(missing_terms.len());
    let mut assigned = Money::ZERO;

    for (i, term) in missing_terms.iter().enumerate() {
        // last missing term absorbs the rounding residue
        let amount = if i == missing_terms.len() - 1 {
            remaining - assigned
        } else {
            base
        };

        assigned += amount;
        rows.push(Installment::new_unpaid(assessment_id, *term, amount));
    }

    rows
}
