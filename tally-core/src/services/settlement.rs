//! Settlement generator - greedy debt reduction
//!
//! Given one currency's debt vector, repeatedly pairs the largest creditor
//! with the largest debtor until every balance is within epsilon of zero.
//! This is a heuristic: it finishes in at most N-1 payments for N people,
//! but does not search for the minimal number of payments.

use std::iter::FusedIterator;

use tracing::debug;

use crate::domain::result::{Error, Result};
use crate::domain::{DebtVector, SettlementInstruction};

/// Balances below this magnitude count as settled
pub const SETTLEMENT_EPSILON: f64 = 1e-3;

/// Lazy sequence of settlement instructions for one debt vector
///
/// Owns the vector and updates it in place as instructions are produced.
/// The sequence is not restartable.
#[derive(Debug)]
pub struct SettlementGenerator {
    debts: DebtVector,
    finished: bool,
}

impl SettlementGenerator {
    /// Take ownership of a debt vector
    ///
    /// Vectors with fewer than two entries are rejected.
    pub fn new(debts: DebtVector) -> Result<Self> {
        if debts.len() < 2 {
            return Err(Error::InsufficientParticipants(debts.len()));
        }
        Ok(Self {
            debts,
            finished: false,
        })
    }

    /// Balances not yet covered by emitted instructions
    pub fn remaining(&self) -> &[f64] {
        &self.debts
    }

    pub fn into_remaining(self) -> DebtVector {
        self.debts
    }

    fn is_settled(&self) -> bool {
        self.debts.iter().all(|d| d.abs() < SETTLEMENT_EPSILON)
    }

    /// Index of the largest and smallest entries, first occurrence wins ties
    fn extrema(&self) -> (usize, usize) {
        let mut max = 0;
        let mut min = 0;
        for (i, &value) in self.debts.iter().enumerate().skip(1) {
            if value > self.debts[max] {
                max = i;
            }
            if value < self.debts[min] {
                min = i;
            }
        }
        (max, min)
    }
}

impl Iterator for SettlementGenerator {
    type Item = SettlementInstruction;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.is_settled() {
            self.finished = true;
            return None;
        }

        let (creditor, debtor) = self.extrema();
        let amount = self.debts[creditor].min(-self.debts[debtor]);
        // A vector that does not sum to zero can run out of one side first
        if amount.is_nan() || amount <= 0.0 {
            self.finished = true;
            return None;
        }

        self.debts[creditor] -= amount;
        self.debts[debtor] += amount;

        debug!(debtor, creditor, amount, "settlement instruction");
        Some(SettlementInstruction::new(debtor, creditor, amount))
    }
}

impl FusedIterator for SettlementGenerator {}

/// Run a generator to completion
pub fn settle(debts: DebtVector) -> Result<Vec<SettlementInstruction>> {
    Ok(SettlementGenerator::new(debts)?.collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_fewer_than_two_people() {
        assert!(matches!(
            SettlementGenerator::new(vec![]),
            Err(Error::InsufficientParticipants(0))
        ));
        assert!(matches!(
            SettlementGenerator::new(vec![0.0]),
            Err(Error::InsufficientParticipants(1))
        ));
    }

    #[test]
    fn test_three_person_scenario() {
        let mut generator = SettlementGenerator::new(vec![-20.0, 10.0, 10.0]).unwrap();

        assert_eq!(
            generator.next(),
            Some(SettlementInstruction::new(0, 1, 10.0))
        );
        assert_eq!(
            generator.next(),
            Some(SettlementInstruction::new(0, 2, 10.0))
        );
        assert_eq!(generator.next(), None);
        assert_eq!(generator.next(), None);
        assert_eq!(generator.remaining(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_settled_vector_yields_nothing() {
        let instructions = settle(vec![0.0005, -0.0005, 0.0]).unwrap();
        assert!(instructions.is_empty());
    }

    #[test]
    fn test_ties_pick_first_occurrence() {
        let instructions = settle(vec![5.0, -5.0, 5.0, -5.0]).unwrap();
        assert_eq!(
            instructions,
            vec![
                SettlementInstruction::new(1, 0, 5.0),
                SettlementInstruction::new(3, 2, 5.0),
            ]
        );
    }

    #[test]
    fn test_unbalanced_vector_terminates() {
        let mut generator = SettlementGenerator::new(vec![5.0, 0.0]).unwrap();
        assert_eq!(generator.next(), None);
        assert_eq!(generator.into_remaining(), vec![5.0, 0.0]);
    }

    #[test]
    fn test_at_most_n_minus_one_payments() {
        let debts = vec![-7.5, 3.25, -1.0, 2.0, 0.0, 3.25];
        let n = debts.len();
        let mut generator = SettlementGenerator::new(debts).unwrap();
        let instructions: Vec<_> = generator.by_ref().collect();

        assert!(instructions.len() <= n - 1);
        assert!(instructions.iter().all(|i| i.amount > 0.0));
        assert!(generator
            .remaining()
            .iter()
            .all(|d| d.abs() < SETTLEMENT_EPSILON));
    }
}
