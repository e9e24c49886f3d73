//! Settlement instruction model

use serde::{Deserialize, Serialize};

use super::event::Transaction;
use super::registry::EntityRegistry;
use super::result::{Error, Result};
use super::PersonId;

/// A single settlement step between two people
///
/// A suggested payment of `amount` from `debtor` to `creditor`. The
/// generator picks `debtor` at the most negative entry and `creditor` at
/// the most positive one, and the step moves both `amount` closer to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SettlementInstruction {
    pub debtor: PersonId,
    pub creditor: PersonId,
    pub amount: f64,
}

impl SettlementInstruction {
    pub fn new(debtor: PersonId, creditor: PersonId, amount: f64) -> Self {
        Self {
            debtor,
            creditor,
            amount,
        }
    }

    /// Ledger event that cancels this step when appended to the input
    ///
    /// A transaction adds to its payees' entries and subtracts from its
    /// payers'. Cancelling therefore lists the creditor as payer and the
    /// debtor as payee.
    pub fn to_transaction(&self, registry: &EntityRegistry, currency: &str) -> Result<Transaction> {
        let debtor = registry
            .canonical_name(self.debtor)
            .ok_or(Error::UnknownPerson(self.debtor))?;
        let creditor = registry
            .canonical_name(self.creditor)
            .ok_or(Error::UnknownPerson(self.creditor))?;
        Ok(Transaction::new([creditor], self.amount, currency, [debtor]))
    }
}
