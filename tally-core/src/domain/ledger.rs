//! Per-currency debt vectors and conversion rules

use std::collections::BTreeMap;

use super::result::{Error, Result};
use super::{DebtVector, PersonId};

/// Redirects a source currency into a target currency at a fixed rate
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRule {
    pub rate: f64,
    pub target: String,
}

/// Accumulated balances for every defined currency
///
/// Every debt vector has exactly one entry per registered person. Positive
/// entries are owed money, negative entries owe money.
#[derive(Debug, Clone, Default)]
pub struct LedgerState {
    currencies: BTreeMap<String, DebtVector>,
    conversions: BTreeMap<String, ConversionRule>,
}

impl LedgerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a zero entry for a newly registered person to every currency
    pub fn add_person(&mut self) {
        for debts in self.currencies.values_mut() {
            debts.push(0.0);
        }
    }

    /// Define a currency with a zeroed vector for `person_count` people
    pub fn add_currency(&mut self, name: &str, person_count: usize) -> Result<()> {
        if self.currencies.contains_key(name) {
            return Err(Error::DuplicateCurrency(name.to_string()));
        }
        self.currencies
            .insert(name.to_string(), vec![0.0; person_count]);
        Ok(())
    }

    /// Install a conversion rule and migrate the source's balances
    ///
    /// The source currency may be undefined, in which case only the rule is
    /// recorded. The target currency must exist.
    pub fn add_conversion(&mut self, source: &str, rate: f64, target: &str) -> Result<()> {
        if self.conversions.contains_key(source) {
            return Err(Error::DuplicateConversion(source.to_string()));
        }
        if source == target {
            return Err(Error::invalid_conversion(format!(
                "{} cannot be converted into itself",
                source
            )));
        }
        if !self.currencies.contains_key(target) {
            return Err(Error::UnknownCurrency(target.to_string()));
        }

        if let Some(source_debts) = self.currencies.get_mut(source) {
            let len = source_debts.len();
            let migrated = std::mem::replace(source_debts, vec![0.0; len]);
            if let Some(target_debts) = self.currencies.get_mut(target) {
                for (t, s) in target_debts.iter_mut().zip(migrated) {
                    *t += s * rate;
                }
            }
        }

        self.conversions.insert(
            source.to_string(),
            ConversionRule {
                rate,
                target: target.to_string(),
            },
        );
        Ok(())
    }

    /// Vector and multiplier a transaction in `currency` should land in
    ///
    /// The transaction's own currency must be defined even when a rule
    /// redirects it. Rules are looked up afresh on every call and followed a
    /// single hop.
    pub fn effective_debts_mut(&mut self, currency: &str) -> Result<(&mut DebtVector, f64)> {
        if !self.currencies.contains_key(currency) {
            return Err(Error::UnknownCurrency(currency.to_string()));
        }
        let (name, multiplier) = match self.conversions.get(currency) {
            Some(rule) => (rule.target.as_str(), rule.rate),
            None => (currency, 1.0),
        };
        match self.currencies.get_mut(name) {
            Some(debts) => Ok((debts, multiplier)),
            None => Err(Error::UnknownCurrency(name.to_string())),
        }
    }

    /// Credit payees and debit payers of a single transaction
    pub fn record_transaction<'a, P, Q>(
        &mut self,
        currency: &str,
        amount: f64,
        payers: P,
        payees: Q,
    ) -> Result<()>
    where
        P: ExactSizeIterator<Item = &'a PersonId>,
        Q: ExactSizeIterator<Item = &'a PersonId>,
    {
        let per_payer = amount / payers.len() as f64;
        let per_payee = amount / payees.len() as f64;
        let (debts, multiplier) = self.effective_debts_mut(currency)?;

        for &id in payees {
            debts[id] += per_payee * multiplier;
        }
        for &id in payers {
            debts[id] -= per_payer * multiplier;
        }
        Ok(())
    }

    pub fn debts(&self, currency: &str) -> Option<&DebtVector> {
        self.currencies.get(currency)
    }

    /// Move a currency's vector out of the ledger
    pub fn take_debts(&mut self, currency: &str) -> Option<DebtVector> {
        self.currencies.remove(currency)
    }

    pub fn conversion(&self, source: &str) -> Option<&ConversionRule> {
        self.conversions.get(source)
    }

    pub fn has_currency(&self, name: &str) -> bool {
        self.currencies.contains_key(name)
    }

    /// Currency names in sorted order
    pub fn currency_names(&self) -> impl Iterator<Item = &str> {
        self.currencies.keys().map(String::as_str)
    }

    pub fn currency_count(&self) -> usize {
        self.currencies.len()
    }

    pub fn conversion_count(&self) -> usize {
        self.conversions.len()
    }

    pub fn conversions(&self) -> impl Iterator<Item = (&str, &ConversionRule)> {
        self.conversions.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_currencies(self) -> BTreeMap<String, DebtVector> {
        self.currencies
    }
}
