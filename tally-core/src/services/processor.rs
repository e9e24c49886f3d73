//! Event processor - folds events into ledger state
//!
//! A `Ledger` owns the name registry and the per-currency balances. Each
//! event consumes the ledger and hands back the updated one, so there is
//! exactly one writer for the whole run. The first error ends the run.

use tracing::{debug, info};

use crate::domain::result::{Error, Result, Side};
use crate::domain::{
    CurrencyConversion, CurrencyDefinition, DebtVector, EntityRegistry, Event, GroupDefinition,
    LedgerState, PersonDefinition, SettlementInstruction, Transaction,
};
use crate::ports::EventSource;

use super::settlement::SettlementGenerator;

/// Settlement instructions for one currency
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencySettlement {
    pub currency: String,
    pub instructions: Vec<SettlementInstruction>,
}

/// Registry plus balances, threaded through the event fold
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    registry: EntityRegistry,
    state: LedgerState,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a complete in-memory event sequence
    pub fn from_events<I>(events: I) -> Result<Self>
    where
        I: IntoIterator<Item = Event>,
    {
        events
            .into_iter()
            .try_fold(Self::new(), |ledger, event| ledger.apply(event))
    }

    /// Fold every event an event source yields, one at a time
    pub fn from_source(source: &mut dyn EventSource) -> Result<Self> {
        Self::from_source_with(source, |_| {})
    }

    /// Like `from_source`, calling `observe` on each event before it is applied
    pub fn from_source_with<F>(source: &mut dyn EventSource, mut observe: F) -> Result<Self>
    where
        F: FnMut(&Event),
    {
        let mut ledger = Self::new();
        while let Some(event) = source.next_event()? {
            observe(&event);
            ledger = ledger.apply(event)?;
        }
        Ok(ledger)
    }

    /// Apply a single event
    pub fn apply(mut self, event: Event) -> Result<Self> {
        let kind = event.kind();
        match event {
            Event::Person(person) => self.define_person(person)?,
            Event::Group(group) => self.define_group(group)?,
            Event::Currency(currency) => self.define_currency(currency)?,
            Event::Transaction(transaction) => self.record_transaction(transaction)?,
            Event::Conversion(conversion) => self.define_conversion(conversion)?,
        }
        debug!(kind, persons = self.person_count(), "applied event");
        Ok(self)
    }

    fn define_person(&mut self, person: PersonDefinition) -> Result<()> {
        self.registry
            .register_person(&person.name, &person.aliases)?;
        self.state.add_person();
        Ok(())
    }

    fn define_group(&mut self, group: GroupDefinition) -> Result<()> {
        self.registry.register_group(&group.name, &group.members)
    }

    fn define_currency(&mut self, currency: CurrencyDefinition) -> Result<()> {
        self.state
            .add_currency(&currency.name, self.registry.person_count())
    }

    fn define_conversion(&mut self, conversion: CurrencyConversion) -> Result<()> {
        if !conversion.source_amount.is_finite() || conversion.source_amount <= 0.0 {
            return Err(Error::invalid_conversion(format!(
                "source amount {} must be positive",
                conversion.source_amount
            )));
        }
        if !conversion.target_amount.is_finite() || conversion.target_amount < 0.0 {
            return Err(Error::invalid_conversion(format!(
                "target amount {} must not be negative",
                conversion.target_amount
            )));
        }

        let rate = conversion.rate();
        self.state.add_conversion(
            &conversion.source_currency,
            rate,
            &conversion.target_currency,
        )?;
        info!(
            source = %conversion.source_currency,
            target = %conversion.target_currency,
            rate,
            "installed currency conversion"
        );
        Ok(())
    }

    fn record_transaction(&mut self, transaction: Transaction) -> Result<()> {
        let payers = self.registry.resolve_names(&transaction.payers)?;
        let payees = self.registry.resolve_names(&transaction.payees)?;

        if payers.is_empty() {
            return Err(Error::EmptyParticipants {
                side: Side::Payers,
                currency: transaction.currency,
            });
        }
        if payees.is_empty() {
            return Err(Error::EmptyParticipants {
                side: Side::Payees,
                currency: transaction.currency,
            });
        }

        self.state.record_transaction(
            &transaction.currency,
            transaction.amount,
            payers.iter(),
            payees.iter(),
        )
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn person_count(&self) -> usize {
        self.registry.person_count()
    }

    /// Balances of one currency, if defined
    pub fn debts(&self, currency: &str) -> Option<&DebtVector> {
        self.state.debts(currency)
    }

    pub fn into_parts(self) -> (EntityRegistry, LedgerState) {
        (self.registry, self.state)
    }

    /// Settle a single currency, consuming its balances
    pub fn settle_currency(&mut self, currency: &str) -> Result<Vec<SettlementInstruction>> {
        let debts = self
            .state
            .take_debts(currency)
            .ok_or_else(|| Error::UnknownCurrency(currency.to_string()))?;
        Ok(SettlementGenerator::new(debts)?.collect())
    }

    /// Settle every currency in name order
    pub fn settle_all(self) -> Result<(EntityRegistry, Vec<CurrencySettlement>)> {
        let (registry, state) = self.into_parts();
        let mut settlements = Vec::with_capacity(state.currency_count());
        for (currency, debts) in state.into_currencies() {
            let instructions = SettlementGenerator::new(debts)?.collect();
            settlements.push(CurrencySettlement {
                currency,
                instructions,
            });
        }
        Ok((registry, settlements))
    }
}
