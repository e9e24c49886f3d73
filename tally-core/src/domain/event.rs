//! Ledger event model
//!
//! Events are the only input the ledger understands. They arrive already
//! parsed; turning text into events is the job of an event source.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Introduces a person under a canonical name plus optional aliases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonDefinition {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl PersonDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }
}

/// Names a set of persons and/or previously defined groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupDefinition {
    pub name: String,
    #[serde(default)]
    pub members: Vec<String>,
}

impl GroupDefinition {
    pub fn new<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyDefinition {
    pub name: String,
}

impl CurrencyDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Payers paid `amount` of `currency` on behalf of payees
///
/// The amount is split evenly on both sides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub payers: Vec<String>,
    pub amount: f64,
    pub currency: String,
    pub payees: Vec<String>,
}

impl Transaction {
    pub fn new<P, Q, S, T>(payers: P, amount: f64, currency: impl Into<String>, payees: Q) -> Self
    where
        P: IntoIterator<Item = S>,
        Q: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            payers: payers.into_iter().map(Into::into).collect(),
            amount,
            currency: currency.into(),
            payees: payees.into_iter().map(Into::into).collect(),
        }
    }
}

/// Declares that `source_amount` of one currency is worth `target_amount` of another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyConversion {
    pub source_amount: f64,
    pub source_currency: String,
    pub target_amount: f64,
    pub target_currency: String,
}

impl CurrencyConversion {
    pub fn new(
        source_amount: f64,
        source_currency: impl Into<String>,
        target_amount: f64,
        target_currency: impl Into<String>,
    ) -> Self {
        Self {
            source_amount,
            source_currency: source_currency.into(),
            target_amount,
            target_currency: target_currency.into(),
        }
    }

    /// Units of target currency per unit of source currency
    pub fn rate(&self) -> f64 {
        self.target_amount / self.source_amount
    }
}

/// A single ledger event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Person(PersonDefinition),
    Group(GroupDefinition),
    Currency(CurrencyDefinition),
    Transaction(Transaction),
    Conversion(CurrencyConversion),
}

impl Event {
    /// Short kind label, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Person(_) => "person",
            Event::Group(_) => "group",
            Event::Currency(_) => "currency",
            Event::Transaction(_) => "transaction",
            Event::Conversion(_) => "conversion",
        }
    }

    /// True for person, group and currency definitions
    pub fn is_definition(&self) -> bool {
        matches!(
            self,
            Event::Person(_) | Event::Group(_) | Event::Currency(_)
        )
    }
}

impl From<PersonDefinition> for Event {
    fn from(value: PersonDefinition) -> Self {
        Event::Person(value)
    }
}

impl From<GroupDefinition> for Event {
    fn from(value: GroupDefinition) -> Self {
        Event::Group(value)
    }
}

impl From<CurrencyDefinition> for Event {
    fn from(value: CurrencyDefinition) -> Self {
        Event::Currency(value)
    }
}

impl From<Transaction> for Event {
    fn from(value: Transaction) -> Self {
        Event::Transaction(value)
    }
}

impl From<CurrencyConversion> for Event {
    fn from(value: CurrencyConversion) -> Self {
        Event::Conversion(value)
    }
}

impl fmt::Display for PersonDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "def person {}", self.name)?;
        for alias in &self.aliases {
            write!(f, " {}", alias)?;
        }
        Ok(())
    }
}

impl fmt::Display for GroupDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "def group {}", self.name)?;
        for member in &self.members {
            write!(f, " {}", member)?;
        }
        Ok(())
    }
}

impl fmt::Display for CurrencyDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "def currency {}", self.name)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for payer in &self.payers {
            write!(f, "{} ", payer)?;
        }
        write!(f, "paid {}{} for", self.amount, self.currency)?;
        for payee in &self.payees {
            write!(f, " {}", payee)?;
        }
        Ok(())
    }
}

impl fmt::Display for CurrencyConversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "convert {}{} to {}{}",
            self.source_amount, self.source_currency, self.target_amount, self.target_currency
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Person(p) => fmt::Display::fmt(p, f),
            Event::Group(g) => fmt::Display::fmt(g, f),
            Event::Currency(c) => fmt::Display::fmt(c, f),
            Event::Transaction(t) => fmt::Display::fmt(t, f),
            Event::Conversion(c) => fmt::Display::fmt(c, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_line_form() {
        let person: Event = PersonDefinition::new("alice").with_aliases(["al", "ali"]).into();
        assert_eq!(person.to_string(), "def person alice al ali");

        let group: Event = GroupDefinition::new("team", ["alice", "bob"]).into();
        assert_eq!(group.to_string(), "def group team alice bob");

        let currency: Event = CurrencyDefinition::new("usd").into();
        assert_eq!(currency.to_string(), "def currency usd");

        let tx: Event = Transaction::new(["alice"], 30.0, "usd", ["alice", "bob", "carol"]).into();
        assert_eq!(tx.to_string(), "alice paid 30usd for alice bob carol");

        let conv: Event = CurrencyConversion::new(10.0, "usd", 8.0, "eur").into();
        assert_eq!(conv.to_string(), "convert 10usd to 8eur");
    }

    #[test]
    fn test_deserialize_tagged_event() {
        let json = r#"{"type":"person","name":"bob"}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event, Event::Person(PersonDefinition::new("bob")));

        let json = r#"{"type":"conversion","source_amount":10,"source_currency":"usd","target_amount":8,"target_currency":"eur"}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        match event {
            Event::Conversion(c) => assert!((c.rate() - 0.8).abs() < 1e-12),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_is_definition() {
        assert!(Event::from(CurrencyDefinition::new("czk")).is_definition());
        assert!(!Event::from(Transaction::new(["a"], 1.0, "czk", ["b"])).is_definition());
        assert!(!Event::from(CurrencyConversion::new(1.0, "a", 2.0, "b")).is_definition());
    }
}
