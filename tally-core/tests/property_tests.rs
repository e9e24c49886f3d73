//! Property tests for ledger invariants
//!
//! Random event streams are generated from a fixed pool of names so that
//! most events are valid; invalid ones must fail cleanly without panics.

use std::collections::BTreeSet;

use proptest::prelude::*;

use tally_core::{
    CurrencyConversion, CurrencyDefinition, Event, GroupDefinition, Ledger, PersonDefinition,
    SettlementGenerator, Transaction, SETTLEMENT_EPSILON,
};

const PEOPLE: [&str; 6] = ["ann", "ben", "cat", "dan", "eve", "fay"];
const CURRENCIES: [&str; 3] = ["usd", "eur", "czk"];
const GROUPS: [&str; 2] = ["flat", "trip"];

fn person_event() -> impl Strategy<Value = Event> {
    prop::sample::select(PEOPLE.to_vec()).prop_map(|name| Event::from(PersonDefinition::new(name)))
}

fn currency_event() -> impl Strategy<Value = Event> {
    prop::sample::select(CURRENCIES.to_vec()).prop_map(|name| Event::from(CurrencyDefinition::new(name)))
}

fn group_event() -> impl Strategy<Value = Event> {
    let names: Vec<&str> = PEOPLE.iter().chain(GROUPS.iter()).copied().collect();
    (
        prop::sample::select(GROUPS.to_vec()),
        prop::sample::subsequence(names, 0..=4),
    )
        .prop_map(|(name, members)| Event::from(GroupDefinition::new(name, members)))
}

fn conversion_event() -> impl Strategy<Value = Event> {
    (
        1u32..1_000,
        prop::sample::select(CURRENCIES.to_vec()),
        1u32..1_000,
        prop::sample::select(CURRENCIES.to_vec()),
    )
        .prop_map(|(from, source, to, target)| {
            Event::from(CurrencyConversion::new(f64::from(from), source, f64::from(to), target))
        })
}

fn participants() -> impl Strategy<Value = Vec<&'static str>> {
    let names: Vec<&str> = PEOPLE.iter().chain(GROUPS.iter()).copied().collect();
    prop::sample::subsequence(names, 1..=4)
}

fn transaction_event() -> impl Strategy<Value = Event> {
    (
        participants(),
        1u32..100_000,
        prop::sample::select(CURRENCIES.to_vec()),
        participants(),
    )
        .prop_map(|(payers, cents, currency, payees)| {
            Event::from(Transaction::new(payers, f64::from(cents) / 100.0, currency, payees))
        })
}

fn event_stream() -> impl Strategy<Value = Vec<Event>> {
    prop::collection::vec(
        prop_oneof![
            2 => person_event(),
            1 => currency_event(),
            1 => group_event(),
            1 => conversion_event(),
            4 => transaction_event(),
        ],
        0..40,
    )
}

/// Apply events one by one, skipping those the ledger rejects
fn fold_valid(events: Vec<Event>) -> Vec<Ledger> {
    let mut snapshots = Vec::new();
    let mut ledger = Ledger::new();
    for event in events {
        if let Ok(next) = ledger.clone().apply(event) {
            ledger = next;
            snapshots.push(ledger.clone());
        }
    }
    snapshots
}

proptest! {
    #[test]
    fn prop_vectors_track_person_count(events in event_stream()) {
        for ledger in fold_valid(events) {
            for name in ledger.state().currency_names() {
                prop_assert_eq!(ledger.debts(name).unwrap().len(), ledger.person_count());
            }
        }
    }

    #[test]
    fn prop_transactions_conserve_money(events in event_stream()) {
        if let Some(ledger) = fold_valid(events).pop() {
            // Rates scale float error, so only unconverted currencies are checked
            let converted: BTreeSet<&str> = ledger
                .state()
                .conversions()
                .flat_map(|(source, rule)| [source, rule.target.as_str()])
                .collect();
            for name in ledger.state().currency_names().filter(|n| !converted.contains(n)) {
                let sum: f64 = ledger.debts(name).unwrap().iter().sum();
                prop_assert!(sum.abs() < 1e-6, "{} sums to {}", name, sum);
            }
        }
    }

    #[test]
    fn prop_settlement_zeroes_balances(
        balances in prop::collection::vec(-100_000i32..100_000, 2..12)
    ) {
        // Make the vector sum to zero the way a real ledger would
        let mut debts: Vec<f64> = balances.iter().map(|&c| f64::from(c) / 100.0).collect();
        let total: f64 = debts.iter().sum();
        debts[0] -= total;
        let n = debts.len();

        let mut generator = SettlementGenerator::new(debts).unwrap();
        let instructions: Vec<_> = generator.by_ref().collect();

        prop_assert!(instructions.len() <= n - 1);
        for instruction in &instructions {
            prop_assert!(instruction.amount > 0.0);
            prop_assert_ne!(instruction.debtor, instruction.creditor);
        }
        for remaining in generator.remaining() {
            prop_assert!(remaining.abs() < SETTLEMENT_EPSILON);
        }
    }

    #[test]
    fn prop_group_of_groups_is_union(split in 1usize..PEOPLE.len()) {
        let mut events: Vec<Event> = PEOPLE.iter().map(|&p| PersonDefinition::new(p).into()).collect();
        events.push(GroupDefinition::new("left", PEOPLE[..split].iter().copied()).into());
        events.push(GroupDefinition::new("right", PEOPLE[split..].iter().copied()).into());
        events.push(GroupDefinition::new("everyone", ["left", "right"]).into());

        let ledger = Ledger::from_events(events).unwrap();
        let members: Vec<usize> = ledger
            .registry()
            .group_members("everyone")
            .unwrap()
            .iter()
            .copied()
            .collect();
        prop_assert_eq!(members, (0..PEOPLE.len()).collect::<Vec<_>>());
    }
}
