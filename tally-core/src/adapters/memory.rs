//! In-memory event source

use crate::domain::result::Result;
use crate::domain::Event;
use crate::ports::EventSource;

/// Event source over any iterator of already-built events
pub struct IterSource<I> {
    events: I,
}

impl<I> IterSource<I>
where
    I: Iterator<Item = Event>,
{
    pub fn new<T>(events: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            events: events.into_iter(),
        }
    }
}

impl<I> EventSource for IterSource<I>
where
    I: Iterator<Item = Event>,
{
    fn name(&self) -> &str {
        "memory"
    }

    fn next_event(&mut self) -> Result<Option<Event>> {
        Ok(self.events.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CurrencyDefinition, PersonDefinition};

    #[test]
    fn test_yields_in_order_then_ends() {
        let mut source = IterSource::new(vec![
            Event::from(PersonDefinition::new("a")),
            Event::from(CurrencyDefinition::new("usd")),
        ]);

        assert_eq!(source.name(), "memory");
        assert_eq!(source.next_event().unwrap().unwrap().kind(), "person");
        assert_eq!(source.next_event().unwrap().unwrap().kind(), "currency");
        assert!(source.next_event().unwrap().is_none());
    }
}
