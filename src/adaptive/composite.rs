//! Conjunctive queries over a named set of adaptive properties.

use indexmap::IndexMap;

use crate::adaptive::property::AdaptiveProperty;
use crate::error::Result;

/// A bag of named [`AdaptiveProperty`]s sharing one state type, queried as a
/// conjunction: `is(&[("range", Near), ("speed", Slow)])`. Iteration order
/// follows insertion order, so updates are deterministic.
pub struct CompositeState<S> {
    props: IndexMap<String, AdaptiveProperty<S>>,
}

impl<S: PartialEq> CompositeState<S> {
    pub fn new() -> Self {
        Self {
            props: IndexMap::new(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, property: AdaptiveProperty<S>) {
        self.props.insert(name.into(), property);
    }

    pub fn get(&self, name: &str) -> Option<&AdaptiveProperty<S>> {
        self.props.get(name)
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Update every property. The first failure aborts and is returned;
    /// properties before it keep their new state.
    pub fn update(&mut self, delta_ms: f32) -> Result<()> {
        for prop in self.props.values_mut() {
            prop.update(delta_ms)?;
        }
        Ok(())
    }

    /// True when every named property is in the paired state. Unknown names
    /// fail the conjunction.
    pub fn is(&self, query: &[(&str, S)]) -> bool {
        query
            .iter()
            .all(|(name, state)| self.get(name).is_some_and(|p| p.is(state)))
    }

    /// True when every named property was in the paired state on the previous
    /// update.
    pub fn was(&self, query: &[(&str, S)]) -> bool {
        query
            .iter()
            .all(|(name, state)| self.get(name).is_some_and(|p| p.was(state)))
    }

    /// True on the exact update where the conjunction first becomes
    /// satisfied: every named property is in the paired state and at least
    /// one of them committed a switch this update.
    pub fn changing_to(&self, query: &[(&str, S)]) -> bool {
        let mut any_changing = false;
        for (name, state) in query {
            let Some(prop) = self.get(name) else {
                return false;
            };
            if !prop.is(state) {
                return false;
            }
            if prop.changing() {
                any_changing = true;
            }
        }
        any_changing
    }

    /// Counterpart of [`changing_to`](Self::changing_to) over the previous
    /// update's states: true on the exact update where the conjunction stops
    /// being satisfied.
    pub fn changing_from(&self, query: &[(&str, S)]) -> bool {
        let mut any_changing = false;
        for (name, state) in query {
            let Some(prop) = self.get(name) else {
                return false;
            };
            if !prop.was(state) {
                return false;
            }
            if prop.changing() {
                any_changing = true;
            }
        }
        any_changing
    }
}

impl<S: PartialEq> Default for CompositeState<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adaptive::zones::Zones;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Level {
        Low,
        High,
    }

    fn property(value: Rc<Cell<f32>>, delay_ms: f32) -> AdaptiveProperty<Level> {
        let zones = Zones::builder(Level::Low)
            .pivot(10.0, Level::High)
            .build()
            .unwrap();
        AdaptiveProperty::new(move || value.get(), zones).with_delay_ms(delay_ms)
    }

    #[test]
    fn test_conjunctive_is() {
        let a = Rc::new(Cell::new(5.0));
        let b = Rc::new(Cell::new(15.0));
        let mut composite = CompositeState::new();
        composite.insert("range", property(Rc::clone(&a), 0.0));
        composite.insert("speed", property(Rc::clone(&b), 0.0));
        composite.update(16.0).unwrap();

        assert!(composite.is(&[("range", Level::Low)]));
        assert!(composite.is(&[("range", Level::Low), ("speed", Level::High)]));
        assert!(!composite.is(&[("range", Level::High), ("speed", Level::High)]));
        assert!(!composite.is(&[("missing", Level::Low)]));
    }

    #[test]
    fn test_changing_to_fires_on_commit_frame_only() {
        let a = Rc::new(Cell::new(5.0));
        let b = Rc::new(Cell::new(5.0));
        let mut composite = CompositeState::new();
        composite.insert("range", property(Rc::clone(&a), 0.0));
        composite.insert("speed", property(Rc::clone(&b), 0.0));
        composite.update(16.0).unwrap();
        composite.update(16.0).unwrap();

        // steady state: conjunction holds but nothing committed this update
        assert!(composite.is(&[("range", Level::Low), ("speed", Level::Low)]));
        assert!(!composite.changing_to(&[("range", Level::Low), ("speed", Level::Low)]));

        // range commits High while speed already holds Low
        a.set(15.0);
        composite.update(16.0).unwrap();
        assert!(composite.changing_to(&[("range", Level::High), ("speed", Level::Low)]));
        assert!(composite.changing_from(&[("range", Level::Low), ("speed", Level::Low)]));
        assert!(!composite.changing_to(&[("range", Level::High), ("speed", Level::High)]));

        // one update later the commit frame has passed
        composite.update(16.0).unwrap();
        assert!(composite.is(&[("range", Level::High), ("speed", Level::Low)]));
        assert!(!composite.changing_to(&[("range", Level::High), ("speed", Level::Low)]));
    }

    #[test]
    fn test_update_propagates_first_error() {
        let a = Rc::new(Cell::new(f32::NAN));
        let mut composite = CompositeState::new();
        composite.insert("bad", property(a, 0.0));
        assert!(composite.update(16.0).is_err());
    }
}
