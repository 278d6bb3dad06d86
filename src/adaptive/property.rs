//! Hysteresis/debounce classification of one scalar metric.
//!
//! An [`AdaptiveProperty`] samples its metric once per [`update`] call and
//! classifies the value into one of its zones. Two mechanisms keep the state
//! from flapping around zone edges:
//!
//! * hysteresis: a zone only becomes a switch candidate when the value sits
//!   inside its range narrowed by its own threshold. Values in the dead band
//!   between two narrowed ranges keep the current state, so entering and
//!   leaving a zone happen at different metric values.
//! * debounce: a candidate must stay selected for its delay before the
//!   switch commits; any frame where the candidate reverts resets the timer.
//!
//! `changing`/`changing_to`/`changing_from` compare against the previous
//! frame's committed state, so they are true exactly on the frame a switch
//! commits and false again on the next update.
//!
//! [`update`]: AdaptiveProperty::update

use log::trace;

use crate::adaptive::zones::Zones;
use crate::error::{Result, SpatialError};

pub struct AdaptiveProperty<S> {
    metric: Box<dyn FnMut() -> f32>,
    zones: Zones<S>,
    default_threshold: f32,
    default_delay_ms: f32,
    current: Option<usize>,
    previous: Option<usize>,
    pending: Option<usize>,
    pending_elapsed_ms: f32,
    last_value: f32,
}

impl<S: PartialEq> AdaptiveProperty<S> {
    pub fn new(metric: impl FnMut() -> f32 + 'static, zones: Zones<S>) -> Self {
        Self {
            metric: Box::new(metric),
            zones,
            default_threshold: 0.0,
            default_delay_ms: 0.0,
            current: None,
            previous: None,
            pending: None,
            pending_elapsed_ms: 0.0,
            last_value: 0.0,
        }
    }

    /// Hysteresis margin for zones that do not set their own.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.default_threshold = threshold;
        self
    }

    /// Commit delay for zones that do not set their own.
    pub fn with_delay_ms(mut self, delay_ms: f32) -> Self {
        self.default_delay_ms = delay_ms;
        self
    }

    fn threshold(&self, index: usize) -> f32 {
        self.zones.zone(index).threshold.unwrap_or(self.default_threshold)
    }

    fn delay_ms(&self, index: usize) -> f32 {
        self.zones.zone(index).delay_ms.unwrap_or(self.default_delay_ms)
    }

    /// Sample the metric and advance the classification by `delta_ms`.
    /// Non-finite metric values are rejected before they can corrupt state.
    pub fn update(&mut self, delta_ms: f32) -> Result<()> {
        let value = (self.metric)();
        if !value.is_finite() {
            return Err(SpatialError::InvalidMetric(value));
        }
        self.last_value = value;
        self.previous = self.current;

        let Some(current) = self.current else {
            // first sample classifies by raw pivots and commits immediately
            self.current = Some(self.zones.classify(value));
            return Ok(());
        };

        // the candidate is the zone whose narrowed range holds the value;
        // values in a dead band between narrowed ranges keep the current zone
        let candidate = (0..self.zones.len())
            .find(|&i| {
                let margin = self.threshold(i);
                value >= self.zones.lower_bound(i) + margin
                    && value < self.zones.upper_bound(i) - margin
            })
            .unwrap_or(current);

        if candidate == current {
            self.pending = None;
            self.pending_elapsed_ms = 0.0;
            return Ok(());
        }
        if self.pending == Some(candidate) {
            self.pending_elapsed_ms += delta_ms;
        } else {
            self.pending = Some(candidate);
            self.pending_elapsed_ms = 0.0;
        }
        if self.pending_elapsed_ms >= self.delay_ms(candidate) {
            trace!("adaptive state commit: zone {current} -> zone {candidate} at {value}");
            self.current = Some(candidate);
            self.pending = None;
            self.pending_elapsed_ms = 0.0;
        }
        Ok(())
    }

    /// Committed state, `None` before the first update.
    pub fn state(&self) -> Option<&S> {
        self.current.map(|i| &self.zones.zone(i).state)
    }

    /// State committed as of the previous update.
    pub fn previous_state(&self) -> Option<&S> {
        self.previous.map(|i| &self.zones.zone(i).state)
    }

    /// Metric value seen by the most recent update.
    pub fn value(&self) -> f32 {
        self.last_value
    }

    pub fn is(&self, state: &S) -> bool {
        self.state() == Some(state)
    }

    pub fn was(&self, state: &S) -> bool {
        self.previous_state() == Some(state)
    }

    /// True exactly on the update that commits a switch.
    pub fn changing(&self) -> bool {
        self.current != self.previous
    }

    pub fn changing_to(&self, state: &S) -> bool {
        self.changing() && self.is(state)
    }

    pub fn changing_from(&self, state: &S) -> bool {
        self.changing() && self.was(state)
    }
}
