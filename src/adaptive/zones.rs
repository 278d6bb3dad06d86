//! Zone lists: an ordered partition of the metric axis.
//!
//! `n` zones are separated by `n - 1` strictly increasing pivot values. Each
//! zone may carry its own hysteresis threshold and commit delay; unset values
//! fall back to the property-wide defaults.

use crate::error::{Result, SpatialError};

/// One zone of a partition: the state it classifies to, plus optional
/// per-zone overrides for hysteresis and debounce.
#[derive(Clone, Debug)]
pub struct ZoneSpec<S> {
    pub state: S,
    pub threshold: Option<f32>,
    pub delay_ms: Option<f32>,
}

impl<S> ZoneSpec<S> {
    pub fn new(state: S) -> Self {
        Self {
            state,
            threshold: None,
            delay_ms: None,
        }
    }

    /// Hysteresis margin for leaving this zone, in metric units.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Debounce delay before committing a switch into this zone.
    pub fn with_delay_ms(mut self, delay_ms: f32) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }
}

impl<S> From<S> for ZoneSpec<S> {
    fn from(state: S) -> Self {
        Self::new(state)
    }
}

/// A validated, ordered zone list. Built through [`Zones::builder`]; the
/// pivots are guaranteed finite and strictly increasing.
#[derive(Clone, Debug)]
pub struct Zones<S> {
    zones: Vec<ZoneSpec<S>>,
    pivots: Vec<f32>,
}

impl<S> Zones<S> {
    /// Start a zone list with its lowest zone.
    pub fn builder(lowest: impl Into<ZoneSpec<S>>) -> ZonesBuilder<S> {
        ZonesBuilder {
            zones: vec![lowest.into()],
            pivots: Vec::new(),
        }
    }

    /// A single zone covering the whole axis.
    pub fn single(state: impl Into<ZoneSpec<S>>) -> Self {
        Self {
            zones: vec![state.into()],
            pivots: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn zone(&self, index: usize) -> &ZoneSpec<S> {
        &self.zones[index]
    }

    pub fn zones(&self) -> &[ZoneSpec<S>] {
        &self.zones
    }

    pub fn pivots(&self) -> &[f32] {
        &self.pivots
    }

    /// Lower edge of zone `index` (`-inf` for the lowest zone).
    pub fn lower_bound(&self, index: usize) -> f32 {
        if index == 0 {
            f32::NEG_INFINITY
        } else {
            self.pivots[index - 1]
        }
    }

    /// Upper edge of zone `index` (`+inf` for the highest zone).
    pub fn upper_bound(&self, index: usize) -> f32 {
        if index == self.pivots.len() {
            f32::INFINITY
        } else {
            self.pivots[index]
        }
    }

    /// Index of the zone containing `value`, by raw pivots (no hysteresis).
    /// A value exactly on a pivot belongs to the zone above it.
    pub fn classify(&self, value: f32) -> usize {
        self.pivots.iter().take_while(|&&p| value >= p).count()
    }
}

/// Builder alternating `.pivot(edge, next_zone)` calls; [`build`] validates
/// the pivot ordering.
///
/// [`build`]: ZonesBuilder::build
pub struct ZonesBuilder<S> {
    zones: Vec<ZoneSpec<S>>,
    pivots: Vec<f32>,
}

impl<S> ZonesBuilder<S> {
    /// Close the current zone at `edge` and open the next one above it.
    pub fn pivot(mut self, edge: f32, next: impl Into<ZoneSpec<S>>) -> Self {
        self.pivots.push(edge);
        self.zones.push(next.into());
        self
    }

    pub fn build(self) -> Result<Zones<S>> {
        for (i, &p) in self.pivots.iter().enumerate() {
            if !p.is_finite() {
                return Err(SpatialError::Configuration(format!(
                    "zone pivot {i} is not finite: {p}"
                )));
            }
            if i > 0 && p <= self.pivots[i - 1] {
                return Err(SpatialError::Configuration(format!(
                    "zone pivots must be strictly increasing, got {} then {}",
                    self.pivots[i - 1],
                    p
                )));
            }
        }
        Ok(Zones {
            zones: self.zones,
            pivots: self.pivots,
        })
    }
}
