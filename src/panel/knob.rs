use std::{f32::consts::PI, ops::RangeInclusive};

/// Where the indicator sits at the bottom of the range (radians from 12 o'clock).
const SWEEP_START: f32 = 0.2 * PI;
/// Total indicator travel, leaving a gap at the bottom of the dial.
const SWEEP: f32 = 1.6 * PI;
/// Indicator distance from the centre, as a fraction of the knob size.
const INDICATOR_RADIUS: f32 = 0.375;

/// A value bound to a closed range, changed by dragging in two dimensions.
///
/// Dragging right or up increases the value; left or down decreases it.
/// Both axes count, so a diagonal drag moves faster than a straight one.
#[derive(Debug, Clone, PartialEq)]
pub struct Knob {
    value: f32,
    range: RangeInclusive<f32>,
    x_sensitivity: f32,
    y_sensitivity: f32,
}

impl Knob {
    /// Reversed bounds are swapped.
    pub fn new(value: f32, range: RangeInclusive<f32>) -> Self {
        let (lo, hi) = (*range.start(), *range.end());
        let range = lo.min(hi)..=lo.max(hi);
        let mut knob = Self {
            value: *range.start(),
            range,
            x_sensitivity: 1.0,
            y_sensitivity: 1.0,
        };
        knob.set(value);
        knob
    }

    pub fn with_sensitivity(mut self, x: f32, y: f32) -> Self {
        self.x_sensitivity = x;
        self.y_sensitivity = y;
        self
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn range(&self) -> &RangeInclusive<f32> {
        &self.range
    }

    pub fn set(&mut self, value: f32) {
        self.value = value.clamp(*self.range.start(), *self.range.end());
    }

    /// Position inside the range, 0.0 at the bottom and 1.0 at the top.
    pub fn normalized(&self) -> f32 {
        let span = self.range.end() - self.range.start();
        if span <= 0.0 {
            return 0.0;
        }
        (self.value - self.range.start()) / span
    }

    pub fn set_normalized(&mut self, normalized: f32) {
        let span = self.range.end() - self.range.start();
        self.value = self.range.start() + normalized.clamp(0.0, 1.0) * span;
    }

    /// Apply a drag of `(dx, dy)` pixels (screen coordinates, y down) over a
    /// knob `extent` pixels across. A drag the full extent sweeps the range.
    /// Returns true if the value changed.
    pub fn drag(&mut self, dx: f32, dy: f32, extent: f32) -> bool {
        if extent <= 0.0 {
            return false;
        }
        let delta = (dx * self.x_sensitivity - dy * self.y_sensitivity) / extent;
        let before = self.value;
        self.set_normalized(self.normalized() + delta);
        self.value != before
    }

    /// Indicator rotation in radians, clockwise from 12 o'clock.
    pub fn angle(&self) -> f32 {
        self.normalized() * SWEEP + SWEEP_START
    }

    /// Indicator offset from the knob centre as a fraction of its size.
    pub fn indicator_offset(&self) -> (f32, f32) {
        let angle = self.angle();
        (-angle.sin() * INDICATOR_RADIUS, angle.cos() * INDICATOR_RADIUS)
    }
}
