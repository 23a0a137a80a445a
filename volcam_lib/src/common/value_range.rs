use std::fmt;
use std::ops::Range;

/// Range of sample values, such as the observed `(min, max)` of a volume.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct ValueRange {
    /// Lower bound
    pub low: f32,
    /// Upper bound
    pub high: f32,
}

impl ValueRange {
    /// Constructs new, empty range.
    pub fn empty() -> ValueRange {
        ValueRange {
            low: f32::NAN,
            high: f32::NAN,
        }
    }

    /// Constructs new range with one element, `val`.
    pub fn seed(val: f32) -> ValueRange {
        ValueRange {
            low: val,
            high: val,
        }
    }

    /// Constructs minimal range containing all samples.
    /// NaN samples are ignored.
    pub fn from_samples(samples: impl IntoIterator<Item = f32>) -> ValueRange {
        let mut range = ValueRange::empty();
        for val in samples {
            range.extend(val);
        }
        range
    }

    pub fn is_empty(&self) -> bool {
        self.low.is_nan() || self.high.is_nan()
    }

    /// Extend the range with new value.
    pub fn extend(&mut self, val: f32) {
        if val.is_nan() {
            return;
        }

        if self.is_empty() {
            self.low = val;
            self.high = val;
        }

        if val > self.high {
            self.high = val;
        }

        if val < self.low {
            self.low = val;
        }
    }

    /// Smallest range containing both ranges
    pub fn union(&self, other: &ValueRange) -> ValueRange {
        let mut range = *self;
        if !other.is_empty() {
            range.extend(other.low);
            range.extend(other.high);
        }
        range
    }

    /// Check if value is inside the range.
    pub fn contains(&self, val: f32) -> bool {
        self.low <= val && val <= self.high
    }

    pub fn width(&self) -> f32 {
        self.high - self.low
    }

    /// Map `val` into `<0;1>`, values outside the range are clamped.
    /// Degenerate (single value or empty) range maps everything to zero.
    pub fn normalize(&self, val: f32) -> f32 {
        let width = self.width();
        if width.is_nan() || width <= 0.0 {
            return 0.0;
        }
        ((val - self.low) / width).clamp(0.0, 1.0)
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}

/// Conversion from standard library type.
/// Unlocks simple syntax:
/// ```
/// # use volcam_lib::common::ValueRange;
/// let range: ValueRange = (0.0..45.5).into();
/// ```
impl From<Range<f32>> for ValueRange {
    fn from(range: Range<f32>) -> Self {
        ValueRange {
            low: range.start,
            high: range.end,
        }
    }
}
