use rand::{
    distributions::uniform::{SampleRange, SampleUniform, UniformSampler},
    RngCore,
};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Debug, Display},
    ops,
};

/// Numeric types that [NumRange] works with
pub trait Rangeable:
    Copy
    + Debug
    + Display
    + PartialOrd
    + ops::Add<Self, Output = Self>
    + ops::Sub<Self, Output = Self>
    + ops::Mul<Self, Output = Self>
    + ops::Div<Self, Output = Self>
{
    const ZERO: Self;
    const ONE: Self;
}

impl Rangeable for f32 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
}

impl Rangeable for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
}

/// An interval `[min, max]`, closed at both ends. Config uses these for
/// anything drawn at random; noise sampling uses them to rescale values.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NumRange<T> {
    pub min: T,
    pub max: T,
}

impl<T: Rangeable> NumRange<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// `[0, 1]`
    pub fn unit() -> Self {
        Self::new(T::ZERO, T::ONE)
    }

    /// Wrap a value to chain conversions on it. See [RangeValue].
    pub fn value(self, value: T) -> RangeValue<T> {
        RangeValue { value, range: self }
    }

    pub fn span(&self) -> T {
        self.max - self.min
    }

    /// `false` if min is above max. Such a range holds no values, and
    /// sampling from it would panic.
    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }

    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    /// Linearly rescale a value from this range into `dest`. Values outside
    /// this range land outside `dest` too. A zero-width source has no
    /// meaningful scale, so everything maps to `dest.min`.
    pub fn map_to(&self, dest: &Self, value: T) -> T {
        let span = self.span();
        if span > T::ZERO {
            dest.min + (value - self.min) / span * dest.span()
        } else {
            dest.min
        }
    }

    /// Rescale a value from this range into `[0, 1]`
    pub fn normalize(&self, value: T) -> T {
        self.map_to(&Self::unit(), value)
    }

    /// Snap a value to the nearest bound if it's outside the range
    pub fn clamp(&self, value: T) -> T {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }
}

impl<T: Display> Display for NumRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

// Lets ranges go straight into `Rng::gen_range`. Both ends are inclusive, so
// a zero-width range always yields its single value
impl<T: Rangeable + SampleUniform> SampleRange<T> for NumRange<T> {
    #[inline]
    fn sample_single<R: RngCore + ?Sized>(self, rng: &mut R) -> T {
        T::Sampler::sample_single_inclusive(self.min, self.max, rng)
    }

    #[inline]
    fn is_empty(&self) -> bool {
        !self.is_ordered()
    }
}

/// A value paired with the range it currently lives in, so rescaling steps
/// can be chained without repeating the ranges.
///
/// ```
/// use hexmap::NumRange;
///
/// let range: NumRange<f64> = NumRange::new(10.0, 20.0);
/// let value = range.value(15.0).normalize().apply(|x| x + 1.0).inner();
/// assert_eq!(value, 1.5);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct RangeValue<T> {
    value: T,
    range: NumRange<T>,
}

impl<T: Rangeable> RangeValue<T> {
    pub fn inner(self) -> T {
        self.value
    }

    /// Rescale into `[0, 1]`
    pub fn normalize(self) -> Self {
        self.map_to(NumRange::unit())
    }

    /// Rescale into another range, which becomes the value's new range
    pub fn map_to(self, range: NumRange<T>) -> Self {
        Self {
            value: self.range.map_to(&range, self.value),
            range,
        }
    }

    /// Clamp into the current range
    pub fn clamp(self) -> Self {
        Self {
            value: self.range.clamp(self.value),
            ..self
        }
    }

    /// Replace the value with `f(value)`, keeping the range
    pub fn apply(self, f: impl FnOnce(T) -> T) -> Self {
        Self {
            value: f(self.value),
            ..self
        }
    }
}
