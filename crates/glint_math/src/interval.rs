/// A closed scalar range `[min, max]`.
///
/// Used both as the valid ray-parameter window during intersection and as
/// the clamp range for color channels. `min > max` only for [`Interval::EMPTY`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// An empty interval (min > max, contains nothing).
    pub const EMPTY: Interval = Interval {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    /// A universe interval (contains everything).
    pub const UNIVERSE: Interval = Interval {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };

    /// Create a new interval given min and max values.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// The interval that contains nothing.
    pub const fn empty() -> Self {
        Self::EMPTY
    }

    /// The interval spanning the whole real line.
    pub const fn universe() -> Self {
        Self::UNIVERSE
    }

    /// Returns the size of the interval (max - min).
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Clamps x to be within the interval [min, max].
    ///
    /// Unlike `f32::clamp` this never panics, so it is safe on `EMPTY`.
    pub fn clamp(&self, x: f32) -> f32 {
        if x < self.min {
            return self.min;
        }
        if x > self.max {
            return self.max;
        }
        x
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_creation() {
        let interval = Interval::new(0.0, 10.0);
        assert_eq!(interval.min, 0.0);
        assert_eq!(interval.max, 10.0);
    }

    #[test]
    fn test_interval_size() {
        let interval = Interval::new(2.0, 7.0);
        assert_eq!(interval.size(), 5.0);

        let negative = Interval::new(-5.0, 5.0);
        assert_eq!(negative.size(), 10.0);
    }

    #[test]
    fn test_interval_contains() {
        let interval = Interval::new(0.0, 10.0);

        // Inclusive bounds
        assert!(interval.contains(0.0));
        assert!(interval.contains(10.0));
        assert!(interval.contains(5.0));

        assert!(!interval.contains(-0.1));
        assert!(!interval.contains(10.1));
    }

    #[test]
    fn test_interval_surrounds() {
        let interval = Interval::new(0.0, 10.0);

        // Exclusive bounds - endpoints NOT included
        assert!(!interval.surrounds(0.0));
        assert!(!interval.surrounds(10.0));

        assert!(interval.surrounds(5.0));
        assert!(interval.surrounds(0.1));
        assert!(interval.surrounds(9.9));

        assert!(!interval.surrounds(-0.1));
        assert!(!interval.surrounds(10.1));
    }

    #[test]
    fn test_interval_clamp() {
        let interval = Interval::new(0.0, 10.0);

        assert_eq!(interval.clamp(-5.0), 0.0);
        assert_eq!(interval.clamp(0.0), 0.0);
        assert_eq!(interval.clamp(5.0), 5.0);
        assert_eq!(interval.clamp(10.0), 10.0);
        assert_eq!(interval.clamp(15.0), 10.0);
    }

    #[test]
    fn test_clamp_output_within_bounds() {
        let intervals = [
            Interval::new(0.0, 1.0),
            Interval::new(-3.0, -1.0),
            Interval::new(2.5, 2.5),
        ];
        let samples = [-1e6, -2.0, -0.5, 0.0, 0.3, 1.0, 2.5, 7.0, 1e6];

        for interval in intervals {
            for x in samples {
                let clamped = interval.clamp(x);
                assert!(interval.contains(clamped), "{clamped} outside {interval:?}");
            }
        }
    }

    #[test]
    fn test_interval_empty() {
        let empty = Interval::EMPTY;

        // Empty interval has min > max
        assert!(empty.min > empty.max);
        assert_eq!(empty.size(), f32::NEG_INFINITY);
        assert_eq!(Interval::default(), empty);
        assert_eq!(Interval::empty(), empty);

        for x in [-1e30, -1.0, 0.0, 1.0, 1e30, f32::MAX, f32::MIN] {
            assert!(!empty.contains(x));
            assert!(!empty.surrounds(x));
        }
    }

    #[test]
    fn test_empty_clamp_does_not_panic() {
        let clamped = Interval::EMPTY.clamp(0.5);
        assert_eq!(clamped, f32::INFINITY);
    }

    #[test]
    fn test_interval_universe() {
        let universe = Interval::universe();

        assert!(universe.contains(0.0));
        assert!(universe.contains(1e10));
        assert!(universe.contains(-1e10));
        assert!(universe.surrounds(1e30));
        assert_eq!(universe.size(), f32::INFINITY);
    }
}
