//! Bounded resource pools (HP, MP).

/// Integer resource meter tracked per character.
///
/// `current` always stays within `[0, maximum]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    current: u32,
    maximum: u32,
}

impl ResourceMeter {
    /// A meter filled to `maximum`.
    pub const fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    /// A meter at `current`, clamped to `maximum`.
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    pub const fn current(&self) -> u32 {
        self.current
    }

    pub const fn maximum(&self) -> u32 {
        self.maximum
    }

    pub const fn is_empty(&self) -> bool {
        self.current == 0
    }

    pub const fn is_full(&self) -> bool {
        self.current >= self.maximum
    }

    /// `current / max(1, maximum)`.
    pub fn ratio(&self) -> f64 {
        f64::from(self.current) / f64::from(self.maximum.max(1))
    }

    /// Removes up to `amount`, stopping at zero. Returns the amount removed.
    pub fn drain(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.current);
        self.current -= removed;
        removed
    }

    /// Adds up to `amount`, stopping at the maximum. Returns the amount added.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let added = amount.min(self.maximum - self.current);
        self.current += added;
        added
    }

    pub fn refill(&mut self) {
        self.current = self.maximum;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_and_restore_clamp() {
        let mut meter = ResourceMeter::full(10);
        assert_eq!(meter.drain(4), 4);
        assert_eq!(meter.drain(40), 6);
        assert!(meter.is_empty());
        assert_eq!(meter.restore(25), 10);
        assert!(meter.is_full());
    }

    #[test]
    fn ratio_guards_zero_maximum() {
        let meter = ResourceMeter::full(0);
        assert_eq!(meter.ratio(), 0.0);
        assert_eq!(ResourceMeter::new(29, 100).ratio(), 0.29);
    }
}
