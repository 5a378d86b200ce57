//! Light gate

/// Default raw threshold of the photoresistor divider
pub const DEFAULT_LIGHT_THRESHOLD: u16 = 3500;

/// Raw analog sample from the light sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LightReading(pub u16);

/// Decides whether the enclosure is open from a light reading.
///
/// The divider is wired so that light pulls the raw value *down*: a reading
/// below the threshold means open. Keep this polarity when recalibrating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightGate {
    threshold: u16,
}

impl LightGate {
    pub const fn new(threshold: u16) -> Self {
        Self { threshold }
    }

    pub const fn threshold(&self) -> u16 {
        self.threshold
    }

    pub const fn is_open(&self, reading: LightReading) -> bool {
        reading.0 < self.threshold
    }
}

impl Default for LightGate {
    fn default() -> Self {
        Self::new(DEFAULT_LIGHT_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_threshold_is_open() {
        let gate = LightGate::default();
        assert!(gate.is_open(LightReading(0)));
        assert!(gate.is_open(LightReading(3499)));
    }

    #[test]
    fn at_or_above_threshold_is_closed() {
        let gate = LightGate::default();
        assert!(!gate.is_open(LightReading(3500)));
        assert!(!gate.is_open(LightReading(4095)));
    }

    #[test]
    fn custom_threshold() {
        let gate = LightGate::new(100);
        assert_eq!(gate.threshold(), 100);
        assert!(gate.is_open(LightReading(99)));
        assert!(!gate.is_open(LightReading(100)));
    }
}
