//! Official rate of a currency against the base currency.

/// `official_rate` BYN per `scale` units of a currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rate {
    pub scale: f64,
    pub official_rate: f64,
}

impl Rate {
    /// The base currency quoted against itself.
    pub const BASE: Rate = Rate {
        scale: 1.0,
        official_rate: 1.0,
    };

    /// Returned alongside an error.
    pub const SENTINEL: Rate = Rate {
        scale: 1.0,
        official_rate: 0.0,
    };

    pub fn new(scale: f64, official_rate: f64) -> Self {
        Self {
            scale,
            official_rate,
        }
    }

    /// Converts an amount of this currency into the base currency.
    /// A zero scale yields 0.0.
    pub fn to_base(&self, amount: f64) -> f64 {
        if self.scale == 0.0 {
            return 0.0;
        }
        amount / self.scale * self.official_rate
    }

    /// Converts an amount of the base currency into this currency.
    /// A zero rate yields 0.0.
    pub fn from_base(&self, amount: f64) -> f64 {
        if self.official_rate == 0.0 {
            return 0.0;
        }
        amount / self.official_rate * self.scale
    }
}

impl From<Rate> for (f64, f64) {
    fn from(rate: Rate) -> Self {
        (rate.scale, rate.official_rate)
    }
}
