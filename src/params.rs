//! Parameter descriptors exposed to host/UI collaborators.

#![forbid(unsafe_code)]

/// Static description of one automatable parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    /// Stable identifier used by hosts for automation.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Lowest accepted value.
    pub min: f32,
    /// Highest accepted value.
    pub max: f32,
    /// Value a host restores on reset.
    pub default: f32,
}

impl ParamSpec {
    /// Clamp `value` into `[min, max]`. NaN is passed through unchanged.
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Whether `value` lies inside the range.
    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Map `value` to `[0, 1]` across the range.
    pub fn normalize(&self, value: f32) -> f32 {
        (self.clamp(value) - self.min) / (self.max - self.min)
    }
}

/// Output gain, linear.
pub const GAIN: ParamSpec = ParamSpec {
    id: "gain",
    name: "Gain",
    min: 0.0,
    max: 1.0,
    default: 0.5,
};

/// Tone frequency in Hz. The range drives host/UI mapping only; the control
/// surface accepts any positive finite frequency.
pub const FREQUENCY: ParamSpec = ParamSpec {
    id: "frequency",
    name: "Frequency",
    min: 1.0,
    max: 20_000.0,
    default: 220.0,
};

/// All parameters, in registration order.
pub const ALL: &[ParamSpec] = &[GAIN, FREQUENCY];

/// Look up a parameter by its identifier.
pub fn by_id(id: &str) -> Option<&'static ParamSpec> {
    ALL.iter().find(|p| p.id == id)
}
