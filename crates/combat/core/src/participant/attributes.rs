use strum::Display;

/// Base combat attributes of a participant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attributes {
    pub attack: f32,
    pub defense: f32,

    /// Chance in `[0, 1]` that an eligible damage instance is critical.
    pub critical_probability: f32,

    /// Chance in basis points (10000 = always) to block an incoming attack.
    pub block_probability: u32,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            attack: 10.0,
            defense: 0.0,
            critical_probability: 0.0,
            block_probability: 0,
        }
    }
}

/// Attribute a status modifier adjusts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeKind {
    Attack,
    Defense,
    CriticalProbability,
}

/// Additive adjustment applied while the owning status is active.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeModifier {
    pub attribute: AttributeKind,
    pub value: f32,
}

impl AttributeModifier {
    pub fn new(attribute: AttributeKind, value: f32) -> Self {
        Self { attribute, value }
    }
}

/// Current and maximum health.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Health {
    current: u32,
    max: u32,
}

impl Health {
    pub fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }

    /// Subtracts up to `amount`, returning how much was removed.
    pub fn reduce(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.current);
        self.current -= removed;
        removed
    }

    /// Adds up to `amount` without exceeding the maximum, returning how much was added.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let added = amount.min(self.max - self.current);
        self.current += added;
        added
    }
}
