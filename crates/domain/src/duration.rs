//! Watering duration — the fixed enumeration of selectable run lengths.
//!
//! The presentation layer offers a fixed set of minute choices rather than
//! free-form input, so the domain models them as a closed enum.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One of the selectable watering lengths, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum WateringDuration {
    M5,
    M10,
    M15,
    M20,
    M25,
    M30,
}

impl WateringDuration {
    /// All choices, in menu order.
    pub const ALL: [Self; 6] = [
        Self::M5,
        Self::M10,
        Self::M15,
        Self::M20,
        Self::M25,
        Self::M30,
    ];

    /// The length in whole minutes.
    #[must_use]
    pub fn minutes(self) -> u32 {
        match self {
            Self::M5 => 5,
            Self::M10 => 10,
            Self::M15 => 15,
            Self::M20 => 20,
            Self::M25 => 25,
            Self::M30 => 30,
        }
    }

    /// The length in whole seconds.
    #[must_use]
    pub fn seconds(self) -> u32 {
        self.minutes() * 60
    }
}

impl TryFrom<u32> for WateringDuration {
    type Error = ValidationError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|choice| choice.minutes() == minutes)
            .ok_or(ValidationError::UnsupportedDuration { minutes })
    }
}

impl From<WateringDuration> for u32 {
    fn from(value: WateringDuration) -> Self {
        value.minutes()
    }
}
