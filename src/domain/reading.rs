// Meter reading domain model
use serde::{Deserialize, Serialize};

/// Lowest balance a meter can report.
pub const MIN_BALANCE: f64 = 0.0;
/// Highest balance a meter can report.
pub const MAX_BALANCE: f64 = 1000.0;

const SUFFICIENT_THRESHOLD: f64 = 100.0;
const LOW_THRESHOLD: f64 = 10.0;

/// One meter sample as recorded in a period file.
///
/// `time` is `"MM-DD"` or `"MM-DD HH:mm"`; the year is implied by context.
/// Either balance may be missing when the recorder could not reach that
/// circuit's meter.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Reading {
    pub time: String,
    #[serde(rename = "light_Balance")]
    pub light_balance: Option<f64>,
    #[serde(rename = "ac_Balance")]
    pub ac_balance: Option<f64>,
}

/// The two metered circuits of a dorm room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Circuit {
    Light,
    Ac,
}

impl Reading {
    pub fn balance(&self, circuit: Circuit) -> Option<f64> {
        match circuit {
            Circuit::Light => self.light_balance,
            Circuit::Ac => self.ac_balance,
        }
    }

    pub fn set_balance(&mut self, circuit: Circuit, value: f64) {
        match circuit {
            Circuit::Light => self.light_balance = Some(value),
            Circuit::Ac => self.ac_balance = Some(value),
        }
    }
}

/// Range-checks a balance before it enters consumption arithmetic.
///
/// Out-of-range or non-finite values sanitize to 0; valid values are rounded
/// to two decimals, matching the meter's reporting precision.
pub fn sanitize_balance(value: f64) -> f64 {
    if !value.is_finite() || !(MIN_BALANCE..=MAX_BALANCE).contains(&value) {
        tracing::warn!("invalid balance value {value}, substituting 0");
        return 0.0;
    }
    (value * 100.0).round() / 100.0
}

/// Remaining-balance classification shown on the dashboard tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceLevel {
    Sufficient,
    Low,
    Insufficient,
}

impl BalanceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BalanceLevel::Sufficient => "sufficient",
            BalanceLevel::Low => "low",
            BalanceLevel::Insufficient => "insufficient",
        }
    }
}

/// Classifies a balance and derives the meter-gauge percentage for it.
pub fn classify_balance(value: f64) -> (BalanceLevel, f64) {
    if value > SUFFICIENT_THRESHOLD {
        (BalanceLevel::Sufficient, 100.0)
    } else if value > LOW_THRESHOLD {
        (BalanceLevel::Low, value.min(100.0))
    } else {
        (BalanceLevel::Insufficient, value)
    }
}
