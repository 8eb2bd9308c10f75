//! Intent validation.
//!
//! Normalizes a raw actuation request into the closed domain vocabulary.
//! Validation is pure: it never touches the store, and it reports the first
//! offending field in wire order (protocol, wiperType, speed, cycles).

use serde::{Deserialize, Serialize};

use crate::command::{MAX_CYCLES, MIN_CYCLES, Protocol, WipeSpeed, WiperTarget};

/// Raw actuation request as submitted by an operator.
///
/// Fields are loosely typed on purpose: the validator, not the
/// deserializer, owns rejection so that errors name the offending field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WipeRequest {
    /// Requested transport network ("CAN" or "LIN").
    pub protocol: String,
    /// Requested wiper target ("front", "back" or "both").
    #[serde(rename = "wiperType")]
    pub wiper_type: String,
    /// Requested speed ("normal" or "fast").
    pub speed: String,
    /// Requested sweep cycles.
    pub cycles: i64,
}

/// Validation failure, naming the first offending field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Unknown protocol token.
    #[error("invalid protocol {0:?}, expected \"CAN\" or \"LIN\"")]
    Protocol(String),

    /// Unknown wiper target token.
    #[error("invalid wiperType {0:?}, expected \"front\", \"back\" or \"both\"")]
    WiperType(String),

    /// Unknown speed token.
    #[error("invalid speed {0:?}, expected \"normal\" or \"fast\"")]
    Speed(String),

    /// Cycle count outside the permitted range.
    #[error("invalid cycles {0}, expected an integer in [{MIN_CYCLES}, {MAX_CYCLES}]")]
    Cycles(i64),
}

impl ValidationError {
    /// Wire-level name of the rejected field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Protocol(_) => "protocol",
            ValidationError::WiperType(_) => "wiperType",
            ValidationError::Speed(_) => "speed",
            ValidationError::Cycles(_) => "cycles",
        }
    }
}

/// Validated actuation intent, not yet persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WipeIntent {
    /// Target transport network.
    pub protocol: Protocol,
    /// Wiper target.
    pub wiper: WiperTarget,
    /// Sweep speed.
    pub speed: WipeSpeed,
    /// Sweep cycles, within [MIN_CYCLES, MAX_CYCLES].
    pub cycles: u8,
}

impl WipeIntent {
    /// Validate a raw request into a normalized intent.
    ///
    /// Checks fields in wire order and fails on the first offender.
    pub fn validate(request: &WipeRequest) -> Result<Self, ValidationError> {
        let protocol = Protocol::from_token(&request.protocol)
            .ok_or_else(|| ValidationError::Protocol(request.protocol.clone()))?;

        let wiper = WiperTarget::from_token(&request.wiper_type)
            .ok_or_else(|| ValidationError::WiperType(request.wiper_type.clone()))?;

        let speed = WipeSpeed::from_token(&request.speed)
            .ok_or_else(|| ValidationError::Speed(request.speed.clone()))?;

        if request.cycles < MIN_CYCLES as i64 || request.cycles > MAX_CYCLES as i64 {
            return Err(ValidationError::Cycles(request.cycles));
        }

        Ok(WipeIntent {
            protocol,
            wiper,
            speed,
            cycles: request.cycles as u8,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(protocol: &str, wiper: &str, speed: &str, cycles: i64) -> WipeRequest {
        WipeRequest {
            protocol: protocol.to_string(),
            wiper_type: wiper.to_string(),
            speed: speed.to_string(),
            cycles,
        }
    }

    #[test]
    fn test_valid_request_normalizes() {
        let intent = WipeIntent::validate(&request("CAN", "front", "fast", 3)).unwrap();

        assert_eq!(intent.protocol, Protocol::Can);
        assert_eq!(intent.wiper, WiperTarget::Front);
        assert_eq!(intent.speed, WipeSpeed::Fast);
        assert_eq!(intent.cycles, 3);
    }

    #[test]
    fn test_cycle_bounds_inclusive() {
        assert!(WipeIntent::validate(&request("LIN", "back", "normal", 1)).is_ok());
        assert!(WipeIntent::validate(&request("LIN", "back", "normal", 5)).is_ok());
    }

    #[test]
    fn test_invalid_protocol() {
        let err = WipeIntent::validate(&request("SPI", "front", "normal", 2)).unwrap_err();
        assert_eq!(err, ValidationError::Protocol("SPI".to_string()));
        assert_eq!(err.field(), "protocol");
    }

    #[test]
    fn test_invalid_wiper_type() {
        let err = WipeIntent::validate(&request("CAN", "side", "normal", 2)).unwrap_err();
        assert_eq!(err, ValidationError::WiperType("side".to_string()));
        assert_eq!(err.field(), "wiperType");
    }

    #[test]
    fn test_invalid_speed() {
        let err = WipeIntent::validate(&request("CAN", "front", "ludicrous", 2)).unwrap_err();
        assert_eq!(err, ValidationError::Speed("ludicrous".to_string()));
        assert_eq!(err.field(), "speed");
    }

    #[test]
    fn test_cycles_out_of_range() {
        let err = WipeIntent::validate(&request("CAN", "front", "normal", 0)).unwrap_err();
        assert_eq!(err, ValidationError::Cycles(0));

        let err = WipeIntent::validate(&request("CAN", "front", "normal", 6)).unwrap_err();
        assert_eq!(err, ValidationError::Cycles(6));
        assert_eq!(err.field(), "cycles");
    }

    #[test]
    fn test_first_offending_field_wins() {
        // Everything is wrong; protocol is reported because it comes first.
        let err = WipeIntent::validate(&request("SPI", "side", "ludicrous", 99)).unwrap_err();
        assert_eq!(err.field(), "protocol");
    }
}
