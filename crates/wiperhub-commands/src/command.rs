//! Command data structures.
//!
//! Defines the core types for wiper command management. The serde renames
//! are the wire contract: bus controllers key their behavior off the literal
//! string tokens, so enums never serialize as integers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique command identifier.
pub type CommandId = String;

/// Transport network that owns a command.
///
/// Each protocol reaches a disjoint set of wiper controllers; a record is
/// only ever visible to the poller of its own protocol.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// CAN bus controller network.
    #[serde(rename = "CAN")]
    Can,
    /// LIN bus controller network.
    #[serde(rename = "LIN")]
    Lin,
}

impl Protocol {
    /// Parse a protocol from its wire token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "CAN" => Some(Protocol::Can),
            "LIN" => Some(Protocol::Lin),
            _ => None,
        }
    }

    /// Get the wire token.
    pub fn token(&self) -> &'static str {
        match self {
            Protocol::Can => "CAN",
            Protocol::Lin => "LIN",
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Logical wiper target.
///
/// `Both` is a single unit of work for the owning protocol's controller;
/// it is never split into separate front/back records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WiperTarget {
    /// Front windshield wipers.
    Front,
    /// Rear window wipers.
    Back,
    /// Front and rear together.
    Both,
}

impl WiperTarget {
    /// Parse a target from its wire token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "front" => Some(WiperTarget::Front),
            "back" => Some(WiperTarget::Back),
            "both" => Some(WiperTarget::Both),
            _ => None,
        }
    }

    /// Get the wire token.
    pub fn token(&self) -> &'static str {
        match self {
            WiperTarget::Front => "front",
            WiperTarget::Back => "back",
            WiperTarget::Both => "both",
        }
    }
}

/// Wipe speed class.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum WipeSpeed {
    /// Regular sweep cadence.
    #[default]
    Normal,
    /// Fast sweep cadence (heavy rain).
    Fast,
}

impl WipeSpeed {
    /// Parse a speed from its wire token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "normal" => Some(WipeSpeed::Normal),
            "fast" => Some(WipeSpeed::Fast),
            _ => None,
        }
    }

    /// Get the wire token.
    pub fn token(&self) -> &'static str {
        match self {
            WipeSpeed::Normal => "normal",
            WipeSpeed::Fast => "fast",
        }
    }
}

/// Inclusive bounds on the cycle count of a single command.
pub const MIN_CYCLES: u8 = 1;
pub const MAX_CYCLES: u8 = 5;

/// Command status tracking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CommandStatus {
    /// Created, waiting for the owning protocol's controller to execute it.
    Pending,
    /// Controller reported successful execution.
    Completed,
    /// Controller examined the command and declined to execute it
    /// (malformed for its hardware, or superseded by automatic mode).
    Ignored,
}

impl CommandStatus {
    /// Check if the status is terminal (no further transition possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, CommandStatus::Completed | CommandStatus::Ignored)
    }

    /// Parse a status from its wire token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "pending" => Some(CommandStatus::Pending),
            "completed" => Some(CommandStatus::Completed),
            "ignored" => Some(CommandStatus::Ignored),
            _ => None,
        }
    }

    /// Get the wire token.
    pub fn token(&self) -> &'static str {
        match self {
            CommandStatus::Pending => "pending",
            CommandStatus::Completed => "completed",
            CommandStatus::Ignored => "ignored",
        }
    }
}

impl std::fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Persisted wiper command record.
///
/// Created exclusively by the dispatch router, mutated exclusively by the
/// poll gateway, never deleted by the hub. Only `status` changes after
/// creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommandRecord {
    /// Unique command ID.
    pub id: CommandId,
    /// Owning transport network.
    pub protocol: Protocol,
    /// Wiper target.
    #[serde(rename = "wiperType")]
    pub wiper: WiperTarget,
    /// Sweep speed.
    pub speed: WipeSpeed,
    /// Number of sweep cycles, within [MIN_CYCLES, MAX_CYCLES].
    pub cycles: u8,
    /// Lifecycle status.
    pub status: CommandStatus,
    /// Creation timestamp; the delivery-order sort key.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl CommandRecord {
    /// Create a fresh pending record with a new UUID, stamped now.
    pub fn new(protocol: Protocol, wiper: WiperTarget, speed: WipeSpeed, cycles: u8) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            protocol,
            wiper,
            speed,
            cycles,
            status: CommandStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Check whether the record still awaits execution.
    pub fn is_pending(&self) -> bool {
        self.status == CommandStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_tokens() {
        assert_eq!(Protocol::from_token("CAN"), Some(Protocol::Can));
        assert_eq!(Protocol::from_token("LIN"), Some(Protocol::Lin));
        assert_eq!(Protocol::from_token("can"), None);
        assert_eq!(Protocol::Can.token(), "CAN");
    }

    #[test]
    fn test_wiper_target_tokens() {
        assert_eq!(WiperTarget::from_token("front"), Some(WiperTarget::Front));
        assert_eq!(WiperTarget::from_token("back"), Some(WiperTarget::Back));
        assert_eq!(WiperTarget::from_token("both"), Some(WiperTarget::Both));
        assert_eq!(WiperTarget::from_token("left"), None);
    }

    #[test]
    fn test_speed_tokens() {
        assert_eq!(WipeSpeed::from_token("normal"), Some(WipeSpeed::Normal));
        assert_eq!(WipeSpeed::from_token("fast"), Some(WipeSpeed::Fast));
        assert_eq!(WipeSpeed::from_token("turbo"), None);
    }

    #[test]
    fn test_status_is_terminal() {
        assert!(!CommandStatus::Pending.is_terminal());
        assert!(CommandStatus::Completed.is_terminal());
        assert!(CommandStatus::Ignored.is_terminal());
    }

    #[test]
    fn test_record_creation() {
        let record = CommandRecord::new(Protocol::Can, WiperTarget::Front, WipeSpeed::Fast, 3);

        assert!(!record.id.is_empty());
        assert_eq!(record.protocol, Protocol::Can);
        assert_eq!(record.wiper, WiperTarget::Front);
        assert_eq!(record.cycles, 3);
        assert_eq!(record.status, CommandStatus::Pending);
        assert!(record.is_pending());
    }

    #[test]
    fn test_record_ids_are_unique() {
        let a = CommandRecord::new(Protocol::Can, WiperTarget::Front, WipeSpeed::Normal, 1);
        let b = CommandRecord::new(Protocol::Can, WiperTarget::Front, WipeSpeed::Normal, 1);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_wire_serialization_uses_literal_tokens() {
        let record = CommandRecord::new(Protocol::Lin, WiperTarget::Both, WipeSpeed::Normal, 2);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["protocol"], "LIN");
        assert_eq!(json["wiperType"], "both");
        assert_eq!(json["speed"], "normal");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["cycles"], 2);
        // createdAt must be an RFC 3339 string, not an integer.
        assert!(json["createdAt"].is_string());
    }

    #[test]
    fn test_wire_roundtrip_preserves_timestamp_precision() {
        let mut record = CommandRecord::new(Protocol::Can, WiperTarget::Front, WipeSpeed::Fast, 5);
        record.created_at = "2024-03-01T08:15:30.456Z".parse().unwrap();

        let json = serde_json::to_string(&record).unwrap();
        let back: CommandRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
        assert_eq!(back.created_at.timestamp_subsec_millis(), 456);
    }
}
