use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of every regulation quarter in seconds
pub const QUARTER_SECONDS: u32 = 900;

/// Field length; 100 is the opponent's goal line
pub const FIELD_LENGTH: u8 = 100;

/// Yards needed from the line of scrimmage for a new set of downs
pub const FIRST_DOWN_YARDS: u8 = 10;

/// Spot where every drive starts after a kickoff or at the half
pub const RESTART_SPOT: u8 = 35;

/// Points for a touchdown
pub const TOUCHDOWN_POINTS: u32 = 6;

/// Points for a converted extra point
pub const EXTRA_POINT_POINTS: u32 = 1;

/// A team as supplied by the caller
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    pub name: String,
    pub overall: u8,
}

impl Team {
    pub fn new(name: impl Into<String>, overall: u8) -> Self {
        Self {
            name: name.into(),
            overall,
        }
    }
}

/// Game period. Overtime periods are numbered from 1.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Quarter {
    First,
    Second,
    Third,
    Fourth,
    Overtime(u8),
}

impl Quarter {
    /// The period following this one in ordinal order
    pub fn next(self) -> Self {
        match self {
            Quarter::First => Quarter::Second,
            Quarter::Second => Quarter::Third,
            Quarter::Third => Quarter::Fourth,
            Quarter::Fourth => Quarter::Overtime(1),
            Quarter::Overtime(n) => Quarter::Overtime(n.saturating_add(1)),
        }
    }

    pub fn is_overtime(self) -> bool {
        matches!(self, Quarter::Overtime(_))
    }

    /// Fourth quarter or any overtime period
    pub fn is_final_stretch(self) -> bool {
        self >= Quarter::Fourth
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quarter::First => write!(f, "Q1"),
            Quarter::Second => write!(f, "Q2"),
            Quarter::Third => write!(f, "Q3"),
            Quarter::Fourth => write!(f, "Q4"),
            Quarter::Overtime(n) => write!(f, "OT{}", n),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Down {
    First,
    Second,
    Third,
    Fourth,
}

/// Side of the field a team defends
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EndZone {
    East,
    West,
}

impl EndZone {
    pub fn opposite(self) -> Self {
        match self {
            EndZone::East => EndZone::West,
            EndZone::West => EndZone::East,
        }
    }
}

/// Which team holds the ball
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Possession {
    Home,
    Away,
}

impl Possession {
    pub fn other(self) -> Self {
        match self {
            Possession::Home => Possession::Away,
            Possession::Away => Possession::Home,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GameEvent {
    GameStart,
    PlayRan,
    KickOff,
    ExtraPoint,
    TouchDown,
    EndOfQuarter,
    EndOfRegulationPlay,
    EndOfGame,
}

/// One entry of the play-by-play log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameLog {
    pub event: GameEvent,
    /// Clock value when the event finished
    pub event_end_time: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yardage: Option<i8>,
    /// Whether an extra point scored; set only on extra point entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converted: Option<bool>,
}

impl GameLog {
    pub fn new(event: GameEvent, event_end_time: u32) -> Self {
        Self {
            event,
            event_end_time,
            yardage: None,
            converted: None,
        }
    }

    pub fn with_yardage(mut self, yards: i8) -> Self {
        self.yardage = Some(yards);
        self
    }

    pub fn with_conversion(mut self, converted: bool) -> Self {
        self.converted = Some(converted);
        self
    }
}
