//! Maneuver codes reported by the pedestrian routing provider
//!
//! Each route point carries an integer `turnType`. Codes are matched exactly
//! first, then by range (`1..=7`, `185..=189`); anything else is `Unknown`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of navigation action at a route point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnType {
    /// Codes 1-7, points without guidance
    NoGuidance(i32),
    /// 11
    Straight,
    /// 12
    Left,
    /// 13
    Right,
    /// 14
    UTurn,
    /// 16, left toward 8 o'clock
    LeftEightOClock,
    /// 17, left toward 10 o'clock
    LeftTenOClock,
    /// 18, right toward 2 o'clock
    RightTwoOClock,
    /// 19, right toward 4 o'clock
    RightFourOClock,
    /// 125
    Overpass,
    /// 126
    Underpass,
    /// 127
    Stairs,
    /// 128
    Ramp,
    /// 129
    StairsAndRamp,
    /// 184, unnumbered waypoint
    Waypoint,
    /// 185-189, first to fifth waypoint (ordinal 1..=5)
    NumberedWaypoint(u8),
    /// 200
    Start,
    /// 201
    Destination,
    /// 211
    Crosswalk,
    /// 212
    CrosswalkLeft,
    /// 213
    CrosswalkRight,
    /// 214
    CrosswalkEightOClock,
    /// 215
    CrosswalkTenOClock,
    /// 216
    CrosswalkTwoOClock,
    /// 217
    CrosswalkFourOClock,
    /// 218
    Elevator,
    /// 233, provisional straight
    StraightTemporary,
    /// Any other code
    Unknown(i32),
}

impl TurnType {
    /// Classify a raw provider code
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            1..=7 => Self::NoGuidance(code),
            11 => Self::Straight,
            12 => Self::Left,
            13 => Self::Right,
            14 => Self::UTurn,
            16 => Self::LeftEightOClock,
            17 => Self::LeftTenOClock,
            18 => Self::RightTwoOClock,
            19 => Self::RightFourOClock,
            125 => Self::Overpass,
            126 => Self::Underpass,
            127 => Self::Stairs,
            128 => Self::Ramp,
            129 => Self::StairsAndRamp,
            184 => Self::Waypoint,
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            185..=189 => Self::NumberedWaypoint((code - 184) as u8),
            200 => Self::Start,
            201 => Self::Destination,
            211 => Self::Crosswalk,
            212 => Self::CrosswalkLeft,
            213 => Self::CrosswalkRight,
            214 => Self::CrosswalkEightOClock,
            215 => Self::CrosswalkTenOClock,
            216 => Self::CrosswalkTwoOClock,
            217 => Self::CrosswalkFourOClock,
            218 => Self::Elevator,
            233 => Self::StraightTemporary,
            _ => Self::Unknown(code),
        }
    }

    /// The raw provider code
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::NoGuidance(code) | Self::Unknown(code) => *code,
            Self::Straight => 11,
            Self::Left => 12,
            Self::Right => 13,
            Self::UTurn => 14,
            Self::LeftEightOClock => 16,
            Self::LeftTenOClock => 17,
            Self::RightTwoOClock => 18,
            Self::RightFourOClock => 19,
            Self::Overpass => 125,
            Self::Underpass => 126,
            Self::Stairs => 127,
            Self::Ramp => 128,
            Self::StairsAndRamp => 129,
            Self::Waypoint => 184,
            Self::NumberedWaypoint(ordinal) => 184 + *ordinal as i32,
            Self::Start => 200,
            Self::Destination => 201,
            Self::Crosswalk => 211,
            Self::CrosswalkLeft => 212,
            Self::CrosswalkRight => 213,
            Self::CrosswalkEightOClock => 214,
            Self::CrosswalkTenOClock => 215,
            Self::CrosswalkTwoOClock => 216,
            Self::CrosswalkFourOClock => 217,
            Self::Elevator => 218,
            Self::StraightTemporary => 233,
        }
    }

    /// Spoken phrase that leads a turn-by-turn instruction
    ///
    /// `None` for codes without a phrase of their own: arrival replaces the
    /// whole instruction, and unguided or unknown codes fall through to the
    /// description.
    #[must_use]
    pub const fn phrase(&self) -> Option<&'static str> {
        match self {
            Self::Straight | Self::StraightTemporary => Some("직진"),
            Self::Left => Some("좌회전"),
            Self::Right => Some("우회전"),
            Self::UTurn => Some("유턴"),
            Self::LeftEightOClock => Some("8시 방향으로 좌회전"),
            Self::LeftTenOClock => Some("10시 방향으로 좌회전"),
            Self::RightTwoOClock => Some("2시 방향으로 우회전"),
            Self::RightFourOClock => Some("4시 방향으로 우회전"),
            Self::Overpass => Some("육교 건너기"),
            Self::Underpass => Some("지하보도를 건너기"),
            Self::Stairs => Some("계단 진입"),
            Self::Ramp => Some("경사로 진입"),
            Self::StairsAndRamp => Some("계단과 경사로 진입"),
            Self::Waypoint | Self::NumberedWaypoint(_) => Some("경유지"),
            Self::Start => Some("출발지에서 직진"),
            Self::Crosswalk => Some("횡단보도 건너기"),
            Self::CrosswalkLeft => Some("좌측 횡단보도 건너기"),
            Self::CrosswalkRight => Some("우측 횡단보도 건너기"),
            Self::CrosswalkEightOClock => Some("8시 방향 횡단보도 건너기"),
            Self::CrosswalkTenOClock => Some("10시 방향 횡단보도 건너기"),
            Self::CrosswalkTwoOClock => Some("2시 방향 횡단보도 건너기"),
            Self::CrosswalkFourOClock => Some("4시 방향 횡단보도 건너기"),
            Self::Elevator => Some("엘리베이터 이용"),
            Self::Destination | Self::NoGuidance(_) | Self::Unknown(_) => None,
        }
    }

    /// Short label for auxiliary display, empty for unknown codes
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NoGuidance(_) => "안내 없음",
            Self::Straight => "직진",
            Self::Left => "좌회전",
            Self::Right => "우회전",
            Self::UTurn => "유턴",
            Self::LeftEightOClock => "8시 방향 좌회전",
            Self::LeftTenOClock => "10시 방향 좌회전",
            Self::RightTwoOClock => "2시 방향 우회전",
            Self::RightFourOClock => "4시 방향 우회전",
            Self::Overpass => "육교",
            Self::Underpass => "지하보도",
            Self::Stairs => "계단 진입",
            Self::Ramp => "경사로 진입",
            Self::StairsAndRamp => "계단+경사로 진입",
            Self::Waypoint => "경유지",
            Self::NumberedWaypoint(1) => "첫 번째 경유지",
            Self::NumberedWaypoint(2) => "두 번째 경유지",
            Self::NumberedWaypoint(3) => "세 번째 경유지",
            Self::NumberedWaypoint(4) => "네 번째 경유지",
            Self::NumberedWaypoint(5) => "다섯 번째 경유지",
            Self::Start => "출발지",
            Self::Destination => "목적지",
            Self::Crosswalk => "횡단보도",
            Self::CrosswalkLeft => "좌측 횡단보도",
            Self::CrosswalkRight => "우측 횡단보도",
            Self::CrosswalkEightOClock => "8시 방향 횡단보도",
            Self::CrosswalkTenOClock => "10시 방향 횡단보도",
            Self::CrosswalkTwoOClock => "2시 방향 횡단보도",
            Self::CrosswalkFourOClock => "4시 방향 횡단보도",
            Self::Elevator => "엘리베이터",
            Self::StraightTemporary => "직진 임시",
            Self::NumberedWaypoint(_) | Self::Unknown(_) => "",
        }
    }

    /// Whether this code is part of the known maneuver table
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<i32> for TurnType {
    fn from(code: i32) -> Self {
        Self::from_code(code)
    }
}

impl fmt::Display for TurnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.label();
        if label.is_empty() {
            write!(f, "turnType {}", self.code())
        } else {
            write!(f, "{label}")
        }
    }
}
