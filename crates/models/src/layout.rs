use crate::geometry::Rect;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};
use uuid::Uuid;

#[cfg(feature = "database")]
use crate::db_value::string_value_type;

/// Width given to a seat when the editor does not send one
pub const DEFAULT_SEAT_WIDTH: f64 = 60.0;
/// Height given to a seat when the editor does not send one
pub const DEFAULT_SEAT_HEIGHT: f64 = 40.0;

/// Where the stage sits relative to the seating canvas
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StagePosition {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
    None,
}

impl StagePosition {
    pub const ALL: [Self; 5] = [Self::Top, Self::Bottom, Self::Left, Self::Right, Self::None];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::None => "none",
        }
    }
}

impl FromStr for StagePosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|position| position.as_str() == s)
            .ok_or_else(|| format!("Unknown stage position: {s}"))
    }
}

impl Display for StagePosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Availability of a placed seat.
///
/// `Reserved` and `Available` follow the reservation ledger; `Disabled` is
/// only ever set or cleared by an explicit administrative action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    #[default]
    Available,
    Reserved,
    Disabled,
}

impl SeatStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Reserved => "reserved",
            Self::Disabled => "disabled",
        }
    }

    /// The status a non-disabled seat should have given its reservations
    pub fn from_reservation(has_active_reservation: bool) -> Self {
        if has_active_reservation {
            Self::Reserved
        } else {
            Self::Available
        }
    }
}

impl FromStr for SeatStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "reserved" => Ok(Self::Reserved),
            "disabled" => Ok(Self::Disabled),
            _ => Err(format!("Unknown seat status: {s}")),
        }
    }
}

impl Display for SeatStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "database")]
string_value_type!(StagePosition);
#[cfg(feature = "database")]
string_value_type!(SeatStatus);

/// Canvas, grid and stage settings of one event's layout.
///
/// Always saved as a whole together with the seat list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetadata {
    pub canvas_width: i32,
    pub canvas_height: i32,
    pub grid_size: i32,
    pub stage_position: StagePosition,
    /// Free-form stage geometry from the editor, copied verbatim
    #[serde(default)]
    pub stage_config: Value,
}

impl Default for LayoutMetadata {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            grid_size: 20,
            stage_position: StagePosition::Top,
            stage_config: json!({}),
        }
    }
}

/// A seat as submitted by the layout editor, before it is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatDraft {
    /// Id of an existing seat of the same event that this draft keeps
    #[serde(default)]
    pub id: Option<Uuid>,
    pub seating_type_id: Uuid,
    pub seat_number: String,
    pub position_x: f64,
    pub position_y: f64,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default)]
    pub color_code: Option<String>,
}

fn default_width() -> f64 {
    DEFAULT_SEAT_WIDTH
}

fn default_height() -> f64 {
    DEFAULT_SEAT_HEIGHT
}

impl SeatDraft {
    pub fn new(seating_type_id: Uuid, seat_number: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: None,
            seating_type_id,
            seat_number: seat_number.into(),
            position_x: x,
            position_y: y,
            width: DEFAULT_SEAT_WIDTH,
            height: DEFAULT_SEAT_HEIGHT,
            color_code: None,
        }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_color(mut self, color_code: impl Into<String>) -> Self {
        self.color_code = Some(color_code.into());
        self
    }

    /// Keep the identity of an already placed seat
    pub fn keeping(mut self, seat_id: Uuid) -> Self {
        self.id = Some(seat_id);
        self
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position_x, self.position_y, self.width, self.height)
    }
}
