use serde::{Serialize, Deserialize};

/// Filter value that means "no constraint on this field".
pub const ALL_SENTINEL: &str = "all";

/// Player row from the players table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Player {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub team_id: Option<String>,
    pub position_id: Option<String>,
    pub position_display_name: Option<String>,
    pub sport_id: Option<String>,
}

/// Body of POST /api/players
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlayer {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub position_id: Option<String>,
    #[serde(default)]
    pub position_display_name: Option<String>,
    #[serde(default)]
    pub sport_id: Option<String>,
}

/// Body of PUT /api/players/{player_id}
///
/// Every column is overwritten on update, so a field missing from the body is
/// written as NULL. Any `id` sent along is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePlayer {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub position_id: Option<String>,
    #[serde(default)]
    pub position_display_name: Option<String>,
    #[serde(default)]
    pub sport_id: Option<String>,
}

/// Body of POST /api/players/filter, as sent by the dropdowns
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub sport: Option<String>,
}

/// Equality predicates applied to the players table.
///
/// `None` means the column is unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerFilter {
    pub position_display_name: Option<String>,
    pub team_id: Option<String>,
    pub sport_id: Option<String>,
}

impl PlayerFilter {
    /// Drops empty values and the `"all"` sentinel from a filter request
    pub fn from_request(req: FilterRequest) -> Self {
        Self {
            position_display_name: constraint(req.position),
            team_id: constraint(req.team),
            sport_id: constraint(req.sport),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.position_display_name.is_none() && self.team_id.is_none() && self.sport_id.is_none()
    }
}

fn constraint(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && v != ALL_SENTINEL)
}

/// Success body for write endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
