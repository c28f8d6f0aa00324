use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Token pair returned by the refresh-token grant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub scope: Vec<String>,
}

/// A clip that was just created; Twitch finishes processing it asynchronously
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedClip {
    pub id: String,
    #[serde(default)]
    pub edit_url: String,
}

/// Response from the create clip endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClipCreateResponse {
    #[serde(default)]
    pub data: Vec<CreatedClip>,
}

/// Represents a clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub id: String,
    pub url: String,
    pub embed_url: String,
    pub broadcaster_id: String,
    #[serde(default)]
    pub broadcaster_name: String,
    pub creator_id: String,
    #[serde(default)]
    pub creator_name: String,
    pub video_id: String,
    pub game_id: String,
    pub language: String,
    pub title: String,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub thumbnail_url: String,
    /// Length in seconds
    #[serde(default)]
    pub duration: f64,
}

/// Helix API pagination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Pagination {
    #[serde(default)]
    pub cursor: Option<String>,
}

/// Clips response from Helix API
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClipsResponse {
    #[serde(default)]
    pub data: Vec<Clip>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl ClipsResponse {
    /// Returns the first clip, which is the one asked for in a lookup by id
    pub fn first(&self) -> Option<&Clip> {
        self.data.first()
    }

    /// Decodes whatever can be salvaged from a body that failed strict parsing
    ///
    /// Every element of `data` that decodes on its own is kept; anything else
    /// is dropped.
    pub(crate) fn best_effort(body: &str) -> Self {
        let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
            return Self::default();
        };

        let data = value
            .get("data")
            .and_then(serde_json::Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| Clip::deserialize(item).ok())
                    .collect()
            })
            .unwrap_or_default();

        let pagination = value
            .get("pagination")
            .and_then(|p| Pagination::deserialize(p).ok());

        Self { data, pagination }
    }
}

/// Error body returned by the API on failure
///
/// ```json
/// {"error": "Unauthorized", "message": "Token invalid or missing required scope", "status": 401}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: u16,
}
