// Closed set of response kinds the aggregate endpoint can report, plus the
// aggregate DTO itself. Codes mirror the Steam Web API status codes we care
// about, with negative sentinels for conditions the API never reports itself.

use serde::{Serialize, Serializer};

use crate::merge::GameSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    /// Structural miss: the payload carried no achievements block.
    NoAchievements,
    /// Transport-level failure (timeout, connection refused).
    Error,
    Default,
    Success,
    Unauthorized,
    Forbidden,
    NotFound,
    TooMany,
    InternalError,
    Unavailable,
    /// Any status we have no mapping for.
    Last,
}

impl ResponseCode {
    pub fn as_i32(self) -> i32 {
        match self {
            ResponseCode::NoAchievements => -2,
            ResponseCode::Error => -1,
            ResponseCode::Default => 0,
            ResponseCode::Success => 200,
            ResponseCode::Unauthorized => 401,
            ResponseCode::Forbidden => 403,
            ResponseCode::NotFound => 404,
            ResponseCode::TooMany => 429,
            ResponseCode::InternalError => 500,
            ResponseCode::Unavailable => 503,
            ResponseCode::Last => 999,
        }
    }

    pub fn from_status(status: u16) -> Self {
        match status {
            200 => ResponseCode::Success,
            401 => ResponseCode::Unauthorized,
            403 => ResponseCode::Forbidden,
            404 => ResponseCode::NotFound,
            429 => ResponseCode::TooMany,
            500 => ResponseCode::InternalError,
            503 => ResponseCode::Unavailable,
            _ => ResponseCode::Last,
        }
    }

    pub fn is_success(self) -> bool {
        self == ResponseCode::Success
    }

    /// Fixed advisory text for codes the Steam documentation attaches
    /// guidance to. Matched exhaustively so a new variant forces a decision.
    pub fn advisory(self) -> Option<&'static str> {
        match self {
            ResponseCode::Unauthorized | ResponseCode::Forbidden => Some(
                "Access is denied. Retrying will not help. Please verify your key= parameter.",
            ),
            ResponseCode::NotFound => Some("The API requested does not exists."),
            ResponseCode::TooMany => Some("You are being rate limited."),
            ResponseCode::InternalError => Some(
                "An unrecoverable error has occurred, please try again. If this continues to \
                 persist then please post to the Steamworks developer discussion with additional \
                 details of your request.",
            ),
            ResponseCode::Unavailable => Some(
                "Steam server is temporarily unavailable, or too busy to respond. Please wait \
                 and try again later",
            ),
            ResponseCode::NoAchievements
            | ResponseCode::Error
            | ResponseCode::Default
            | ResponseCode::Success
            | ResponseCode::Last => None,
        }
    }
}

impl Serialize for ResponseCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.as_i32())
    }
}

/// Whole-invocation result, serialized as the endpoint's response body.
#[derive(Debug, Serialize)]
pub struct AggregateResult {
    pub code: ResponseCode,
    pub status: bool,
    pub overall_done_ach_count: u32,
    pub overall_ach_count: u32,
    pub game_data: Vec<GameSummary>,
}

impl AggregateResult {
    pub fn new(code: ResponseCode) -> Self {
        Self {
            code,
            status: code.is_success(),
            overall_done_ach_count: 0,
            overall_ach_count: 0,
            game_data: Vec::new(),
        }
    }

    /// Failed invocation: carries the failure code and nothing else.
    pub fn failure(code: ResponseCode) -> Self {
        Self::new(code)
    }

    /// Human-readable hint for logging; never serialized.
    pub fn message(&self) -> String {
        self.code.advisory().unwrap_or_default().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_follows_code() {
        assert!(AggregateResult::new(ResponseCode::Success).status);
        assert!(!AggregateResult::new(ResponseCode::Error).status);
        assert!(!AggregateResult::failure(ResponseCode::Unavailable).status);
    }

    #[test]
    fn maps_known_statuses() {
        assert_eq!(ResponseCode::from_status(200), ResponseCode::Success);
        assert_eq!(ResponseCode::from_status(429), ResponseCode::TooMany);
        assert_eq!(ResponseCode::from_status(418), ResponseCode::Last);
    }

    #[test]
    fn serializes_as_integer() {
        let body = serde_json::to_value(AggregateResult::failure(ResponseCode::Error)).unwrap();
        assert_eq!(body["code"], serde_json::json!(-1));
        assert_eq!(body["status"], serde_json::json!(false));
        assert_eq!(body["game_data"], serde_json::json!([]));
    }

    #[test]
    fn advisory_only_for_error_statuses() {
        assert!(ResponseCode::Success.advisory().is_none());
        assert!(ResponseCode::TooMany.advisory().is_some());
        assert_eq!(
            ResponseCode::Unauthorized.advisory(),
            ResponseCode::Forbidden.advisory()
        );
    }
}
