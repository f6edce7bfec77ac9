// Typed records for the Steam Web API payloads we consume.
// Each envelope mirrors the JSON shape the endpoint actually returns;
// optional fields stay Option so a missing block decodes instead of failing.

use serde::{Deserialize, Serialize};

/// `IPlayerService/GetOwnedGames` envelope.
#[derive(Debug, Deserialize)]
pub struct OwnedGamesEnvelope {
    pub response: OwnedGamesBody,
}

#[derive(Debug, Deserialize)]
pub struct OwnedGamesBody {
    /// Absent for private profiles and empty libraries.
    #[serde(default)]
    pub games: Option<Vec<OwnedGame>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnedGame {
    pub appid: u32,
    #[serde(default)]
    pub img_icon_url: Option<String>,
}

/// `ISteamUserStats/GetPlayerAchievements` envelope.
#[derive(Debug, Deserialize)]
pub struct PlayerAchievementsEnvelope {
    pub playerstats: PlayerStats,
}

#[derive(Debug, Deserialize)]
pub struct PlayerStats {
    #[serde(rename = "gameName", default)]
    pub game_name: Option<String>,
    /// Absent when the game defines no achievements.
    #[serde(default)]
    pub achievements: Option<Vec<PlayerAchievement>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerAchievement {
    pub apiname: String,
    pub achieved: u8,
}

/// Per-user progress for one game, flattened out of the envelope.
#[derive(Debug, Clone)]
pub struct PlayerProgress {
    pub app_id: u32,
    pub title: String,
    pub achievements: Vec<PlayerAchievement>,
}

/// `ISteamUserStats/GetSchemaForGame` envelope.
#[derive(Debug, Deserialize)]
pub struct SchemaEnvelope {
    pub game: SchemaGame,
}

#[derive(Debug, Deserialize)]
pub struct SchemaGame {
    #[serde(rename = "availableGameStats", default)]
    pub available_game_stats: Option<SchemaStats>,
}

#[derive(Debug, Deserialize)]
pub struct SchemaStats {
    #[serde(default)]
    pub achievements: Vec<SchemaAchievement>,
}

/// One achievement as defined by the game's schema, language-specific.
/// The raw payload also carries `hidden` and `defaultvalue`; both are
/// internal-only and never surface in our output, so decode drops them.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaAchievement {
    pub name: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub icon: String,
    pub icongray: String,
}
