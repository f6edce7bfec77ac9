// Steam Web API client. Three read-only endpoints, each a single attempt
// with no internal retry; retry policy belongs to the caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use crate::response::ResponseCode;
use crate::steam::models::{
    OwnedGame, OwnedGamesEnvelope, PlayerAchievementsEnvelope, PlayerProgress, SchemaAchievement,
    SchemaEnvelope,
};

pub const STEAM_API_BASE: &str = "http://api.steampowered.com";

const OWNED_GAMES_PATH: &str = "/IPlayerService/GetOwnedGames/v0001/";
const PLAYER_ACHIEVEMENTS_PATH: &str = "/ISteamUserStats/GetPlayerAchievements/v0001/";
const SCHEMA_PATH: &str = "/ISteamUserStats/GetSchemaForGame/v0002/";

/// The owned-games endpoint answers fast or not at all; expiry fails the
/// whole invocation, so keep this tight.
pub const OWNED_GAMES_TIMEOUT: Duration = Duration::from_secs(1);
/// Schema payloads for achievement-heavy games run to megabytes.
pub const SCHEMA_TIMEOUT: Duration = Duration::from_secs(300);
/// Service-imposed ceiling on the owned-games list; bounds the fan-out.
pub const MAX_GAME_COUNT: usize = 5000;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,
    #[error("steam returned status {0}")]
    Status(u16),
    /// The payload decoded but carried no achievements block. Expected for
    /// the many games that define no achievements; callers skip silently.
    #[error("no achievements data in response")]
    NoAchievements,
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_decode() {
            // Shape mismatch, same meaning as a missing achievements block.
            FetchError::NoAchievements
        } else {
            FetchError::Transport(err)
        }
    }
}

/// Outcome of the owned-games call. Not a Result: the pipeline needs the
/// mapped status code either way.
#[derive(Debug)]
pub struct OwnedGamesFetch {
    pub games: Vec<OwnedGame>,
    pub code: ResponseCode,
    pub ok: bool,
}

impl OwnedGamesFetch {
    fn failed(code: ResponseCode) -> Self {
        Self {
            games: Vec::new(),
            code,
            ok: false,
        }
    }
}

/// Seam over the remote catalogue so the pipeline can run against fakes.
#[async_trait]
pub trait CatalogFetch: Send + Sync {
    async fn owned_games(&self, steamid: &str) -> OwnedGamesFetch;
    async fn player_progress(&self, steamid: &str, appid: u32)
        -> Result<PlayerProgress, FetchError>;
    async fn achievement_schema(
        &self,
        appid: u32,
        lang: &str,
    ) -> Result<Vec<SchemaAchievement>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct SteamClient {
    http: Client,
    base_url: String,
    key: String,
}

impl SteamClient {
    pub fn new(key: String) -> Self {
        Self::with_base_url(STEAM_API_BASE.to_string(), key)
    }

    pub fn with_base_url(base_url: String, key: String) -> Self {
        Self {
            http: Client::new(),
            base_url,
            key,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl CatalogFetch for SteamClient {
    async fn owned_games(&self, steamid: &str) -> OwnedGamesFetch {
        let request = self
            .http
            .get(self.url(OWNED_GAMES_PATH))
            .query(&[
                ("key", self.key.as_str()),
                ("steamid", steamid),
                ("format", "json"),
            ])
            .timeout(OWNED_GAMES_TIMEOUT);

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) if err.is_timeout() => {
                warn!(steamid, "owned-games fetch timed out");
                return OwnedGamesFetch::failed(ResponseCode::Error);
            }
            Err(err) => {
                warn!(steamid, error = %err, "owned-games fetch failed");
                return OwnedGamesFetch::failed(ResponseCode::Error);
            }
        };

        let status = response.status();
        if status.as_u16() != 200 {
            return OwnedGamesFetch::failed(ResponseCode::from_status(status.as_u16()));
        }

        match response.json::<OwnedGamesEnvelope>().await {
            Ok(envelope) => {
                let mut games = envelope.response.games.unwrap_or_default();
                games.truncate(MAX_GAME_COUNT);
                debug!(steamid, count = games.len(), "owned games fetched");
                OwnedGamesFetch {
                    games,
                    code: ResponseCode::Success,
                    ok: true,
                }
            }
            Err(err) => {
                warn!(steamid, error = %err, "owned-games payload did not decode");
                OwnedGamesFetch::failed(ResponseCode::Error)
            }
        }
    }

    async fn player_progress(
        &self,
        steamid: &str,
        appid: u32,
    ) -> Result<PlayerProgress, FetchError> {
        let appid_param = appid.to_string();
        let response = self
            .http
            .get(self.url(PLAYER_ACHIEVEMENTS_PATH))
            .query(&[
                ("key", self.key.as_str()),
                ("steamid", steamid),
                ("appid", appid_param.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() != 200 {
            return Err(FetchError::Status(status.as_u16()));
        }

        let envelope = response.json::<PlayerAchievementsEnvelope>().await?;
        let stats = envelope.playerstats;
        match (stats.game_name, stats.achievements) {
            (Some(title), Some(achievements)) => Ok(PlayerProgress {
                app_id: appid,
                title,
                achievements,
            }),
            _ => Err(FetchError::NoAchievements),
        }
    }

    async fn achievement_schema(
        &self,
        appid: u32,
        lang: &str,
    ) -> Result<Vec<SchemaAchievement>, FetchError> {
        let appid_param = appid.to_string();
        let response = self
            .http
            .get(self.url(SCHEMA_PATH))
            .query(&[
                ("key", self.key.as_str()),
                ("appid", appid_param.as_str()),
                ("l", lang),
            ])
            .timeout(SCHEMA_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() != 200 {
            return Err(FetchError::Status(status.as_u16()));
        }

        let envelope = response.json::<SchemaEnvelope>().await?;
        match envelope.game.available_game_stats {
            Some(stats) => Ok(stats.achievements),
            None => Err(FetchError::NoAchievements),
        }
    }
}
