// Aggregation pipeline: owned-games list (cache-checked), concurrent
// per-game progress fetches consumed in completion order, cache-checked
// schema resolution, merge, accumulate. One game failing never taints the
// batch; only the top-level owned-games fetch can fail the invocation.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, info, warn};

use crate::cache::TtlCache;
use crate::merge::merge;
use crate::profiler::{OpTimings, Timer};
use crate::response::{AggregateResult, ResponseCode};
use crate::steam::client::{CatalogFetch, FetchError};
use crate::steam::models::{OwnedGame, SchemaAchievement};

/// Matches the upstream data-freshness window we are comfortable with.
pub const CACHE_TTL: Duration = Duration::from_secs(300);

pub struct Pipeline {
    catalog: Arc<dyn CatalogFetch>,
    games_cache: TtlCache<String, Vec<OwnedGame>>,
    schema_cache: TtlCache<(u32, String), Arc<Vec<SchemaAchievement>>>,
}

impl Pipeline {
    pub fn new(catalog: Arc<dyn CatalogFetch>, ttl: Duration) -> Self {
        Self {
            catalog,
            games_cache: TtlCache::new(ttl),
            schema_cache: TtlCache::new(ttl),
        }
    }

    /// One aggregation invocation. Always returns a well-formed result;
    /// failures surface through `code`/`status`, never as an error.
    pub async fn run(&self, steamid: &str, lang: &str) -> AggregateResult {
        let timings = OpTimings::default();

        let list_timer = Timer::start();
        let games = match self.games_cache.get(&steamid.to_string()) {
            Some(games) => games,
            None => {
                let fetched = self.catalog.owned_games(steamid).await;
                if !fetched.ok {
                    info!(
                        steamid,
                        code = fetched.code.as_i32(),
                        "owned-games fetch failed; aborting run"
                    );
                    return AggregateResult::failure(fetched.code);
                }
                // Empty lists are cached too, so a user with no games does
                // not hit the remote on every request.
                self.games_cache
                    .insert(steamid.to_string(), fetched.games.clone());
                fetched.games
            }
        };
        timings.record("owned_games", list_timer.elapsed_secs());

        info!(steamid, games = games.len(), "fanning out progress fetches");

        let mut result = AggregateResult::new(ResponseCode::Success);
        let mut fetches: FuturesUnordered<_> = games
            .into_iter()
            .map(|game| {
                let catalog = Arc::clone(&self.catalog);
                let steamid = steamid.to_string();
                async move {
                    let timer = Timer::start();
                    let outcome = catalog.player_progress(&steamid, game.appid).await;
                    (game.appid, outcome, timer.elapsed_secs())
                }
            })
            .collect();

        // Completion order, not submission order; merging starts while slow
        // fetches are still in flight.
        while let Some((appid, outcome, elapsed)) = fetches.next().await {
            timings.record("progress", elapsed);

            let progress = match outcome {
                Ok(progress) => progress,
                Err(FetchError::NoAchievements) => {
                    debug!(appid, "game reports no achievements; skipping");
                    continue;
                }
                Err(err) => {
                    warn!(appid, error = %err, "progress fetch failed; skipping game");
                    continue;
                }
            };

            let schema_timer = Timer::start();
            let schema = match self.schema(appid, lang).await {
                Ok(schema) => schema,
                Err(FetchError::NoAchievements) => {
                    debug!(appid, "no schema published; skipping");
                    continue;
                }
                Err(err) => {
                    warn!(appid, error = %err, "schema fetch failed; skipping game");
                    continue;
                }
            };
            timings.record("schema", schema_timer.elapsed_secs());

            let merge_timer = Timer::start();
            let summary = merge(&progress, &schema);
            timings.record("merge", merge_timer.elapsed_secs());

            result.overall_ach_count += summary.achievements_total;
            result.overall_done_ach_count += summary.achievements_done;
            result.game_data.push(summary);
        }

        debug!(steamid, timings = %timings.summary(), "aggregation timings");
        info!(
            steamid,
            games = result.game_data.len(),
            done = result.overall_done_ach_count,
            total = result.overall_ach_count,
            "aggregation complete"
        );
        result
    }

    async fn schema(
        &self,
        appid: u32,
        lang: &str,
    ) -> Result<Arc<Vec<SchemaAchievement>>, FetchError> {
        let key = (appid, lang.to_string());
        if let Some(schema) = self.schema_cache.get(&key) {
            return Ok(schema);
        }
        let schema = Arc::new(self.catalog.achievement_schema(appid, lang).await?);
        self.schema_cache.insert(key, Arc::clone(&schema));
        Ok(schema)
    }
}
