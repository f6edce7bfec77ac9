// achboard: aggregates per-user Steam achievement statistics.
//
// Given a SteamID the pipeline fetches the owned-games list, fans out
// per-game achievement fetches concurrently, merges player progress with
// each game's achievement schema, and returns one aggregate JSON document.

pub mod api;
pub mod cache;
pub mod merge;
pub mod pipeline;
pub mod profiler;
pub mod response;
pub mod steam;
pub mod tracing;

pub mod util {
    pub mod env;
}
