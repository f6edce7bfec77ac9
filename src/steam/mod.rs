// Steam Web API integration: typed payload models and the HTTP client.

pub mod client;
pub mod models;

pub use client::{CatalogFetch, FetchError, OwnedGamesFetch, SteamClient};
