// HTTP layer for the achievement aggregation service.

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;

pub use server::ApiServer;
