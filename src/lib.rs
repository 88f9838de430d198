pub mod api_fetch;
pub mod feed;
pub mod http_client;
pub mod state;
pub mod stats;
