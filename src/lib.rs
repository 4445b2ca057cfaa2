// Inventory quantity sync for eBay listings via the Trading API

pub mod api_client;
pub mod config;
pub mod error;
pub mod inventory_request;
pub mod inventory_response;
pub mod poll_loop;
pub mod token_cache;

// Re-export key types for convenience
pub use api_client::{TradingApi, TradingClient};
pub use config::{Credentials, Environment, SyncConfig};
pub use error::{ApiError, AuthError, ConfigError, CycleError, ProcessingError};
pub use inventory_request::{build_request, ItemTarget};
pub use inventory_response::{Ack, InventoryUpdateResult, ItemConfirmation, ResponseError};
pub use poll_loop::PollLoop;
pub use token_cache::{AccessToken, TokenCache};
