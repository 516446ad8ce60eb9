//! Steam Web API client.
//!
//! Verifies session tickets and fetches player summaries over HTTPS. Every
//! request carries a fixed timeout, and responses go through one uniform
//! protocol: non-2xx statuses are transport errors, the body is checked for
//! Steam's embedded error envelope even on 2xx, and only then is the
//! operation payload parsed.

pub mod client;
pub mod errors;
pub mod models;

pub use client::{SteamClient, SteamConfig};
pub use errors::SteamError;
pub use models::{PROVIDER_STEAM, PlayerSummary, TicketIdentity};
