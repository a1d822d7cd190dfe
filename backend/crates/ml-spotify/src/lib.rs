//! Spotify Web API adapter for the listen ingestion engine.
//!
//! Reads a user's "recently played" history with the account's OAuth bearer
//! token and maps it onto [`ml_core::ActivityEvent`]s.

mod client;
mod recently_played;


pub use client::SpotifyClient;

/// Largest page the recently-played endpoint accepts.
pub const MAX_PAGE_SIZE: u32 = 50;
