//! Client for the NewsAPI `/v2/everything` endpoint plus the bookkeeping
//! for incremental collection windows.

pub mod client;
pub mod error;
pub mod types;
pub mod window;

mod retry;

pub use client::NewsApiClient;
pub use error::NewsApiError;
pub use types::{EverythingPage, EverythingQuery};
pub use window::{read_last_run, save_last_run, CollectionWindow};
