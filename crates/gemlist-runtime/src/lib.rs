pub mod config;
pub mod controller;
pub mod error;
pub mod fetch;
pub mod searches;
pub mod session;

pub use config::{ApiConfig, Config, Endpoint, EndpointConfig, ListingConfig, resolve_data_dir};
pub use controller::{ListingController, ListingView, LoadState, RequestTicket, Resolution};
pub use error::{Error, Result};
pub use fetch::{FetchError, FetchRequest, Fetcher, HttpFetcher, Method};
pub use searches::{RecentSearches, SearchRecorder};
pub use session::{ListingEvent, ListingSession, ListingUpdate};
