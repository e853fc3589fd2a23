//! Client code for reelscore.
//!
//! This crate provides the HTML fetch pipeline, per-site title resolution and
//! extraction, and the aggregator that merges the three sources into one
//! record per title.

pub mod aggregate;
pub mod extract;
pub mod fetch;
pub mod sites;

pub use aggregate::{Aggregator, RecordStore};
pub use fetch::{FetchClient, FetchConfig, HtmlFetcher};
pub use sites::{Imdb, ImdbDetails, Metacritic, RottenTomatoes, Site, SiteUrls, scrape_site};
