//! Per-site title resolution and extraction.
//!
//! Each site module owns its selectors and nothing else, so a markup change on
//! one site touches one file. The shared pipeline is [`scrape_site`]:
//!
//! 1. build the search URL for the title
//! 2. fetch the search page and resolve a detail link (or give up: `Ok(None)`)
//! 3. fetch the detail page and extract the site's fields

pub mod imdb;
pub mod metacritic;
pub mod rotten_tomatoes;

pub use imdb::{Imdb, ImdbDetails};
pub use metacritic::Metacritic;
pub use rotten_tomatoes::RottenTomatoes;

use reelscore_core::{AppConfig, Error, SourceKind};
use url::Url;

use crate::fetch::HtmlFetcher;

/// A movie-information site.
pub trait Site: Send + Sync {
    /// What a successful extraction yields.
    type Output: Send;

    /// Which source this is.
    fn kind(&self) -> SourceKind;

    /// Base URL that relative detail links are resolved against.
    fn base_url(&self) -> &Url;

    /// Search page URL for `title`.
    fn search_url(&self, title: &str) -> Result<Url, Error>;

    /// Pick the detail-page href from search markup. `None` means the title was not found.
    fn resolve(&self, search_html: &str, title: &str) -> Option<String>;

    /// Pull fields out of detail-page markup.
    fn extract(&self, detail_html: &str, detail_url: &Url) -> Result<Self::Output, Error>;
}

/// Base URLs for the three sites.
#[derive(Debug, Clone)]
pub struct SiteUrls {
    pub imdb: Url,
    pub rotten_tomatoes: Url,
    pub metacritic: Url,
}

impl SiteUrls {
    /// Parse the base URLs out of the application config.
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        Ok(Self {
            imdb: parse_base(&config.imdb_url)?,
            rotten_tomatoes: parse_base(&config.rotten_tomatoes_url)?,
            metacritic: parse_base(&config.metacritic_url)?,
        })
    }
}

fn parse_base(raw: &str) -> Result<Url, Error> {
    Url::parse(raw).map_err(|e| Error::InvalidUrl(format!("{raw}: {e}")))
}

/// Copy of `base` with its path replaced.
pub(crate) fn with_path(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    url.set_path(path);
    url.set_query(None);
    url.set_fragment(None);
    url
}

/// Run the resolve → fetch → extract pipeline for one title on one site.
///
/// `Ok(None)` means the site had no matching search result. Errors are fetch
/// or extraction failures; the caller decides how loudly to report them.
pub async fn scrape_site<S: Site>(site: &S, fetcher: &dyn HtmlFetcher, title: &str) -> Result<Option<S::Output>, Error> {
    if title.trim().is_empty() {
        return Err(Error::InvalidInput("title cannot be empty".into()));
    }

    let search_url = site.search_url(title)?;
    let search_html = fetcher.fetch_html(&search_url).await?;

    let Some(href) = site.resolve(&search_html, title) else {
        tracing::info!(title, source = %site.kind(), "movie not found");
        return Ok(None);
    };

    let detail_url = site
        .base_url()
        .join(&href)
        .map_err(|e| Error::InvalidUrl(format!("{href}: {e}")))?;
    let detail_html = fetcher.fetch_html(&detail_url).await?;

    site.extract(&detail_html, &detail_url).map(Some)
}
