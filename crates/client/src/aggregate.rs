//! Multi-source scrape and merge.
//!
//! Every title runs as its own task with no concurrency bound. Within a task
//! IMDb runs first; only when it yields a record do Rotten Tomatoes and
//! Metacritic run, concurrently with each other, and attach their scores to
//! that record. A failing source never affects another source or title.

use std::collections::HashMap;
use std::sync::Arc;

use reelscore_core::{MovieRecord, ScoreEntry, SourceKind};
use tokio::sync::Mutex;
use tokio::task::JoinSet;

use crate::fetch::HtmlFetcher;
use crate::sites::{Imdb, Metacritic, RottenTomatoes, Site, SiteUrls, scrape_site};

/// Records keyed by title, remembering the order titles were first inserted.
#[derive(Debug, Default)]
pub struct RecordStore {
    order: Vec<String>,
    records: HashMap<String, MovieRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a base record. A record with the same title is replaced but keeps its position.
    ///
    /// Scores attached to the replaced record are lost, and an enrichment still in
    /// flight for it lands on the replacement, so a duplicated title can end up
    /// with scores from different runs.
    pub fn insert(&mut self, record: MovieRecord) {
        if !self.records.contains_key(&record.title) {
            self.order.push(record.title.clone());
        }
        self.records.insert(record.title.clone(), record);
    }

    /// Attach a score to the record titled `title`. Returns `false` if there is no such record.
    pub fn attach(&mut self, title: &str, source: SourceKind, entry: ScoreEntry) -> bool {
        match self.records.get_mut(title) {
            Some(record) => {
                record.attach_score(source, entry);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, title: &str) -> Option<&MovieRecord> {
        self.records.get(title)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in insertion order.
    pub fn into_records(mut self) -> Vec<MovieRecord> {
        self.order.iter().filter_map(|title| self.records.remove(title)).collect()
    }
}

/// Runs the three sites for a set of titles and merges the results.
#[derive(Clone)]
pub struct Aggregator {
    fetcher: Arc<dyn HtmlFetcher>,
    imdb: Imdb,
    rotten_tomatoes: RottenTomatoes,
    metacritic: Metacritic,
    enrich: bool,
}

impl Aggregator {
    pub fn new(fetcher: Arc<dyn HtmlFetcher>, urls: SiteUrls) -> Self {
        Self {
            fetcher,
            imdb: Imdb::new(urls.imdb),
            rotten_tomatoes: RottenTomatoes::new(urls.rotten_tomatoes),
            metacritic: Metacritic::new(urls.metacritic),
            enrich: true,
        }
    }

    /// Skip the Rotten Tomatoes and Metacritic lookups.
    pub fn imdb_only(mut self) -> Self {
        self.enrich = false;
        self
    }

    /// Scrape every title and return one record per title whose IMDb lookup succeeded.
    ///
    /// Records come back in the order their IMDb lookups finished.
    pub async fn aggregate(&self, titles: &[String]) -> Vec<MovieRecord> {
        let store = Arc::new(Mutex::new(RecordStore::new()));
        let mut join_set = JoinSet::new();

        tracing::info!(titles = titles.len(), enrich = self.enrich, "scraping movies");

        for title in titles {
            join_set.spawn(self.clone().run_title(title.clone(), Arc::clone(&store)));
        }

        while let Some(joined) = join_set.join_next().await {
            if let Err(e) = joined {
                tracing::error!(error = %e, "title task did not complete");
            }
        }

        let store = std::mem::take(&mut *store.lock().await);
        let records = store.into_records();

        tracing::info!(requested = titles.len(), produced = records.len(), "scrape finished");

        records
    }

    async fn run_title(self, title: String, store: Arc<Mutex<RecordStore>>) {
        let details = match scrape_site(&self.imdb, self.fetcher.as_ref(), &title).await {
            Ok(Some(details)) => details,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!(title = %title, source = %SourceKind::Imdb, error = %e, "primary source failed, dropping title");
                return;
            }
        };

        store.lock().await.insert(details.into_record(&title));

        if !self.enrich {
            return;
        }

        tokio::join!(
            self.enrich_from(&self.rotten_tomatoes, &title, &store),
            self.enrich_from(&self.metacritic, &title, &store),
        );
    }

    async fn enrich_from<S>(&self, site: &S, title: &str, store: &Mutex<RecordStore>)
    where
        S: Site<Output = ScoreEntry>,
    {
        match scrape_site(site, self.fetcher.as_ref(), title).await {
            Ok(Some(entry)) => {
                if !store.lock().await.attach(title, site.kind(), entry) {
                    tracing::warn!(title, source = %site.kind(), "no record to attach score to");
                }
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(title, source = %site.kind(), error = %e, "source unavailable for title");
            }
        }
    }
}
