//! IMDb: the primary source.
//!
//! A title only produces a record when this site succeeds. Resolution takes
//! the first search result unconditionally.

use std::sync::LazyLock;

use regex::Regex;
use reelscore_core::{Error, MovieRecord, ScoreEntry, Scores, SourceKind, TopStar};
use scraper::{Html, Selector};
use url::Url;

use super::{Site, with_path};
use crate::extract::{each_text, first_attr, first_text, joined_text, selector};

static TITLE_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/title/(tt\d+)/").expect("invalid regex"));

struct SearchSelectors {
    result_item: Selector,
    result_link: Selector,
}

static SEARCH: LazyLock<SearchSelectors> = LazyLock::new(|| SearchSelectors {
    result_item: selector(".find-result-item"),
    result_link: selector(".ipc-metadata-list-summary-item__c a"),
});

struct DetailSelectors {
    rating: Selector,
    reviews: Selector,
    content_rating: Selector,
    duration: Selector,
    release_year: Selector,
    release_date: Selector,
    summary: Selector,
    categories: Selector,
    director: Selector,
    writers: Selector,
    stars: Selector,
    cast_item: Selector,
    cast_actor: Selector,
    cast_character: Selector,
    photo_link: Selector,
    photo_img: Selector,
}

static DETAIL: LazyLock<DetailSelectors> = LazyLock::new(|| DetailSelectors {
    rating: selector(".sc-eb51e184-1"),
    reviews: selector(".sc-eb51e184-3"),
    content_rating: selector(".sc-ec65ba05-2 li:nth-of-type(2) a"),
    duration: selector(".sc-ec65ba05-2 li:nth-of-type(3)"),
    release_year: selector(".sc-ec65ba05-2 li"),
    release_date: selector(r#"[data-testid="title-details-section"] ul li div ul li a"#),
    summary: selector(".sc-1f50b7c-4 p span"),
    categories: selector(".sc-1f50b7c-4 div div:nth-of-type(2) a span"),
    director: selector(".ipc-metadata-list-item__list-content-item--link"),
    writers: selector(".sc-1f50b7c-3 div ul li:nth-of-type(2) div ul a"),
    stars: selector(".sc-1f50b7c-3 div ul li:nth-of-type(3) div ul a"),
    cast_item: selector(".sc-bfec09a1-5"),
    cast_actor: selector(".sc-bfec09a1-1"),
    cast_character: selector(".sc-bfec09a1-4"),
    photo_link: selector(r#"section [data-testid="Photos"] section div a"#),
    photo_img: selector("div img"),
});

/// Everything the IMDb title page yields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImdbDetails {
    pub id: Option<String>,
    pub score: ScoreEntry,
    pub content_rating: String,
    pub release_date: String,
    pub release_year: String,
    pub duration: String,
    pub categories: Vec<String>,
    pub summary: String,
    pub director: String,
    pub writers: Vec<String>,
    pub stars: Vec<String>,
    pub top_stars: Vec<TopStar>,
    pub photos: Vec<String>,
}

impl ImdbDetails {
    /// Build the base record for `title`. Secondary scores start absent.
    pub fn into_record(self, title: &str) -> MovieRecord {
        MovieRecord {
            id: self.id,
            title: title.to_string(),
            scores: Scores { imdb: self.score, rotten_tomato: None, meta_critic: None },
            content_rating: self.content_rating,
            release_date: self.release_date,
            release_year: self.release_year,
            duration: self.duration,
            categories: self.categories,
            summary: self.summary,
            director: self.director,
            writers: self.writers,
            stars: self.stars,
            top_stars: self.top_stars,
            photos: self.photos,
        }
    }
}

/// IMDb `ttNNNNNNN` identifier embedded in a title URL.
pub fn title_id(link: &str) -> Option<String> {
    TITLE_ID.captures(link).map(|c| c[1].to_string())
}

#[derive(Debug, Clone)]
pub struct Imdb {
    base: Url,
}

impl Imdb {
    pub fn new(base: Url) -> Self {
        Self { base }
    }
}

impl Site for Imdb {
    type Output = ImdbDetails;

    fn kind(&self) -> SourceKind {
        SourceKind::Imdb
    }

    fn base_url(&self) -> &Url {
        &self.base
    }

    fn search_url(&self, title: &str) -> Result<Url, Error> {
        let mut url = with_path(&self.base, "/find");
        url.query_pairs_mut().append_pair("q", title);
        Ok(url)
    }

    fn resolve(&self, search_html: &str, _title: &str) -> Option<String> {
        let doc = Html::parse_document(search_html);
        let first = doc.select(&SEARCH.result_item).next()?;
        first_attr(first, &SEARCH.result_link, "href").filter(|href| !href.is_empty())
    }

    fn extract(&self, detail_html: &str, detail_url: &Url) -> Result<ImdbDetails, Error> {
        let doc = Html::parse_document(detail_html);
        let root = doc.root_element();
        let sel = &*DETAIL;

        let top_stars = root
            .select(&sel.cast_item)
            .map(|item| TopStar {
                actor_name: first_text(item, &sel.cast_actor),
                character_name: first_text(item, &sel.cast_character),
            })
            .collect();

        let photos = root
            .select(&sel.photo_link)
            .filter_map(|link| first_attr(link, &sel.photo_img, "src"))
            .collect();

        Ok(ImdbDetails {
            id: title_id(detail_url.as_str()),
            score: ScoreEntry {
                rating: first_text(root, &sel.rating),
                reviews: first_text(root, &sel.reviews),
                link: detail_url.to_string(),
            },
            content_rating: joined_text(root, &sel.content_rating),
            release_date: first_text(root, &sel.release_date),
            release_year: first_text(root, &sel.release_year),
            duration: first_text(root, &sel.duration),
            categories: each_text(root, &sel.categories),
            summary: first_text(root, &sel.summary),
            director: first_text(root, &sel.director),
            writers: each_text(root, &sel.writers),
            stars: each_text(root, &sel.stars),
            top_stars,
            photos,
        })
    }
}
