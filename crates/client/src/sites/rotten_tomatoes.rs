//! Rotten Tomatoes: critics score and review count.

use std::sync::LazyLock;

use reelscore_core::{Error, ScoreEntry, SourceKind};
use scraper::{Html, Selector};
use url::Url;

use super::{Site, with_path};
use crate::extract::{first_attr, first_text, joined_text, selector};

static SEARCH_ROW_LINK: LazyLock<Selector> = LazyLock::new(|| selector("search-page-media-row a"));
static CRITICS_SCORE: LazyLock<Selector> = LazyLock::new(|| selector(r#"rt-button [slot="criticsScore"] rt-text"#));
static CRITICS_REVIEWS: LazyLock<Selector> = LazyLock::new(|| selector(r#"rt-link[slot="criticsReviews"]"#));

#[derive(Debug, Clone)]
pub struct RottenTomatoes {
    base: Url,
}

impl RottenTomatoes {
    pub fn new(base: Url) -> Self {
        Self { base }
    }
}

impl Site for RottenTomatoes {
    type Output = ScoreEntry;

    fn kind(&self) -> SourceKind {
        SourceKind::RottenTomato
    }

    fn base_url(&self) -> &Url {
        &self.base
    }

    fn search_url(&self, title: &str) -> Result<Url, Error> {
        let mut url = with_path(&self.base, "/search");
        url.query_pairs_mut().append_pair("search", title);
        Ok(url)
    }

    /// First media row wins, whatever its title.
    fn resolve(&self, search_html: &str, _title: &str) -> Option<String> {
        let doc = Html::parse_document(search_html);
        first_attr(doc.root_element(), &SEARCH_ROW_LINK, "href").filter(|href| !href.is_empty())
    }

    fn extract(&self, detail_html: &str, detail_url: &Url) -> Result<ScoreEntry, Error> {
        let doc = Html::parse_document(detail_html);
        let root = doc.root_element();

        Ok(ScoreEntry {
            rating: first_text(root, &CRITICS_SCORE),
            reviews: joined_text(root, &CRITICS_REVIEWS),
            link: detail_url.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sites::fixtures::{RT_DETAIL, RT_SEARCH};

    fn rt() -> RottenTomatoes {
        RottenTomatoes::new(Url::parse("https://www.rottentomatoes.com").unwrap())
    }

    #[test]
    fn test_search_url_encodes_title() {
        let url = rt().search_url("Stand by Me").unwrap();
        assert_eq!(url.as_str(), "https://www.rottentomatoes.com/search?search=Stand+by+Me");
    }

    #[test]
    fn test_resolve_takes_first_row() {
        assert_eq!(rt().resolve(RT_SEARCH, "Toy Story 2").as_deref(), Some("/m/toy_story"));
    }

    #[test]
    fn test_resolve_absolute_link_kept() {
        let html = r#"<search-page-media-row><a href="https://www.rottentomatoes.com/m/casper">Casper</a></search-page-media-row>"#;
        let href = rt().resolve(html, "Casper").unwrap();
        let url = rt().base_url().join(&href).unwrap();
        assert_eq!(url.as_str(), "https://www.rottentomatoes.com/m/casper");
    }

    #[test]
    fn test_resolve_no_rows() {
        assert_eq!(rt().resolve("<html><body></body></html>", "Casper"), None);
    }

    #[test]
    fn test_extract_score() {
        let url = Url::parse("https://www.rottentomatoes.com/m/toy_story").unwrap();
        let entry = rt().extract(RT_DETAIL, &url).unwrap();

        assert_eq!(entry.rating, "100%");
        assert_eq!(entry.reviews, "97 Reviews");
        assert_eq!(entry.link, "https://www.rottentomatoes.com/m/toy_story");
    }

    #[test]
    fn test_extract_missing_fields_are_empty() {
        let url = Url::parse("https://www.rottentomatoes.com/m/toy_story").unwrap();
        let entry = rt().extract("<html><body></body></html>", &url).unwrap();
        assert_eq!(entry.rating, "");
        assert_eq!(entry.reviews, "");
    }
}
