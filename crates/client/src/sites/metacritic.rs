//! Metacritic: metascore and critic review total.
//!
//! Unlike the other two sites, resolution requires a result row whose label
//! equals the requested title exactly and whose link points at a movie page.

use std::sync::LazyLock;

use reelscore_core::{Error, ScoreEntry, SourceKind};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::Site;
use crate::extract::{first_text, selector};

static RESULT_ROW: LazyLock<Selector> = LazyLock::new(|| selector(".c-pageSiteSearch-results div:nth-of-type(2) div a"));
static ROW_LABEL: LazyLock<Selector> = LazyLock::new(|| selector("p"));
static METASCORE: LazyLock<Selector> =
    LazyLock::new(|| selector(".c-productScoreInfo_scoreNumber div .c-siteReviewScore span"));
static REVIEWS_TOTAL: LazyLock<Selector> = LazyLock::new(|| selector(".c-productScoreInfo_reviewsTotal a span"));

#[derive(Debug, Clone)]
pub struct Metacritic {
    base: Url,
}

impl Metacritic {
    pub fn new(base: Url) -> Self {
        Self { base }
    }
}

/// Label text of a search row: the `p` inside the row's second `div` child.
fn row_label(row: ElementRef<'_>) -> String {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "div")
        .nth(1)
        .map(|div| first_text(div, &ROW_LABEL))
        .unwrap_or_default()
}

impl Site for Metacritic {
    type Output = ScoreEntry;

    fn kind(&self) -> SourceKind {
        SourceKind::MetaCritic
    }

    fn base_url(&self) -> &Url {
        &self.base
    }

    fn search_url(&self, title: &str) -> Result<Url, Error> {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(format!("{} cannot be a base", self.base)))?
            .clear()
            .push("search")
            .push(title);
        Ok(url)
    }

    fn resolve(&self, search_html: &str, title: &str) -> Option<String> {
        let doc = Html::parse_document(search_html);
        doc.select(&RESULT_ROW)
            .filter(|row| row_label(*row) == title)
            .filter_map(|row| row.value().attr("href"))
            .find(|href| href.contains("/movie/"))
            .map(str::to_string)
    }

    fn extract(&self, detail_html: &str, detail_url: &Url) -> Result<ScoreEntry, Error> {
        let doc = Html::parse_document(detail_html);
        let root = doc.root_element();

        let rating = first_text(root, &METASCORE);
        let reviews = first_text(root, &REVIEWS_TOTAL);

        if rating.is_empty() || reviews.is_empty() {
            return Err(Error::ExtractFailed(format!("no metascore on {}", detail_url)));
        }

        Ok(ScoreEntry { rating, reviews, link: detail_url.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sites::fixtures::{MC_DETAIL, MC_SEARCH};

    fn mc() -> Metacritic {
        Metacritic::new(Url::parse("https://www.metacritic.com").unwrap())
    }

    #[test]
    fn test_search_url_path_segment() {
        let url = mc().search_url("Drop Dead Fred").unwrap();
        assert_eq!(url.as_str(), "https://www.metacritic.com/search/Drop%20Dead%20Fred");
    }

    #[test]
    fn test_search_url_escapes_slash() {
        let url = mc().search_url("Face/Off").unwrap();
        assert_eq!(url.as_str(), "https://www.metacritic.com/search/Face%2FOff");
    }

    #[test]
    fn test_resolve_requires_exact_label() {
        let href = mc().resolve(MC_SEARCH, "Casper");
        assert_eq!(href.as_deref(), Some("/movie/casper/"));
    }

    #[test]
    fn test_resolve_partial_label_only_is_not_found() {
        let html = r#"
            <div class="c-pageSiteSearch-results">
                <div></div>
                <div>
                    <div><a href="/movie/casper-1995-re-release/"><div></div><div><p>Casper (1995 re-release)</p></div></a></div>
                </div>
            </div>
        "#;
        assert_eq!(mc().resolve(html, "Casper"), None);
    }

    #[test]
    fn test_resolve_skips_non_movie_links() {
        let html = r#"
            <div class="c-pageSiteSearch-results">
                <div></div>
                <div>
                    <div><a href="/tv/casper/"><div></div><div><p>Casper</p></div></a></div>
                </div>
            </div>
        "#;
        assert_eq!(mc().resolve(html, "Casper"), None);
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        assert_eq!(mc().resolve(MC_SEARCH, "toy story"), None);
        assert_eq!(mc().resolve(MC_SEARCH, "Toy Story").as_deref(), Some("/movie/toy-story/"));
    }

    #[test]
    fn test_extract_score() {
        let url = Url::parse("https://www.metacritic.com/movie/toy-story/").unwrap();
        let entry = mc().extract(MC_DETAIL, &url).unwrap();

        assert_eq!(entry.rating, "96");
        assert_eq!(entry.reviews, "Based on 26 Critic Reviews");
        assert_eq!(entry.link, "https://www.metacritic.com/movie/toy-story/");
    }

    #[test]
    fn test_extract_without_score_fails() {
        let url = Url::parse("https://www.metacritic.com/movie/casper/").unwrap();
        let html = r#"<div class="c-productScoreInfo_reviewsTotal"><a><span>Based on 3 Critic Reviews</span></a></div>"#;
        let result = mc().extract(html, &url);
        assert!(matches!(result, Err(Error::ExtractFailed(_))));
    }
}
