//! Structural field extraction helpers over `scraper` documents.
//!
//! Every helper degrades to an empty value when nothing matches, so one
//! missing element never aborts a whole page.

use scraper::{ElementRef, Selector};

/// Parse a selector that is known at compile time.
///
/// # Panics
///
/// Panics if `css` is not a valid selector. Only call with literals.
pub fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e}"))
}

/// All text under `element`, concatenated and trimmed.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Trimmed text of the first match, or an empty string.
pub fn first_text(scope: ElementRef<'_>, sel: &Selector) -> String {
    scope.select(sel).next().map(element_text).unwrap_or_default()
}

/// Text of every match concatenated, then trimmed.
pub fn joined_text(scope: ElementRef<'_>, sel: &Selector) -> String {
    scope
        .select(sel)
        .flat_map(|el| el.text())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Trimmed text of each match, in document order. Empty strings are dropped.
pub fn each_text(scope: ElementRef<'_>, sel: &Selector) -> Vec<String> {
    scope
        .select(sel)
        .map(element_text)
        .filter(|t| !t.is_empty())
        .collect()
}

/// An attribute of the first match, if both exist.
pub fn first_attr(scope: ElementRef<'_>, sel: &Selector, attr: &str) -> Option<String> {
    scope
        .select(sel)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const HTML: &str = r#"
        <html>
            <body>
                <ul class="meta">
                    <li> 1995 </li>
                    <li><a href="/rating">G</a></li>
                    <li>1h 21m</li>
                </ul>
                <div class="genres"><a><span>Animation</span></a><a><span>Adventure</span></a><a><span> </span></a></div>
                <a class="poster" href="/title/tt0114709/">poster</a>
            </body>
        </html>
    "#;

    #[test]
    fn test_first_text_trims() {
        let doc = Html::parse_document(HTML);
        assert_eq!(first_text(doc.root_element(), &selector(".meta li")), "1995");
    }

    #[test]
    fn test_first_text_missing_is_empty() {
        let doc = Html::parse_document(HTML);
        assert_eq!(first_text(doc.root_element(), &selector(".nope")), "");
    }

    #[test]
    fn test_nth_of_type() {
        let doc = Html::parse_document(HTML);
        let root = doc.root_element();
        assert_eq!(first_text(root, &selector(".meta li:nth-of-type(2) a")), "G");
        assert_eq!(first_text(root, &selector(".meta li:nth-of-type(3)")), "1h 21m");
    }

    #[test]
    fn test_joined_text_concatenates() {
        let doc = Html::parse_document(HTML);
        assert_eq!(joined_text(doc.root_element(), &selector(".genres span")), "AnimationAdventure");
    }

    #[test]
    fn test_each_text_skips_blank() {
        let doc = Html::parse_document(HTML);
        assert_eq!(each_text(doc.root_element(), &selector(".genres span")), vec!["Animation", "Adventure"]);
    }

    #[test]
    fn test_first_attr() {
        let doc = Html::parse_document(HTML);
        let root = doc.root_element();
        assert_eq!(first_attr(root, &selector("a.poster"), "href").as_deref(), Some("/title/tt0114709/"));
        assert_eq!(first_attr(root, &selector("a.poster"), "title"), None);
        assert_eq!(first_attr(root, &selector("a.missing"), "href"), None);
    }

    #[test]
    #[should_panic(expected = "invalid selector")]
    fn test_selector_rejects_garbage() {
        selector("li:::");
    }
}
