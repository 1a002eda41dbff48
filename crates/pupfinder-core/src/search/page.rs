//! Search result pages and their resolution into dogs.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::criteria::Cursor;
use crate::dog::Dog;

/// Base used to resolve relative page links such as
/// `/dogs/search?size=25&from=25`. Only the query string is read.
const LINK_BASE: &str = "http://localhost/";

/// Extracts the pagination cursor from a next/prev page link.
///
/// The cursor is the value of the `from` query parameter. Links are usually
/// relative paths; absolute URLs are accepted too. Returns `None` when the
/// link is unparsable or carries no `from`.
pub fn cursor_from_link(link: &str) -> Option<Cursor> {
    let base = Url::parse(LINK_BASE).ok()?;
    let url = base.join(link.trim()).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "from")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
        .map(Cursor::new)
}

/// One response from the search stage.
///
/// Replaced wholesale on every search; never merged with an earlier page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultPage {
    /// Identifiers in the order defined by the current sort
    pub result_ids: Vec<String>,
    /// Matches across all pages
    pub total: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
}

impl SearchResultPage {
    pub fn is_empty(&self) -> bool {
        self.result_ids.is_empty()
    }

    pub fn next_cursor(&self) -> Option<Cursor> {
        self.next.as_deref().and_then(cursor_from_link)
    }

    pub fn prev_cursor(&self) -> Option<Cursor> {
        self.prev.as_deref().and_then(cursor_from_link)
    }
}

/// The dogs behind a `SearchResultPage`, in the page's identifier order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedPage {
    dogs: Vec<Dog>,
}

impl ResolvedPage {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Orders `records` to follow `ids`.
    ///
    /// The detail endpoint does not promise to return records in request
    /// order, so the search stage's order is restored here. Identifiers with
    /// no matching record are skipped.
    pub fn reassemble(ids: &[String], records: Vec<Dog>) -> Self {
        let mut by_id: HashMap<String, Dog> = records
            .into_iter()
            .map(|dog| (dog.id.clone(), dog))
            .collect();

        let mut dogs = Vec::with_capacity(ids.len());
        for id in ids {
            match by_id.remove(id) {
                Some(dog) => dogs.push(dog),
                None => tracing::warn!(dog_id = %id, "Detail lookup returned no record"),
            }
        }
        Self { dogs }
    }

    pub fn dogs(&self) -> &[Dog] {
        &self.dogs
    }

    pub fn len(&self) -> usize {
        self.dogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dogs.is_empty()
    }

    pub fn into_dogs(self) -> Vec<Dog> {
        self.dogs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dog(id: &str) -> Dog {
        Dog {
            id: id.to_string(),
            name: format!("dog-{}", id),
            breed: "Mutt".to_string(),
            age: 2,
            zip_code: "10001".to_string(),
            image_url: String::new(),
        }
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_cursor_from_relative_link() {
        let cursor = cursor_from_link("/dogs/search?size=25&from=25&sort=breed:asc");
        assert_eq!(cursor, Some(Cursor::new("25")));
    }

    #[test]
    fn test_cursor_from_absolute_link() {
        let cursor = cursor_from_link("https://example.com/dogs/search?from=100&size=25");
        assert_eq!(cursor, Some(Cursor::new("100")));
    }

    #[test]
    fn test_cursor_missing_from() {
        assert_eq!(cursor_from_link("/dogs/search?size=25"), None);
        assert_eq!(cursor_from_link("/dogs/search?from="), None);
    }

    #[test]
    fn test_page_cursors() {
        let page = SearchResultPage {
            result_ids: ids(&["a"]),
            total: 60,
            next: Some("/dogs/search?size=25&from=50".to_string()),
            prev: Some("/dogs/search?size=25&from=0".to_string()),
        };
        assert_eq!(page.next_cursor(), Some(Cursor::new("50")));
        assert_eq!(page.prev_cursor(), Some(Cursor::new("0")));
    }

    #[test]
    fn test_page_wire_shape() {
        let json = r#"{"resultIds":["1","2"],"total":2}"#;
        let page: SearchResultPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.result_ids, ids(&["1", "2"]));
        assert_eq!(page.total, 2);
        assert!(page.next.is_none());
        assert!(page.next_cursor().is_none());
    }

    #[test]
    fn test_reassemble_restores_request_order() {
        let page = ResolvedPage::reassemble(
            &ids(&["a", "b", "c"]),
            vec![dog("c"), dog("a"), dog("b")],
        );
        let order: Vec<&str> = page.dogs().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_reassemble_skips_unresolved_ids() {
        let page = ResolvedPage::reassemble(&ids(&["a", "b", "c"]), vec![dog("c"), dog("a")]);
        let order: Vec<&str> = page.dogs().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(order, vec!["a", "c"]);
    }
}
