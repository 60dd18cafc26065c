use serde::Deserialize;
use serde_json::Value;

/// One page of results as returned by the provider.
///
/// The response carries many sections we never look at; the pipeline only
/// needs the raw item list and the pagination block, so everything else is
/// dropped at decode time. Both sections are optional — a page lacking
/// `organic_results` altogether is distinguished from one carrying an empty
/// list (the former is a parse problem, the latter a legitimately empty page).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub organic_results: Option<Vec<Value>>,
    #[serde(default)]
    pub serpapi_pagination: Option<SerpPagination>,
}

impl SearchPage {
    /// The raw item list, or `None` when the page lacks one.
    pub fn items(&self) -> Option<&[Value]> {
        self.organic_results.as_deref()
    }

    pub fn item_count(&self) -> usize {
        self.organic_results.as_ref().map_or(0, Vec::len)
    }

    /// Whether the provider advertises a further page.
    pub fn has_next(&self) -> bool {
        self.serpapi_pagination
            .as_ref()
            .and_then(|p| p.next.as_deref())
            .is_some_and(|next| !next.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SerpPagination {
    #[serde(default)]
    pub next: Option<String>,
}

/// The 4-tuple written to the sink, in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRecord {
    pub title: String,
    pub link: String,
    pub snippet: String,
    pub date: String,
}

impl SearchRecord {
    pub const HEADER: [&'static str; 4] = ["title", "link", "snippet", "date"];

    /// Extract a record from one raw item. Returns `None` for items that are
    /// not JSON objects; absent or mistyped fields become empty strings.
    pub fn from_item(item: &Value) -> Option<Self> {
        let obj = item.as_object()?;
        let text = |key: &str| {
            obj.get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Some(Self {
            title: text("title"),
            link: text("link"),
            snippet: text("snippet"),
            date: text("date"),
        })
    }

    pub fn as_row(&self) -> [&str; 4] {
        [&self.title, &self.link, &self.snippet, &self.date]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_page_and_ignores_unknown_sections() {
        let page: SearchPage = serde_json::from_value(json!({
            "search_metadata": {"id": "abc", "status": "Success"},
            "organic_results": [
                {"position": 1, "title": "A", "link": "u1", "snippet": "s1"},
                {"position": 2, "title": "B", "link": "u2", "snippet": "s2", "date": "2024-01-01"}
            ],
            "serpapi_pagination": {"next": "https://serpapi.com/search?start=10"}
        }))
        .unwrap();

        assert_eq!(page.item_count(), 2);
        assert!(page.has_next());
    }

    #[test]
    fn page_without_items_reports_none() {
        let page: SearchPage =
            serde_json::from_value(json!({"search_metadata": {"status": "Success"}})).unwrap();
        assert!(page.items().is_none());
        assert_eq!(page.item_count(), 0);
        assert!(!page.has_next());
    }

    #[test]
    fn empty_next_means_no_further_page() {
        let page: SearchPage =
            serde_json::from_value(json!({"serpapi_pagination": {"next": ""}})).unwrap();
        assert!(!page.has_next());

        let page: SearchPage =
            serde_json::from_value(json!({"serpapi_pagination": {}})).unwrap();
        assert!(!page.has_next());
    }

    #[test]
    fn record_defaults_missing_and_mistyped_fields() {
        let rec = SearchRecord::from_item(&json!({
            "link": "https://example.com",
            "title": 42,
            "snippet": "s"
        }))
        .unwrap();
        assert_eq!(rec.title, "");
        assert_eq!(rec.link, "https://example.com");
        assert_eq!(rec.snippet, "s");
        assert_eq!(rec.date, "");
    }

    #[test]
    fn non_object_items_are_rejected() {
        assert!(SearchRecord::from_item(&json!("just a string")).is_none());
        assert!(SearchRecord::from_item(&json!([1, 2, 3])).is_none());
    }
}
