//! Listing query state.
//!
//! [`ListingQuery`] is the single source of truth for the active filters and
//! the current page of a listing view. It is kept in the URL query string,
//! so every state must survive a trip through [`ListingQuery::serialize`]
//! and [`ListingQuery::parse`] unchanged:
//!
//! ```
//! use estate_core::core::query::{FilterKey, ListingQuery};
//!
//! let mut query = ListingQuery::default();
//! query.set_filter(FilterKey::City, "San Francisco");
//! query.set_page(3);
//!
//! let encoded = query.serialize();
//! assert_eq!(encoded, "city=San+Francisco&page=3");
//! assert_eq!(ListingQuery::parse(&encoded), query);
//! ```
//!
//! Normalization rules:
//! - values are trimmed; a blank value unsets the key and is never sent
//! - `page` is at least 1 and is omitted from the URL when it is 1
//! - changing any filter moves back to page 1
//! - unknown keys are kept in order as passthrough parameters, including
//!   ones with an empty value (`?ref=`, `?debug` both come back as `key=`)

use std::collections::BTreeMap;
use std::fmt;

use url::form_urlencoded;

/// Query parameters with a meaning for the listing API.
///
/// Declaration order is the order keys are written to the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterKey {
    Search,
    Q,
    MinPrice,
    MaxPrice,
    Bedrooms,
    Bathrooms,
    MinBed,
    MaxBed,
    MinBath,
    MaxBath,
    PropertyType,
    Type,
    City,
    State,
    Zipcode,
    Sort,
    PerPage,
}

impl FilterKey {
    pub const ALL: [FilterKey; 17] = [
        FilterKey::Search,
        FilterKey::Q,
        FilterKey::MinPrice,
        FilterKey::MaxPrice,
        FilterKey::Bedrooms,
        FilterKey::Bathrooms,
        FilterKey::MinBed,
        FilterKey::MaxBed,
        FilterKey::MinBath,
        FilterKey::MaxBath,
        FilterKey::PropertyType,
        FilterKey::Type,
        FilterKey::City,
        FilterKey::State,
        FilterKey::Zipcode,
        FilterKey::Sort,
        FilterKey::PerPage,
    ];

    /// Parameter name as it appears in the URL.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKey::Search => "search",
            FilterKey::Q => "q",
            FilterKey::MinPrice => "min_price",
            FilterKey::MaxPrice => "max_price",
            FilterKey::Bedrooms => "bedrooms",
            FilterKey::Bathrooms => "bathrooms",
            FilterKey::MinBed => "min_bed",
            FilterKey::MaxBed => "max_bed",
            FilterKey::MinBath => "min_bath",
            FilterKey::MaxBath => "max_bath",
            FilterKey::PropertyType => "property_type",
            FilterKey::Type => "type",
            FilterKey::City => "city",
            FilterKey::State => "state",
            FilterKey::Zipcode => "zipcode",
            FilterKey::Sort => "sort",
            FilterKey::PerPage => "per_page",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const PAGE_KEY: &str = "page";

/// Filter and pagination state of a listing view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    filters: BTreeMap<FilterKey, String>,
    page: u32,
    passthrough: Vec<(String, String)>,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            filters: BTreeMap::new(),
            page: 1,
            passthrough: Vec::new(),
        }
    }
}

impl ListingQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build state from a query string. Never fails: a leading `?` is
    /// ignored, bad escapes decode lossily, a page that is not a positive
    /// integer becomes 1 and a repeated known key keeps its last value.
    pub fn parse(query: &str) -> Self {
        let query = query.trim().trim_start_matches('?');
        let mut state = Self::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let value = value.trim();
            if key == PAGE_KEY {
                state.page = parse_page(value);
            } else if let Some(filter) = FilterKey::from_name(&key) {
                state.store_filter(filter, value);
            } else if !key.is_empty() {
                state.passthrough.push((key.into_owned(), value.to_string()));
            }
        }

        state
    }

    /// Query string for the location bar: filters in canonical order,
    /// `page` when it is not 1, then passthrough parameters.
    pub fn serialize(&self) -> String {
        self.encode(self.page > 1)
    }

    /// Query string for the API request; always names the page.
    pub fn api_query(&self) -> String {
        self.encode(true)
    }

    /// `?query` for history replacement, or an empty string.
    pub fn location(&self) -> String {
        let query = self.serialize();
        if query.is_empty() {
            query
        } else {
            format!("?{}", query)
        }
    }

    fn encode(&self, include_page: bool) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.filters {
            serializer.append_pair(key.as_str(), value);
        }
        if include_page {
            serializer.append_pair(PAGE_KEY, &self.page.to_string());
        }
        for (key, value) in &self.passthrough {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    pub fn filter(&self, key: FilterKey) -> Option<&str> {
        self.filters.get(&key).map(String::as_str)
    }

    pub fn filters(&self) -> impl Iterator<Item = (FilterKey, &str)> {
        self.filters.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }

    pub fn passthrough(&self) -> &[(String, String)] {
        &self.passthrough
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Set (or, with a blank value, unset) a filter. Returns to page 1.
    pub fn set_filter(&mut self, key: FilterKey, value: impl AsRef<str>) {
        self.store_filter(key, value.as_ref().trim());
        self.page = 1;
    }

    pub fn with_filter(mut self, key: FilterKey, value: impl AsRef<str>) -> Self {
        self.set_filter(key, value);
        self
    }

    /// Remove a filter. Returns to page 1.
    pub fn clear_filter(&mut self, key: FilterKey) {
        self.filters.remove(&key);
        self.page = 1;
    }

    /// Remove every filter, keeping passthrough parameters. Returns to page 1.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.page = 1;
    }

    /// Replace the filters with a submitted filter form. Blank fields are
    /// dropped; fields that are not filters replace passthrough parameters
    /// of the same name. Returns to page 1.
    pub fn apply_form<I, K, V>(&mut self, fields: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.filters.clear();
        for (name, value) in fields {
            let (name, value) = (name.as_ref(), value.as_ref().trim());
            if name == PAGE_KEY {
                continue;
            }
            match FilterKey::from_name(name) {
                Some(key) => self.store_filter(key, value),
                None => self.set_passthrough(name, value),
            }
        }
        self.page = 1;
    }

    /// Replace every passthrough value for `name`; a blank value removes it.
    pub fn set_passthrough(&mut self, name: &str, value: &str) {
        if let Some(key) = FilterKey::from_name(name) {
            self.set_filter(key, value);
            return;
        }
        if name.is_empty() || name == PAGE_KEY {
            return;
        }
        self.passthrough.retain(|(k, _)| k != name);
        let value = value.trim();
        if !value.is_empty() {
            self.passthrough.push((name.to_string(), value.to_string()));
        }
    }

    /// Jump to a page; anything below 1 becomes 1. The upper bound is
    /// only known after a fetch, see [`ListingQuery::clamp_to_pages`].
    pub fn set_page(&mut self, page: i64) {
        self.page = page.clamp(1, u32::MAX as i64) as u32;
    }

    /// Advance one page unless already on the last known page.
    pub fn next_page(&mut self, pages: Option<u32>) -> bool {
        match pages {
            Some(total) if self.page >= total => false,
            _ => {
                self.page = self.page.saturating_add(1);
                true
            }
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page <= 1 {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Pull the page back inside `1..=pages`. A zero page count (no
    /// results) leaves the page untouched.
    pub fn clamp_to_pages(&mut self, pages: u32) {
        if pages >= 1 && self.page > pages {
            self.page = pages;
        }
    }

    fn store_filter(&mut self, key: FilterKey, value: &str) {
        if value.is_empty() {
            self.filters.remove(&key);
        } else {
            self.filters.insert(key, value.to_string());
        }
    }
}

impl fmt::Display for ListingQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

fn parse_page(raw: &str) -> u32 {
    raw.parse::<i64>()
        .ok()
        .map(|n| n.clamp(1, u32::MAX as i64) as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_states() -> Vec<ListingQuery> {
        let mut states = vec![ListingQuery::default()];

        let mut state = ListingQuery::default();
        state.set_filter(FilterKey::MinPrice, "300000");
        state.set_filter(FilterKey::MaxPrice, "900000");
        state.set_filter(FilterKey::Bedrooms, "3");
        state.set_filter(FilterKey::PropertyType, "Single Family");
        state.set_page(4);
        states.push(state);

        let mut state = ListingQuery::default();
        state.set_filter(FilterKey::Search, "ocean & view = 100%");
        state.set_filter(FilterKey::City, "São Paulo");
        state.set_passthrough("utm_source", "newsletter");
        states.push(state);

        let mut state = ListingQuery::parse("ref=a&ref=b&sort=price_desc&page=2");
        state.set_page(7);
        states.push(state);

        states
    }

    #[test]
    fn test_round_trip() {
        for state in sample_states() {
            let encoded = state.serialize();
            assert_eq!(ListingQuery::parse(&encoded), state, "via {:?}", encoded);
            assert_eq!(ListingQuery::parse(&state.location()), state);
            assert_eq!(ListingQuery::parse(&state.api_query()), state);
        }
    }

    #[test]
    fn test_serialize_drops_empty_and_default_page() {
        let mut state = ListingQuery::default();
        state.set_filter(FilterKey::City, "   ");
        state.set_filter(FilterKey::Bathrooms, "");
        assert_eq!(state.serialize(), "");
        assert_eq!(state.location(), "");
        assert_eq!(state.api_query(), "page=1");
    }

    #[test]
    fn test_serialize_canonical_order() {
        let state = ListingQuery::parse("zz=1&sort=newest&page=2&city=Austin&min_price=100");
        assert_eq!(state.serialize(), "min_price=100&city=Austin&sort=newest&page=2&zz=1");
    }

    #[test]
    fn test_setting_filter_resets_page() {
        for start in [1, 2, 9, 500] {
            let mut state = ListingQuery::default();
            state.set_page(start);
            state.set_filter(FilterKey::City, "Seattle");
            assert_eq!(state.page(), 1);

            let mut state = ListingQuery::parse(&format!("city=Seattle&page={}", start));
            state.clear_filter(FilterKey::City);
            assert_eq!(state.page(), 1);

            let mut state = ListingQuery::parse(&format!("city=Seattle&page={}", start));
            state.clear_filters();
            assert_eq!(state.page(), 1);
        }

        let state = ListingQuery::parse("page=5").with_filter(FilterKey::Sort, "price_asc");
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_set_page_clamps_lower_bound() {
        let mut state = ListingQuery::default();
        state.set_page(0);
        assert_eq!(state.page(), 1);
        state.set_page(-12);
        assert_eq!(state.page(), 1);
        state.set_page(i64::MAX);
        assert_eq!(state.page(), u32::MAX);
    }

    #[test]
    fn test_parse_malformed_input() {
        let state = ListingQuery::parse("?page=abc&city=%zz&&=orphan&bedrooms");
        assert_eq!(state.page(), 1);
        assert_eq!(state.filter(FilterKey::City), Some("%zz"));
        assert_eq!(state.filter(FilterKey::Bedrooms), None);
        assert!(state.passthrough().is_empty());

        assert_eq!(ListingQuery::parse("page=-4").page(), 1);
        assert_eq!(ListingQuery::parse("page=0").page(), 1);
        assert_eq!(ListingQuery::parse("page=2.5").page(), 1);
        assert_eq!(ListingQuery::parse("").page(), 1);
    }

    #[test]
    fn test_parse_last_known_value_wins() {
        let state = ListingQuery::parse("city=Austin&city=Boulder&page=2&page=3");
        assert_eq!(state.filter(FilterKey::City), Some("Boulder"));
        assert_eq!(state.page(), 3);

        let state = ListingQuery::parse("city=Austin&city=");
        assert_eq!(state.filter(FilterKey::City), None);
    }

    #[test]
    fn test_unknown_keys_pass_through() {
        let state = ListingQuery::parse("b=2&a=1&b=3&city=Miami");
        assert_eq!(
            state.passthrough(),
            &[
                ("b".to_string(), "2".to_string()),
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "3".to_string()),
            ]
        );
        assert_eq!(state.serialize(), "city=Miami&b=2&a=1&b=3");
    }

    #[test]
    fn test_empty_unknown_keys_are_kept() {
        let state = ListingQuery::parse("?ref=&city=Miami&debug");
        assert_eq!(
            state.passthrough(),
            &[
                ("ref".to_string(), String::new()),
                ("debug".to_string(), String::new()),
            ]
        );
        assert_eq!(state.serialize(), "city=Miami&ref=&debug=");
        assert_eq!(ListingQuery::parse(&state.serialize()), state);
    }

    #[test]
    fn test_apply_form_replaces_filters() {
        let mut state = ListingQuery::parse("city=Austin&bedrooms=2&page=6&ref=mail");
        state.apply_form([
            ("min_price", "250000"),
            ("bedrooms", ""),
            ("city", " Denver "),
            ("page", "9"),
            ("ref", "form"),
        ]);

        assert_eq!(state.filter(FilterKey::City), Some("Denver"));
        assert_eq!(state.filter(FilterKey::MinPrice), Some("250000"));
        assert_eq!(state.filter(FilterKey::Bedrooms), None);
        assert_eq!(state.page(), 1);
        assert_eq!(
            state.passthrough(),
            &[("ref".to_string(), "form".to_string())]
        );
    }

    #[test]
    fn test_page_navigation() {
        let mut state = ListingQuery::default();
        assert!(!state.prev_page());
        assert!(state.next_page(Some(3)));
        assert!(state.next_page(Some(3)));
        assert_eq!(state.page(), 3);
        assert!(!state.next_page(Some(3)));
        assert!(state.next_page(None));
        assert_eq!(state.page(), 4);

        state.clamp_to_pages(2);
        assert_eq!(state.page(), 2);
        state.clamp_to_pages(0);
        assert_eq!(state.page(), 2);
        assert!(state.prev_page());
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_filter_key_names_round_trip() {
        for key in FilterKey::ALL {
            assert_eq!(FilterKey::from_name(key.as_str()), Some(key));
        }
        assert_eq!(FilterKey::from_name("page"), None);
        assert_eq!(FilterKey::from_name("City"), None);
    }
}
