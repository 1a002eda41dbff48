//! Search criteria and the normalized query built from them.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::sort::SortOrder;
use crate::error::{PupError, Result};

/// Default number of dogs per page.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Opaque pagination cursor (the `from` value of a page link).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The user's current filter, sort and pagination intent.
///
/// Fields are private so that every filter or sort change goes through a
/// mutator that drops the pagination cursor. A cursor is only meaningful for
/// the criteria that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    breeds: Vec<String>,
    zip_codes: Vec<String>,
    age_min: Option<u32>,
    age_max: Option<u32>,
    sort: SortOrder,
    cursor: Option<Cursor>,
    page_size: u32,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates empty criteria with a fixed page size (at least 1).
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            breeds: Vec::new(),
            zip_codes: Vec::new(),
            age_min: None,
            age_max: None,
            sort: SortOrder::default(),
            cursor: None,
            page_size: page_size.max(1),
        }
    }

    pub fn breeds(&self) -> &[String] {
        &self.breeds
    }

    pub fn zip_codes(&self) -> &[String] {
        &self.zip_codes
    }

    pub fn age_min(&self) -> Option<u32> {
        self.age_min
    }

    pub fn age_max(&self) -> Option<u32> {
        self.age_max
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Replaces the breed set. Blank names and duplicates are dropped.
    pub fn set_breeds<I, S>(&mut self, breeds: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.breeds = dedup_non_blank(breeds);
        self.reset_cursor();
    }

    /// Adds the breed if absent, removes it if present.
    pub fn toggle_breed(&mut self, breed: impl Into<String>) {
        let breed = breed.into().trim().to_string();
        if breed.is_empty() {
            return;
        }
        match self.breeds.iter().position(|b| *b == breed) {
            Some(index) => {
                self.breeds.remove(index);
            }
            None => self.breeds.push(breed),
        }
        self.reset_cursor();
    }

    /// Replaces the zip code set. Blank values and duplicates are dropped.
    pub fn set_zip_codes<I, S>(&mut self, zip_codes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.zip_codes = dedup_non_blank(zip_codes);
        self.reset_cursor();
    }

    /// Sets both age bounds. Fails without changing anything when
    /// `max < min`.
    pub fn set_age_range(&mut self, min: Option<u32>, max: Option<u32>) -> Result<()> {
        if let (Some(min), Some(max)) = (min, max)
            && max < min
        {
            return Err(PupError::invalid_criteria(format!(
                "maximum age {} is below minimum age {}",
                max, min
            )));
        }
        self.age_min = min;
        self.age_max = max;
        self.reset_cursor();
        Ok(())
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
        self.reset_cursor();
    }

    /// Clears every filter and restores the default sort.
    pub fn reset_filters(&mut self) {
        *self = Self::with_page_size(self.page_size);
    }

    /// Moves to the page identified by `cursor`, leaving filters untouched.
    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = Some(cursor);
    }

    /// Returns to the first page.
    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    /// Normalizes the criteria into the query sent to `/dogs/search`.
    pub fn to_query(&self) -> SearchQuery {
        let mut pairs = Vec::new();
        for breed in &self.breeds {
            pairs.push(("breeds".to_string(), breed.clone()));
        }
        for zip in &self.zip_codes {
            pairs.push(("zipCodes".to_string(), zip.clone()));
        }
        if let Some(min) = self.age_min {
            pairs.push(("ageMin".to_string(), min.to_string()));
        }
        if let Some(max) = self.age_max {
            pairs.push(("ageMax".to_string(), max.to_string()));
        }
        pairs.push(("sort".to_string(), self.sort.token()));
        pairs.push(("size".to_string(), self.page_size.to_string()));
        if let Some(cursor) = &self.cursor {
            pairs.push(("from".to_string(), cursor.as_str().to_string()));
        }
        SearchQuery { pairs }
    }
}

fn dedup_non_blank<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for value in values {
        let value = value.into().trim().to_string();
        if !value.is_empty() && !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

/// Normalized query parameters for the search endpoint.
///
/// Order is stable so that equal criteria always produce equal queries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    pairs: Vec<(String, String)>,
}

impl SearchQuery {
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// First value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All values for `key`, in order.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Renders `k=v&k=v` without percent-encoding; for logs and tests.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }
}
