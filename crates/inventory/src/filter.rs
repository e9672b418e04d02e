//! Filter/search evaluation over inventory records.
//!
//! A [`FilterCriteria`] is a conjunction of independent predicates: free
//! text, category, status, price range and tags. All predicates are pure, so
//! evaluation order does not matter.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::policy::StockPolicy;
use crate::price::Price;
use crate::record::InventoryRecord;
use crate::status::StockStatus;

/// Wildcard accepted on the wire for category and status.
pub const WILDCARD: &str = "all";

/// Caller-held filter state.
///
/// `None` for category/status and zero for either price bound mean "no
/// constraint". The default value matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Case-insensitive substring of name, sku, category or description.
    pub search_term: String,
    #[serde(deserialize_with = "wildcard")]
    pub category: Option<String>,
    #[serde(deserialize_with = "wildcard")]
    pub status: Option<StockStatus>,
    pub min_price: Price,
    pub max_price: Price,
    /// Every listed tag must be present on the record.
    pub tags: BTreeSet<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = normalize_wildcard(category.into());
        self
    }

    pub fn status(mut self, status: StockStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn price_range(mut self, min: Price, max: Price) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// True when no predicate constrains the result.
    pub fn is_unconstrained(&self) -> bool {
        self.search_term.is_empty()
            && self.category.is_none()
            && self.status.is_none()
            && self.min_price.is_zero()
            && self.max_price.is_zero()
            && self.tags.is_empty()
    }
}

fn normalize_wildcard(value: String) -> Option<String> {
    if value.is_empty() || value == WILDCARD {
        None
    } else {
        Some(value)
    }
}

/// Deserialize `"all"`, `""` or `null` as `None`, anything else via `FromStr`.
fn wildcard<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: core::str::FromStr,
    T::Err: core::fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.and_then(normalize_wildcard) {
        None => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Evaluate `criteria` against one record under the default policy.
pub fn matches(record: &InventoryRecord, criteria: &FilterCriteria) -> bool {
    matches_with(record, criteria, &StockPolicy::default())
}

/// Evaluate `criteria` against one record; status is derived through `policy`.
pub fn matches_with(
    record: &InventoryRecord,
    criteria: &FilterCriteria,
    policy: &StockPolicy,
) -> bool {
    matches_text(record, &criteria.search_term)
        && criteria
            .category
            .as_deref()
            .is_none_or(|c| record.category() == Some(c))
        && criteria.status.is_none_or(|s| policy.status_of(record) == s)
        && matches_price(record.price(), criteria.min_price, criteria.max_price)
        && criteria.tags.iter().all(|t| record.tags().contains(t))
}

fn matches_text(record: &InventoryRecord, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    let contains = |field: &str| field.to_lowercase().contains(&needle);

    contains(record.name())
        || record.sku().is_some_and(contains)
        || record.category().is_some_and(contains)
        || record.description().is_some_and(contains)
}

fn matches_price(price: Price, min: Price, max: Price) -> bool {
    (min.is_zero() || price >= min) && (max.is_zero() || price <= max)
}

/// Stable filter under the default policy.
pub fn filter_and_search(
    records: &[InventoryRecord],
    criteria: &FilterCriteria,
) -> Vec<InventoryRecord> {
    filter_and_search_with(records, criteria, &StockPolicy::default())
}

/// Records matching `criteria`, in input order. The input is left untouched.
pub fn filter_and_search_with(
    records: &[InventoryRecord],
    criteria: &FilterCriteria,
    policy: &StockPolicy,
) -> Vec<InventoryRecord> {
    records
        .iter()
        .filter(|r| matches_with(r, criteria, policy))
        .cloned()
        .collect()
}
