//! Filter predicate module
//!
//! Each filter is a set of optional per-field conditions joined by logical AND.
//! An absent condition always matches.

use std::collections::BTreeMap;

use super::params::{QueryError, QueryParams};
use crate::catalog::{Customer, Product, RecordId};

/// Predicate over a single record type
pub trait Filter<R> {
    fn matches(&self, record: &R) -> bool;
}

/// Inclusive integer range, either end optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Range {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl Range {
    /// Build a range from raw bounds
    ///
    /// With `zero_is_unset`, a bound of exactly 0 is dropped, so `min=0`
    /// behaves like no lower bound at all.
    pub fn new(min: Option<i64>, max: Option<i64>, zero_is_unset: bool) -> Self {
        let keep = |bound: Option<i64>| bound.filter(|v| !(zero_is_unset && *v == 0));
        Self {
            min: keep(min),
            max: keep(max),
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

/// Case-sensitive, unanchored containment
fn contains_text(needle: Option<&str>, haystack: &str) -> bool {
    needle.is_none_or(|n| haystack.contains(n))
}

/// Customer filter: name, age range, address
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFilter {
    pub name: Option<String>,
    pub age: Range,
    pub address: Option<String>,
}

impl CustomerFilter {
    pub fn from_params(params: &QueryParams, zero_is_unset: bool) -> Result<Self, QueryError> {
        Ok(Self {
            name: params.text("name"),
            age: Range::new(
                params.integer("age_min")?,
                params.integer("age_max")?,
                zero_is_unset,
            ),
            address: params.text("address"),
        })
    }
}

impl Filter<Customer> for CustomerFilter {
    fn matches(&self, record: &Customer) -> bool {
        contains_text(self.name.as_deref(), &record.name)
            && self.age.contains(record.age)
            && contains_text(self.address.as_deref(), &record.address)
    }
}

/// Product filter: title, price range, category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub name: Option<String>,
    pub price: Range,
    pub category: Option<String>,
}

impl ProductFilter {
    pub fn from_params(params: &QueryParams, zero_is_unset: bool) -> Result<Self, QueryError> {
        Ok(Self {
            name: params.text("name"),
            price: Range::new(
                params.integer("price_min")?,
                params.integer("price_max")?,
                zero_is_unset,
            ),
            category: params.text("category"),
        })
    }
}

impl Filter<Product> for ProductFilter {
    fn matches(&self, record: &Product) -> bool {
        contains_text(self.name.as_deref(), &record.title)
            && self.price.contains(record.price)
            && contains_text(self.category.as_deref(), &record.category)
    }
}

/// Select the records matching `filter`, keeping their original ids
pub fn select<'a, R, F>(
    records: &'a BTreeMap<RecordId, R>,
    filter: &F,
) -> BTreeMap<RecordId, &'a R>
where
    F: Filter<R>,
{
    records
        .iter()
        .filter(|(_, record)| filter.matches(record))
        .map(|(id, record)| (*id, record))
        .collect()
}
