//! Query module
//!
//! Read operations over the catalog: the full listing and the customer and
//! product searches. All of them are pure functions of the catalog and the
//! request parameters.

mod filter;
mod params;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::{Catalog, Customer, Product, RecordId};

pub use filter::{select, CustomerFilter, ProductFilter};
pub use params::{QueryError, QueryParams};

/// Response body for the full listing
#[derive(Debug, Serialize)]
pub struct Overview<'a> {
    pub customers: &'a BTreeMap<RecordId, Customer>,
    pub products: &'a BTreeMap<RecordId, Product>,
    pub total_customers: usize,
    pub total_products: usize,
}

/// Response body for a search
#[derive(Debug, Serialize)]
pub struct SearchResult<'a, R> {
    pub results: BTreeMap<RecordId, &'a R>,
    pub result_count: usize,
}

impl<'a, R> SearchResult<'a, R> {
    fn new(results: BTreeMap<RecordId, &'a R>) -> Self {
        let result_count = results.len();
        Self {
            results,
            result_count,
        }
    }
}

pub fn list_all(catalog: &Catalog) -> Overview<'_> {
    Overview {
        customers: catalog.customers(),
        products: catalog.products(),
        total_customers: catalog.customers().len(),
        total_products: catalog.products().len(),
    }
}

pub fn filter_customers<'a>(
    catalog: &'a Catalog,
    filter: &CustomerFilter,
) -> SearchResult<'a, Customer> {
    SearchResult::new(select(catalog.customers(), filter))
}

pub fn filter_products<'a>(
    catalog: &'a Catalog,
    filter: &ProductFilter,
) -> SearchResult<'a, Product> {
    SearchResult::new(select(catalog.products(), filter))
}
