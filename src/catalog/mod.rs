//! Catalog module
//!
//! Holds the customer and product collections. Both are built once on first
//! access and never mutated afterwards, so handlers share them without locks.

mod records;

use std::collections::BTreeMap;
use std::sync::OnceLock;

pub use records::{Customer, Product, RecordId};

/// Global catalog instance
static CATALOG: OnceLock<Catalog> = OnceLock::new();

/// Read-only record collections, ordered by id
#[derive(Debug)]
pub struct Catalog {
    customers: BTreeMap<RecordId, Customer>,
    products: BTreeMap<RecordId, Product>,
}

impl Catalog {
    /// Build a catalog from the built-in seed records
    pub fn seeded() -> Self {
        Self {
            customers: records::seed_customers().into_iter().collect(),
            products: records::seed_products().into_iter().collect(),
        }
    }

    /// Get the process-wide catalog, initializing it on first call
    pub fn global() -> &'static Self {
        CATALOG.get_or_init(Self::seeded)
    }

    pub const fn customers(&self) -> &BTreeMap<RecordId, Customer> {
        &self.customers
    }

    pub const fn products(&self) -> &BTreeMap<RecordId, Product> {
        &self.products
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_sizes() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.customers().len(), 5);
        assert_eq!(catalog.products().len(), 5);
    }

    #[test]
    fn test_seed_ids_are_unique() {
        assert_eq!(
            records::seed_customers().len(),
            Catalog::seeded().customers().len()
        );
        assert_eq!(
            records::seed_products().len(),
            Catalog::seeded().products().len()
        );
    }

    #[test]
    fn test_global_is_shared() {
        let a = Catalog::global();
        let b = Catalog::global();
        assert!(std::ptr::eq(a, b));
        assert_eq!(a.customers()[&1].name, "김철수");
        assert_eq!(a.products()[&5].title, "커피머신");
    }
}
