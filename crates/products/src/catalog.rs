//! In-memory product catalog.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use stockroom_core::{DomainError, DomainResult, ProductId};

use crate::{NewProduct, Product, ProductPatch};

/// Product store keyed by sequentially assigned ids.
///
/// # Invariants
/// - Ids start at 1 and come from `next_id`, which only ever grows; deleting a
///   product never frees its id.
/// - Iteration (list, search, low-stock) is in ascending id order, which is
///   also insertion order.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    products: BTreeMap<ProductId, Product>,
    next_id: ProductId,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self {
            products: BTreeMap::new(),
            next_id: ProductId::FIRST,
        }
    }
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and insert a new product under the next id.
    pub fn add(&mut self, new: NewProduct, now: DateTime<Utc>) -> DomainResult<&Product> {
        let id = self.next_id;
        let product = Product::create(id, new, now)?;
        self.next_id = id.next();

        tracing::debug!(product_id = %id, name = product.name(), "product added");
        Ok(&*self.products.entry(id).or_insert(product))
    }

    pub fn get(&self, id: ProductId) -> DomainResult<&Product> {
        self.products.get(&id).ok_or_else(|| not_found(id))
    }

    /// Overwrite the fields present in `patch` and refresh `last_updated`.
    ///
    /// Validation runs before any field is written.
    pub fn update(
        &mut self,
        id: ProductId,
        patch: &ProductPatch,
        now: DateTime<Utc>,
    ) -> DomainResult<&Product> {
        let product = self.products.get_mut(&id).ok_or_else(|| not_found(id))?;
        product.apply(patch, now)?;

        tracing::debug!(product_id = %id, "product updated");
        Ok(&*product)
    }

    /// Set the stock level of a product.
    pub fn set_stock(
        &mut self,
        id: ProductId,
        stock_quantity: i64,
        now: DateTime<Utc>,
    ) -> DomainResult<&Product> {
        self.update(id, &ProductPatch::new().stock_quantity(stock_quantity), now)
    }

    /// Remove a product permanently, returning it.
    pub fn delete(&mut self, id: ProductId) -> DomainResult<Product> {
        let removed = self.products.remove(&id).ok_or_else(|| not_found(id))?;
        tracing::debug!(product_id = %id, "product deleted");
        Ok(removed)
    }

    /// Products whose name or category contains `term`, ignoring case.
    pub fn search(&self, term: &str) -> Vec<&Product> {
        let needle = term.to_lowercase();
        self.products
            .values()
            .filter(|p| p.matches_lowercase(&needle))
            .collect()
    }

    /// Products with `stock_quantity <= threshold`.
    pub fn low_stock(&self, threshold: i64) -> Vec<&Product> {
        self.products
            .values()
            .filter(|p| p.is_low_stock(threshold))
            .collect()
    }

    pub fn list(&self) -> Vec<&Product> {
        self.products.values().collect()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// The id the next successful `add` will assign.
    pub fn next_id(&self) -> ProductId {
        self.next_id
    }
}

fn not_found(id: ProductId) -> DomainError {
    DomainError::not_found(format!("product {id}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn id(raw: u64) -> ProductId {
        ProductId::new(raw).unwrap()
    }

    fn catalog_with(items: &[(&str, &str, i64)]) -> CatalogStore {
        let mut catalog = CatalogStore::new();
        for (name, category, stock) in items {
            catalog
                .add(NewProduct::new(*name, *category, dec!(1.50), *stock), Utc::now())
                .unwrap();
        }
        catalog
    }

    fn ids(products: &[&Product]) -> Vec<u64> {
        products.iter().map(|p| p.id().get()).collect()
    }

    #[test]
    fn add_assigns_sequential_ids_from_one() {
        let mut catalog = CatalogStore::new();
        let now = Utc::now();

        let first = catalog
            .add(NewProduct::new("Widget", "Tools", dec!(9.99), 3), now)
            .unwrap();
        assert_eq!(first.id(), id(1));
        assert_eq!(first.last_updated(), now);

        let second = catalog
            .add(NewProduct::new("Gadget", "Tools", dec!(4.00), 8), now)
            .unwrap();
        assert_eq!(second.id(), id(2));
    }

    #[test]
    fn failed_add_does_not_consume_an_id() {
        let mut catalog = CatalogStore::new();
        let err = catalog
            .add(NewProduct::new("", "Tools", dec!(1), 1), Utc::now())
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
        assert!(catalog.is_empty());
        assert_eq!(catalog.next_id(), ProductId::FIRST);
    }

    #[test]
    fn deleted_ids_are_never_reassigned() {
        let mut catalog = catalog_with(&[("A", "x", 1), ("B", "x", 1), ("C", "x", 1)]);

        catalog.delete(id(3)).unwrap();
        catalog.delete(id(1)).unwrap();
        assert!(matches!(catalog.get(id(1)), Err(DomainError::NotFound(_))));

        let next = catalog
            .add(NewProduct::new("D", "x", dec!(1), 1), Utc::now())
            .unwrap();
        assert_eq!(next.id(), id(4));
        assert_eq!(ids(&catalog.list()), vec![2, 4]);
    }

    #[test]
    fn update_changes_only_given_fields_and_refreshes_timestamp() {
        let mut catalog = CatalogStore::new();
        let created = Utc::now();
        catalog
            .add(NewProduct::new("Widget", "Tools", dec!(9.99), 3), created)
            .unwrap();

        let later = created + Duration::minutes(1);
        let updated = catalog
            .update(id(1), &ProductPatch::new().stock_quantity(2), later)
            .unwrap();

        assert_eq!(updated.stock_quantity(), 2);
        assert_eq!(updated.name(), "Widget");
        assert_eq!(updated.category(), "Tools");
        assert_eq!(updated.price(), dec!(9.99));
        assert_eq!(updated.last_updated(), later);
    }

    #[test]
    fn update_and_delete_report_missing_ids() {
        let mut catalog = catalog_with(&[("A", "x", 1)]);
        let now = Utc::now();

        assert_eq!(
            catalog.update(id(9), &ProductPatch::new().name("Z"), now).unwrap_err(),
            DomainError::NotFound("product 9".to_string())
        );
        assert!(matches!(catalog.delete(id(9)), Err(DomainError::NotFound(_))));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn set_stock_is_a_stock_only_update() {
        let mut catalog = catalog_with(&[("A", "x", 10)]);
        let product = catalog.set_stock(id(1), 0, Utc::now()).unwrap();
        assert_eq!(product.stock_quantity(), 0);

        assert!(matches!(
            catalog.set_stock(id(1), -3, Utc::now()),
            Err(DomainError::InvalidArgument(_))
        ));
    }

    #[test]
    fn search_matches_name_or_category_ignoring_case() {
        let catalog = catalog_with(&[
            ("Hammer", "Tools", 4),
            ("Toolbox", "Storage", 9),
            ("Lamp", "Lighting", 2),
        ]);

        assert_eq!(ids(&catalog.search("tool")), vec![1, 2]);
        assert_eq!(ids(&catalog.search("LIGHT")), vec![3]);
        assert!(catalog.search("drill").is_empty());
    }

    #[test]
    fn empty_search_term_matches_everything() {
        let catalog = catalog_with(&[("A", "x", 1), ("B", "y", 1)]);
        assert_eq!(catalog.search("").len(), 2);
    }

    #[test]
    fn low_stock_is_inclusive_of_threshold() {
        let catalog = catalog_with(&[("A", "x", 6), ("B", "x", 5), ("C", "x", 0), ("D", "x", 12)]);
        assert_eq!(ids(&catalog.low_stock(5)), vec![2, 3]);
        assert!(catalog.low_stock(-1).is_empty());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Add(i64),
            Delete(u64),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (0i64..20).prop_map(Op::Add),
                (1u64..30).prop_map(Op::Delete),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig { cases: 256, ..ProptestConfig::default() })]

            /// Property: every add gets a fresh id greater than all ids ever issued.
            #[test]
            fn ids_are_monotonic_under_interleaved_deletes(ops in prop::collection::vec(op(), 0..60)) {
                let mut catalog = CatalogStore::new();
                let mut highest = 0u64;

                for op in ops {
                    match op {
                        Op::Add(stock) => {
                            let new = NewProduct::new("item", "cat", dec!(1), stock);
                            let assigned = catalog.add(new, Utc::now()).unwrap().id().get();
                            prop_assert!(assigned > highest);
                            highest = assigned;
                        }
                        Op::Delete(raw) => {
                            let _ = catalog.delete(id(raw));
                        }
                    }
                }

                prop_assert_eq!(catalog.next_id().get(), highest + 1);
            }

            /// Property: low_stock returns exactly the products at or below the threshold.
            #[test]
            fn low_stock_is_exact(
                stocks in prop::collection::vec(0i64..50, 0..40),
                threshold in -1i64..50,
            ) {
                let mut catalog = CatalogStore::new();
                for stock in &stocks {
                    catalog.add(NewProduct::new("item", "cat", dec!(1), *stock), Utc::now()).unwrap();
                }

                let expected: Vec<u64> = stocks
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| **s <= threshold)
                    .map(|(i, _)| i as u64 + 1)
                    .collect();

                prop_assert_eq!(ids(&catalog.low_stock(threshold)), expected);
            }

            /// Property: search ignores the case of the term.
            #[test]
            fn search_is_case_insensitive(name in "[A-Za-z]{1,12}", term in "[A-Za-z]{1,3}") {
                let mut catalog = CatalogStore::new();
                catalog.add(NewProduct::new(name.clone(), "", dec!(1), 1), Utc::now()).unwrap();

                let lower = catalog.search(&term.to_lowercase()).len();
                let upper = catalog.search(&term.to_uppercase()).len();
                prop_assert_eq!(lower, upper);
                prop_assert_eq!(lower == 1, name.to_lowercase().contains(&term.to_lowercase()));
            }
        }
    }
}
