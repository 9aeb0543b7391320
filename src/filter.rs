//! Free-text product filter

use crate::types::Product;

/// Normalize a raw search input: trimmed and lower-cased.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Whether a product matches an already-normalized query.
///
/// Title and description match case-insensitively; the price matches on its
/// decimal text, so `"5"` finds a product priced `5` or `15.5`.
pub fn matches(product: &Product, normalized: &str) -> bool {
    normalized.is_empty()
        || product.title.to_lowercase().contains(normalized)
        || product.description.to_lowercase().contains(normalized)
        || product.price_text().contains(normalized)
}

/// Products matching `query`, in collection order.
///
/// An empty (or whitespace-only) query returns every product.
pub fn filter_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let normalized = normalize_query(query);
    products
        .iter()
        .filter(|p| matches(p, &normalized))
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_product() -> impl Strategy<Value = Product> {
        (
            "[a-z0-9]{1,6}",
            "[A-Za-z ]{0,20}",
            "[A-Za-z0-9 ,.]{0,40}",
            0u32..100_000,
            "[a-z]{1,8}\\.png",
        )
            .prop_map(|(id, title, description, cents, image)| {
                Product::new(id, title, description, f64::from(cents) / 100.0, image)
            })
    }

    fn arb_collection() -> impl Strategy<Value = Vec<Product>> {
        prop::collection::vec(arb_product(), 0..12)
    }

    /// `sub` appears in `all` in the same relative order
    fn is_subsequence(sub: &[&Product], all: &[Product]) -> bool {
        let mut rest = all.iter();
        sub.iter().all(|s| rest.any(|p| std::ptr::eq(p, *s)))
    }

    proptest! {
        #[test]
        fn empty_query_is_identity(products in arb_collection()) {
            let filtered = filter_products(&products, "");
            prop_assert_eq!(filtered.len(), products.len());
            prop_assert!(is_subsequence(&filtered, &products));
        }

        #[test]
        fn result_is_subsequence(products in arb_collection(), query in "[A-Za-z0-9 .]{0,4}") {
            let filtered = filter_products(&products, &query);
            prop_assert!(is_subsequence(&filtered, &products));
        }

        #[test]
        fn query_case_insensitive(products in arb_collection(), query in "[A-Za-z0-9 .]{0,4}") {
            let lower = filter_products(&products, &query);
            let upper = filter_products(&products, &query.to_uppercase());
            prop_assert_eq!(lower, upper);
        }
    }
}
