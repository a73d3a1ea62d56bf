//! Catalog helpers for shop-page sub-views and filter menus.

use super::models::{PriceBucket, Product};
use serde::Serialize;

/// How many related products the detail page shows.
pub const RELATED_PRODUCTS_LIMIT: usize = 8;

/// A price bucket together with how many products fall into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketCount {
    pub value: PriceBucket,
    pub label: &'static str,
    pub count: usize,
}

/// The options offered by the shop-page filter menus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFacets {
    pub categories: Vec<String>,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub price_buckets: Vec<BucketCount>,
}

/// Collects distinct labels in first-seen order.
fn distinct<'a>(labels: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for label in labels {
        if !seen.contains(label) {
            seen.push(label.clone());
        }
    }
    seen
}

/// Builds the filter menus from the products on offer.
pub fn facets(products: &[Product]) -> CatalogFacets {
    let price_buckets = PriceBucket::ALL
        .into_iter()
        .map(|bucket| BucketCount {
            value: bucket,
            label: bucket.label(),
            count: products
                .iter()
                .filter(|p| bucket.contains(p.effective_price()))
                .count(),
        })
        .collect();

    CatalogFacets {
        categories: distinct(products.iter().flat_map(|p| &p.categories)),
        colors: distinct(products.iter().flat_map(|p| &p.colors)),
        sizes: distinct(products.iter().flat_map(|p| &p.sizes)),
        price_buckets,
    }
}

/// Other products sharing at least one category with `product`, in catalog order.
pub fn related_products<'a>(
    products: &'a [Product],
    product: &Product,
    limit: usize,
) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|candidate| candidate.id != product.id)
        .filter(|candidate| product.categories.iter().any(|c| candidate.has_category(c)))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::fixtures::demo_products;

    #[test]
    fn test_facets_keep_first_seen_order() {
        let catalog = demo_products();
        let facets = facets(&catalog);

        assert_eq!(
            &facets.categories[..4],
            &["Women", "Traditional", "Tops", "Sarees"]
        );
        assert_eq!(facets.colors[0], "White");
        assert!(facets.sizes.contains(&"Standard".to_string()));
        assert_eq!(facets.sizes.iter().filter(|s| *s == "M").count(), 1);

        let counts: Vec<usize> = facets.price_buckets.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![2, 3, 2, 1]);
    }

    #[test]
    fn test_related_products_share_a_category() {
        let catalog = demo_products();
        let blazer = &catalog[2];

        let related: Vec<u64> = related_products(&catalog, blazer, RELATED_PRODUCTS_LIMIT)
            .iter()
            .map(|p| p.id)
            .collect();
        // Men: 5, 8 / Formal: 8 / Outerwear: 7
        assert_eq!(related, vec![5, 7, 8]);

        let limited = related_products(&catalog, &catalog[0], 2);
        assert_eq!(limited.len(), 2);
        assert!(limited.iter().all(|p| p.id != 1));
    }
}
