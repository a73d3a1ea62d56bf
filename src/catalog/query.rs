//! Catalog Query Engine
//!
//! Turns the full product list plus a [`FilterSpec`] into the ordered
//! subset to display. The input slice is never mutated, and products that
//! compare equal under the sort key keep their catalog order.

use super::models::{contains_label, FilterSpec, Product, SortOption};
use crate::error::StoreResult;
use std::cmp::Ordering;

/// Filters then sorts `products` according to `spec`.
///
/// An empty result is a normal outcome. Only a malformed spec is an error.
pub fn query<'a>(products: &'a [Product], spec: &FilterSpec) -> StoreResult<Vec<&'a Product>> {
    spec.validate()?;

    let needle = spec.search_needle();
    let mut matched: Vec<&Product> = products
        .iter()
        .filter(|product| matches_spec(product, spec, needle.as_deref()))
        .collect();

    if let Some(sort) = spec.sort_by {
        sort_products(&mut matched, sort);
    }

    tracing::debug!(
        total = products.len(),
        matched = matched.len(),
        sort = spec.sort_by.map(SortOption::as_str),
        "catalog query evaluated"
    );

    Ok(matched)
}

/// Same as [`query`] but returns owned products.
pub fn query_owned(products: &[Product], spec: &FilterSpec) -> StoreResult<Vec<Product>> {
    Ok(query(products, spec)?.into_iter().cloned().collect())
}

/// Stable in-place sort by the given order.
pub fn sort_products(products: &mut [&Product], sort: SortOption) {
    // `sort_by` is stable, which the flag-based orders depend on.
    products.sort_by(|a, b| compare(a, b, sort));
}

fn compare(a: &Product, b: &Product, sort: SortOption) -> Ordering {
    match sort {
        SortOption::PriceLowToHigh => a.effective_price().cmp(&b.effective_price()),
        SortOption::PriceHighToLow => b.effective_price().cmp(&a.effective_price()),
        SortOption::Newest => b.is_new.cmp(&a.is_new),
        SortOption::Popular => b.is_featured.cmp(&a.is_featured),
    }
}

fn matches_spec(product: &Product, spec: &FilterSpec, needle: Option<&str>) -> bool {
    matches_any(&product.categories, &spec.categories)
        && matches_any(&product.colors, &spec.colors)
        && matches_any(&product.sizes, &spec.sizes)
        && matches_price(product, spec)
        && (!spec.featured_only || product.is_featured)
        && (!spec.new_only || product.is_new)
        && needle.map_or(true, |n| matches_search(product, n))
}

/// OR within a field; an empty wanted list matches everything.
fn matches_any(labels: &[String], wanted: &[String]) -> bool {
    wanted.is_empty() || wanted.iter().any(|w| contains_label(labels, w))
}

fn matches_price(product: &Product, spec: &FilterSpec) -> bool {
    let price = product.effective_price();
    let in_bucket = spec.price_buckets.is_empty()
        || spec.price_buckets.iter().any(|bucket| bucket.contains(price));
    let in_bounds = spec
        .price_bounds
        .as_ref()
        .map_or(true, |bounds| bounds.contains(price));
    in_bucket && in_bounds
}

/// Substring match over name, description, categories and colors.
///
/// `needle` must already be lower-cased.
pub fn matches_search(product: &Product, needle: &str) -> bool {
    let hit = |text: &str| text.to_lowercase().contains(needle);

    hit(&product.name)
        || hit(&product.description)
        || product.categories.iter().any(|c| hit(c.as_str()))
        || product.colors.iter().any(|c| hit(c.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::{PriceBounds, PriceBucket};
    use crate::error::StoreError;
    use crate::money::cents;
    use crate::storage::fixtures::demo_products;

    fn ids(products: &[&Product]) -> Vec<u64> {
        products.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_women_sorted_by_price() {
        let catalog = demo_products();
        let spec = FilterSpec::default()
            .with_categories(["Women"])
            .sorted_by(SortOption::PriceLowToHigh);

        let result = query(&catalog, &spec).unwrap();

        assert_eq!(ids(&result), vec![4, 1, 2, 6]);
        let prices: Vec<_> = result.iter().map(|p| p.effective_price()).collect();
        assert_eq!(prices, vec![cents(4999), cents(5999), cents(14999), cents(19999)]);
    }

    #[test]
    fn test_price_sort_uses_discount_price() {
        let catalog = demo_products();
        let spec = FilterSpec::default()
            .with_categories(["Outerwear"])
            .sorted_by(SortOption::PriceHighToLow);

        // Blazer 89.99 -> 69.99, jacket 69.99 -> 59.99
        assert_eq!(ids(&query(&catalog, &spec).unwrap()), vec![3, 7]);
    }

    #[test]
    fn test_empty_spec_returns_catalog_order() {
        let catalog = demo_products();
        let result = query(&catalog, &FilterSpec::default()).unwrap();
        assert_eq!(ids(&result), (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn test_flag_sorts_are_stable() {
        let catalog = demo_products();

        let newest = query(&catalog, &FilterSpec::default().sorted_by(SortOption::Newest)).unwrap();
        assert_eq!(ids(&newest), vec![1, 4, 2, 3, 5, 6, 7, 8]);

        let popular =
            query(&catalog, &FilterSpec::default().sorted_by(SortOption::Popular)).unwrap();
        assert_eq!(ids(&popular), vec![1, 2, 6, 8, 3, 4, 5, 7]);
    }

    #[test]
    fn test_equal_prices_keep_input_order() {
        let mut catalog = demo_products();
        for product in &mut catalog {
            product.price = cents(1000);
            product.discount_price = None;
        }
        let spec = FilterSpec::default().sorted_by(SortOption::PriceHighToLow);
        assert_eq!(
            ids(&query(&catalog, &spec).unwrap()),
            (1..=8).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_fields_and_values_combine() {
        let catalog = demo_products();
        let spec = FilterSpec {
            categories: vec!["Casual".into()],
            colors: vec!["Pink".into(), "Black".into()],
            ..Default::default()
        };
        // Casual AND (Pink OR Black)
        assert_eq!(ids(&query(&catalog, &spec).unwrap()), vec![4, 7]);
    }

    #[test]
    fn test_label_match_ignores_case() {
        let catalog = demo_products();
        let spec = FilterSpec {
            sizes: vec!["standard".into()],
            ..Default::default()
        };
        assert_eq!(ids(&query(&catalog, &spec).unwrap()), vec![2]);
    }

    #[test]
    fn test_price_buckets_use_effective_price() {
        let catalog = demo_products();
        let spec = FilterSpec {
            price_buckets: vec![PriceBucket::Under50],
            ..Default::default()
        };
        assert_eq!(ids(&query(&catalog, &spec).unwrap()), vec![4, 5]);

        let spec = FilterSpec {
            price_buckets: vec![PriceBucket::From50To100, PriceBucket::Over200],
            ..Default::default()
        };
        assert_eq!(ids(&query(&catalog, &spec).unwrap()), vec![1, 3, 7, 8]);
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let catalog = demo_products();
        let spec = FilterSpec {
            price_bounds: Some(PriceBounds {
                min: Some(cents(5999)),
                max: Some(cents(6999)),
            }),
            ..Default::default()
        };
        assert_eq!(ids(&query(&catalog, &spec).unwrap()), vec![1, 3, 7]);
    }

    #[test]
    fn test_search_covers_colors_and_categories() {
        let catalog = demo_products();

        let by_color = query(&catalog, &FilterSpec::default().with_search("NAVY")).unwrap();
        assert_eq!(ids(&by_color), vec![3, 8]);

        let by_category = query(&catalog, &FilterSpec::default().with_search("saree")).unwrap();
        assert_eq!(ids(&by_category), vec![2]);

        let blank = query(&catalog, &FilterSpec::default().with_search("   ")).unwrap();
        assert_eq!(blank.len(), catalog.len());
    }

    #[test]
    fn test_sub_view_flags() {
        let catalog = demo_products();
        let featured = FilterSpec {
            featured_only: true,
            ..Default::default()
        };
        assert_eq!(ids(&query(&catalog, &featured).unwrap()), vec![1, 2, 6, 8]);

        let new_women = FilterSpec {
            new_only: true,
            ..Default::default()
        }
        .with_categories(["Women"]);
        assert_eq!(ids(&query(&catalog, &new_women).unwrap()), vec![1, 4]);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let catalog = demo_products();
        let result = query(&catalog, &FilterSpec::default().with_search("tuxedo")).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        let catalog = demo_products();
        let spec = FilterSpec {
            price_bounds: Some(PriceBounds {
                min: Some(cents(-1)),
                max: None,
            }),
            ..Default::default()
        };
        assert!(matches!(
            query(&catalog, &spec),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn test_filtering_twice_is_a_no_op() {
        let catalog = demo_products();
        let spec = FilterSpec {
            colors: vec!["Blue".into()],
            price_buckets: vec![PriceBucket::Under50, PriceBucket::From50To100],
            sort_by: Some(SortOption::PriceLowToHigh),
            ..Default::default()
        };
        let once = query_owned(&catalog, &spec).unwrap();
        let twice = query_owned(&once, &spec).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_widening_a_field_never_shrinks_results() {
        let catalog = demo_products();
        let narrow = FilterSpec {
            colors: vec!["Red".into()],
            sizes: vec!["M".into()],
            ..Default::default()
        };
        let wide = FilterSpec {
            colors: vec!["Red".into(), "White".into(), "Grey".into()],
            sizes: vec!["M".into(), "Standard".into()],
            ..Default::default()
        };
        let narrow_ids = ids(&query(&catalog, &narrow).unwrap());
        let wide_ids = ids(&query(&catalog, &wide).unwrap());
        assert!(narrow_ids.iter().all(|id| wide_ids.contains(id)));
        assert!(wide_ids.len() > narrow_ids.len());
    }

    #[test]
    fn test_query_does_not_mutate_input() {
        let catalog = demo_products();
        let before = catalog.clone();
        let _ = query(&catalog, &FilterSpec::default().sorted_by(SortOption::PriceHighToLow));
        assert_eq!(catalog, before);
    }
}
