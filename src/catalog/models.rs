//! Catalog Domain Models
//!
//! Products as served by the storage collaborator, and the filter/sort
//! query a shopper builds on the shop page.

use crate::error::{StoreError, StoreResult};
use crate::money::{require_non_negative, Money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

// =============================================================================
// Product
// =============================================================================

/// Upper bound on list and discount prices. Keeps every cart total well
/// inside `Decimal` range for any quantity a `u32` stock allows.
pub const MAX_PRICE: i64 = 1_000_000_000;

/// Catalog identifier, auto-incremented by the storage collaborator.
pub type ProductId = u64;

/// An immutable catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,

    /// List price.
    pub price: Money,

    /// Selling price when the product is on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<Money>,

    pub categories: Vec<String>,

    #[serde(default)]
    pub colors: Vec<String>,

    #[serde(default)]
    pub sizes: Vec<String>,

    /// First entry is the primary thumbnail.
    pub images: Vec<String>,

    #[serde(default)]
    pub is_new: bool,

    #[serde(default)]
    pub is_featured: bool,

    /// Caps the orderable quantity per cart line.
    pub stock: u32,

    /// Mean review rating, 0 to 5.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    /// Number of reviews behind `rating`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<u32>,
}

impl Product {
    /// Discount price when it undercuts the list price, otherwise the list price.
    pub fn effective_price(&self) -> Money {
        match self.discount_price {
            Some(discount) if self.is_on_sale() => discount,
            _ => self.price,
        }
    }

    pub fn is_on_sale(&self) -> bool {
        matches!(self.discount_price, Some(discount) if discount < self.price)
    }

    pub fn has_category(&self, category: &str) -> bool {
        contains_label(&self.categories, category)
    }

    /// Checks the data invariants the catalog relies on.
    ///
    /// A violation is a data error reported to the caller, never a panic.
    pub fn validate(&self) -> StoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(StoreError::validation(format!(
                "product {} has an empty name",
                self.id
            )));
        }
        require_price(self.price, "price")?;
        if let Some(discount) = self.discount_price {
            require_price(discount, "discountPrice")?;
        }
        if self.categories.is_empty() || self.categories.iter().any(|c| c.trim().is_empty()) {
            return Err(StoreError::validation(format!(
                "product {} needs at least one non-empty category",
                self.id
            )));
        }
        if self.images.is_empty() {
            return Err(StoreError::validation(format!(
                "product {} needs at least one image",
                self.id
            )));
        }
        if let Some(rating) = self.rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(StoreError::validation(format!(
                    "rating must be between 0 and 5, got {rating}"
                )));
            }
        }
        Ok(())
    }
}

fn require_price(value: Money, field: &str) -> StoreResult<()> {
    require_non_negative(value, field)?;
    if value > Decimal::from(MAX_PRICE) {
        return Err(StoreError::validation(format!(
            "{field} must not exceed {MAX_PRICE}, got {value}"
        )));
    }
    Ok(())
}

/// ASCII case-insensitive membership test for category/color/size labels.
pub(crate) fn contains_label(labels: &[String], wanted: &str) -> bool {
    labels.iter().any(|l| l.eq_ignore_ascii_case(wanted))
}

// =============================================================================
// Price Filters
// =============================================================================

/// The four fixed price-range buckets of the shop page.
///
/// Interior buckets are half-open `[low, high)`; `Over200` is `[200, ∞)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceBucket {
    #[serde(rename = "under-50")]
    Under50,
    #[serde(rename = "50-100")]
    From50To100,
    #[serde(rename = "100-200")]
    From100To200,
    #[serde(rename = "over-200")]
    Over200,
}

impl PriceBucket {
    pub const ALL: [PriceBucket; 4] = [
        PriceBucket::Under50,
        PriceBucket::From50To100,
        PriceBucket::From100To200,
        PriceBucket::Over200,
    ];

    /// Inclusive lower and exclusive upper bound (`None` = unbounded).
    pub fn bounds(self) -> (Money, Option<Money>) {
        match self {
            Self::Under50 => (Decimal::ZERO, Some(Decimal::from(50))),
            Self::From50To100 => (Decimal::from(50), Some(Decimal::from(100))),
            Self::From100To200 => (Decimal::from(100), Some(Decimal::from(200))),
            Self::Over200 => (Decimal::from(200), None),
        }
    }

    pub fn contains(self, price: Money) -> bool {
        let (low, high) = self.bounds();
        price >= low && high.map_or(true, |high| price < high)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Under50 => "under-50",
            Self::From50To100 => "50-100",
            Self::From100To200 => "100-200",
            Self::Over200 => "over-200",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Under50 => "Under $50",
            Self::From50To100 => "$50 - $100",
            Self::From100To200 => "$100 - $200",
            Self::Over200 => "Over $200",
        }
    }
}

impl FromStr for PriceBucket {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|bucket| bucket.as_str() == s.trim())
            .ok_or_else(|| StoreError::validation(format!("unknown price range {s:?}")))
    }
}

/// Free-form inclusive price range (the slider filter).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBounds {
    #[serde(default)]
    pub min: Option<Money>,
    #[serde(default)]
    pub max: Option<Money>,
}

impl PriceBounds {
    pub fn validate(&self) -> StoreResult<()> {
        if let Some(min) = self.min {
            require_non_negative(min, "priceBounds.min")?;
        }
        if let Some(max) = self.max {
            require_non_negative(max, "priceBounds.max")?;
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(StoreError::validation(format!(
                    "priceBounds.min {min} is greater than priceBounds.max {max}"
                )));
            }
        }
        Ok(())
    }

    pub fn contains(&self, price: Money) -> bool {
        self.min.map_or(true, |min| price >= min) && self.max.map_or(true, |max| price <= max)
    }
}

// =============================================================================
// Sorting
// =============================================================================

/// Canonical sort orders for catalog listings.
///
/// Deserializes through [`FromStr`], so JSON accepts the same aliases as
/// the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum SortOption {
    /// New arrivals first.
    Newest,
    /// Featured products first.
    Popular,
    PriceLowToHigh,
    PriceHighToLow,
}

impl SortOption {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Popular => "popular",
            Self::PriceLowToHigh => "price-low-to-high",
            Self::PriceHighToLow => "price-high-to-low",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = StoreError;

    /// Accepts the canonical names plus the spellings used by older storefronts.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" | "new" => Ok(Self::Newest),
            "popular" | "featured" => Ok(Self::Popular),
            "price-low-to-high" | "price_asc" | "price-asc" => Ok(Self::PriceLowToHigh),
            "price-high-to-low" | "price_desc" | "price-desc" => Ok(Self::PriceHighToLow),
            _ => Err(StoreError::InvalidSortOption(s.to_string())),
        }
    }
}

impl TryFrom<String> for SortOption {
    type Error = StoreError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

// =============================================================================
// Filter Spec
// =============================================================================

/// The filter, search and sort criteria applied to a catalog.
///
/// Empty fields impose no restriction. Within a field values are OR-ed,
/// across fields predicates are AND-ed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    pub categories: Vec<String>,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub price_buckets: Vec<PriceBucket>,
    pub price_bounds: Option<PriceBounds>,
    pub search_term: Option<String>,
    /// `None` keeps catalog order.
    pub sort_by: Option<SortOption>,
    pub featured_only: bool,
    pub new_only: bool,
}

impl FilterSpec {
    pub fn validate(&self) -> StoreResult<()> {
        match &self.price_bounds {
            Some(bounds) => bounds.validate(),
            None => Ok(()),
        }
    }

    /// Lower-cased search needle, `None` when blank.
    pub fn search_needle(&self) -> Option<String> {
        self.search_term
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn sorted_by(mut self, sort: SortOption) -> Self {
        self.sort_by = Some(sort);
        self
    }
}

/// URL query parameters accepted by `GET /api/products`.
///
/// Multi-valued filters are comma separated: `?color=Blue,Red&price=under-50`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQueryParams {
    pub category: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub price: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub featured: Option<bool>,
    pub new: Option<bool>,
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

fn parse_buckets<'a>(raw: impl IntoIterator<Item = &'a String>) -> StoreResult<Vec<PriceBucket>> {
    raw.into_iter().map(|bucket| bucket.parse()).collect()
}

/// Blank sort keys mean "no sort"; anything else must be a known option.
fn parse_sort(raw: Option<&str>) -> StoreResult<Option<SortOption>> {
    raw.filter(|s| !s.trim().is_empty())
        .map(str::parse)
        .transpose()
}

impl TryFrom<ProductQueryParams> for FilterSpec {
    type Error = StoreError;

    fn try_from(params: ProductQueryParams) -> Result<Self, Self::Error> {
        let price_buckets = parse_buckets(&split_list(params.price.as_deref()))?;
        let sort_by = parse_sort(params.sort.as_deref())?;

        Ok(FilterSpec {
            categories: split_list(params.category.as_deref()),
            colors: split_list(params.color.as_deref()),
            sizes: split_list(params.size.as_deref()),
            price_buckets,
            price_bounds: None,
            search_term: params.search,
            sort_by,
            featured_only: params.featured.unwrap_or(false),
            new_only: params.new.unwrap_or(false),
        })
    }
}

/// JSON body accepted by `POST /api/products/query`.
///
/// Sort keys and price buckets arrive as plain strings and are parsed on
/// conversion, so an unknown value is reported with its own error kind.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterRequest {
    pub categories: Vec<String>,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub price_buckets: Vec<String>,
    pub price_bounds: Option<PriceBounds>,
    pub search_term: Option<String>,
    pub sort_by: Option<String>,
    pub featured_only: bool,
    pub new_only: bool,
}

impl TryFrom<FilterRequest> for FilterSpec {
    type Error = StoreError;

    fn try_from(request: FilterRequest) -> Result<Self, Self::Error> {
        let spec = FilterSpec {
            price_buckets: parse_buckets(&request.price_buckets)?,
            sort_by: parse_sort(request.sort_by.as_deref())?,
            categories: request.categories,
            colors: request.colors,
            sizes: request.sizes,
            price_bounds: request.price_bounds,
            search_term: request.search_term,
            featured_only: request.featured_only,
            new_only: request.new_only,
        };
        spec.validate()?;
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::cents;

    #[test]
    fn test_bucket_boundaries_are_half_open() {
        assert!(PriceBucket::Under50.contains(cents(4999)));
        assert!(!PriceBucket::Under50.contains(cents(5000)));
        assert!(PriceBucket::From50To100.contains(cents(5000)));
        assert!(!PriceBucket::From50To100.contains(cents(10000)));
        assert!(PriceBucket::From100To200.contains(cents(10000)));
        assert!(PriceBucket::Over200.contains(cents(20000)));
        assert!(PriceBucket::Over200.contains(cents(9_999_999)));
    }

    #[test]
    fn test_sort_option_aliases_and_rejection() {
        assert_eq!("price_asc".parse::<SortOption>().unwrap(), SortOption::PriceLowToHigh);
        assert_eq!("Newest".parse::<SortOption>().unwrap(), SortOption::Newest);
        assert_eq!(
            "cheapest".parse::<SortOption>(),
            Err(StoreError::InvalidSortOption("cheapest".into()))
        );
    }

    #[test]
    fn test_sort_option_serde_uses_canonical_names() {
        let json = serde_json::to_string(&SortOption::PriceHighToLow).unwrap();
        assert_eq!(json, "\"price-high-to-low\"");

        let alias: SortOption = serde_json::from_str("\"price_desc\"").unwrap();
        assert_eq!(alias, SortOption::PriceHighToLow);
        assert!(serde_json::from_str::<SortOption>("\"cheapest\"").is_err());
    }

    #[test]
    fn test_filter_request_reports_error_kinds() {
        let parse = |body: serde_json::Value| {
            let request: FilterRequest = serde_json::from_value(body).unwrap();
            FilterSpec::try_from(request)
        };

        let spec = parse(serde_json::json!({ "sortBy": "price_asc", "priceBuckets": ["over-200"] }))
            .unwrap();
        assert_eq!(spec.sort_by, Some(SortOption::PriceLowToHigh));
        assert_eq!(spec.price_buckets, vec![PriceBucket::Over200]);

        assert_eq!(
            parse(serde_json::json!({ "sortBy": "cheapest" })),
            Err(StoreError::InvalidSortOption("cheapest".into()))
        );
        assert!(matches!(
            parse(serde_json::json!({ "priceBuckets": ["cheap"] })),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            parse(serde_json::json!({ "priceBounds": { "min": 100, "max": 50 } })),
            Err(StoreError::Validation(_))
        ));
        assert_eq!(parse(serde_json::json!({ "sortBy": " " })).unwrap().sort_by, None);
    }

    #[test]
    fn test_product_price_is_capped() {
        let mut product = crate::storage::fixtures::demo_products().remove(0);
        assert!(product.validate().is_ok());

        product.price = Decimal::from(MAX_PRICE) + Decimal::ONE;
        assert!(matches!(product.validate(), Err(StoreError::Validation(_))));

        product.price = cents(5999);
        product.discount_price = Some(cents(-1));
        assert!(product.validate().is_err());
    }

    #[test]
    fn test_sale_detection() {
        let mut product = crate::storage::fixtures::demo_products().remove(2);
        assert!(product.is_on_sale());
        assert_eq!(product.effective_price(), cents(6999));

        product.discount_price = Some(product.price + cents(100));
        assert!(!product.is_on_sale());
        assert_eq!(product.effective_price(), product.price);
    }

    #[test]
    fn test_price_bounds_validation() {
        let negative = PriceBounds {
            min: Some(cents(-100)),
            max: None,
        };
        assert!(negative.validate().is_err());

        let inverted = PriceBounds {
            min: Some(cents(10000)),
            max: Some(cents(5000)),
        };
        assert!(inverted.validate().is_err());

        let ok = PriceBounds {
            min: Some(cents(5000)),
            max: Some(cents(10000)),
        };
        assert!(ok.validate().is_ok());
        assert!(ok.contains(cents(10000)));
    }

    #[test]
    fn test_query_params_conversion() {
        let params = ProductQueryParams {
            category: Some("Women, Traditional".into()),
            price: Some("under-50,over-200".into()),
            sort: Some("price-high-to-low".into()),
            featured: Some(true),
            ..Default::default()
        };
        let spec = FilterSpec::try_from(params).unwrap();
        assert_eq!(spec.categories, vec!["Women", "Traditional"]);
        assert_eq!(
            spec.price_buckets,
            vec![PriceBucket::Under50, PriceBucket::Over200]
        );
        assert_eq!(spec.sort_by, Some(SortOption::PriceHighToLow));
        assert!(spec.featured_only);

        let bad_sort = ProductQueryParams {
            sort: Some("random".into()),
            ..Default::default()
        };
        assert!(matches!(
            FilterSpec::try_from(bad_sort),
            Err(StoreError::InvalidSortOption(_))
        ));

        let bad_price = ProductQueryParams {
            price: Some("cheap".into()),
            ..Default::default()
        };
        assert!(matches!(
            FilterSpec::try_from(bad_price),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn test_filter_spec_deserializes_camel_case() {
        let spec: FilterSpec = serde_json::from_value(serde_json::json!({
            "categories": ["Women"],
            "priceBuckets": ["50-100"],
            "searchTerm": "silk",
            "sortBy": "price-low-to-high"
        }))
        .unwrap();
        assert_eq!(spec.price_buckets, vec![PriceBucket::From50To100]);
        assert_eq!(spec.sort_by, Some(SortOption::PriceLowToHigh));
        assert_eq!(spec.search_needle().as_deref(), Some("silk"));
        assert!(spec.colors.is_empty());
    }
}
