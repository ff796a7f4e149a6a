//! Filter, sort and paginate the catalog for the listing page.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::domain::Product;

pub const DEFAULT_PRICE_RANGE: PriceRange = PriceRange { min: 0, max: 50_000 };

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: u64,
    pub max: u64,
}

impl PriceRange {
    pub fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, price: u64) -> bool {
        (self.min..=self.max).contains(&price)
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        DEFAULT_PRICE_RANGE
    }
}

/// Stock toggle. The two "only" modes exclude each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    #[default]
    Any,
    InStockOnly,
    OutOfStockOnly,
}

impl Availability {
    fn admits(&self, product: &Product) -> bool {
        match self {
            Availability::Any => true,
            Availability::InStockOnly => product.in_stock,
            Availability::OutOfStockOnly => !product.in_stock,
        }
    }
}

/// Active filter dimensions; a product must satisfy all of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFilter {
    pub categories: Vec<String>,
    pub price: PriceRange,
    pub min_ratings: Vec<f32>,
    pub availability: Availability,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = self.categories.is_empty()
            || self
                .categories
                .iter()
                .any(|c| c.eq_ignore_ascii_case(&product.category));
        let rating_ok = self.min_ratings.is_empty()
            || self.min_ratings.iter().any(|&t| product.rating >= t);
        category_ok
            && self.price.contains(product.price)
            && rating_ok
            && self.availability.admits(product)
    }

    /// Badge count shown on the filter button.
    pub fn active_count(&self) -> usize {
        self.categories.len()
            + self.min_ratings.len()
            + usize::from(self.price != DEFAULT_PRICE_RANGE)
            + usize::from(self.availability != Availability::Any)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    /// Catalog order.
    #[default]
    Featured,
    PriceLow,
    PriceHigh,
    /// Highest numeric id first.
    Newest,
    /// Most reviews first.
    BestSelling,
    TopRated,
}

impl SortBy {
    /// Parses the dropdown key; anything unrecognised means `Featured`.
    pub fn from_key(key: &str) -> Self {
        match key {
            "price-low" => SortBy::PriceLow,
            "price-high" => SortBy::PriceHigh,
            "newest" => SortBy::Newest,
            "best-selling" => SortBy::BestSelling,
            "top-rated" => SortBy::TopRated,
            _ => SortBy::Featured,
        }
    }

    /// Stable sort; ties keep catalog order.
    pub fn apply(&self, products: &mut [Product]) {
        match self {
            SortBy::Featured => {}
            SortBy::PriceLow => products.sort_by_key(|p| p.price),
            SortBy::PriceHigh => products.sort_by_key(|p| Reverse(p.price)),
            // Non-numeric ids sort last.
            SortBy::Newest => products.sort_by_key(|p| Reverse(p.numeric_id())),
            SortBy::BestSelling => products.sort_by_key(|p| Reverse(p.reviews)),
            SortBy::TopRated => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        }
    }
}

/// One page of a longer list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// 1-based position of the first item, 0 when the page is empty.
    pub fn first_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }

    /// 1-based position of the last item, 0 when the page is empty.
    pub fn last_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.page.saturating_mul(self.page_size).min(self.total_items)
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Cuts window `[(page-1)*size, page*size)` out of `items`. Page 0 reads as
/// page 1; pages past the end are empty.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let page = page.max(1);
    let start = (page - 1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    Page {
        items: items[start..end].to_vec(),
        page,
        page_size,
        total_items: items.len(),
        total_pages: items.len().div_ceil(page_size),
    }
}

/// Filters then sorts, keeping catalog order where the sort is indifferent.
pub fn filter_and_sort(products: &[Product], filter: &ProductFilter, sort: SortBy) -> Vec<Product> {
    let mut matched: Vec<Product> = products.iter().filter(|p| filter.matches(p)).cloned().collect();
    sort.apply(&mut matched);
    matched
}

/// Listing-page inputs. Changing any filter or the sort returns to page 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingState {
    filter: ProductFilter,
    sort: SortBy,
    page: usize,
    page_size: usize,
}

impl ListingState {
    pub fn new(page_size: usize) -> Self {
        Self {
            filter: ProductFilter::default(),
            sort: SortBy::default(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn filter(&self) -> &ProductFilter {
        &self.filter
    }

    pub fn sort(&self) -> SortBy {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_filter(&mut self, filter: ProductFilter) {
        self.filter = filter;
        self.page = 1;
    }

    /// Adds the category when absent, removes it when present.
    pub fn toggle_category(&mut self, category: &str) {
        let categories = &mut self.filter.categories;
        match categories.iter().position(|c| c.eq_ignore_ascii_case(category)) {
            Some(index) => {
                categories.remove(index);
            }
            None => categories.push(category.to_string()),
        }
        self.page = 1;
    }

    pub fn toggle_rating(&mut self, threshold: f32) {
        let ratings = &mut self.filter.min_ratings;
        match ratings.iter().position(|&r| r == threshold) {
            Some(index) => {
                ratings.remove(index);
            }
            None => ratings.push(threshold),
        }
        self.page = 1;
    }

    pub fn set_price_range(&mut self, range: PriceRange) {
        self.filter.price = range;
        self.page = 1;
    }

    pub fn set_availability(&mut self, availability: Availability) {
        self.filter.availability = availability;
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortBy) {
        self.sort = sort;
        self.page = 1;
    }

    pub fn clear_filters(&mut self) {
        self.set_filter(ProductFilter::default());
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn run(&self, products: &[Product]) -> Page<Product> {
        let sorted = filter_and_sort(products, &self.filter, self.sort);
        paginate(&sorted, self.page, self.page_size)
    }
}
