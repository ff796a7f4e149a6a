use serde::Serialize;

use crate::catalog::{category_counts, CategoryCount, ListingState, Page, SortBy};
use crate::domain::{Category, Product};

/// Categories offered in the listing sidebar.
const SIDEBAR_CATEGORIES: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingView {
    pub heading: String,
    /// e.g. "Showing 1-10 of 10 products".
    pub summary: String,
    pub active_filters: usize,
    pub sort: SortBy,
    pub page: Page<Product>,
    pub sidebar: Vec<CategoryCount>,
}

/// Listing state for `/category/:category`, with that category preselected.
pub fn category_listing(category_id: &str, page_size: usize) -> ListingState {
    let mut state = ListingState::new(page_size);
    state.toggle_category(category_id);
    state
}

pub fn listing_view(state: &ListingState, products: &[Product], categories: &[Category]) -> ListingView {
    let page = state.run(products);
    let heading = match state.filter().categories.as_slice() {
        [only] => categories
            .iter()
            .find(|c| c.id.eq_ignore_ascii_case(only) || c.name.eq_ignore_ascii_case(only))
            .map(|c| c.name.clone())
            .unwrap_or_else(|| only.clone()),
        _ => "All Products".to_string(),
    };
    let summary = format!(
        "Showing {}-{} of {} products",
        page.first_index(),
        page.last_index(),
        page.total_items
    );
    let sidebar_categories: Vec<Category> =
        categories.iter().take(SIDEBAR_CATEGORIES).cloned().collect();

    ListingView {
        heading,
        summary,
        active_filters: state.filter().active_count(),
        sort: state.sort(),
        page,
        sidebar: category_counts(&sidebar_categories, products),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{seed, Availability};

    #[test]
    fn unfiltered_listing() {
        let view = listing_view(&ListingState::new(20), &seed::products(), &seed::categories());
        assert_eq!(view.heading, "All Products");
        assert_eq!(view.summary, "Showing 1-10 of 10 products");
        assert_eq!(view.active_filters, 0);
        assert_eq!(view.sidebar.len(), 4);
        assert_eq!(view.sidebar[0].product_count, 4);
    }

    #[test]
    fn category_route_preselects_and_titles() {
        let state = category_listing("sports", 20);
        let view = listing_view(&state, &seed::products(), &seed::categories());
        assert_eq!(view.heading, "Sports & Fitness");
        assert_eq!(view.active_filters, 1);
        let ids: Vec<&str> = view.page.items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["6", "7", "8"]);
    }

    #[test]
    fn second_page_summary() {
        let mut state = ListingState::new(4);
        state.set_availability(Availability::InStockOnly);
        state.go_to_page(2);
        let view = listing_view(&state, &seed::products(), &seed::categories());
        assert_eq!(view.summary, "Showing 5-8 of 8 products");
        assert!(!view.page.has_next());
    }

    #[test]
    fn empty_result_summary() {
        let mut state = ListingState::new(20);
        state.toggle_category("books");
        let view = listing_view(&state, &seed::products(), &seed::categories());
        assert_eq!(view.heading, "Books");
        assert_eq!(view.summary, "Showing 0-0 of 0 products");
    }

    #[test]
    fn page_far_past_the_end_summary() {
        let mut state = ListingState::new(20);
        state.go_to_page(usize::MAX / 2);
        let view = listing_view(&state, &seed::products(), &seed::categories());
        assert_eq!(view.summary, "Showing 0-0 of 10 products");
    }
}
