//! URL paths to pages.

use std::fmt;

/// A storefront location. Unknown paths parse as [`Route::Home`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Products,
    Product(String),
    Category(String),
    Cart,
    Checkout,
    Account,
    Orders,
    Order(String),
    Admin,
    Wishlist,
    Deals,
    About,
    Contact,
}

impl Route {
    /// Parses a path such as `/product/3` or `/category/sports?sort=new`.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["products"] => Route::Products,
            ["product", id] => Route::Product(id.to_string()),
            ["category", category] => Route::Category(category.to_string()),
            ["cart"] => Route::Cart,
            ["checkout"] => Route::Checkout,
            ["account"] => Route::Account,
            ["orders"] => Route::Orders,
            ["orders", id] => Route::Order(id.to_string()),
            ["admin"] => Route::Admin,
            ["wishlist"] => Route::Wishlist,
            ["deals"] => Route::Deals,
            ["about"] => Route::About,
            ["contact"] => Route::Contact,
            _ => Route::Home,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => f.write_str("/"),
            Route::Products => f.write_str("/products"),
            Route::Product(id) => write!(f, "/product/{id}"),
            Route::Category(category) => write!(f, "/category/{category}"),
            Route::Cart => f.write_str("/cart"),
            Route::Checkout => f.write_str("/checkout"),
            Route::Account => f.write_str("/account"),
            Route::Orders => f.write_str("/orders"),
            Route::Order(id) => write!(f, "/orders/{id}"),
            Route::Admin => f.write_str("/admin"),
            Route::Wishlist => f.write_str("/wishlist"),
            Route::Deals => f.write_str("/deals"),
            Route::About => f.write_str("/about"),
            Route::Contact => f.write_str("/contact"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_parameterised_paths() {
        assert_eq!(Route::parse("/product/3"), Route::Product("3".into()));
        assert_eq!(Route::parse("/category/sports/"), Route::Category("sports".into()));
        assert_eq!(Route::parse("/orders/2?tab=items"), Route::Order("2".into()));
        assert_eq!(Route::parse("/orders"), Route::Orders);
    }

    #[test]
    fn unknown_paths_fall_back_home() {
        assert_eq!(Route::parse("/nope"), Route::Home);
        assert_eq!(Route::parse("/product"), Route::Home);
        assert_eq!(Route::parse("/product/1/reviews"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
    }

    #[test]
    fn display_round_trips() {
        for path in ["/", "/products", "/product/7", "/category/fashion", "/orders/1", "/admin"] {
            assert_eq!(Route::parse(path).to_string(), path);
        }
    }
}
