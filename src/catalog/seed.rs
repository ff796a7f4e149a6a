//! The storefront's built-in catalog.

use std::collections::HashMap;

use crate::domain::{Badge, Category, ColorOption, Product};

fn unsplash(photo: &str) -> String {
    format!("https://images.unsplash.com/{photo}?w=800&q=80")
}

fn colors(pairs: &[(&str, &str)]) -> Vec<ColorOption> {
    pairs.iter().map(|(name, hex)| ColorOption::new(*name, *hex)).collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    description: &str,
    price: u64,
    rating: f32,
    reviews: u32,
    category: &str,
    subcategory: &str,
    photo: &str,
) -> Product {
    let mut product = Product::new(id, name, price, category).with_rating(rating, reviews);
    product.description = description.to_string();
    product.subcategory = Some(subcategory.to_string());
    product.images = vec![unsplash(photo)];
    product
}

pub fn products() -> Vec<Product> {
    let mut headphones = product(
        "1",
        "Premium Wireless Headphones",
        "Experience superior sound quality with our premium wireless headphones featuring active noise cancellation and 30-hour battery life.",
        8999,
        4.5,
        234,
        "Electronics",
        "Audio",
        "photo-1505740420928-5e560c06d30e",
    )
    .with_original_price(12999)
    .with_stock(true, Some(15));
    headphones.badge = Some(Badge::Sale);
    headphones.colors = colors(&[("Black", "#000000"), ("White", "#FFFFFF"), ("Blue", "#4F46E5")]);
    headphones.highlights = strings(&[
        "Active Noise Cancellation",
        "30-hour battery life",
        "Premium sound quality",
        "Comfortable fit for all-day wear",
    ]);
    headphones.specifications = HashMap::from([
        ("Battery Life".to_string(), "30 hours".to_string()),
        ("Connectivity".to_string(), "Bluetooth 5.0".to_string()),
        ("Weight".to_string(), "250g".to_string()),
        ("Warranty".to_string(), "1 Year".to_string()),
    ]);

    let mut watch = product(
        "2",
        "Smart Fitness Watch",
        "Track your fitness goals with this advanced smartwatch featuring heart rate monitoring, GPS, and water resistance.",
        15999,
        4.7,
        456,
        "Electronics",
        "Wearables",
        "photo-1523275335684-37898b6baf30",
    )
    .with_original_price(19999);
    watch.badge = Some(Badge::New);
    watch.highlights = strings(&[
        "Heart rate monitoring",
        "GPS tracking",
        "Water resistant up to 50m",
        "7-day battery life",
    ]);

    let mut backpack = product(
        "3",
        "Designer Backpack",
        "Stylish and functional backpack perfect for work or travel with multiple compartments and laptop sleeve.",
        3499,
        4.3,
        128,
        "Fashion",
        "Bags",
        "photo-1553062407-98eeb64c6a62",
    )
    .with_stock(true, Some(8));
    backpack.badge = Some(Badge::Bestseller);
    backpack.colors = colors(&[("Black", "#000000"), ("Navy", "#1E3A8A"), ("Gray", "#6B7280")]);

    let mut tshirt = product(
        "4",
        "Organic Cotton T-Shirt",
        "Comfortable and sustainable t-shirt made from 100% organic cotton. Perfect for everyday wear.",
        799,
        4.6,
        892,
        "Fashion",
        "Clothing",
        "photo-1521572163474-6864f9cf17ab",
    )
    .with_original_price(1299);
    tshirt.badge = Some(Badge::Sale);
    tshirt.sizes = strings(&["S", "M", "L", "XL", "XXL"]);
    tshirt.colors = colors(&[
        ("White", "#FFFFFF"),
        ("Black", "#000000"),
        ("Gray", "#6B7280"),
        ("Navy", "#1E3A8A"),
    ]);

    let mut camera = product(
        "5",
        "Professional Camera",
        "Capture stunning photos with this professional-grade camera featuring 24MP sensor and 4K video recording.",
        45999,
        4.8,
        167,
        "Electronics",
        "Cameras",
        "photo-1526170375885-4d8ecf77b99f",
    )
    .with_stock(true, Some(5));
    camera.badge = Some(Badge::New);

    let mut shoes = product(
        "6",
        "Running Shoes",
        "Lightweight running shoes with superior cushioning and breathable mesh upper for maximum comfort.",
        4999,
        4.4,
        523,
        "Sports",
        "Footwear",
        "photo-1542291026-7eec264c27ff",
    )
    .with_original_price(7999);
    shoes.badge = Some(Badge::Sale);
    shoes.sizes = strings(&["7", "8", "9", "10", "11", "12"]);

    let mut bottle = product(
        "7",
        "Stainless Steel Water Bottle",
        "Keep your drinks cold for 24 hours or hot for 12 hours with this insulated stainless steel bottle.",
        1299,
        4.7,
        1024,
        "Sports",
        "Accessories",
        "photo-1602143407151-7111542de6e8",
    );
    bottle.badge = Some(Badge::Bestseller);
    bottle.colors = colors(&[("Silver", "#C0C0C0"), ("Black", "#000000"), ("Blue", "#3B82F6")]);

    let mut yoga_mat = product(
        "8",
        "Yoga Mat Premium",
        "Non-slip yoga mat with extra cushioning for comfortable practice. Eco-friendly and durable.",
        2499,
        4.5,
        312,
        "Sports",
        "Fitness",
        "photo-1601925260368-ae2f83cf8b7f",
    )
    .with_original_price(3999);
    yoga_mat.badge = Some(Badge::Sale);
    yoga_mat.colors = colors(&[("Purple", "#9333EA"), ("Green", "#10B981"), ("Pink", "#EC4899")]);

    let mut keyboard = product(
        "9",
        "Mechanical Keyboard RGB",
        "Premium mechanical keyboard with customizable RGB lighting and tactile switches.",
        7999,
        4.6,
        234,
        "Electronics",
        "Accessories",
        "photo-1587829741301-dc798b83add3",
    )
    .with_stock(false, Some(0));
    keyboard.badge = Some(Badge::Bestseller);

    let wallet = product(
        "10",
        "Leather Wallet",
        "Handcrafted genuine leather wallet with RFID protection and multiple card slots.",
        2499,
        4.4,
        178,
        "Fashion",
        "Accessories",
        "photo-1627123424574-724758594e93",
    )
    .with_stock(false, Some(0));

    vec![
        headphones, watch, backpack, tshirt, camera, shoes, bottle, yoga_mat, keyboard, wallet,
    ]
}

pub fn categories() -> Vec<Category> {
    [
        ("electronics", "Electronics", "photo-1498049794561-7780e7231661"),
        ("fashion", "Fashion", "photo-1445205170230-053b83016050"),
        ("sports", "Sports & Fitness", "photo-1517836357463-d25dfeac3438"),
        ("home", "Home & Living", "photo-1556911220-bff31c812dba"),
        ("beauty", "Beauty & Care", "photo-1596462502278-27bfdc403348"),
        ("books", "Books", "photo-1495446815901-a7297e633e8d"),
        ("toys", "Toys & Games", "photo-1558060370-d644479cb6f7"),
        ("food", "Food & Grocery", "photo-1542838132-92c53300491e"),
    ]
    .into_iter()
    .map(|(id, name, photo)| Category::new(id, name, unsplash(photo)))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_sequential() {
        let ids: Vec<u64> = products().iter().filter_map(Product::numeric_id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn seeded_discounts_follow_the_formula() {
        for product in products() {
            if let Some(original) = product.original_price {
                let expected =
                    ((original - product.price) as f64 / original as f64 * 100.0).round() as u8;
                assert_eq!(product.discount, Some(expected), "product {}", product.id);
            }
        }
    }
}
