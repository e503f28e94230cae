//! Random catalog data for tests.

use crate::{Category, Product};
use rand::Rng as _;
use rand::seq::SliceRandom as _;

const ADJECTIVES: &[&str] = &["Rustic", "Sleek", "Ergonomic", "Handcrafted", "Small", "Gorgeous"];
const MATERIALS: &[&str] = &["Steel", "Wooden", "Cotton", "Granite", "Rubber", "Plastic"];
const NOUNS: &[&str] = &["Chair", "Table", "Shoes", "Gloves", "Keyboard", "Lamp"];
const DEPARTMENTS: &[&str] = &["Home", "Garden", "Electronics", "Clothing", "Toys"];

fn pick(items: &[&'static str]) -> &'static str {
    items.choose(&mut rand::thread_rng()).copied().unwrap_or_default()
}

/// A product with random title, price, images and category.
#[must_use]
pub fn generate_one_product() -> Product {
    let mut rng = rand::thread_rng();
    let title = format!("{} {} {}", pick(ADJECTIVES), pick(MATERIALS), pick(NOUNS));
    let images = (0..rng.gen_range(1..=3))
        .map(|i| format!("https://picsum.photos/640/480?image={}", rng.gen_range(0..1000) + i))
        .collect();
    Product {
        id: uuid::Uuid::new_v4().to_string(),
        description: format!("The {} you were looking for", title.to_lowercase()),
        title,
        price: f64::from(rng.gen_range(1_u32..=1000)),
        images,
        category: Category {
            id: rng.gen_range(1_u32..=50).to_string(),
            name: pick(DEPARTMENTS).to_string(),
        },
    }
}

/// `size` independent random products.
#[must_use]
pub fn generate_many_products(size: usize) -> Vec<Product> {
    (0..size).map(|_| generate_one_product()).collect()
}
