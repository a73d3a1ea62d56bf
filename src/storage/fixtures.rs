//! Demo catalog used to seed [`super::MemStorage`] and by tests.

use crate::catalog::models::Product;
use crate::money::{cents, Money};

const PEXELS: &str = "https://images.pexels.com/photos";

fn image(id: u32) -> String {
    format!("{PEXELS}/{id}/pexels-photo-{id}.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=1")
}

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

struct Seed {
    id: u64,
    name: &'static str,
    description: &'static str,
    price: Money,
    discount_price: Option<Money>,
    images: [u32; 2],
    categories: &'static [&'static str],
    colors: &'static [&'static str],
    sizes: &'static [&'static str],
    is_new: bool,
    is_featured: bool,
    stock: u32,
}

impl From<Seed> for Product {
    fn from(seed: Seed) -> Self {
        Product {
            id: seed.id,
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            price: seed.price,
            discount_price: seed.discount_price,
            categories: labels(seed.categories),
            colors: labels(seed.colors),
            sizes: labels(seed.sizes),
            images: seed.images.iter().map(|&id| image(id)).collect(),
            is_new: seed.is_new,
            is_featured: seed.is_featured,
            stock: seed.stock,
            rating: None,
            reviews: None,
        }
    }
}

/// The eight-product Aayu Attire catalog, ids 1 to 8.
pub fn demo_products() -> Vec<Product> {
    let seeds = [
        Seed {
            id: 1,
            name: "Handcrafted Cotton Kurta",
            description: "A beautiful handcrafted cotton kurta designed for comfort and style. Perfect for both casual and formal occasions.",
            price: cents(5999),
            discount_price: None,
            images: [6626903, 6626967],
            categories: &["Women", "Traditional", "Tops"],
            colors: &["White", "Blue", "Beige"],
            sizes: &["XS", "S", "M", "L", "XL"],
            is_new: true,
            is_featured: true,
            stock: 25,
        },
        Seed {
            id: 2,
            name: "Embroidered Silk Saree",
            description: "Luxurious embroidered silk saree with intricate patterns and golden border. An elegant choice for special occasions.",
            price: cents(14999),
            discount_price: None,
            images: [12004537, 3386892],
            categories: &["Women", "Traditional", "Sarees"],
            colors: &["Red", "Green", "Blue", "Gold"],
            sizes: &["Standard"],
            is_new: false,
            is_featured: true,
            stock: 15,
        },
        Seed {
            id: 3,
            name: "Modern Fitted Blazer",
            description: "A sleek, modern-cut blazer perfect for professional settings or evening occasions. Tailored to perfection.",
            price: cents(8999),
            discount_price: Some(cents(6999)),
            images: [1043474, 1192578],
            categories: &["Men", "Formal", "Outerwear"],
            colors: &["Black", "Navy", "Grey"],
            sizes: &["S", "M", "L", "XL", "XXL"],
            is_new: false,
            is_featured: false,
            stock: 30,
        },
        Seed {
            id: 4,
            name: "Printed Summer Dress",
            description: "Light and flowy summer dress with a beautiful floral print. Perfect for beach days or casual outings.",
            price: cents(4999),
            discount_price: None,
            images: [6626752, 6626764],
            categories: &["Women", "Casual", "Dresses"],
            colors: &["Floral", "Blue", "Pink"],
            sizes: &["XS", "S", "M", "L"],
            is_new: true,
            is_featured: false,
            stock: 20,
        },
        Seed {
            id: 5,
            name: "Classic Linen Shirt",
            description: "Breathable linen shirt for a casual yet sophisticated look. Ideal for warm weather and relaxed settings.",
            price: cents(4599),
            discount_price: None,
            images: [297933, 1184590],
            categories: &["Men", "Casual", "Shirts"],
            colors: &["White", "Beige", "Light Blue"],
            sizes: &["S", "M", "L", "XL"],
            is_new: false,
            is_featured: false,
            stock: 35,
        },
        Seed {
            id: 6,
            name: "Designer Lehenga Set",
            description: "Stunning designer lehenga set with detailed embroidery and matching dupatta. Perfect for weddings and celebrations.",
            price: cents(19999),
            discount_price: None,
            images: [1926769, 2814491],
            categories: &["Women", "Traditional", "Sets"],
            colors: &["Red", "Pink", "Royal Blue"],
            sizes: &["S", "M", "L"],
            is_new: false,
            is_featured: true,
            stock: 10,
        },
        Seed {
            id: 7,
            name: "Casual Denim Jacket",
            description: "Versatile denim jacket that pairs well with almost any outfit. A timeless addition to your wardrobe.",
            price: cents(6999),
            discount_price: Some(cents(5999)),
            images: [2827400, 1040945],
            categories: &["Unisex", "Casual", "Outerwear"],
            colors: &["Blue", "Light Blue", "Black"],
            sizes: &["XS", "S", "M", "L", "XL"],
            is_new: false,
            is_featured: false,
            stock: 40,
        },
        Seed {
            id: 8,
            name: "Designer Suit Set",
            description: "Premium designer suit set including jacket, pants, and vest. Tailored for a perfect fit and elegant look.",
            price: cents(24999),
            discount_price: None,
            images: [1342609, 1250426],
            categories: &["Men", "Formal", "Sets"],
            colors: &["Black", "Navy", "Grey"],
            sizes: &["S", "M", "L", "XL", "XXL"],
            is_new: false,
            is_featured: true,
            stock: 15,
        },
    ];

    seeds.into_iter().map(Product::from).collect()
}
