// File: giftlink-core/src/catalog.rs
//
// The demo product catalog and the builder's shipping-zone choices. There
// is no product store yet; campaigns keep catalog ids and the claim page
// resolves them against this list.

use once_cell::sync::Lazy;

use giftlink_common::models::product::Product;

pub static PRODUCTS: Lazy<Vec<Product>> = Lazy::new(|| {
    vec![
        Product {
            id: "p1".to_string(),
            title: "Vintage Leather Jacket".to_string(),
            price: 650.0,
            image: "https://images.unsplash.com/photo-1551028919-ac669d6301dd?auto=format&fit=crop&q=80&w=300".to_string(),
        },
        Product {
            id: "p2".to_string(),
            title: "Performance Energy Drink".to_string(),
            price: 45.0,
            image: "https://images.unsplash.com/photo-1622483767028-3f66f32aef97?auto=format&fit=crop&q=80&w=300".to_string(),
        },
        Product {
            id: "p3".to_string(),
            title: "Hydrating Face Cream".to_string(),
            price: 120.0,
            image: "https://images.unsplash.com/photo-1620916566398-39f1143ab7be?auto=format&fit=crop&q=80&w=300".to_string(),
        },
        Product {
            id: "p4".to_string(),
            title: "Ceramic Diffuser".to_string(),
            price: 55.0,
            image: "https://images.unsplash.com/photo-1616486029423-aaa478965c97?auto=format&fit=crop&q=80&w=300".to_string(),
        },
        Product {
            id: "p5".to_string(),
            title: "Silk Pillowcase".to_string(),
            price: 85.0,
            image: "https://images.unsplash.com/photo-1576014131795-d4c3a283033f?auto=format&fit=crop&q=80&w=300".to_string(),
        },
        Product {
            id: "p6".to_string(),
            title: "Matcha Kit".to_string(),
            price: 40.0,
            image: "https://images.unsplash.com/photo-1563822249548-9a72b6353cd1?auto=format&fit=crop&q=80&w=300".to_string(),
        },
    ]
});

/// Countries the builder offers for single-zone shipping restriction.
pub const SHIPPING_ZONE_OPTIONS: &[&str] = &[
    "United States",
    "Canada",
    "United Kingdom",
    "Australia",
    "Germany",
];

pub fn product_by_id(id: &str) -> Option<&'static Product> {
    PRODUCTS.iter().find(|p| p.id == id)
}

/// Resolves a campaign's selected ids against the catalog, in catalog
/// order. Unknown ids drop out; an empty selection yields an empty page.
pub fn products_for(selected: &[String]) -> Vec<Product> {
    PRODUCTS
        .iter()
        .filter(|p| selected.iter().any(|id| id == &p.id))
        .cloned()
        .collect()
}
