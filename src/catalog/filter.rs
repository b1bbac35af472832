//! Pure filter/sort engine for the catalog listing.
//!
//! No side effects and no dependency on cart state, so these functions are
//! unit-testable with literal product arrays.

use super::models::{CategoryFilter, Product, SortMode};

/// Applies `filter` then `sort` to `products`, returning a new list.
///
/// The source slice is never mutated. Filtering is equality on the product
/// category; sorting is stable in every mode.
pub fn filter_and_sort(
    products: &[Product],
    filter: CategoryFilter,
    sort: SortMode,
) -> Vec<Product> {
    let mut selected: Vec<Product> = products
        .iter()
        .filter(|p| filter.category().map_or(true, |c| p.category == c))
        .cloned()
        .collect();

    sort_products(&mut selected, sort);
    selected
}

/// Sorts `products` in place. `slice::sort_by` is stable, so equal keys keep
/// their relative input order.
pub fn sort_products(products: &mut [Product], sort: SortMode) {
    match sort {
        SortMode::Featured => products.sort_by_key(|p| !p.featured),
        SortMode::PriceAsc => products.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortMode::PriceDesc => products.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortMode::RatingDesc => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::Category;
    use chrono::Utc;

    fn product(id: &str, category: Category, price: f64, rating: f64, featured: bool) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            description: String::new(),
            price,
            original_price: None,
            image: format!("/images/{id}.png"),
            category,
            in_stock: true,
            rating,
            review_count: 10,
            featured,
            active: true,
            display_order: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn tech_filter_with_price_asc_is_nondecreasing_and_all_tech() {
        let products = vec![
            product("a", Category::Tech, 49.99, 4.0, false),
            product("b", Category::Apparel, 19.99, 4.5, false),
            product("c", Category::Tech, 9.99, 3.0, true),
            product("d", Category::Books, 29.99, 4.8, false),
            product("e", Category::Tech, 24.99, 4.2, false),
        ];

        let result = filter_and_sort(&products, CategoryFilter::Tech, SortMode::PriceAsc);

        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|p| p.category == Category::Tech));
        for pair in result.windows(2) {
            assert!(pair[0].price <= pair[1].price);
        }
    }

    #[test]
    fn all_filter_keeps_everything() {
        let products = vec![
            product("a", Category::Tech, 10.0, 4.0, false),
            product("b", Category::Books, 20.0, 4.0, false),
        ];

        let result = filter_and_sort(&products, CategoryFilter::All, SortMode::PriceAsc);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn featured_sort_is_stable_within_groups() {
        let products = vec![
            product("a", Category::Tech, 1.0, 4.0, false),
            product("b", Category::Tech, 2.0, 4.0, true),
            product("c", Category::Tech, 3.0, 4.0, false),
            product("d", Category::Tech, 4.0, 4.0, true),
        ];

        let result = filter_and_sort(&products, CategoryFilter::All, SortMode::Featured);

        let order: Vec<&str> = result.iter().map(|p| p.id.as_str()).collect();
        // Featured first in input order, then the rest in input order.
        assert_eq!(order, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn price_desc_and_rating_desc_order() {
        let products = vec![
            product("a", Category::Tech, 10.0, 2.0, false),
            product("b", Category::Tech, 30.0, 5.0, false),
            product("c", Category::Tech, 20.0, 3.5, false),
        ];

        let by_price = filter_and_sort(&products, CategoryFilter::All, SortMode::PriceDesc);
        let prices: Vec<f64> = by_price.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![30.0, 20.0, 10.0]);

        let by_rating = filter_and_sort(&products, CategoryFilter::All, SortMode::RatingDesc);
        let ratings: Vec<f64> = by_rating.iter().map(|p| p.rating).collect();
        assert_eq!(ratings, vec![5.0, 3.5, 2.0]);
    }

    #[test]
    fn filtering_does_not_mutate_the_source() {
        let products = vec![
            product("a", Category::Tech, 10.0, 4.0, false),
            product("b", Category::Books, 20.0, 4.0, false),
        ];
        let before = products.clone();

        let _ = filter_and_sort(&products, CategoryFilter::Books, SortMode::PriceDesc);
        assert_eq!(products, before);
    }
}
