//! Read-time pricing of cart line items against the live catalog.

use crate::dto::cart::PricedItemResponse;
use crate::error::AppResult;
use crate::models::{CartItem, Product};
use crate::repos::ProductRepo;

/// Name reported for line items whose product no longer resolves.
pub const PRODUCT_NOT_FOUND: &str = "Product Not Found";

/// Outcome of resolving one line item against the catalog. A stale reference
/// to a deleted product degrades to `Unresolved` instead of failing the whole
/// read; only storage faults abort enrichment.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemPricing {
    Resolved { name: String, unit_price: f64 },
    Unresolved,
}

impl From<Option<Product>> for ItemPricing {
    fn from(product: Option<Product>) -> Self {
        match product {
            Some(p) => ItemPricing::Resolved {
                name: p.name,
                unit_price: p.price,
            },
            None => ItemPricing::Unresolved,
        }
    }
}

/// Resolve each item in input order and compute the cart total. One catalog
/// lookup per line item; at this system's scale the O(n) round trips are an
/// accepted tradeoff over batching.
pub async fn enrich(
    products: &ProductRepo,
    items: &[CartItem],
) -> AppResult<(Vec<PricedItemResponse>, f64)> {
    let mut pricings = Vec::with_capacity(items.len());
    for item in items {
        let product = products.find_by_id(&item.product_id).await?;
        pricings.push(ItemPricing::from(product));
    }
    Ok(price_items(items, pricings))
}

/// Pure half of enrichment: project (item, pricing) pairs into priced lines
/// and a total. Unresolved items price to zero and stay out of the total.
pub fn price_items(items: &[CartItem], pricings: Vec<ItemPricing>) -> (Vec<PricedItemResponse>, f64) {
    let mut total = 0.0;
    let mut priced = Vec::with_capacity(items.len());
    for (item, pricing) in items.iter().zip(pricings) {
        let line = price_item(item, &pricing);
        if matches!(pricing, ItemPricing::Resolved { .. }) {
            total += line.line_total;
        }
        priced.push(line);
    }
    (priced, total)
}

fn price_item(item: &CartItem, pricing: &ItemPricing) -> PricedItemResponse {
    match pricing {
        ItemPricing::Resolved { name, unit_price } => PricedItemResponse {
            product_id: item.product_id.clone(),
            product_name: name.clone(),
            unit_price: *unit_price,
            quantity: item.quantity,
            line_total: unit_price * item.quantity as f64,
        },
        ItemPricing::Unresolved => PricedItemResponse {
            product_id: item.product_id.clone(),
            product_name: PRODUCT_NOT_FOUND.to_string(),
            unit_price: 0.0,
            quantity: item.quantity,
            line_total: 0.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: &str, quantity: i64) -> CartItem {
        CartItem {
            product_id: product_id.to_string(),
            quantity,
        }
    }

    #[test]
    fn resolved_items_multiply_price_by_quantity() {
        let items = vec![item("p1", 2), item("p2", 3)];
        let pricings = vec![
            ItemPricing::Resolved {
                name: "Widget".into(),
                unit_price: 10.0,
            },
            ItemPricing::Resolved {
                name: "Gadget".into(),
                unit_price: 2.5,
            },
        ];
        let (priced, total) = price_items(&items, pricings);
        assert_eq!(priced[0].line_total, 20.0);
        assert_eq!(priced[1].line_total, 7.5);
        assert_eq!(total, 27.5);
    }

    #[test]
    fn unresolved_items_price_to_zero_and_stay_out_of_total() {
        let items = vec![item("p1", 2), item("gone", 5), item("p2", 1)];
        let pricings = vec![
            ItemPricing::Resolved {
                name: "Widget".into(),
                unit_price: 10.0,
            },
            ItemPricing::Unresolved,
            ItemPricing::Resolved {
                name: "Gadget".into(),
                unit_price: 4.0,
            },
        ];
        let (priced, total) = price_items(&items, pricings);
        assert_eq!(total, 24.0);

        let gone = &priced[1];
        assert_eq!(gone.product_name, PRODUCT_NOT_FOUND);
        assert_eq!(gone.unit_price, 0.0);
        assert_eq!(gone.line_total, 0.0);
        // quantity is still reported so the caller can show what was asked for
        assert_eq!(gone.quantity, 5);
    }

    #[test]
    fn output_order_mirrors_input_order() {
        let items = vec![item("b", 1), item("a", 1), item("c", 1)];
        let pricings = vec![
            ItemPricing::Unresolved,
            ItemPricing::Resolved {
                name: "A".into(),
                unit_price: 1.0,
            },
            ItemPricing::Unresolved,
        ];
        let (priced, _) = price_items(&items, pricings);
        let ids: Vec<_> = priced.iter().map(|p| p.product_id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[test]
    fn empty_cart_prices_to_zero() {
        let (priced, total) = price_items(&[], Vec::new());
        assert!(priced.is_empty());
        assert_eq!(total, 0.0);
    }
}
