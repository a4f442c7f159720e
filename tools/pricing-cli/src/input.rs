//! Cart and promotion catalog files.

use std::path::Path;

use anyhow::{bail, Context as _, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use turbo_pricing::cart::{CartSnapshot, LineItem};
use turbo_pricing::promotion::{InMemoryCatalog, PromotionRecord};
use turbo_pricing::{Currency, Money, PricingResult};

/// A cart as exported by the storefront.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartFile {
    /// Currency code; must match the configured one when present.
    #[serde(default)]
    pub currency: Option<String>,
    /// Cart lines.
    pub items: Vec<CartItemRecord>,
}

/// A cart line with amounts in major units.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemRecord {
    pub product_id: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    pub unit_price: Decimal,
    pub quantity: i64,
    /// Delivery cost this product requires, if any.
    #[serde(default)]
    pub delivery_cost: Option<Decimal>,
}

impl CartItemRecord {
    fn into_line_item(self, currency: Currency) -> PricingResult<LineItem> {
        let unit_price = Money::from_decimal(self.unit_price, currency)?;
        let mut item = LineItem::new(self.product_id, unit_price, self.quantity);

        if let Some(size) = self.size {
            item = item.with_size(size);
        }
        if let Some(color) = self.color {
            item = item.with_color(color);
        }
        if let Some(delivery) = self.delivery_cost {
            item = item.with_delivery_hint(Money::from_decimal(delivery, currency)?);
        }

        Ok(item)
    }
}

impl CartFile {
    /// Convert into a validated snapshot priced in `currency`.
    pub fn into_snapshot(self, currency: Currency) -> Result<CartSnapshot> {
        if let Some(code) = &self.currency {
            if Currency::from_code(code) != Some(currency) {
                bail!("Cart currency {} does not match configured {}", code, currency);
            }
        }

        let items = self
            .items
            .into_iter()
            .map(|item| item.into_line_item(currency))
            .collect::<PricingResult<Vec<_>>>()?;

        Ok(CartSnapshot::new(items)?)
    }
}

/// Promotion documents in a TOML catalog file.
#[derive(Debug, Clone, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    promotions: Vec<PromotionRecord>,
}

/// Load a cart file (JSON, or TOML for other extensions).
pub fn load_cart(path: &Path, currency: Currency) -> Result<CartSnapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read cart file: {}", path.display()))?;

    let cart: CartFile = if is_json(path) {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON cart: {}", path.display()))?
    } else {
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML cart: {}", path.display()))?
    };

    cart.into_snapshot(currency)
        .with_context(|| format!("Invalid cart: {}", path.display()))
}

/// Load promotion records from a catalog file.
///
/// JSON catalogs are an array of promotion documents; TOML catalogs list
/// them as `[[promotions]]` tables.
pub fn load_records(path: &Path) -> Result<Vec<PromotionRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;

    if is_json(path) {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON catalog: {}", path.display()))
    } else {
        let file: CatalogFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML catalog: {}", path.display()))?;
        Ok(file.promotions)
    }
}

/// Load a catalog file into an in-memory catalog.
pub fn load_catalog(path: &Path, currency: Currency) -> Result<InMemoryCatalog> {
    let records = load_records(path)?;
    InMemoryCatalog::from_records(records, currency)
        .with_context(|| format!("Invalid promotion catalog: {}", path.display()))
}

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |e| e == "json")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tnd(amount: i64) -> Money {
        Money::new(amount, Currency::TND)
    }

    #[test]
    fn test_cart_file_to_snapshot() {
        let cart: CartFile = serde_json::from_str(
            r#"{
                "currency": "TND",
                "items": [
                    {"productId": "shirt", "size": "M", "unitPrice": 50, "quantity": 2, "deliveryCost": "7"},
                    {"productId": "socks", "color": "black", "unitPrice": "9.000", "quantity": 1}
                ]
            }"#,
        )
        .unwrap();

        let snapshot = cart.into_snapshot(Currency::TND).unwrap();
        assert_eq!(snapshot.items().len(), 2);
        assert_eq!(snapshot.items()[0].size.as_deref(), Some("M"));
        assert_eq!(snapshot.items()[0].delivery_hint, Some(tnd(7_000)));
        assert_eq!(snapshot.subtotal().unwrap(), tnd(109_000));
    }

    #[test]
    fn test_cart_currency_mismatch() {
        let cart: CartFile = serde_json::from_str(
            r#"{"currency": "EUR", "items": [{"productId": "a", "unitPrice": 1, "quantity": 1}]}"#,
        )
        .unwrap();
        assert!(cart.into_snapshot(Currency::TND).is_err());
    }

    #[test]
    fn test_empty_cart_rejected() {
        let cart: CartFile = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert!(cart.into_snapshot(Currency::TND).is_err());
    }

    #[test]
    fn test_toml_catalog_file() {
        let file: CatalogFile = toml::from_str(
            r#"
            [[promotions]]
            code = "SAVE20"
            type = "percentage"
            value = 20

            [[promotions]]
            code = "socks2"
            type = "bundle_price"
            targetProductId = "socks"
            tiers = [{ qty = 2, price = 15 }]
            "#,
        )
        .unwrap();

        assert_eq!(file.promotions.len(), 2);
        assert!(InMemoryCatalog::from_records(file.promotions, Currency::TND).is_ok());
    }
}
