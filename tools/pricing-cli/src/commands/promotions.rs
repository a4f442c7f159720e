//! List catalog promotions.

use anyhow::Result;
use turbo_pricing::promotion::{Promotion, PromotionKind};

use super::PromotionsArgs;
use crate::context::Context;
use crate::input::load_catalog;
use crate::output::status_badge;

/// Run the promotions command.
pub async fn run(args: PromotionsArgs, ctx: &Context) -> Result<()> {
    let currency = ctx.config.currency()?;
    let catalog_path = ctx.catalog_path(args.catalog.as_deref())?;
    let catalog = load_catalog(&catalog_path, currency)?;

    let promotions: Vec<Promotion> = catalog
        .list()
        .await
        .into_iter()
        .filter(|p| !args.active || p.is_active())
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&promotions);
        return Ok(());
    }

    ctx.output
        .header(&format!("Promotions in {}", catalog_path.display()));

    if promotions.is_empty() {
        ctx.output.info("No promotions found.");
        return Ok(());
    }

    let widths = [16, 14, 28, 16, 8];
    ctx.output
        .table_row(&["CODE", "TYPE", "OFFER", "MIN ORDER", "STATUS"], &widths);

    for promotion in &promotions {
        let min_order = promotion
            .min_order_amount()
            .map(|m| m.to_string())
            .unwrap_or_else(|| "-".to_string());
        let offer = describe_offer(promotion.kind());
        let status = status_badge(promotion.is_active());
        ctx.output.table_row(
            &[
                promotion.code().as_str(),
                promotion.kind().name(),
                offer.as_str(),
                min_order.as_str(),
                status.as_str(),
            ],
            &widths,
        );
    }

    Ok(())
}

/// One-line summary of what a promotion grants.
fn describe_offer(kind: &PromotionKind) -> String {
    match kind {
        PromotionKind::Percentage { rate } => format!("{}% off", rate.value().normalize()),
        PromotionKind::FixedAmount { amount } => format!("{} off", amount),
        PromotionKind::FreeShipping => "free delivery".to_string(),
        PromotionKind::BundlePrice(offer) => {
            let tiers: Vec<String> = offer
                .tiers()
                .iter()
                .map(|t| format!("{} for {}", t.quantity, t.bundle_price.display_amount()))
                .collect();
            format!("{}: {}", offer.target_product_id(), tiers.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use turbo_pricing::promotion::{BundleOffer, BundleTier};
    use turbo_pricing::{Currency, Money};

    fn tnd(amount: i64) -> Money {
        Money::new(amount, Currency::TND)
    }

    #[test]
    fn test_describe_offers() {
        let percent = PromotionKind::Percentage {
            rate: turbo_pricing::promotion::Percent::new(Decimal::new(125, 1)).unwrap(),
        };
        assert_eq!(describe_offer(&percent), "12.5% off");

        let fixed = PromotionKind::FixedAmount { amount: tnd(10_000) };
        assert_eq!(describe_offer(&fixed), "10.000 TND off");

        assert_eq!(describe_offer(&PromotionKind::FreeShipping), "free delivery");

        let offer = BundleOffer::new(
            "socks",
            vec![BundleTier::new(2, tnd(15_000)), BundleTier::new(4, tnd(28_000))],
        )
        .unwrap();
        assert_eq!(
            describe_offer(&PromotionKind::BundlePrice(offer)),
            "socks: 2 for 15.000, 4 for 28.000"
        );
    }
}
