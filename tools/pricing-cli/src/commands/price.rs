//! Price a cart.

use anyhow::{Context as _, Result};
use turbo_pricing::pricing::{OrderPricer, PricedOrder, PricingOutcome};
use turbo_pricing::Money;

use super::PriceArgs;
use crate::context::Context;
use crate::input::{load_cart, load_catalog};

/// Run the price command.
pub async fn run(args: PriceArgs, ctx: &Context) -> Result<()> {
    let currency = ctx.config.currency()?;

    let cart = load_cart(&ctx.resolve_path(&args.cart), currency)?;
    ctx.output
        .debug(&format!("Loaded cart with {} line(s)", cart.items().len()));

    let catalog_path = ctx.catalog_path(args.catalog.as_deref())?;
    let catalog = load_catalog(&catalog_path, currency)?;
    ctx.output
        .debug(&format!("Loaded catalog: {}", catalog_path.display()));

    let fallback = match &args.delivery {
        Some(amount) => Money::parse(amount, currency)
            .with_context(|| format!("Invalid delivery cost: {}", amount))?,
        None => ctx.config.default_delivery()?,
    };
    let base_delivery = cart.base_delivery_cost(fallback)?;

    let pricer = OrderPricer::new(catalog);
    let outcome = pricer
        .price(&cart, args.code.as_deref(), base_delivery)
        .await
        .context("Pricing failed")?;

    if ctx.output.is_json() {
        ctx.output.json(&outcome);
        return Ok(());
    }

    ctx.output.header("Order");
    print_order(outcome.order(), ctx);

    match &outcome {
        PricingOutcome::Priced(order) => match &order.applied_promotion_code {
            Some(code) => ctx.output.success(&format!("Promotion {} applied", code)),
            None => ctx.output.info("No promotion applied"),
        },
        PricingOutcome::Rejected { reason, .. } => {
            let code = args.code.as_deref().unwrap_or_default().trim();
            ctx.output
                .warn(&format!("Promotion {} rejected: {}", code, reason));
        }
    }

    Ok(())
}

fn print_order(order: &PricedOrder, ctx: &Context) {
    ctx.output.kv("Subtotal", &order.subtotal.to_string());
    if order.has_discount() {
        ctx.output.kv("Discount", &format!("-{}", order.discount));
    }
    ctx.output.kv("Delivery", &order.delivery_cost.to_string());
    ctx.output.kv("Total", &order.total.to_string());
}
