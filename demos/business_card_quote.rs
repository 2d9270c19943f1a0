//! 名片報價示範
//!
//! 執行：`cargo run --example business_card_quote`
//! 以 `RUST_LOG=debug` 查看每一步的計算日誌。

use anyhow::Context;
use print_quote::*;
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let repo = InMemoryRepository::seeded();
    let mut session = QuoteSession::new(&repo);

    tracing::info!("預設報價");
    show_quote(&session);

    session.apply(ProductEdit::SetQuantity(Some(2000)))?;
    session.apply(ProductEdit::AcceptRecommendation { paper: 0 })?;
    session.set_finishing_cost("Lamination", Some(Decimal::from(18)))?;

    tracing::info!("改為 2000 張並採用建議張數");
    show_quote(&session);

    session
        .load_quote(&repo, "Q-2025-001")
        .context("載入歷史報價失敗")?;

    tracing::info!("載入歷史報價 Q-2025-001");
    show_quote(&session);

    Ok(())
}

fn show_quote(session: &QuoteSession) {
    let form = session.form();
    let Some(product) = form.primary_product() else {
        println!("(沒有產品)");
        return;
    };

    println!("=== {} × {} ===", product.product_name, product.quantity.unwrap_or(0));
    if !form.client.contact_person.is_empty() {
        println!("客戶: {} {}", form.client.company_name, form.client.contact_person);
    }

    let details = session.cost_details();
    for (line, detail) in product.papers.iter().zip(&details.papers) {
        println!(
            "  {} {}gsm: {}×{} = 每張 {} 件 (利用率 {:.2}%), 建議 {} 張, 使用 {} 張, 成本 {}",
            line.paper.name,
            line.paper.gsm,
            detail.layout.columns,
            detail.layout.rows,
            detail.layout.items_per_sheet,
            detail.layout.efficiency,
            detail.recommended_sheets,
            detail.sheets_used,
            detail.paper_cost,
        );
    }
    for warning in &details.warnings {
        println!("  ! {}", warning.message);
    }

    println!("  印版 {}，印量 {}", form.operational.plates, form.operational.units);

    let calc = &form.calculation;
    println!("  基礎成本 {}", calc.base_price);
    println!("  利潤     {}", calc.margin_amount);
    println!("  小計     {}", calc.subtotal);
    println!("  增值稅   {}", calc.vat_amount);
    println!("  總價     {}", calc.total_price);

    let summary = session.price_summary();
    println!("  報價摘要 {} + {} = {}", summary.base, summary.vat, summary.total);

    for (row, price) in session.other_quantities().iter().zip(session.other_quantity_prices()) {
        println!(
            "  試算 {} × {}: {}",
            row.product_name,
            row.quantity.unwrap_or(0),
            price.total
        );
    }
    println!();
}
