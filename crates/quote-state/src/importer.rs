//! 歷史報價匯入
//!
//! 將報價快照轉成可編輯的表單。只搬移輸入欄位；衍生值交給調和器重新計算。

use quote_core::{OperationalPaper, PaperLine, ProductSpec, QuoteDetail, QuoteForm, SizeDimensions};

/// 報價快照匯入器
pub struct QuoteDetailImporter;

impl QuoteDetailImporter {
    /// 以快照覆寫表單的輸入欄位
    ///
    /// 快照未提供的尺寸、連動設定與紙張作業參數沿用目前表單的主產品；
    /// 不在後加工目錄中的名稱會被捨棄。
    pub fn import(detail: &QuoteDetail, previous: &QuoteForm) -> QuoteForm {
        tracing::info!("匯入報價 {}：產品 {}", detail.id, detail.product);

        let prev_product = previous.primary_product();

        let flat_size = detail
            .flat_size
            .clone()
            .or_else(|| prev_product.map(|p| p.flat_size.clone()))
            .unwrap_or_default();

        let use_same_as_flat = detail
            .use_same_as_flat
            .or_else(|| prev_product.map(|p| p.use_same_as_flat))
            .unwrap_or(false);

        let close_size = if use_same_as_flat {
            flat_size.clone()
        } else {
            detail
                .close_size
                .clone()
                .or_else(|| prev_product.map(|p| p.close_size.clone()))
                .unwrap_or_else(SizeDimensions::default)
        };

        let mut papers: Vec<PaperLine> = detail
            .papers
            .iter()
            .enumerate()
            .map(|(index, quoted)| {
                let mut stock = quoted
                    .stock
                    .clone()
                    .or_else(|| {
                        prev_product
                            .and_then(|p| p.papers.get(index))
                            .map(|line| line.stock.clone())
                    })
                    .unwrap_or_else(OperationalPaper::new);
                stock.recommended_sheets = 0;
                PaperLine::new(quoted.paper.clone()).with_stock(stock)
            })
            .collect();

        if papers.is_empty() {
            tracing::warn!("報價 {} 沒有紙張，補上一筆空白紙張", detail.id);
            papers.push(PaperLine::default());
        }

        let mut finishing: Vec<String> = Vec::with_capacity(detail.finishing.len());
        for name in &detail.finishing {
            if previous.operational.finishing_cost(name).is_none() {
                tracing::warn!("報價 {} 的後加工 {} 不在目錄中，已略過", detail.id, name);
                continue;
            }
            if !finishing.contains(name) {
                finishing.push(name.clone());
            }
        }

        let product = ProductSpec {
            product_name: detail.product.clone(),
            quantity: detail.quantity,
            sides: detail.sides,
            printing_selection: detail.printing,
            flat_size,
            close_size,
            use_same_as_flat,
            papers,
            finishing,
        };

        QuoteForm {
            client: detail.client.clone(),
            products: vec![product],
            operational: previous.operational.clone(),
            calculation: previous.calculation,
        }
    }
}

/// 匯入報價快照
pub fn import_quote_detail(detail: &QuoteDetail, form: &QuoteForm) -> QuoteForm {
    QuoteDetailImporter::import(detail, form)
}
