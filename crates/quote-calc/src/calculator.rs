//! 報價主計算器

use quote_core::{EngineConfig, FinishingCost, PaperLine, ProductSpec};
use rust_decimal::Decimal;

use crate::cost::{CostAggregator, PaperCostDetail};
use crate::layout::LayoutSolver;
use crate::pricing::PricingPipeline;
use crate::sheet_demand::SheetDemandCalculator;
use crate::{QuoteResult, QuoteWarning};

/// 報價計算器
///
/// 每次計算都是對產品快照的純函數，不修改輸入。
#[derive(Debug, Clone)]
pub struct QuoteCalculator {
    config: EngineConfig,
    layout: LayoutSolver,
    costs: CostAggregator,
    pricing: PricingPipeline,
}

impl QuoteCalculator {
    /// 創建新的報價計算器
    pub fn new(config: EngineConfig) -> Self {
        Self {
            layout: LayoutSolver::from_config(&config),
            costs: CostAggregator::from_config(&config),
            pricing: PricingPipeline::from_config(&config),
            config,
        }
    }

    /// 主計算入口：拼版 → 用紙 → 成本 → 定價
    pub fn calculate(&self, product: &ProductSpec, finishing: &[FinishingCost]) -> QuoteResult {
        tracing::debug!(
            "開始報價計算：產品 {}，紙張 {} 種",
            product.product_name,
            product.papers.len()
        );

        let mut result = QuoteResult::empty();

        // Step 1-2: 逐紙張拼版與建議張數
        let details: Vec<PaperCostDetail> = product
            .papers
            .iter()
            .enumerate()
            .map(|(index, line)| self.evaluate_paper(product, index, line))
            .collect();

        for (detail, line) in details.iter().zip(&product.papers) {
            if let Some(warning) = check_paper(detail, line) {
                result.add_warning(warning);
            }
        }

        // Step 3: 成本彙總
        let costs = self.costs.aggregate_details(&details, product, finishing);
        tracing::debug!(
            "紙張成本 {}，後加工成本 {}，印版 {}，印量 {}",
            costs.paper_cost,
            costs.finishing_cost,
            costs.plates,
            costs.units
        );

        // Step 4: 定價
        result.calculation = self.pricing.price(costs.base_cost());
        result.papers = details;
        result.costs = costs;

        tracing::debug!("報價計算完成，總價 {}", result.calculation.total_price);

        result
    }

    /// 單一紙張的拼版、建議張數與紙張成本
    pub fn evaluate_paper(&self, product: &ProductSpec, index: usize, line: &PaperLine) -> PaperCostDetail {
        let (product_width, product_height) = product.trim_size();
        let layout = self.layout.solve(
            line.stock.input_width,
            line.stock.input_height,
            product_width,
            product_height,
        );

        let recommended_sheets = SheetDemandCalculator::recommend(layout.items_per_sheet, product.quantity);
        let price_per_sheet = SheetDemandCalculator::price_per_sheet(
            line.stock.price_per_packet,
            line.stock.sheets_per_packet,
        );
        let sheets_used = line.stock.entered_sheets.unwrap_or(recommended_sheets);

        tracing::debug!(
            "紙張 {} ({}): {}×{} = 每張 {} 件，建議 {} 張，使用 {} 張",
            index,
            line.paper.name,
            layout.columns,
            layout.rows,
            layout.items_per_sheet,
            recommended_sheets,
            sheets_used
        );

        PaperCostDetail {
            index,
            layout,
            recommended_sheets,
            sheets_used,
            price_per_sheet,
            paper_cost: CostAggregator::paper_cost(sheets_used, price_per_sheet),
        }
    }

    /// 取得定價流程（報價摘要使用）
    pub fn pricing(&self) -> &PricingPipeline {
        &self.pricing
    }

    /// 取得拼版計算器
    pub fn layout_solver(&self) -> &LayoutSolver {
        &self.layout
    }

    /// 取得引擎配置
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl Default for QuoteCalculator {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

fn check_paper(detail: &PaperCostDetail, line: &PaperLine) -> Option<QuoteWarning> {
    let sheet_set = line.stock.input_width.is_some() && line.stock.input_height.is_some();

    if CostAggregator::checked_paper_cost(detail.sheets_used, detail.price_per_sheet).is_none() {
        return Some(QuoteWarning::warning(
            detail.index,
            format!("紙張 {} 成本超出可計算範圍，已以上限計", line.paper.name),
        ));
    }

    if sheet_set && !detail.layout.fits() && detail.layout.usable_width > Decimal::ZERO {
        return Some(QuoteWarning::warning(
            detail.index,
            format!("紙張 {} 尺寸不足，無法排入任何成品", line.paper.name),
        ));
    }

    if detail.sheets_used > 0 && detail.price_per_sheet.is_none() {
        return Some(QuoteWarning::info(
            detail.index,
            format!("紙張 {} 尚未設定每包價格或張數，紙張成本以 0 計", line.paper.name),
        ));
    }

    None
}
