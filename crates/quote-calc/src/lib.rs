//! # Quote Calculation Engine
//!
//! 報價衍生值計算：拼版、用紙、成本、定價

pub mod calculator;
pub mod cost;
pub mod layout;
pub mod pricing;
pub mod sheet_demand;

use quote_core::{Calculation, FinishingCost, ProductSpec};
use rust_decimal::Decimal;

// Re-export 主要類型
pub use calculator::QuoteCalculator;
pub use cost::{CostAggregator, CostBreakdown, PaperCostDetail};
pub use layout::{LayoutResult, LayoutSolver};
pub use pricing::{PricingPipeline, SummaryLine};
pub use sheet_demand::SheetDemandCalculator;

/// 報價計算結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteResult {
    /// 各紙張明細
    pub papers: Vec<PaperCostDetail>,

    /// 成本彙總
    pub costs: CostBreakdown,

    /// 定價結果
    pub calculation: Calculation,

    /// 警告信息
    pub warnings: Vec<QuoteWarning>,
}

impl QuoteResult {
    /// 創建空的計算結果
    pub fn empty() -> Self {
        Self::default()
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: QuoteWarning) {
        self.warnings.push(warning);
    }

    /// 是否有警告
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// 報價警告
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteWarning {
    pub paper_index: usize,
    pub message: String,
    pub severity: WarningSeverity,
}

impl QuoteWarning {
    pub fn new(paper_index: usize, message: String, severity: WarningSeverity) -> Self {
        Self {
            paper_index,
            message,
            severity,
        }
    }

    pub fn info(paper_index: usize, message: String) -> Self {
        Self::new(paper_index, message, WarningSeverity::Info)
    }

    pub fn warning(paper_index: usize, message: String) -> Self {
        Self::new(paper_index, message, WarningSeverity::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Info,
    Warning,
}

/// 以預設邊界與出血計算拼版
pub fn compute_layout(
    sheet_width: Option<Decimal>,
    sheet_height: Option<Decimal>,
    product_width: Option<Decimal>,
    product_height: Option<Decimal>,
) -> LayoutResult {
    LayoutSolver::default().solve(sheet_width, sheet_height, product_width, product_height)
}

/// 建議張數
pub fn recommend_sheets(items_per_sheet: u32, quantity: Option<u32>) -> u32 {
    SheetDemandCalculator::recommend(items_per_sheet, quantity)
}

/// 每張單價
pub fn price_per_sheet(price_per_packet: Option<Decimal>, sheets_per_packet: Option<Decimal>) -> Option<Decimal> {
    SheetDemandCalculator::price_per_sheet(price_per_packet, sheets_per_packet)
}

/// 以表單現值彙總成本
pub fn aggregate_costs(product: &ProductSpec, finishing: &[FinishingCost]) -> CostBreakdown {
    CostAggregator::default().aggregate(product, finishing)
}

/// 以預設利潤率與稅率定價
pub fn compute_pricing(base_price: Decimal) -> Calculation {
    PricingPipeline::default().price(base_price)
}
