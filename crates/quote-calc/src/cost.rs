//! 成本彙總（紙張、後加工、印版、印量）

use quote_core::{EngineConfig, FinishingCost, PrintingSelection, ProductSpec, Sides};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::layout::LayoutResult;
use crate::sheet_demand::SheetDemandCalculator;

/// 單一紙張的成本明細
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperCostDetail {
    /// 紙張索引
    pub index: usize,
    /// 拼版結果
    pub layout: LayoutResult,
    /// 建議張數
    pub recommended_sheets: u32,
    /// 實際使用張數（輸入值優先）
    pub sheets_used: u32,
    /// 每張單價
    pub price_per_sheet: Option<Decimal>,
    /// 紙張成本
    pub paper_cost: Decimal,
}

/// 成本彙總結果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    /// 紙張成本合計
    pub paper_cost: Decimal,
    /// 已選後加工成本合計
    pub finishing_cost: Decimal,
    /// 印版數
    pub plates: u32,
    /// 印量
    pub units: u64,
}

impl CostBreakdown {
    /// 基礎成本（印版與印量不計價）
    pub fn base_cost(&self) -> Decimal {
        self.paper_cost.saturating_add(self.finishing_cost)
    }
}

/// 成本彙總器
#[derive(Debug, Clone, Copy)]
pub struct CostAggregator {
    plates_per_side: u32,
}

impl CostAggregator {
    /// 創建成本彙總器
    pub fn new(plates_per_side: u32) -> Self {
        Self { plates_per_side }
    }

    /// 依引擎配置創建
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.plates_per_side)
    }

    /// 單一紙張成本 = 使用張數 × 每張單價（單價未知視為 0）
    ///
    /// 超出十進位數值範圍時取上限。
    pub fn paper_cost(sheets_used: u32, price_per_sheet: Option<Decimal>) -> Decimal {
        Decimal::from(sheets_used).saturating_mul(price_per_sheet.unwrap_or(Decimal::ZERO))
    }

    /// 單一紙張成本，超出數值範圍時回傳 None
    pub fn checked_paper_cost(sheets_used: u32, price_per_sheet: Option<Decimal>) -> Option<Decimal> {
        Decimal::from(sheets_used).checked_mul(price_per_sheet.unwrap_or(Decimal::ZERO))
    }

    /// 已選後加工成本合計；未勾選的項目即使有成本也不計入
    pub fn finishing_cost(finishing: &[FinishingCost], selected: &[String]) -> Decimal {
        finishing
            .iter()
            .filter(|f| selected.iter().any(|name| *name == f.name))
            .map(|f| f.cost.unwrap_or(Decimal::ZERO))
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// 印版數：數位印刷不需印版，其餘每面一組
    pub fn plates(&self, printing: PrintingSelection, sides: Sides) -> u32 {
        if printing.uses_plates() {
            sides.multiplier() * self.plates_per_side
        } else {
            0
        }
    }

    /// 印量 = 總張數 × 面數
    pub fn units(total_sheets: u64, sides: Sides) -> u64 {
        total_sheets.saturating_mul(u64::from(sides.multiplier()))
    }

    /// 以表單中已存的建議張數彙總成本
    pub fn aggregate(&self, product: &ProductSpec, finishing: &[FinishingCost]) -> CostBreakdown {
        let lines = product.papers.iter().map(|line| {
            let price = SheetDemandCalculator::price_per_sheet(
                line.stock.price_per_packet,
                line.stock.sheets_per_packet,
            );
            (line.stock.effective_sheets(), price)
        });

        self.combine(lines, product, finishing)
    }

    /// 以本次計算得到的紙張明細彙總成本
    pub fn aggregate_details(
        &self,
        details: &[PaperCostDetail],
        product: &ProductSpec,
        finishing: &[FinishingCost],
    ) -> CostBreakdown {
        let lines = details.iter().map(|d| (d.sheets_used, d.price_per_sheet));
        self.combine(lines, product, finishing)
    }

    fn combine<I>(&self, lines: I, product: &ProductSpec, finishing: &[FinishingCost]) -> CostBreakdown
    where
        I: IntoIterator<Item = (u32, Option<Decimal>)>,
    {
        let mut paper_cost = Decimal::ZERO;
        let mut total_sheets: u64 = 0;

        for (sheets_used, price_per_sheet) in lines {
            paper_cost = paper_cost.saturating_add(Self::paper_cost(sheets_used, price_per_sheet));
            total_sheets = total_sheets.saturating_add(u64::from(sheets_used));
        }

        CostBreakdown {
            paper_cost,
            finishing_cost: Self::finishing_cost(finishing, &product.finishing),
            plates: self.plates(product.printing_selection, product.sides),
            units: Self::units(total_sheets, product.sides),
        }
    }
}

impl Default for CostAggregator {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
