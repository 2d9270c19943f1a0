//! 定價流程
//!
//! 兩條互相獨立的計價路徑：
//! - 明細成本：基礎成本 → 利潤 → 小計 → 增值稅 → 總價
//! - 報價摘要：數量 × 單件基價 → 增值稅 → 總價
//!
//! 兩者的總價不需一致。

use quote_core::{Calculation, EngineConfig, OtherQuantityRow};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 報價摘要的一列
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryLine {
    /// 未稅基價
    pub base: Decimal,
    /// 增值稅
    pub vat: Decimal,
    /// 含稅總價
    pub total: Decimal,
}

/// 定價流程
#[derive(Debug, Clone, Copy)]
pub struct PricingPipeline {
    margin_rate: Decimal,
    vat_rate: Decimal,
    summary_unit_rate: Decimal,
}

impl PricingPipeline {
    /// 依引擎配置創建
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            margin_rate: config.margin_rate,
            vat_rate: config.vat_rate,
            summary_unit_rate: config.summary_unit_rate,
        }
    }

    /// 明細成本定價（超出數值範圍的步驟取上限）
    pub fn price(&self, base_price: Decimal) -> Calculation {
        let margin_amount = base_price.saturating_mul(self.margin_rate);
        let subtotal = base_price.saturating_add(margin_amount);
        let vat_amount = subtotal.saturating_mul(self.vat_rate);
        let total_price = subtotal.saturating_add(vat_amount);

        Calculation {
            base_price,
            margin_amount,
            subtotal,
            vat_amount,
            total_price,
        }
    }

    /// 報價摘要：數量 × 單件基價，不經過成本彙總
    pub fn summary(&self, quantity: Option<u32>) -> SummaryLine {
        let base = Decimal::from(quantity.unwrap_or(0)).saturating_mul(self.summary_unit_rate);
        self.with_vat(base)
    }

    /// 其他數量試算列：有輸入價格時以其為基價，否則按數量計
    pub fn other_quantity(&self, row: &OtherQuantityRow) -> SummaryLine {
        match row.price {
            Some(price) => self.with_vat(price),
            None => self.summary(row.quantity),
        }
    }

    fn with_vat(&self, base: Decimal) -> SummaryLine {
        let vat = base.saturating_mul(self.vat_rate);
        SummaryLine {
            base,
            vat,
            total: base.saturating_add(vat),
        }
    }
}

impl Default for PricingPipeline {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
