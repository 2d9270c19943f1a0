//! 報價引擎配置

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{QuoteError, Result};

/// 印刷紙邊界（每邊，cm）
pub const SHEET_MARGIN_CM: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// 出血（每邊，cm）
pub const BLEED_CM: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// 利潤率 30%
pub const MARGIN_RATE: Decimal = Decimal::from_parts(30, 0, 0, false, 2);

/// 增值稅 5%
pub const VAT_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// 報價摘要的單件基價
pub const SUMMARY_UNIT_RATE: Decimal = Decimal::from_parts(195, 0, 0, false, 3);

/// 每一印刷面的印版數（CMYK）
pub const PLATES_PER_SIDE: u32 = 4;

/// 引擎計算參數
///
/// 預設值即引擎常數，介面層不提供修改入口；
/// 測試或其他印廠設定可透過建構器方法覆寫。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// 印刷紙每邊保留的邊界（cm）
    pub sheet_margin_cm: Decimal,

    /// 成品每邊的出血（cm）
    pub bleed_cm: Decimal,

    /// 利潤率（以成本為基礎）
    pub margin_rate: Decimal,

    /// 增值稅率（以小計為基礎）
    pub vat_rate: Decimal,

    /// 報價摘要使用的單件基價
    pub summary_unit_rate: Decimal,

    /// 每面印版數
    pub plates_per_side: u32,
}

impl EngineConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self {
            sheet_margin_cm: SHEET_MARGIN_CM,
            bleed_cm: BLEED_CM,
            margin_rate: MARGIN_RATE,
            vat_rate: VAT_RATE,
            summary_unit_rate: SUMMARY_UNIT_RATE,
            plates_per_side: PLATES_PER_SIDE,
        }
    }

    /// 建構器模式：設置紙張邊界
    pub fn with_sheet_margin(mut self, margin_cm: Decimal) -> Self {
        self.sheet_margin_cm = margin_cm;
        self
    }

    /// 建構器模式：設置出血
    pub fn with_bleed(mut self, bleed_cm: Decimal) -> Self {
        self.bleed_cm = bleed_cm;
        self
    }

    /// 建構器模式：設置利潤率
    pub fn with_margin_rate(mut self, rate: Decimal) -> Self {
        self.margin_rate = rate;
        self
    }

    /// 建構器模式：設置增值稅率
    pub fn with_vat_rate(mut self, rate: Decimal) -> Self {
        self.vat_rate = rate;
        self
    }

    /// 建構器模式：設置摘要單件基價
    pub fn with_summary_unit_rate(mut self, rate: Decimal) -> Self {
        self.summary_unit_rate = rate;
        self
    }

    /// 建構器模式：設置每面印版數
    pub fn with_plates_per_side(mut self, plates: u32) -> Self {
        self.plates_per_side = plates;
        self
    }

    /// 檢查配置是否合理（不允許負值）
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("sheet_margin_cm", self.sheet_margin_cm),
            ("bleed_cm", self.bleed_cm),
            ("margin_rate", self.margin_rate),
            ("vat_rate", self.vat_rate),
            ("summary_unit_rate", self.summary_unit_rate),
        ];

        for (name, value) in fields {
            if value < Decimal::ZERO {
                return Err(QuoteError::InvalidConfig(format!("{} 不可為負數: {}", name, value)));
            }
        }

        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
