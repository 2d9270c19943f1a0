//! 紙張與後加工模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 紙張規格（名稱與克重）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    /// 紙張名稱
    pub name: String,

    /// 克重（GSM）
    pub gsm: String,
}

impl Paper {
    /// 創建新的紙張規格
    pub fn new(name: impl Into<String>, gsm: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gsm: gsm.into(),
        }
    }
}

/// 紙張的作業參數（印刷紙尺寸、採購價格、張數）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationalPaper {
    /// 印刷紙寬度（cm）
    pub input_width: Option<Decimal>,

    /// 印刷紙高度（cm）
    pub input_height: Option<Decimal>,

    /// 每包價格
    pub price_per_packet: Option<Decimal>,

    /// 每包張數
    pub sheets_per_packet: Option<Decimal>,

    /// 建議張數（衍生值，只由狀態調和器寫入）
    #[serde(default)]
    pub recommended_sheets: u32,

    /// 使用者輸入張數
    pub entered_sheets: Option<u32>,
}

impl OperationalPaper {
    /// 創建空白作業參數
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置印刷紙尺寸
    pub fn with_sheet_size(mut self, width: Decimal, height: Decimal) -> Self {
        self.input_width = Some(width);
        self.input_height = Some(height);
        self
    }

    /// 建構器模式：設置採購包裝
    pub fn with_packet(mut self, price_per_packet: Decimal, sheets_per_packet: Decimal) -> Self {
        self.price_per_packet = Some(price_per_packet);
        self.sheets_per_packet = Some(sheets_per_packet);
        self
    }

    /// 建構器模式：設置輸入張數
    pub fn with_entered_sheets(mut self, sheets: u32) -> Self {
        self.entered_sheets = Some(sheets);
        self
    }

    /// 實際使用張數：輸入值優先，否則採用建議值
    pub fn effective_sheets(&self) -> u32 {
        self.entered_sheets.unwrap_or(self.recommended_sheets)
    }

    /// 讀取可編輯欄位
    pub fn field(&self, field: StockField) -> Option<Decimal> {
        match field {
            StockField::InputWidth => self.input_width,
            StockField::InputHeight => self.input_height,
            StockField::PricePerPacket => self.price_per_packet,
            StockField::SheetsPerPacket => self.sheets_per_packet,
        }
    }

    /// 設置可編輯欄位（None 代表清空輸入框）
    pub fn set_field(&mut self, field: StockField, value: Option<Decimal>) {
        match field {
            StockField::InputWidth => self.input_width = value,
            StockField::InputHeight => self.input_height = value,
            StockField::PricePerPacket => self.price_per_packet = value,
            StockField::SheetsPerPacket => self.sheets_per_packet = value,
        }
    }
}

/// 作業參數中可由使用者編輯的數值欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StockField {
    InputWidth,
    InputHeight,
    PricePerPacket,
    SheetsPerPacket,
}

/// 紙張明細：紙張規格與其作業參數合為一筆
///
/// 新增或移除紙張時作業參數跟著一起增減，不會有兩個陣列對不齊的情況。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperLine {
    /// 紙張規格
    pub paper: Paper,

    /// 作業參數
    pub stock: OperationalPaper,
}

impl PaperLine {
    /// 創建新的紙張明細（作業參數為空）
    pub fn new(paper: Paper) -> Self {
        Self {
            paper,
            stock: OperationalPaper::new(),
        }
    }

    /// 建構器模式：設置作業參數
    pub fn with_stock(mut self, stock: OperationalPaper) -> Self {
        self.stock = stock;
        self
    }
}

/// 後加工成本
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishingCost {
    /// 後加工名稱
    pub name: String,

    /// 成本（未輸入為 None）
    pub cost: Option<Decimal>,
}

impl FinishingCost {
    /// 創建未定價的後加工項目
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cost: None,
        }
    }

    /// 建構器模式：設置成本
    pub fn with_cost(mut self, cost: Decimal) -> Self {
        self.cost = Some(cost);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_sheets_prefers_entered() {
        let mut stock = OperationalPaper::new();
        stock.recommended_sheets = 13;
        assert_eq!(stock.effective_sheets(), 13);

        let stock = stock.with_entered_sheets(130);
        assert_eq!(stock.effective_sheets(), 130);
    }

    #[test]
    fn test_entered_zero_is_not_unset() {
        let mut stock = OperationalPaper::new().with_entered_sheets(0);
        stock.recommended_sheets = 13;

        // 使用者輸入 0 與未輸入不同
        assert_eq!(stock.effective_sheets(), 0);
    }

    #[test]
    fn test_set_and_clear_field() {
        let mut stock = OperationalPaper::new().with_sheet_size(Decimal::from(65), Decimal::from(90));

        stock.set_field(StockField::InputWidth, None);
        assert_eq!(stock.field(StockField::InputWidth), None);
        assert_eq!(stock.field(StockField::InputHeight), Some(Decimal::from(90)));

        stock.set_field(StockField::PricePerPacket, Some(Decimal::from(240)));
        assert_eq!(stock.price_per_packet, Some(Decimal::from(240)));
    }

    #[test]
    fn test_unset_serializes_as_null() {
        let stock = OperationalPaper::new();
        let json = serde_json::to_value(&stock).unwrap();

        assert!(json["inputWidth"].is_null());
        assert!(json["enteredSheets"].is_null());
        assert_eq!(json["recommendedSheets"], 0);
    }
}
