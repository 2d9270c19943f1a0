//! 已儲存報價單的快照模型

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::form::ClientDetail;
use crate::paper::{OperationalPaper, Paper};
use crate::product::{PrintingSelection, Sides, SizeDimensions};

/// 快照中的紙張（可附帶當時的作業參數）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotedPaper {
    #[serde(flatten)]
    pub paper: Paper,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<OperationalPaper>,
}

impl QuotedPaper {
    /// 創建不含作業參數的紙張
    pub fn new(paper: Paper) -> Self {
        Self { paper, stock: None }
    }

    /// 建構器模式：附帶作業參數
    pub fn with_stock(mut self, stock: OperationalPaper) -> Self {
        self.stock = Some(stock);
        self
    }
}

/// 報價單快照
///
/// 尺寸與連動設定為選填；未提供時沿用編輯中表單的值。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDetail {
    /// 報價單號
    pub id: String,

    /// 報價日期
    pub date: Option<NaiveDate>,

    /// 客戶資料
    pub client: ClientDetail,

    /// 產品名稱
    pub product: String,

    /// 數量
    pub quantity: Option<u32>,

    /// 印刷面數
    pub sides: Sides,

    /// 印刷方式
    pub printing: PrintingSelection,

    /// 紙張
    pub papers: Vec<QuotedPaper>,

    /// 已選後加工
    #[serde(default)]
    pub finishing: Vec<String>,

    #[serde(default)]
    pub flat_size: Option<SizeDimensions>,

    #[serde(default)]
    pub close_size: Option<SizeDimensions>,

    #[serde(default)]
    pub use_same_as_flat: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_snapshot_without_sizes() {
        let json = r#"{
            "id": "Q-2025-001",
            "date": "2025-06-25",
            "client": {
                "clientType": "Company",
                "companyName": "Gulf Trading LLC",
                "contactPerson": "Omar",
                "email": "omar@example.com",
                "phone": "501234567",
                "countryCode": "+971",
                "role": "Procurement"
            },
            "product": "Flyer A5",
            "quantity": 2500,
            "sides": "2",
            "printing": "Offset",
            "papers": [{"name": "Gloss", "gsm": "150"}],
            "finishing": ["Lamination"]
        }"#;

        let detail: QuoteDetail = serde_json::from_str(json).unwrap();

        assert_eq!(detail.id, "Q-2025-001");
        assert_eq!(detail.date, NaiveDate::from_ymd_opt(2025, 6, 25));
        assert_eq!(detail.sides, Sides::Two);
        assert_eq!(detail.printing, PrintingSelection::Offset);
        assert_eq!(detail.papers[0].paper, Paper::new("Gloss", "150"));
        assert!(detail.papers[0].stock.is_none());
        assert!(detail.flat_size.is_none());
        assert!(detail.use_same_as_flat.is_none());
    }
}
