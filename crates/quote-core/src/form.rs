//! 報價表單模型（精靈的頂層狀態）

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::paper::FinishingCost;
use crate::product::ProductSpec;
use crate::{QuoteError, Result};

/// 客戶類型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientType {
    /// 公司
    #[default]
    Company,
    /// 個人
    Individual,
}

/// 客戶資料
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDetail {
    pub client_type: ClientType,
    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub country_code: String,
    pub role: String,
}

impl ClientDetail {
    /// 空白客戶（新報價使用）
    pub fn empty() -> Self {
        Self {
            client_type: ClientType::Company,
            company_name: String::new(),
            contact_person: String::new(),
            email: String::new(),
            phone: String::new(),
            country_code: "+971".to_string(),
            role: String::new(),
        }
    }

    /// 切換客戶類型；個人客戶不保留公司名稱與職稱
    pub fn set_client_type(&mut self, client_type: ClientType) {
        self.client_type = client_type;
        if client_type == ClientType::Individual {
            self.company_name.clear();
            self.role.clear();
        }
    }
}

impl Default for ClientDetail {
    fn default() -> Self {
        Self::empty()
    }
}

/// 作業面資料：後加工成本目錄與印版/印量
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationalState {
    /// 後加工成本（每個已知後加工一筆）
    pub finishing: Vec<FinishingCost>,

    /// 印版數（衍生值）
    pub plates: u32,

    /// 印量（衍生值）
    pub units: u64,
}

impl OperationalState {
    /// 依後加工名稱建立未定價的目錄
    pub fn with_catalogue<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            finishing: names.into_iter().map(FinishingCost::new).collect(),
            plates: 0,
            units: 0,
        }
    }

    /// 查詢後加工成本項目
    pub fn finishing_cost(&self, name: &str) -> Option<&FinishingCost> {
        self.finishing.iter().find(|f| f.name == name)
    }

    /// 設置後加工成本
    pub fn set_finishing_cost(&mut self, name: &str, cost: Option<Decimal>) -> Result<()> {
        let entry = self
            .finishing
            .iter_mut()
            .find(|f| f.name == name)
            .ok_or_else(|| QuoteError::UnknownFinishing(name.to_string()))?;
        entry.cost = cost;
        Ok(())
    }
}

/// 報價計算結果（完全衍生，不可手動修改）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calculation {
    pub base_price: Decimal,
    pub margin_amount: Decimal,
    pub subtotal: Decimal,
    pub vat_amount: Decimal,
    pub total_price: Decimal,
}

/// 其他數量試算列（不回饋到主計算）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherQuantityRow {
    pub product_name: String,
    pub quantity: Option<u32>,
    pub price: Option<Decimal>,
}

impl OtherQuantityRow {
    /// 創建試算列
    pub fn new(product_name: impl Into<String>, quantity: u32, price: Decimal) -> Self {
        Self {
            product_name: product_name.into(),
            quantity: Some(quantity),
            price: Some(price),
        }
    }
}

/// 報價表單
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteForm {
    /// 客戶資料
    pub client: ClientDetail,

    /// 產品規格（第一筆為主產品）
    pub products: Vec<ProductSpec>,

    /// 作業面資料
    pub operational: OperationalState,

    /// 計算結果
    pub calculation: Calculation,
}

impl QuoteForm {
    /// 創建表單
    pub fn new(client: ClientDetail, products: Vec<ProductSpec>, operational: OperationalState) -> Self {
        Self {
            client,
            products,
            operational,
            calculation: Calculation::default(),
        }
    }

    /// 主產品
    pub fn primary_product(&self) -> Option<&ProductSpec> {
        self.products.first()
    }

    /// 取得可修改的產品
    pub fn product_mut(&mut self, index: usize) -> Result<&mut ProductSpec> {
        let len = self.products.len();
        self.products
            .get_mut(index)
            .ok_or(QuoteError::ProductIndexOutOfRange { index, len })
    }
}
