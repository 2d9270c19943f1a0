//! 預設資料與歷史報價的存取介面

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::form::{ClientDetail, ClientType, OperationalState, OtherQuantityRow, QuoteForm};
use crate::paper::{OperationalPaper, Paper, PaperLine};
use crate::product::{PrintingSelection, ProductSpec, Sides, SizeDimensions};
use crate::quote::{QuoteDetail, QuotedPaper};
use crate::{QuoteError, Result};

/// 已知的後加工項目（依介面顯示順序）
pub const FINISHING_OPTIONS: [&str; 5] = [
    "UV Spot",
    "Foil Stamping",
    "Embossing",
    "Lamination",
    "Die Cutting",
];

/// 報價資料來源
///
/// 引擎只透過這個介面取得預設表單與歷史報價，測試可注入任意資料。
pub trait QuoteRepository {
    /// 新報價的預設表單
    fn default_form(&self) -> QuoteForm;

    /// 預設的其他數量試算列
    fn default_other_quantities(&self) -> Vec<OtherQuantityRow>;

    /// 依單號查詢報價快照
    fn quote_detail(&self, id: &str) -> Option<QuoteDetail>;

    /// 依單號查詢，找不到時回傳錯誤
    fn require_quote_detail(&self, id: &str) -> Result<QuoteDetail> {
        self.quote_detail(id)
            .ok_or_else(|| QuoteError::QuoteNotFound(id.to_string()))
    }
}

/// 記憶體內的資料來源
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    default_form: QuoteForm,
    other_quantities: Vec<OtherQuantityRow>,
    quotes: HashMap<String, QuoteDetail>,
}

/// JSON 測試資料格式
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FixtureFile {
    default_form: QuoteForm,
    #[serde(default)]
    other_quantities: Vec<OtherQuantityRow>,
    #[serde(default)]
    quotes: Vec<QuoteDetail>,
}

impl InMemoryRepository {
    /// 創建資料來源
    pub fn new(default_form: QuoteForm) -> Self {
        Self {
            default_form,
            other_quantities: Vec::new(),
            quotes: HashMap::new(),
        }
    }

    /// 建構器模式：加入歷史報價
    pub fn with_quote(mut self, detail: QuoteDetail) -> Self {
        self.quotes.insert(detail.id.clone(), detail);
        self
    }

    /// 建構器模式：設置其他數量試算列
    pub fn with_other_quantities(mut self, rows: Vec<OtherQuantityRow>) -> Self {
        self.other_quantities = rows;
        self
    }

    /// 從 JSON 測試資料載入
    pub fn from_json(json: &str) -> Result<Self> {
        let fixture: FixtureFile =
            serde_json::from_str(json).map_err(|e| QuoteError::Fixture(e.to_string()))?;

        let repo = fixture
            .quotes
            .into_iter()
            .fold(Self::new(fixture.default_form), Self::with_quote)
            .with_other_quantities(fixture.other_quantities);

        Ok(repo)
    }

    /// 內建預設資料（名片報價與兩筆歷史報價）
    pub fn seeded() -> Self {
        Self::new(seed_form())
            .with_other_quantities(vec![OtherQuantityRow::new(
                "Business Card",
                500,
                Decimal::from(115),
            )])
            .with_quote(seed_flyer_quote())
            .with_quote(seed_card_quote())
    }

    /// 歷史報價數量
    pub fn quote_count(&self) -> usize {
        self.quotes.len()
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::seeded()
    }
}

impl QuoteRepository for InMemoryRepository {
    fn default_form(&self) -> QuoteForm {
        self.default_form.clone()
    }

    fn default_other_quantities(&self) -> Vec<OtherQuantityRow> {
        self.other_quantities.clone()
    }

    fn quote_detail(&self, id: &str) -> Option<QuoteDetail> {
        self.quotes.get(id).cloned()
    }
}

fn seed_form() -> QuoteForm {
    let stock = OperationalPaper::new()
        .with_sheet_size(Decimal::from(65), Decimal::from(90))
        .with_packet(Decimal::from(240), Decimal::from(500))
        .with_entered_sheets(130);

    let product = ProductSpec::new("Business Card")
        .with_quantity(1000)
        .with_sides(Sides::One)
        .with_printing(PrintingSelection::Digital)
        .with_size(SizeDimensions::new(Decimal::from(9), Decimal::new(55, 1)))
        .with_papers(vec![PaperLine::new(Paper::new("Art Paper", "300")).with_stock(stock)])
        .with_finishing(vec!["UV Spot".to_string(), "Lamination".to_string()]);

    let mut operational = OperationalState::with_catalogue(FINISHING_OPTIONS);
    for (name, cost) in [("UV Spot", 20), ("Lamination", 15)] {
        if let Some(entry) = operational.finishing.iter_mut().find(|f| f.name == name) {
            entry.cost = Some(Decimal::from(cost));
        }
    }

    QuoteForm::new(ClientDetail::empty(), vec![product], operational)
}

fn seed_flyer_quote() -> QuoteDetail {
    QuoteDetail {
        id: "Q-2025-001".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 6, 25),
        client: ClientDetail {
            client_type: ClientType::Company,
            company_name: "Gulf Trading LLC".to_string(),
            contact_person: "Omar Haddad".to_string(),
            email: "omar@gulftrading.example".to_string(),
            phone: "501234567".to_string(),
            country_code: "+971".to_string(),
            role: "Procurement".to_string(),
        },
        product: "Flyer A5".to_string(),
        quantity: Some(2500),
        sides: Sides::Two,
        printing: PrintingSelection::Offset,
        papers: vec![QuotedPaper::new(Paper::new("Gloss", "150")).with_stock(
            OperationalPaper::new()
                .with_sheet_size(Decimal::from(70), Decimal::from(100))
                .with_packet(Decimal::from(180), Decimal::from(250)),
        )],
        finishing: vec!["Lamination".to_string()],
        flat_size: Some(SizeDimensions::new(Decimal::new(148, 1), Decimal::from(21))),
        close_size: None,
        use_same_as_flat: Some(true),
    }
}

fn seed_card_quote() -> QuoteDetail {
    QuoteDetail {
        id: "Q-2025-002".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 7, 2),
        client: ClientDetail {
            client_type: ClientType::Individual,
            company_name: String::new(),
            contact_person: "Lina Farouk".to_string(),
            email: "lina@example.com".to_string(),
            phone: "552223344".to_string(),
            country_code: "+971".to_string(),
            role: String::new(),
        },
        product: "Business Card".to_string(),
        quantity: Some(500),
        sides: Sides::Two,
        printing: PrintingSelection::Digital,
        papers: vec![QuotedPaper::new(Paper::new("Art Paper", "350"))],
        finishing: vec!["UV Spot".to_string(), "Foil Stamping".to_string()],
        flat_size: None,
        close_size: None,
        use_same_as_flat: None,
    }
}
