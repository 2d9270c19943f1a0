//! 報價編輯會話
//!
//! 會話擁有一份表單，所有修改都先作用在副本上，成功後再經過調和器寫回。
//! 失敗的修改不會留下任何痕跡；成功的修改之後，表單永遠處於不動點。

use chrono::NaiveDate;
use quote_calc::{QuoteResult, SummaryLine};
use quote_core::{
    ClientDetail, ClientType, Dimension, EngineConfig, FinishingCost, OtherQuantityRow, Paper,
    PrintingSelection, ProductSpec, QuoteError, QuoteForm, QuoteRepository, Result, Sides,
    StockField,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dirty_tracking::DirtyTracker;
use crate::importer::QuoteDetailImporter;
use crate::reconciler::StateReconciler;

/// 新增試算列的預設數量
const OTHER_QUANTITY_DEFAULT_QTY: u32 = 250;

/// 新增試算列的預設價格
const OTHER_QUANTITY_DEFAULT_PRICE: i64 = 60;

/// 對單一產品的編輯
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductEdit {
    SetProductName(String),
    SetQuantity(Option<u32>),
    SetSides(Sides),
    SetPrinting(PrintingSelection),
    SetFlatDimension {
        dimension: Dimension,
        value: Option<Decimal>,
    },
    SetCloseDimension {
        dimension: Dimension,
        value: Option<Decimal>,
    },
    SetUseSameAsFlat(bool),
    AddPaper(Paper),
    UpdatePaper {
        paper: usize,
        spec: Paper,
    },
    RemovePaper(usize),
    SetStockField {
        paper: usize,
        field: StockField,
        value: Option<Decimal>,
    },
    /// 手動輸入使用張數（None 表示改回採用建議值）
    SetEnteredSheets {
        paper: usize,
        sheets: Option<u32>,
    },
    /// 將目前的建議張數填入使用張數
    AcceptRecommendation {
        paper: usize,
    },
    ToggleFinishing(String),
}

/// 報價來源
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteMode {
    /// 新報價
    New,
    /// 由歷史報價載入
    Existing(String),
}

/// 報價編輯會話
#[derive(Debug, Clone)]
pub struct QuoteSession {
    id: Uuid,
    mode: QuoteMode,
    quote_date: Option<NaiveDate>,
    form: QuoteForm,
    other_quantities: Vec<OtherQuantityRow>,
    reconciler: StateReconciler,
    revision: u64,
}

impl QuoteSession {
    /// 以資料來源的預設值開啟新會話
    pub fn new(repository: &impl QuoteRepository) -> Self {
        Self::with_reconciler(repository, StateReconciler::default())
    }

    /// 以指定引擎配置開啟新會話
    pub fn with_config(repository: &impl QuoteRepository, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_reconciler(repository, StateReconciler::from_config(config)))
    }

    fn with_reconciler(repository: &impl QuoteRepository, reconciler: StateReconciler) -> Self {
        let form = reconciler.reconcile(&repository.default_form()).into_form();
        let id = Uuid::new_v4();
        tracing::info!("開啟報價會話 {}", id);

        let mut session = Self {
            id,
            mode: QuoteMode::New,
            quote_date: None,
            form,
            other_quantities: repository.default_other_quantities(),
            reconciler,
            revision: 0,
        };
        session.sync_other_quantity_names();
        session
    }

    /// 會話識別碼
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn mode(&self) -> &QuoteMode {
        &self.mode
    }

    /// 載入報價的日期（新報價為 None）
    pub fn quote_date(&self) -> Option<NaiveDate> {
        self.quote_date
    }

    /// 目前的表單（永遠已調和）
    pub fn form(&self) -> &QuoteForm {
        &self.form
    }

    pub fn other_quantities(&self) -> &[OtherQuantityRow] {
        &self.other_quantities
    }

    /// 已提交的修改次數
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// 開始新報價：清空客戶資料，保留產品與作業面資料
    pub fn start_new_quote(&mut self) -> DirtyTracker {
        let mut candidate = self.form.clone();
        candidate.client = ClientDetail::empty();
        self.mode = QuoteMode::New;
        self.quote_date = None;
        self.commit(candidate)
    }

    /// 載入歷史報價並重新計算
    pub fn load_quote(&mut self, repository: &impl QuoteRepository, id: &str) -> Result<DirtyTracker> {
        let detail = repository.require_quote_detail(id)?;
        let candidate = QuoteDetailImporter::import(&detail, &self.form);

        self.mode = QuoteMode::Existing(detail.id.clone());
        self.quote_date = detail.date;
        Ok(self.commit(candidate))
    }

    /// 編輯主產品
    pub fn apply(&mut self, edit: ProductEdit) -> Result<DirtyTracker> {
        self.apply_to(0, edit)
    }

    /// 編輯指定產品
    pub fn apply_to(&mut self, product_index: usize, edit: ProductEdit) -> Result<DirtyTracker> {
        let mut candidate = self.form.clone();
        let catalogue = candidate.operational.finishing.clone();
        let product = candidate.product_mut(product_index)?;
        apply_edit(product, edit, &catalogue)?;
        Ok(self.commit(candidate))
    }

    /// 設置後加工成本
    pub fn set_finishing_cost(&mut self, name: &str, cost: Option<Decimal>) -> Result<DirtyTracker> {
        let mut candidate = self.form.clone();
        candidate.operational.set_finishing_cost(name, cost)?;
        Ok(self.commit(candidate))
    }

    /// 取代客戶資料
    pub fn set_client(&mut self, client: ClientDetail) -> DirtyTracker {
        let mut candidate = self.form.clone();
        candidate.client = client;
        self.commit(candidate)
    }

    /// 切換客戶類型
    pub fn set_client_type(&mut self, client_type: ClientType) -> DirtyTracker {
        let mut candidate = self.form.clone();
        candidate.client.set_client_type(client_type);
        self.commit(candidate)
    }

    /// 新增空白產品，回傳其索引
    pub fn add_product(&mut self) -> usize {
        let mut candidate = self.form.clone();
        candidate.products.push(ProductSpec::blank());
        let index = candidate.products.len() - 1;
        self.commit(candidate);
        index
    }

    /// 移除產品（至少保留一筆）
    pub fn remove_product(&mut self, index: usize) -> Result<ProductSpec> {
        let len = self.form.products.len();
        if index >= len {
            return Err(QuoteError::ProductIndexOutOfRange { index, len });
        }
        if len <= 1 {
            return Err(QuoteError::LastProduct);
        }

        let mut candidate = self.form.clone();
        let removed = candidate.products.remove(index);
        self.commit(candidate);
        Ok(removed)
    }

    /// 新增試算列，回傳其索引
    pub fn add_other_quantity(&mut self) -> usize {
        let name = self
            .form
            .primary_product()
            .map(|p| p.product_name.clone())
            .unwrap_or_default();

        self.other_quantities.push(OtherQuantityRow::new(
            name,
            OTHER_QUANTITY_DEFAULT_QTY,
            Decimal::from(OTHER_QUANTITY_DEFAULT_PRICE),
        ));
        self.other_quantities.len() - 1
    }

    /// 取代試算列
    pub fn update_other_quantity(&mut self, index: usize, row: OtherQuantityRow) -> Result<()> {
        let len = self.other_quantities.len();
        let slot = self
            .other_quantities
            .get_mut(index)
            .ok_or(QuoteError::OtherQuantityIndexOutOfRange { index, len })?;
        *slot = row;
        Ok(())
    }

    /// 移除試算列
    pub fn remove_other_quantity(&mut self, index: usize) -> Result<OtherQuantityRow> {
        let len = self.other_quantities.len();
        if index >= len {
            return Err(QuoteError::OtherQuantityIndexOutOfRange { index, len });
        }
        Ok(self.other_quantities.remove(index))
    }

    /// 報價摘要（數量 × 單件基價，與明細總價無關）
    pub fn price_summary(&self) -> SummaryLine {
        let quantity = self.form.primary_product().and_then(|p| p.quantity);
        self.reconciler.calculator().pricing().summary(quantity)
    }

    /// 各試算列的價格
    pub fn other_quantity_prices(&self) -> Vec<SummaryLine> {
        let pricing = self.reconciler.calculator().pricing();
        self.other_quantities
            .iter()
            .map(|row| pricing.other_quantity(row))
            .collect()
    }

    /// 主產品的成本明細與警告
    pub fn cost_details(&self) -> QuoteResult {
        match self.form.primary_product() {
            Some(product) => self
                .reconciler
                .calculator()
                .calculate(product, &self.form.operational.finishing),
            None => QuoteResult::empty(),
        }
    }

    fn commit(&mut self, candidate: QuoteForm) -> DirtyTracker {
        let outcome = self.reconciler.reconcile(&candidate);
        self.form = outcome.form;
        self.revision += 1;
        self.sync_other_quantity_names();

        tracing::debug!(
            "會話 {} 第 {} 次修改，衍生欄位寫入 {} 筆",
            self.id,
            self.revision,
            outcome.dirty.len()
        );
        outcome.dirty
    }

    fn sync_other_quantity_names(&mut self) {
        let Some(primary) = self.form.primary_product() else {
            return;
        };
        if let Some(first) = self.other_quantities.first_mut() {
            if first.product_name != primary.product_name {
                first.product_name = primary.product_name.clone();
            }
        }
    }
}

fn apply_edit(product: &mut ProductSpec, edit: ProductEdit, catalogue: &[FinishingCost]) -> Result<()> {
    match edit {
        ProductEdit::SetProductName(name) => product.product_name = name,
        ProductEdit::SetQuantity(quantity) => product.quantity = quantity,
        ProductEdit::SetSides(sides) => product.sides = sides,
        ProductEdit::SetPrinting(printing) => product.printing_selection = printing,
        ProductEdit::SetFlatDimension { dimension, value } => product.set_flat_dimension(dimension, value),
        ProductEdit::SetCloseDimension { dimension, value } => product.set_close_dimension(dimension, value)?,
        ProductEdit::SetUseSameAsFlat(enabled) => product.set_use_same_as_flat(enabled),
        ProductEdit::AddPaper(paper) => {
            product.add_paper(paper);
        }
        ProductEdit::UpdatePaper { paper, spec } => product.paper_mut(paper)?.paper = spec,
        ProductEdit::RemovePaper(paper) => {
            product.remove_paper(paper)?;
        }
        ProductEdit::SetStockField { paper, field, value } => {
            product.paper_mut(paper)?.stock.set_field(field, value);
        }
        ProductEdit::SetEnteredSheets { paper, sheets } => {
            product.paper_mut(paper)?.stock.entered_sheets = sheets;
        }
        ProductEdit::AcceptRecommendation { paper } => {
            let stock = &mut product.paper_mut(paper)?.stock;
            stock.entered_sheets = Some(stock.recommended_sheets);
        }
        ProductEdit::ToggleFinishing(name) => {
            product.toggle_finishing(&name, catalogue)?;
        }
    }
    Ok(())
}
