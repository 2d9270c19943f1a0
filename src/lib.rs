//! # Print Quote
//!
//! 印刷報價引擎：由產品規格、紙張與後加工推導拼版、用紙、成本與報價。
//!
//! - [`quote_core`]：資料模型、配置與錯誤
//! - [`quote_calc`]：單次計算（拼版 → 用紙 → 成本 → 定價）
//! - [`quote_state`]：衍生欄位調和、歷史報價匯入、編輯會話

pub use quote_calc;
pub use quote_core;
pub use quote_state;

pub use rust_decimal::Decimal;

pub use quote_calc::{
    aggregate_costs, compute_layout, compute_pricing, price_per_sheet, recommend_sheets,
    CostBreakdown, LayoutResult, QuoteCalculator, QuoteResult, QuoteWarning, SummaryLine,
    WarningSeverity,
};
pub use quote_core::{
    Calculation, ClientDetail, ClientType, Dimension, EngineConfig, FinishingCost, InMemoryRepository,
    OperationalPaper, OperationalState, OtherQuantityRow, Paper, PaperLine, PrintingSelection,
    ProductSpec, QuoteDetail, QuoteError, QuoteForm, QuoteRepository, QuotedPaper, Result, Sides,
    SizeDimensions, StockField,
};
pub use quote_state::{
    import_quote_detail, reconcile, DerivedField, DirtyTracker, ProductEdit, QuoteMode,
    QuoteSession, Reconciliation, StateReconciler,
};
