//! # Quote Core
//!
//! 報價引擎的核心資料模型與類型定義

pub mod config;
pub mod form;
pub mod paper;
pub mod product;
pub mod quote;
pub mod repository;

// Re-export 主要類型
pub use config::EngineConfig;
pub use form::{Calculation, ClientDetail, ClientType, OperationalState, OtherQuantityRow, QuoteForm};
pub use paper::{FinishingCost, OperationalPaper, Paper, PaperLine, StockField};
pub use product::{Dimension, PrintingSelection, ProductSpec, Sides, SizeDimensions};
pub use quote::{QuoteDetail, QuotedPaper};
pub use repository::{InMemoryRepository, QuoteRepository};

/// 報價錯誤類型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuoteError {
    #[error("找不到報價單: {0}")]
    QuoteNotFound(String),

    #[error("未知的後加工項目: {0}")]
    UnknownFinishing(String),

    #[error("紙張索引超出範圍: {index} (共 {len} 筆)")]
    PaperIndexOutOfRange { index: usize, len: usize },

    #[error("產品索引超出範圍: {index} (共 {len} 筆)")]
    ProductIndexOutOfRange { index: usize, len: usize },

    #[error("其他數量索引超出範圍: {index} (共 {len} 筆)")]
    OtherQuantityIndexOutOfRange { index: usize, len: usize },

    #[error("產品至少需要一種紙張")]
    LastPaper,

    #[error("報價單至少需要一個產品")]
    LastProduct,

    #[error("成品尺寸已與展開尺寸連動，無法單獨修改")]
    CloseSizeLinked,

    #[error("無效的引擎配置: {0}")]
    InvalidConfig(String),

    #[error("測試資料解析錯誤: {0}")]
    Fixture(String),
}

pub type Result<T> = std::result::Result<T, QuoteError>;
