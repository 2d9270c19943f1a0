//! 產品規格模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::paper::{FinishingCost, Paper, PaperLine};
use crate::{QuoteError, Result};

/// 印刷面數
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sides {
    /// 單面
    #[default]
    #[serde(rename = "1")]
    One,
    /// 雙面
    #[serde(rename = "2")]
    Two,
}

impl Sides {
    /// 面數倍率（單面 1，雙面 2）
    pub fn multiplier(self) -> u32 {
        match self {
            Sides::One => 1,
            Sides::Two => 2,
        }
    }
}

/// 印刷方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrintingSelection {
    /// 數位印刷
    #[default]
    Digital,
    /// 平版印刷
    Offset,
    /// 兩者皆可
    Either,
    /// 兩者並用
    Both,
}

impl PrintingSelection {
    /// 是否需要印版（非數位印刷皆需要）
    pub fn uses_plates(self) -> bool {
        self != PrintingSelection::Digital
    }
}

/// 尺寸維度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Width,
    Height,
    Spine,
}

/// 尺寸（cm），各維度皆可未輸入
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeDimensions {
    pub width: Option<Decimal>,
    pub height: Option<Decimal>,
    pub spine: Option<Decimal>,
}

impl SizeDimensions {
    /// 創建寬高尺寸（書背未輸入）
    pub fn new(width: Decimal, height: Decimal) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            spine: None,
        }
    }

    /// 讀取單一維度
    pub fn get(&self, dimension: Dimension) -> Option<Decimal> {
        match dimension {
            Dimension::Width => self.width,
            Dimension::Height => self.height,
            Dimension::Spine => self.spine,
        }
    }

    /// 設置單一維度
    pub fn set(&mut self, dimension: Dimension, value: Option<Decimal>) {
        match dimension {
            Dimension::Width => self.width = value,
            Dimension::Height => self.height = value,
            Dimension::Spine => self.spine = value,
        }
    }
}

/// 產品規格
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSpec {
    /// 產品名稱
    pub product_name: String,

    /// 數量（未輸入為 None）
    pub quantity: Option<u32>,

    /// 印刷面數
    pub sides: Sides,

    /// 印刷方式
    pub printing_selection: PrintingSelection,

    /// 展開尺寸
    pub flat_size: SizeDimensions,

    /// 成品尺寸
    pub close_size: SizeDimensions,

    /// 成品尺寸是否與展開尺寸連動
    pub use_same_as_flat: bool,

    /// 紙張明細（至少一筆）
    pub papers: Vec<PaperLine>,

    /// 已選後加工（依勾選順序顯示）
    pub finishing: Vec<String>,
}

impl ProductSpec {
    /// 創建新產品（含一筆空白紙張）
    pub fn new(product_name: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            quantity: None,
            sides: Sides::One,
            printing_selection: PrintingSelection::Digital,
            flat_size: SizeDimensions::default(),
            close_size: SizeDimensions::default(),
            use_same_as_flat: false,
            papers: vec![PaperLine::default()],
            finishing: Vec::new(),
        }
    }

    /// 精靈中「新增產品」使用的空白產品
    pub fn blank() -> Self {
        let size = SizeDimensions {
            width: Some(Decimal::from(9)),
            height: Some(Decimal::new(55, 1)),
            spine: Some(Decimal::ZERO),
        };

        Self {
            quantity: Some(100),
            flat_size: size.clone(),
            close_size: size,
            use_same_as_flat: true,
            ..Self::new("")
        }
    }

    /// 建構器模式：設置數量
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// 建構器模式：設置面數
    pub fn with_sides(mut self, sides: Sides) -> Self {
        self.sides = sides;
        self
    }

    /// 建構器模式：設置印刷方式
    pub fn with_printing(mut self, printing: PrintingSelection) -> Self {
        self.printing_selection = printing;
        self
    }

    /// 建構器模式：同時設置展開與成品尺寸
    pub fn with_size(mut self, size: SizeDimensions) -> Self {
        self.flat_size = size.clone();
        self.close_size = size;
        self
    }

    /// 建構器模式：設置紙張明細
    pub fn with_papers(mut self, papers: Vec<PaperLine>) -> Self {
        self.papers = papers;
        self
    }

    /// 建構器模式：設置已選後加工
    pub fn with_finishing(mut self, finishing: Vec<String>) -> Self {
        self.finishing = finishing;
        self
    }

    /// 修改展開尺寸的單一維度；連動時同步成品尺寸
    pub fn set_flat_dimension(&mut self, dimension: Dimension, value: Option<Decimal>) {
        self.flat_size.set(dimension, value);
        if self.use_same_as_flat {
            self.close_size = self.flat_size.clone();
        }
    }

    /// 修改成品尺寸的單一維度（連動中不允許）
    pub fn set_close_dimension(&mut self, dimension: Dimension, value: Option<Decimal>) -> Result<()> {
        if self.use_same_as_flat {
            return Err(QuoteError::CloseSizeLinked);
        }
        self.close_size.set(dimension, value);
        Ok(())
    }

    /// 切換「成品尺寸同展開尺寸」
    ///
    /// 開啟時立即複製展開尺寸；關閉後成品尺寸停留在最後一次同步的值。
    pub fn set_use_same_as_flat(&mut self, enabled: bool) {
        self.use_same_as_flat = enabled;
        if enabled {
            self.close_size = self.flat_size.clone();
        }
    }

    /// 排版用的成品寬高：成品尺寸優先，逐維度退回展開尺寸
    pub fn trim_size(&self) -> (Option<Decimal>, Option<Decimal>) {
        (
            self.close_size.width.or(self.flat_size.width),
            self.close_size.height.or(self.flat_size.height),
        )
    }

    /// 新增紙張，回傳其索引
    pub fn add_paper(&mut self, paper: Paper) -> usize {
        self.papers.push(PaperLine::new(paper));
        self.papers.len() - 1
    }

    /// 移除紙張（至少保留一筆）
    pub fn remove_paper(&mut self, index: usize) -> Result<PaperLine> {
        self.check_paper_index(index)?;
        if self.papers.len() <= 1 {
            return Err(QuoteError::LastPaper);
        }
        Ok(self.papers.remove(index))
    }

    /// 取得可修改的紙張明細
    pub fn paper_mut(&mut self, index: usize) -> Result<&mut PaperLine> {
        self.check_paper_index(index)?;
        Ok(&mut self.papers[index])
    }

    fn check_paper_index(&self, index: usize) -> Result<()> {
        if index >= self.papers.len() {
            return Err(QuoteError::PaperIndexOutOfRange {
                index,
                len: self.papers.len(),
            });
        }
        Ok(())
    }

    /// 勾選或取消後加工，回傳切換後是否為已選
    ///
    /// 只接受目錄中有成本項目的名稱。
    pub fn toggle_finishing(&mut self, name: &str, catalogue: &[FinishingCost]) -> Result<bool> {
        if !catalogue.iter().any(|f| f.name == name) {
            return Err(QuoteError::UnknownFinishing(name.to_string()));
        }

        if let Some(pos) = self.finishing.iter().position(|f| f == name) {
            self.finishing.remove(pos);
            Ok(false)
        } else {
            self.finishing.push(name.to_string());
            Ok(true)
        }
    }

    /// 檢查後加工是否已選
    pub fn is_finishing_selected(&self, name: &str) -> bool {
        self.finishing.iter().any(|f| f == name)
    }
}
