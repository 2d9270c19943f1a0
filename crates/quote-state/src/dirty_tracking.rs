//! 衍生欄位的寫入追蹤

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// 可由調和器寫入的衍生欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DerivedField {
    /// 某產品某紙張的建議張數
    RecommendedSheets { product: usize, paper: usize },
    /// 印版數
    Plates,
    /// 印量
    Units,
    /// 定價結果
    Calculation,
}

/// 寫入追蹤器
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirtyTracker {
    dirty_fields: HashSet<DerivedField>,
}

impl DirtyTracker {
    /// 創建新的追蹤器
    pub fn new() -> Self {
        Self {
            dirty_fields: HashSet::new(),
        }
    }

    /// 標記欄位已寫入
    pub fn mark_dirty(&mut self, field: DerivedField) {
        self.dirty_fields.insert(field);
    }

    /// 檢查欄位是否已寫入
    pub fn is_dirty(&self, field: DerivedField) -> bool {
        self.dirty_fields.contains(&field)
    }

    /// 寫入筆數
    pub fn len(&self) -> usize {
        self.dirty_fields.len()
    }

    /// 是否沒有任何寫入
    pub fn is_empty(&self) -> bool {
        self.dirty_fields.is_empty()
    }

    /// 清除所有標記
    pub fn clear(&mut self) {
        self.dirty_fields.clear();
    }

    /// 獲取所有已寫入欄位（排序後）
    pub fn get_dirty_fields(&self) -> Vec<DerivedField> {
        let mut fields: Vec<DerivedField> = self.dirty_fields.iter().copied().collect();
        fields.sort();
        fields
    }
}
