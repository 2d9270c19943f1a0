//! # Quote State
//!
//! 報價表單的狀態管理：衍生欄位調和、歷史報價匯入、編輯會話

pub mod dirty_tracking;
pub mod importer;
pub mod reconciler;
pub mod session;

use quote_core::QuoteForm;

// Re-export 主要類型
pub use dirty_tracking::{DerivedField, DirtyTracker};
pub use importer::{import_quote_detail, QuoteDetailImporter};
pub use reconciler::{Reconciliation, StateReconciler};
pub use session::{ProductEdit, QuoteMode, QuoteSession};

/// 以預設配置調和表單
pub fn reconcile(form: &QuoteForm) -> QuoteForm {
    StateReconciler::default().reconcile(form).into_form()
}
