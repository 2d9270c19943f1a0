//! 狀態調和器
//!
//! 重新計算所有衍生欄位，只在值確實改變時寫回。
//! 對自己的輸出再執行一次不會產生任何寫入，因此一次調和即達到不動點。

use quote_calc::{QuoteCalculator, QuoteResult};
use quote_core::{Calculation, EngineConfig, QuoteForm};

use crate::dirty_tracking::{DerivedField, DirtyTracker};

/// 一次調和的結果
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// 調和後的表單
    pub form: QuoteForm,

    /// 本次寫入的欄位
    pub dirty: DirtyTracker,
}

impl Reconciliation {
    /// 是否已是不動點（沒有任何寫入）
    pub fn is_fixed_point(&self) -> bool {
        self.dirty.is_empty()
    }

    /// 取出調和後的表單
    pub fn into_form(self) -> QuoteForm {
        self.form
    }
}

/// 狀態調和器
#[derive(Debug, Clone, Default)]
pub struct StateReconciler {
    calculator: QuoteCalculator,
}

impl StateReconciler {
    /// 創建新的調和器
    pub fn new(calculator: QuoteCalculator) -> Self {
        Self { calculator }
    }

    /// 依引擎配置創建
    pub fn from_config(config: EngineConfig) -> Self {
        Self::new(QuoteCalculator::new(config))
    }

    /// 調和表單（純函數，不修改輸入）
    pub fn reconcile(&self, form: &QuoteForm) -> Reconciliation {
        let mut next = form.clone();
        let mut dirty = DirtyTracker::new();
        let mut primary: Option<QuoteResult> = None;

        for (product_index, product) in form.products.iter().enumerate() {
            let details = if product_index == 0 {
                let result = self.calculator.calculate(product, &form.operational.finishing);
                let details = result.papers.clone();
                primary = Some(result);
                details
            } else {
                product
                    .papers
                    .iter()
                    .enumerate()
                    .map(|(index, line)| self.calculator.evaluate_paper(product, index, line))
                    .collect()
            };

            for detail in details {
                let stock = &mut next.products[product_index].papers[detail.index].stock;
                if stock.recommended_sheets != detail.recommended_sheets {
                    stock.recommended_sheets = detail.recommended_sheets;
                    dirty.mark_dirty(DerivedField::RecommendedSheets {
                        product: product_index,
                        paper: detail.index,
                    });
                }
            }
        }

        let (plates, units, calculation) = primary
            .map(|r| (r.costs.plates, r.costs.units, r.calculation))
            .unwrap_or((0, 0, Calculation::default()));

        if next.operational.plates != plates {
            next.operational.plates = plates;
            dirty.mark_dirty(DerivedField::Plates);
        }
        if next.operational.units != units {
            next.operational.units = units;
            dirty.mark_dirty(DerivedField::Units);
        }
        if next.calculation != calculation {
            next.calculation = calculation;
            dirty.mark_dirty(DerivedField::Calculation);
        }

        if dirty.is_empty() {
            tracing::trace!("調和完成：無需寫入");
        } else {
            tracing::debug!("調和完成：寫入 {:?}", dirty.get_dirty_fields());
        }

        Reconciliation { form: next, dirty }
    }

    /// 取得報價計算器
    pub fn calculator(&self) -> &QuoteCalculator {
        &self.calculator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_core::{InMemoryRepository, Paper, PrintingSelection, ProductSpec, QuoteRepository, Sides};
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn seeded_form() -> QuoteForm {
        InMemoryRepository::seeded().default_form()
    }

    #[test]
    fn test_reconcile_seeded_form() {
        let outcome = StateReconciler::default().reconcile(&seeded_form());

        assert!(!outcome.is_fixed_point());
        assert!(outcome.dirty.is_dirty(DerivedField::RecommendedSheets { product: 0, paper: 0 }));
        assert!(outcome.dirty.is_dirty(DerivedField::Units));
        assert!(outcome.dirty.is_dirty(DerivedField::Calculation));
        // 數位印刷，印版維持 0
        assert!(!outcome.dirty.is_dirty(DerivedField::Plates));

        let form = outcome.form;
        assert_eq!(form.products[0].papers[0].stock.recommended_sheets, 13);
        assert_eq!(form.operational.units, 130);
        assert_eq!(form.calculation.total_price, Decimal::new(132951, 3));
    }

    #[test]
    fn test_second_pass_is_fixed_point() {
        let reconciler = StateReconciler::default();

        let first = reconciler.reconcile(&seeded_form());
        let second = reconciler.reconcile(&first.form);

        assert!(second.is_fixed_point());
        assert_eq!(second.form, first.form);
    }

    #[test]
    fn test_reconcile_does_not_mutate_input() {
        let form = seeded_form();
        let before = form.clone();

        let _ = StateReconciler::default().reconcile(&form);

        assert_eq!(form, before);
    }

    #[test]
    fn test_only_changed_fields_are_written() {
        let reconciler = StateReconciler::default();
        let mut form = reconciler.reconcile(&seeded_form()).into_form();

        form.products[0].printing_selection = PrintingSelection::Offset;
        let outcome = reconciler.reconcile(&form);

        assert_eq!(outcome.dirty.get_dirty_fields(), vec![DerivedField::Plates]);
        assert_eq!(outcome.form.operational.plates, 4);

        form = outcome.into_form();
        form.products[0].sides = Sides::Two;
        let outcome = reconciler.reconcile(&form);

        assert_eq!(
            outcome.dirty.get_dirty_fields(),
            vec![DerivedField::Plates, DerivedField::Units]
        );
        assert_eq!(outcome.form.operational.plates, 8);
        assert_eq!(outcome.form.operational.units, 260);
    }

    #[rstest]
    #[case(PrintingSelection::Digital, Sides::One, 0, 130)]
    #[case(PrintingSelection::Digital, Sides::Two, 0, 260)]
    #[case(PrintingSelection::Offset, Sides::One, 4, 130)]
    #[case(PrintingSelection::Either, Sides::Two, 8, 260)]
    #[case(PrintingSelection::Both, Sides::Two, 8, 260)]
    fn test_plates_and_units(
        #[case] printing: PrintingSelection,
        #[case] sides: Sides,
        #[case] plates: u32,
        #[case] units: u64,
    ) {
        let mut form = seeded_form();
        form.products[0].printing_selection = printing;
        form.products[0].sides = sides;

        let form = StateReconciler::default().reconcile(&form).into_form();

        assert_eq!(form.operational.plates, plates);
        assert_eq!(form.operational.units, units);
    }

    #[test]
    fn test_secondary_products_get_recommendations() {
        let reconciler = StateReconciler::default();
        let mut form = reconciler.reconcile(&seeded_form()).into_form();

        let mut flyer = ProductSpec::blank();
        flyer.product_name = "Flyer A5".to_string();
        flyer.papers[0].paper = Paper::new("Gloss", "150");
        flyer.papers[0].stock = form.products[0].papers[0].stock.clone();
        form.products.push(flyer);

        let outcome = reconciler.reconcile(&form);

        // 100 件 / 每張 78 件 = 2 張；主產品結果不變
        assert_eq!(outcome.form.products[1].papers[0].stock.recommended_sheets, 2);
        assert_eq!(
            outcome.dirty.get_dirty_fields(),
            vec![DerivedField::RecommendedSheets { product: 1, paper: 0 }]
        );
    }

    #[test]
    fn test_empty_form_reconciles_to_zero() {
        let mut form = seeded_form();
        form.products.clear();
        form.operational.units = 42;

        let outcome = StateReconciler::default().reconcile(&form);

        assert_eq!(outcome.form.operational.units, 0);
        assert_eq!(outcome.form.calculation, Calculation::default());
    }
}
