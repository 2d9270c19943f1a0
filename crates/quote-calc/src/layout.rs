//! 拼版計算（單一方向的網格排列）

use quote_core::EngineConfig;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// 拼版結果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    /// 可印寬度（扣除邊界）
    pub usable_width: Decimal,
    /// 可印高度（扣除邊界）
    pub usable_height: Decimal,
    /// 含出血的成品寬度
    pub bled_width: Decimal,
    /// 含出血的成品高度
    pub bled_height: Decimal,
    /// 欄數
    pub columns: u32,
    /// 列數
    pub rows: u32,
    /// 每張可排數量
    pub items_per_sheet: u32,
    /// 面積利用率（0-100）
    pub efficiency: Decimal,
}

impl LayoutResult {
    /// 尚未設定尺寸時的空結果
    pub fn empty() -> Self {
        Self::default()
    }

    /// 是否排得下至少一件
    pub fn fits(&self) -> bool {
        self.items_per_sheet > 0
    }
}

/// 拼版計算器
#[derive(Debug, Clone, Copy)]
pub struct LayoutSolver {
    margin: Decimal,
    bleed: Decimal,
}

impl LayoutSolver {
    /// 創建拼版計算器
    pub fn new(margin: Decimal, bleed: Decimal) -> Self {
        Self { margin, bleed }
    }

    /// 依引擎配置創建
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.sheet_margin_cm, config.bleed_cm)
    }

    /// 計算拼版
    ///
    /// 任一尺寸未設定（或不為正數）時回傳全零結果，不視為錯誤。
    /// 尺寸大到超出十進位數值範圍時同樣視為無法計算。
    /// 只嘗試一種方向，不旋轉。
    pub fn solve(
        &self,
        sheet_width: Option<Decimal>,
        sheet_height: Option<Decimal>,
        product_width: Option<Decimal>,
        product_height: Option<Decimal>,
    ) -> LayoutResult {
        let (Some(sheet_w), Some(sheet_h), Some(prod_w), Some(prod_h)) = (
            positive(sheet_width),
            positive(sheet_height),
            positive(product_width),
            positive(product_height),
        ) else {
            return LayoutResult::empty();
        };

        match self.grid(sheet_w, sheet_h, prod_w, prod_h) {
            Some(layout) => layout,
            None => {
                tracing::warn!(
                    "拼版尺寸超出可計算範圍：紙張 {}×{}，成品 {}×{}",
                    sheet_w,
                    sheet_h,
                    prod_w,
                    prod_h
                );
                LayoutResult::empty()
            }
        }
    }

    fn grid(&self, sheet_w: Decimal, sheet_h: Decimal, prod_w: Decimal, prod_h: Decimal) -> Option<LayoutResult> {
        let margin = self.margin.checked_mul(Decimal::TWO)?;
        let bleed = self.bleed.checked_mul(Decimal::TWO)?;

        let usable_width = sheet_w.checked_sub(margin)?.max(Decimal::ZERO);
        let usable_height = sheet_h.checked_sub(margin)?.max(Decimal::ZERO);

        let bled_width = prod_w.checked_add(bleed)?;
        let bled_height = prod_h.checked_add(bleed)?;

        let columns = fit_count(usable_width, bled_width)?;
        let rows = fit_count(usable_height, bled_height)?;
        let items_per_sheet = columns.checked_mul(rows)?;

        let efficiency = if items_per_sheet == 0 {
            Decimal::ZERO
        } else {
            let usable_area = usable_width.checked_mul(usable_height)?;
            // floor 之後的排版面積在數值上仍可能略超過可印面積
            Decimal::from(items_per_sheet)
                .checked_mul(bled_width)?
                .checked_mul(bled_height)?
                .checked_mul(ONE_HUNDRED)?
                .checked_div(usable_area)?
                .min(ONE_HUNDRED)
        };

        Some(LayoutResult {
            usable_width,
            usable_height,
            bled_width,
            bled_height,
            columns,
            rows,
            items_per_sheet,
            efficiency,
        })
    }
}

impl Default for LayoutSolver {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

fn positive(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| *v > Decimal::ZERO)
}

fn fit_count(available: Decimal, item: Decimal) -> Option<u32> {
    if item <= Decimal::ZERO {
        return Some(0);
    }
    available.checked_div(item)?.floor().to_u32()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn cm(value: i64, scale: u32) -> Option<Decimal> {
        Some(Decimal::new(value, scale))
    }

    #[test]
    fn test_business_card_on_65x90() {
        let layout = LayoutSolver::default().solve(cm(65, 0), cm(90, 0), cm(9, 0), cm(55, 1));

        assert_eq!(layout.usable_width, Decimal::from(64));
        assert_eq!(layout.usable_height, Decimal::from(89));
        assert_eq!(layout.bled_width, Decimal::from(10));
        assert_eq!(layout.bled_height, Decimal::new(65, 1));
        assert_eq!(layout.columns, 6);
        assert_eq!(layout.rows, 13);
        assert_eq!(layout.items_per_sheet, 78);

        // 78 × 10 × 6.5 × 100 / (64 × 89) ≈ 89.0098
        let expected = Decimal::from(50700) / Decimal::from(5696) * Decimal::from(10);
        assert!((layout.efficiency - expected).abs() < Decimal::new(1, 6));
        assert_eq!(layout.efficiency.round_dp(2), Decimal::new(8901, 2));
    }

    #[rstest]
    #[case(None, cm(90, 0), cm(9, 0), cm(55, 1))]
    #[case(cm(65, 0), None, cm(9, 0), cm(55, 1))]
    #[case(cm(65, 0), cm(90, 0), None, cm(55, 1))]
    #[case(cm(65, 0), cm(90, 0), cm(9, 0), None)]
    #[case(None, None, None, None)]
    #[case(cm(0, 0), cm(90, 0), cm(9, 0), cm(55, 1))]
    #[case(cm(65, 0), cm(90, 0), cm(-9, 0), cm(55, 1))]
    fn test_unset_input_gives_empty_layout(
        #[case] sheet_w: Option<Decimal>,
        #[case] sheet_h: Option<Decimal>,
        #[case] prod_w: Option<Decimal>,
        #[case] prod_h: Option<Decimal>,
    ) {
        let layout = LayoutSolver::default().solve(sheet_w, sheet_h, prod_w, prod_h);

        assert_eq!(layout, LayoutResult::empty());
        assert!(!layout.fits());
    }

    #[test]
    fn test_product_larger_than_sheet() {
        let layout = LayoutSolver::default().solve(cm(30, 0), cm(40, 0), cm(42, 0), cm(297, 1));

        assert_eq!(layout.columns, 0);
        assert_eq!(layout.items_per_sheet, 0);
        assert_eq!(layout.efficiency, Decimal::ZERO);
        // 尺寸資訊仍會回報
        assert_eq!(layout.usable_width, Decimal::from(29));
        assert_eq!(layout.bled_width, Decimal::from(43));
    }

    #[test]
    fn test_sheet_smaller_than_margins() {
        let layout = LayoutSolver::default().solve(cm(8, 1), cm(90, 0), cm(1, 0), cm(1, 0));

        assert_eq!(layout.usable_width, Decimal::ZERO);
        assert_eq!(layout.items_per_sheet, 0);
        assert_eq!(layout.efficiency, Decimal::ZERO);
    }

    #[test]
    fn test_exact_fit_is_full_efficiency() {
        // 可印 20×20，含出血 10×10，剛好 2×2
        let layout = LayoutSolver::default().solve(cm(21, 0), cm(21, 0), cm(9, 0), cm(9, 0));

        assert_eq!(layout.items_per_sheet, 4);
        assert_eq!(layout.efficiency, Decimal::ONE_HUNDRED);
    }

    #[rstest]
    #[case::columns_overflow(cm(300_000_000_000_000, 0), cm(300_000_000_000_000, 0), cm(1, 0), cm(1, 0))]
    #[case::usable_area(cm(300_000_000_000_000, 0), cm(300_000_000_000_000, 0), cm(100_000_000_000_000, 0), cm(100_000_000_000_000, 0))]
    #[case::columns_past_u32(cm(100_000_000_000, 0), cm(10, 0), cm(1, 0), cm(1, 0))]
    #[case::bled_size(cm(65, 0), cm(90, 0), Some(Decimal::MAX), cm(55, 1))]
    fn test_out_of_range_sizes_give_empty_layout(
        #[case] sheet_w: Option<Decimal>,
        #[case] sheet_h: Option<Decimal>,
        #[case] prod_w: Option<Decimal>,
        #[case] prod_h: Option<Decimal>,
    ) {
        let layout = LayoutSolver::default().solve(sheet_w, sheet_h, prod_w, prod_h);

        assert_eq!(layout, LayoutResult::empty());
    }

    #[test]
    fn test_no_rotation_attempted() {
        // 旋轉後可排更多，但只計算單一方向
        let layout = LayoutSolver::default().solve(cm(31, 0), cm(11, 0), cm(9, 0), cm(19, 0));

        assert_eq!(layout.columns, 3);
        assert_eq!(layout.rows, 0);
        assert_eq!(layout.items_per_sheet, 0);
    }

    #[test]
    fn test_custom_margin_and_bleed() {
        let solver = LayoutSolver::new(Decimal::ZERO, Decimal::ZERO);
        let layout = solver.solve(cm(20, 0), cm(10, 0), cm(5, 0), cm(5, 0));

        assert_eq!(layout.columns, 4);
        assert_eq!(layout.rows, 2);
        assert_eq!(layout.efficiency, Decimal::ONE_HUNDRED);
    }
}
