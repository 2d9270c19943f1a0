//! 用紙張數計算

use rust_decimal::Decimal;

/// 用紙需求計算器
pub struct SheetDemandCalculator;

impl SheetDemandCalculator {
    /// 建議張數 = ceil(數量 / 每張可排數量)
    ///
    /// 每張排不下任何一件時回傳 0；數量未輸入視為 0。
    pub fn recommend(items_per_sheet: u32, quantity: Option<u32>) -> u32 {
        if items_per_sheet == 0 {
            return 0;
        }
        quantity.unwrap_or(0).div_ceil(items_per_sheet)
    }

    /// 每張單價 = 每包價格 / 每包張數
    ///
    /// 任一值未輸入、每包張數不為正數或結果超出數值範圍時無法計算。
    pub fn price_per_sheet(
        price_per_packet: Option<Decimal>,
        sheets_per_packet: Option<Decimal>,
    ) -> Option<Decimal> {
        match (price_per_packet, sheets_per_packet) {
            (Some(price), Some(sheets)) if sheets > Decimal::ZERO => price.checked_div(sheets),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(78, Some(1000), 13)]
    #[case(78, Some(78), 1)]
    #[case(78, Some(79), 2)]
    #[case(78, Some(0), 0)]
    #[case(78, None, 0)]
    #[case(0, Some(1000), 0)]
    #[case(1, Some(250), 250)]
    fn test_recommend(#[case] items: u32, #[case] quantity: Option<u32>, #[case] expected: u32) {
        assert_eq!(SheetDemandCalculator::recommend(items, quantity), expected);
    }

    #[test]
    fn test_price_per_sheet() {
        let price = SheetDemandCalculator::price_per_sheet(
            Some(Decimal::from(240)),
            Some(Decimal::from(500)),
        );

        assert_eq!(price, Some(Decimal::new(48, 2)));
    }

    #[rstest]
    #[case(None, Some(Decimal::from(500)))]
    #[case(Some(Decimal::from(240)), None)]
    #[case(Some(Decimal::from(240)), Some(Decimal::ZERO))]
    #[case(Some(Decimal::from(240)), Some(Decimal::from(-10)))]
    #[case(Some(Decimal::MAX), Some(Decimal::new(1, 28)))]
    fn test_price_per_sheet_not_computable(
        #[case] price: Option<Decimal>,
        #[case] sheets: Option<Decimal>,
    ) {
        assert_eq!(SheetDemandCalculator::price_per_sheet(price, sheets), None);
    }
}
