//! 性質測試

use print_quote::*;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// 0.0 ~ 200.0 cm，精度 0.1
fn length() -> impl Strategy<Value = Option<Decimal>> {
    proptest::option::of((0i64..2000).prop_map(|tenths| Decimal::new(tenths, 1)))
}

fn printing() -> impl Strategy<Value = PrintingSelection> {
    prop_oneof![
        Just(PrintingSelection::Digital),
        Just(PrintingSelection::Offset),
        Just(PrintingSelection::Either),
        Just(PrintingSelection::Both),
    ]
}

fn sides() -> impl Strategy<Value = Sides> {
    prop_oneof![Just(Sides::One), Just(Sides::Two)]
}

proptest! {
    #[test]
    fn efficiency_is_bounded(
        sheet_w in length(),
        sheet_h in length(),
        product_w in length(),
        product_h in length(),
    ) {
        let layout = compute_layout(sheet_w, sheet_h, product_w, product_h);

        prop_assert!(layout.efficiency >= Decimal::ZERO);
        prop_assert!(layout.efficiency <= Decimal::ONE_HUNDRED);
        prop_assert_eq!(layout.items_per_sheet, layout.columns * layout.rows);
    }

    #[test]
    fn layout_is_deterministic(
        sheet_w in length(),
        sheet_h in length(),
        product_w in length(),
        product_h in length(),
    ) {
        prop_assert_eq!(
            compute_layout(sheet_w, sheet_h, product_w, product_h),
            compute_layout(sheet_w, sheet_h, product_w, product_h)
        );
    }

    #[test]
    fn recommended_sheets_cover_quantity(items in 1u32..500, quantity in 0u32..1_000_000) {
        let sheets = recommend_sheets(items, Some(quantity));

        prop_assert!(u64::from(sheets) * u64::from(items) >= u64::from(quantity));
        if sheets > 0 {
            prop_assert!(u64::from(sheets - 1) * u64::from(items) < u64::from(quantity));
        }
    }

    #[test]
    fn reconcile_reaches_fixed_point(
        quantity in proptest::option::of(0u32..100_000),
        sheet_w in length(),
        sheet_h in length(),
        product_w in length(),
        product_h in length(),
        entered in proptest::option::of(0u32..10_000),
        printing in printing(),
        sides in sides(),
    ) {
        let mut form = InMemoryRepository::seeded().default_form();
        let product = &mut form.products[0];
        product.quantity = quantity;
        product.printing_selection = printing;
        product.sides = sides;
        product.set_flat_dimension(Dimension::Width, product_w);
        product.set_flat_dimension(Dimension::Height, product_h);
        let stock = &mut product.papers[0].stock;
        stock.input_width = sheet_w;
        stock.input_height = sheet_h;
        stock.entered_sheets = entered;

        let reconciler = StateReconciler::default();
        let first = reconciler.reconcile(&form);
        let second = reconciler.reconcile(&first.form);

        prop_assert!(second.is_fixed_point());
        prop_assert_eq!(second.form, first.form);
    }

    #[test]
    fn add_then_remove_paper_restores_lines(name in "[A-Za-z ]{1,16}", gsm in 60u32..450) {
        let repo = InMemoryRepository::seeded();
        let mut session = QuoteSession::new(&repo);
        let before = session.form().clone();

        session.apply(ProductEdit::AddPaper(Paper::new(name, gsm.to_string()))).unwrap();
        session.apply(ProductEdit::RemovePaper(1)).unwrap();

        prop_assert_eq!(session.form(), &before);
    }

    #[test]
    fn linked_close_size_follows_flat(width in length(), height in length()) {
        let repo = InMemoryRepository::seeded();
        let mut session = QuoteSession::new(&repo);
        session.apply(ProductEdit::SetUseSameAsFlat(true)).unwrap();

        session
            .apply(ProductEdit::SetFlatDimension { dimension: Dimension::Width, value: width })
            .unwrap();
        session
            .apply(ProductEdit::SetFlatDimension { dimension: Dimension::Height, value: height })
            .unwrap();

        let product = &session.form().products[0];
        prop_assert_eq!(&product.close_size, &product.flat_size);
    }
}
