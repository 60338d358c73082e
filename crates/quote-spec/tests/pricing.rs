use proptest::prelude::*;
use quote_spec::catalog::ids;
use quote_spec::{AnswerMap, AnswerValue, LineCategory, PriceTable, estimate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn weekly_home_answers() -> AnswerMap {
    AnswerMap::from_iter([
        (ids::SERVICES, AnswerValue::selection(["regular_home"])),
        (
            ids::RESIDENTIAL_AREAS,
            AnswerValue::counts([("kitchen", 1), ("bedrooms", 2)]),
        ),
        (ids::EXTRA_SERVICES, AnswerValue::selection(["ironing"])),
        (ids::FREQUENCY, AnswerValue::text("weekly")),
    ])
}

#[test]
fn weekly_home_clean_matches_reference_example() {
    let context = estimate(&weekly_home_answers(), &PriceTable::default());
    assert_eq!(context.service_subtotal, dec!(30));
    assert_eq!(context.area_subtotal, dec!(45));
    assert_eq!(context.extra_services_subtotal, dec!(15));
    assert_eq!(context.subtotal(), dec!(90));
    assert_eq!(context.frequency_discount_rate, dec!(0.15));
    assert_eq!(context.total(), dec!(76.50));
    assert_eq!(context.display_total().to_string(), "76.50");

    let summary = context.summary();
    assert_eq!(summary.discount, dec!(13.50));
    assert_eq!(summary.line_items.len(), 4);
    assert_eq!(summary.line_items[1].category, LineCategory::ResidentialArea);
    assert_eq!(summary.line_items[1].id, "bedrooms");
    assert_eq!(summary.line_items[1].amount, dec!(30));
}

#[test]
fn empty_answers_price_to_zero() {
    let context = estimate(&AnswerMap::new(), &PriceTable::default());
    assert_eq!(context.service_subtotal, Decimal::ZERO);
    assert_eq!(context.area_subtotal, Decimal::ZERO);
    assert_eq!(context.extra_services_subtotal, Decimal::ZERO);
    assert_eq!(context.frequency_discount_rate, Decimal::ZERO);
    assert_eq!(context.total(), Decimal::ZERO);
    assert!(context.line_items.is_empty());
}

#[test]
fn unknown_service_ids_contribute_nothing() {
    let answers = AnswerMap::from_iter([
        (
            ids::SERVICES,
            AnswerValue::selection(["regular_home", "carpet_shampoo"]),
        ),
        (ids::EXTRA_SERVICES, AnswerValue::selection(["balcony"])),
    ]);
    let context = estimate(&answers, &PriceTable::default());
    assert_eq!(context.service_subtotal, dec!(30));
    assert_eq!(context.extra_services_subtotal, Decimal::ZERO);
    assert_eq!(context.line_items.len(), 1);
}

#[test]
fn commercial_areas_use_commercial_rate() {
    let answers = AnswerMap::from_iter([
        (
            ids::COMMERCIAL_AREAS,
            AnswerValue::counts([("workspaces", 3), ("restrooms", 0)]),
        ),
        (ids::FREQUENCY, AnswerValue::text("one_time")),
    ]);
    let context = estimate(&answers, &PriceTable::default());
    assert_eq!(context.area_subtotal, dec!(60));
    assert_eq!(context.frequency_discount_rate, Decimal::ZERO);
    assert_eq!(context.line_items.len(), 1);
}

#[test]
fn discount_table_lookup() {
    let table = PriceTable::default();
    assert_eq!(table.discount_rate(Some("weekly")), dec!(0.15));
    assert_eq!(table.discount_rate(Some("biweekly")), dec!(0.10));
    assert_eq!(table.discount_rate(Some("monthly")), dec!(0.05));
    assert_eq!(table.discount_rate(Some("one_time")), Decimal::ZERO);
    assert_eq!(table.discount_rate(None), Decimal::ZERO);
}

#[test]
fn configured_table_overrides_defaults() {
    let table: PriceTable = serde_json::from_value(serde_json::json!({
        "services": { "regular_home": "32.50" },
        "residential_unit_rate": 16
    }))
    .unwrap();
    assert_eq!(table.commercial_unit_rate, dec!(20));
    let context = estimate(&weekly_home_answers(), &table);
    assert_eq!(context.service_subtotal, dec!(32.50));
    assert_eq!(context.area_subtotal, dec!(48));
    assert_eq!(context.display_total(), dec!(81.18));
}

fn arbitrary_answers() -> impl Strategy<Value = AnswerMap> {
    let services = prop::collection::vec(
        prop::sample::select(vec!["regular_home", "deep_clean", "mystery", "office_clean"]),
        0..4,
    );
    let rooms = prop::collection::btree_map(
        prop::sample::select(vec!["kitchen", "bedrooms", "bathrooms"]),
        0u32..6,
        0..3,
    );
    let extras = prop::collection::vec(
        prop::sample::select(vec!["ironing", "oven", "unknown"]),
        0..3,
    );
    let frequency = prop::option::of(prop::sample::select(vec![
        "weekly", "biweekly", "monthly", "one_time",
    ]));
    (services, rooms, extras, frequency).prop_map(|(services, rooms, extras, frequency)| {
        let mut answers = AnswerMap::new();
        answers.insert(ids::SERVICES, AnswerValue::selection(services));
        answers.insert(ids::RESIDENTIAL_AREAS, AnswerValue::counts(rooms));
        answers.insert(ids::EXTRA_SERVICES, AnswerValue::selection(extras));
        if let Some(frequency) = frequency {
            answers.insert(ids::FREQUENCY, AnswerValue::text(frequency));
        }
        answers
    })
}

proptest! {
    #[test]
    fn estimate_is_deterministic(answers in arbitrary_answers()) {
        let table = PriceTable::default();
        prop_assert_eq!(estimate(&answers, &table), estimate(&answers, &table));
    }

    #[test]
    fn total_stays_within_subtotal(answers in arbitrary_answers()) {
        let context = estimate(&answers, &PriceTable::default());
        prop_assert!(context.total() >= Decimal::ZERO);
        prop_assert!(context.total() <= context.subtotal());
        let line_sum: Decimal = context.line_items.iter().map(|item| item.amount).sum();
        prop_assert_eq!(line_sum, context.subtotal());
    }
}
