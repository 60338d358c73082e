use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::answers::AnswerMap;
use crate::catalog::ids;
use crate::error::PriceTableError;

/// Static price tables; the single source for every price and rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceTable {
    pub services: BTreeMap<String, Decimal>,
    pub extra_services: BTreeMap<String, Decimal>,
    /// Fraction in `0..=1` taken off the subtotal, keyed by frequency answer.
    pub frequency_discounts: BTreeMap<String, Decimal>,
    pub residential_unit_rate: Decimal,
    pub commercial_unit_rate: Decimal,
}

impl Default for PriceTable {
    fn default() -> Self {
        let whole = |entries: &[(&str, i64)]| {
            entries
                .iter()
                .map(|(id, price)| (id.to_string(), Decimal::from(*price)))
                .collect::<BTreeMap<_, _>>()
        };
        Self {
            services: whole(&[
                ("regular_home", 30),
                ("deep_clean", 55),
                ("end_of_tenancy", 90),
                ("office_clean", 40),
                ("after_builders", 75),
            ]),
            extra_services: whole(&[
                ("ironing", 15),
                ("oven", 25),
                ("fridge", 12),
                ("windows", 20),
                ("laundry", 10),
            ]),
            frequency_discounts: BTreeMap::from([
                ("weekly".to_string(), Decimal::new(15, 2)),
                ("biweekly".to_string(), Decimal::new(10, 2)),
                ("monthly".to_string(), Decimal::new(5, 2)),
            ]),
            residential_unit_rate: Decimal::from(15),
            commercial_unit_rate: Decimal::from(20),
        }
    }
}

impl PriceTable {
    pub fn check(&self) -> Result<(), PriceTableError> {
        for (table, prices) in [
            ("service", &self.services),
            ("extra service", &self.extra_services),
        ] {
            if let Some((id, _)) = prices.iter().find(|(_, price)| price.is_sign_negative()) {
                return Err(PriceTableError::NegativePrice {
                    table,
                    id: id.clone(),
                });
            }
        }
        if let Some((frequency, _)) = self
            .frequency_discounts
            .iter()
            .find(|(_, rate)| **rate < Decimal::ZERO || **rate > Decimal::ONE)
        {
            return Err(PriceTableError::DiscountOutOfRange {
                frequency: frequency.clone(),
            });
        }
        if self.residential_unit_rate.is_sign_negative() {
            return Err(PriceTableError::NegativeUnitRate {
                name: "residential",
            });
        }
        if self.commercial_unit_rate.is_sign_negative() {
            return Err(PriceTableError::NegativeUnitRate { name: "commercial" });
        }
        Ok(())
    }

    pub fn discount_rate(&self, frequency: Option<&str>) -> Decimal {
        frequency
            .and_then(|frequency| self.frequency_discounts.get(frequency))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCategory {
    Service,
    ResidentialArea,
    CommercialArea,
    ExtraService,
}

/// One priced row of the cost summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub category: LineCategory,
    pub id: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub amount: Decimal,
}

/// Estimate derived from the answers; recomputed on every change, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingContext {
    pub service_subtotal: Decimal,
    pub area_subtotal: Decimal,
    pub extra_services_subtotal: Decimal,
    pub frequency_discount_rate: Decimal,
    pub line_items: Vec<LineItem>,
}

impl PricingContext {
    pub fn subtotal(&self) -> Decimal {
        self.service_subtotal + self.area_subtotal + self.extra_services_subtotal
    }

    /// Full-precision total.
    pub fn total(&self) -> Decimal {
        self.subtotal() * (Decimal::ONE - self.frequency_discount_rate)
    }

    pub fn discount_amount(&self) -> Decimal {
        self.subtotal() - self.total()
    }

    /// Total rounded to cents, half away from zero.
    pub fn display_total(&self) -> Decimal {
        round_cents(self.total())
    }

    pub fn summary(&self) -> EstimateSummary {
        EstimateSummary {
            line_items: self.line_items.clone(),
            subtotal: round_cents(self.subtotal()),
            discount_rate: self.frequency_discount_rate,
            discount: round_cents(self.discount_amount()),
            total: self.display_total(),
        }
    }
}

/// Display-ready figures handed to the cost summary and checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateSummary {
    pub line_items: Vec<LineItem>,
    pub subtotal: Decimal,
    pub discount_rate: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

fn round_cents(amount: Decimal) -> Decimal {
    let mut cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    cents.rescale(2);
    cents
}

/// Prices the answers; unknown ids and absent answers contribute zero.
pub fn estimate(answers: &AnswerMap, prices: &PriceTable) -> PricingContext {
    let mut line_items = Vec::new();

    let service_subtotal = price_selection(
        answers.selection(ids::SERVICES),
        &prices.services,
        LineCategory::Service,
        &mut line_items,
    );
    let area_subtotal = price_counts(
        answers,
        ids::RESIDENTIAL_AREAS,
        prices.residential_unit_rate,
        LineCategory::ResidentialArea,
        &mut line_items,
    ) + price_counts(
        answers,
        ids::COMMERCIAL_AREAS,
        prices.commercial_unit_rate,
        LineCategory::CommercialArea,
        &mut line_items,
    );
    let extra_services_subtotal = price_selection(
        answers.selection(ids::EXTRA_SERVICES),
        &prices.extra_services,
        LineCategory::ExtraService,
        &mut line_items,
    );

    PricingContext {
        service_subtotal,
        area_subtotal,
        extra_services_subtotal,
        frequency_discount_rate: prices.discount_rate(answers.text(ids::FREQUENCY)),
        line_items,
    }
}

fn price_selection(
    selected: &[String],
    table: &BTreeMap<String, Decimal>,
    category: LineCategory,
    line_items: &mut Vec<LineItem>,
) -> Decimal {
    let mut subtotal = Decimal::ZERO;
    for id in selected {
        let Some(price) = table.get(id) else {
            tracing::debug!(id = %id, ?category, "no price entry; contributes zero");
            continue;
        };
        subtotal += *price;
        line_items.push(LineItem {
            category,
            id: id.clone(),
            quantity: 1,
            unit_price: *price,
            amount: *price,
        });
    }
    subtotal
}

fn price_counts(
    answers: &AnswerMap,
    question_id: &str,
    unit_rate: Decimal,
    category: LineCategory,
    line_items: &mut Vec<LineItem>,
) -> Decimal {
    let Some(counts) = answers.counts(question_id) else {
        return Decimal::ZERO;
    };
    let mut subtotal = Decimal::ZERO;
    for (area, count) in counts.iter().filter(|(_, count)| **count > 0) {
        let amount = Decimal::from(*count) * unit_rate;
        subtotal += amount;
        line_items.push(LineItem {
            category,
            id: area.clone(),
            quantity: *count,
            unit_price: unit_rate,
            amount,
        });
    }
    subtotal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_total_rounds_half_away_from_zero() {
        let context = PricingContext {
            service_subtotal: Decimal::new(10005, 3),
            area_subtotal: Decimal::ZERO,
            extra_services_subtotal: Decimal::ZERO,
            frequency_discount_rate: Decimal::ZERO,
            line_items: Vec::new(),
        };
        assert_eq!(context.display_total(), Decimal::new(1001, 2));
    }

    #[test]
    fn default_table_passes_check() {
        PriceTable::default().check().expect("defaults are sane");
    }

    #[test]
    fn out_of_range_discount_is_rejected() {
        let mut table = PriceTable::default();
        table
            .frequency_discounts
            .insert("daily".into(), Decimal::new(12, 1));
        assert_eq!(
            table.check(),
            Err(PriceTableError::DiscountOutOfRange {
                frequency: "daily".into()
            })
        );
    }
}
