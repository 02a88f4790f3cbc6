use std::fmt;
use std::str::FromStr;

use crate::models::{ClassifiedSeries, OrderSide, Series, SeriesPoint, TickRecord};
use crate::utils::AnalysisError;

/// Which series a limit order is drawn in
#[derive(Debug, Clone, Copy)]
enum Slot {
    First,
    Second,
}

/// Limit-order classification policy
///
/// The two policies are not interchangeable: a buy order placed above the
/// current price lands in different series depending on the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationPolicy {
    /// Partition by the explicit order-type token: Buy first, Sell second
    ExplicitType,
    /// Partition by `limit_price > base_price`: above first, at-or-below second
    PriceRelative,
}

impl ClassificationPolicy {
    /// Pick the policy the input was written for
    ///
    /// Any limit order carrying an order type selects the explicit policy.
    pub fn detect(records: &[TickRecord]) -> Self {
        let has_explicit_side = records
            .iter()
            .filter_map(|r| r.limit_order)
            .any(|order| order.side.is_some());

        if has_explicit_side {
            ClassificationPolicy::ExplicitType
        } else {
            ClassificationPolicy::PriceRelative
        }
    }

    pub fn labels(&self) -> (&'static str, &'static str) {
        match self {
            ClassificationPolicy::ExplicitType => ("Buy limit orders", "Sell limit orders"),
            ClassificationPolicy::PriceRelative => ("Above current price", "At or below current price"),
        }
    }

    fn slot(
        &self,
        record: &TickRecord,
        limit_price: f64,
        side: Option<OrderSide>,
    ) -> Result<Slot, AnalysisError> {
        match self {
            ClassificationPolicy::ExplicitType => match side {
                Some(OrderSide::Buy) => Ok(Slot::First),
                Some(OrderSide::Sell) => Ok(Slot::Second),
                None => Err(AnalysisError::MissingOrderSide {
                    tick_index: record.tick_index,
                }),
            },
            ClassificationPolicy::PriceRelative => {
                if limit_price > record.base_price {
                    Ok(Slot::First)
                } else {
                    Ok(Slot::Second)
                }
            }
        }
    }

    /// Partition every limit order in `records` into the policy's two series
    pub fn classify(&self, records: &[TickRecord]) -> Result<ClassifiedSeries, AnalysisError> {
        let (first_label, second_label) = self.labels();
        let mut first = Series::new(first_label);
        let mut second = Series::new(second_label);

        for record in records {
            let Some(order) = record.limit_order else {
                continue;
            };
            let point = (record.tick_index, order.limit_price);
            match self.slot(record, order.limit_price, order.side)? {
                Slot::First => first.points.push(point),
                Slot::Second => second.points.push(point),
            }
        }

        Ok(ClassifiedSeries { first, second })
    }
}

impl fmt::Display for ClassificationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassificationPolicy::ExplicitType => write!(f, "explicit"),
            ClassificationPolicy::PriceRelative => write!(f, "price-relative"),
        }
    }
}

impl FromStr for ClassificationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "explicit" | "type" => Ok(ClassificationPolicy::ExplicitType),
            "price-relative" | "price" | "legacy" => Ok(ClassificationPolicy::PriceRelative),
            _ => Err(format!(
                "Unknown policy: '{}'. Supported: explicit, price-relative",
                s
            )),
        }
    }
}

/// The continuous base-price line, indexed by tick
pub fn base_price_series(records: &[TickRecord]) -> Vec<SeriesPoint> {
    records.iter().map(|r| (r.tick_index, r.base_price)).collect()
}
