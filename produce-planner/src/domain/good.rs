//! Sellable goods.

use super::RecordError;

/// A good the producer can ship.
///
/// Weight is guaranteed positive and every numeric field finite, so
/// profit arithmetic downstream never divides by zero or sees NaN.
///
/// # Examples
///
/// ```
/// use produce_planner::domain::Good;
///
/// let wheat = Good::new("Wheat", 10.0, 30, 2.0, 1.0, 0.01).unwrap();
/// assert_eq!(wheat.name(), "Wheat");
///
/// // Weightless goods are rejected
/// assert!(Good::new("Air", 1.0, 0, 0.0, 0.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Good {
    name: String,
    unit_price: f64,
    growing_time: u32,
    production_cost: f64,
    weight: f64,
    transport_cost: f64,
}

impl Good {
    /// Create a validated good.
    ///
    /// `growing_time` is the perishability parameter: larger values mean the
    /// good tolerates transport better. `transport_cost` is charged per unit
    /// of distance per unit of weight.
    pub fn new(
        name: &str,
        unit_price: f64,
        growing_time: u32,
        production_cost: f64,
        weight: f64,
        transport_cost: f64,
    ) -> Result<Self, RecordError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RecordError::EmptyName("good"));
        }

        for (field, value) in [
            ("unit price", unit_price),
            ("production cost", production_cost),
            ("weight", weight),
            ("transport cost", transport_cost),
        ] {
            if !value.is_finite() {
                return Err(RecordError::NonFinite {
                    good: name.to_string(),
                    field,
                });
            }
        }

        if weight <= 0.0 {
            return Err(RecordError::NonPositiveWeight {
                good: name.to_string(),
                weight,
            });
        }

        Ok(Self {
            name: name.to_string(),
            unit_price,
            growing_time,
            production_cost,
            weight,
            transport_cost,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    pub fn growing_time(&self) -> u32 {
        self.growing_time
    }

    pub fn production_cost(&self) -> f64 {
        self.production_cost
    }

    /// Weight of a single unit, always > 0.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn transport_cost(&self) -> f64 {
        self.transport_cost
    }
}
