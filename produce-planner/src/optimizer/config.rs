//! Tuning parameters for shipment optimization.

/// Configuration parameters for the profit model and the selection step.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerConfig {
    /// Distance a vehicle covers in one day.
    pub daily_distance_limit: f64,

    /// Shipments taking longer than this many days are infeasible.
    pub max_delivery_days: u32,

    /// Fraction of profit lost per day in transit.
    pub freshness_decay_per_day: f64,

    /// Normalizes a good's growing time into the [0, 1] perishability range.
    pub growing_time_divisor: f64,

    /// Retention never drops below this fraction of base profit.
    pub minimum_retention_fraction: f64,

    /// Knapsack cells per unit of capacity.
    /// One cell is the smallest weight the selection step distinguishes.
    pub capacity_resolution: u32,
}

/// Slack, in cells, allowed before a shipment's weight rounds up to the next
/// cell. Absorbs float noise like `0.1 * 30.0 = 3.0000000000000004`, so a
/// shipment may weigh at most `CELL_EPSILON / capacity_resolution` more than
/// the cells it is charged.
pub const CELL_EPSILON: f64 = 1e-9;

impl OptimizerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        daily_distance_limit: f64,
        max_delivery_days: u32,
        freshness_decay_per_day: f64,
        growing_time_divisor: f64,
        minimum_retention_fraction: f64,
        capacity_resolution: u32,
    ) -> Self {
        Self {
            daily_distance_limit,
            max_delivery_days,
            freshness_decay_per_day,
            growing_time_divisor,
            minimum_retention_fraction,
            capacity_resolution,
        }
    }

    /// Days needed to cover `distance`, or `None` if it is not a real trip.
    pub fn delivery_days(&self, distance: u64) -> Option<u32> {
        if distance == 0 {
            return None;
        }
        let days = (distance as f64 / self.daily_distance_limit).ceil();
        Some(if days >= f64::from(u32::MAX) {
            u32::MAX
        } else {
            days as u32
        })
    }

    /// Knapsack budget in cells for a whole-unit capacity.
    pub fn budget_cells(&self, capacity: u32) -> usize {
        (capacity as usize).saturating_mul(self.resolution())
    }

    /// Cells occupied by a shipment of the given total weight.
    ///
    /// Rounds up, so a selection that fits the cell budget exceeds the real
    /// capacity by at most [`CELL_EPSILON`] cells per shipment. Any shipment
    /// occupies at least one cell.
    pub fn weight_cells(&self, weight: f64) -> usize {
        let scaled = (weight * self.resolution() as f64 - CELL_EPSILON).ceil();
        (scaled.max(1.0)) as usize
    }

    fn resolution(&self) -> usize {
        self.capacity_resolution.max(1) as usize
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            daily_distance_limit: 900.0, // km per day
            max_delivery_days: 7,
            freshness_decay_per_day: 0.1,
            growing_time_divisor: 100.0,
            minimum_retention_fraction: 0.5,
            capacity_resolution: 1,
        }
    }
}
