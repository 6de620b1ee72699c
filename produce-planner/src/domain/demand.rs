//! Demand records.

use super::RecordError;

/// A destination's request for a quantity of one good.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemandRecord {
    destination: String,
    good: String,
    quantity: u32,
}

impl DemandRecord {
    /// Create a validated demand record.
    ///
    /// The quantity arrives signed because input sources can carry zero or
    /// negative values; those are rejected here.
    pub fn new(destination: &str, good: &str, quantity: i64) -> Result<Self, RecordError> {
        let destination = destination.trim();
        let good = good.trim();
        if destination.is_empty() {
            return Err(RecordError::EmptyName("destination"));
        }
        if good.is_empty() {
            return Err(RecordError::EmptyName("good"));
        }

        let quantity = u32::try_from(quantity)
            .ok()
            .filter(|q| *q > 0)
            .ok_or_else(|| RecordError::NonPositiveDemand {
                destination: destination.to_string(),
                good: good.to_string(),
                quantity,
            })?;

        Ok(Self {
            destination: destination.to_string(),
            good: good.to_string(),
            quantity,
        })
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn good(&self) -> &str {
        &self.good
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}
