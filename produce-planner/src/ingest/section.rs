//! Section markers and per-line record parsing.

use crate::domain::{Coordinates, DemandRecord, Good, Location, RecordError};

/// A section of the data file, introduced by a `// <name>.csv` marker line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Locations,
    Routes,
    Goods,
    Demands,
    /// A marker this loader does not understand; its lines are ignored.
    Unknown,
}

impl Section {
    /// Parse a marker line. Returns `None` if the line is not a marker.
    pub fn from_marker(line: &str) -> Option<Self> {
        let name = line.trim().strip_prefix("//")?.trim();
        Some(match name {
            "states.csv" | "locations.csv" => Section::Locations,
            "routes.csv" => Section::Routes,
            "food_items.csv" | "goods.csv" => Section::Goods,
            "state_demands.csv" | "demands.csv" => Section::Demands,
            _ => Section::Unknown,
        })
    }
}

/// A route line before its endpoints are checked against the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord {
    pub from: String,
    pub to: String,
    pub distance: u32,
}

/// Split a line into at least `min` trimmed fields.
fn fields(line: &str, min: usize) -> Result<Vec<&str>, RecordError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < min {
        return Err(RecordError::Malformed(format!(
            "expected {min} fields, found {}",
            fields.len()
        )));
    }
    Ok(fields)
}

fn number<T: std::str::FromStr>(field: &str, what: &str) -> Result<T, RecordError> {
    field
        .parse()
        .map_err(|_| RecordError::Malformed(format!("invalid {what}: {field:?}")))
}

/// `name,latitude,longitude`; coordinates may be left out.
pub fn parse_location(line: &str) -> Result<Location, RecordError> {
    let fields = fields(line, 1)?;
    let location = Location::new(fields[0])?;

    match (fields.get(1), fields.get(2)) {
        (Some(lat), Some(lon)) if !lat.is_empty() || !lon.is_empty() => {
            let latitude = number(lat, "latitude")?;
            let longitude = number(lon, "longitude")?;
            Ok(location.with_coordinates(Coordinates::new(latitude, longitude)))
        }
        _ => Ok(location),
    }
}

/// `from,to,distance` with a positive distance.
pub fn parse_route(line: &str) -> Result<RouteRecord, RecordError> {
    let fields = fields(line, 3)?;
    let distance: i64 = number(fields[2], "distance")?;

    let distance = u32::try_from(distance)
        .ok()
        .filter(|d| *d > 0)
        .ok_or_else(|| RecordError::NonPositiveDistance {
            from: fields[0].to_string(),
            to: fields[1].to_string(),
            distance,
        })?;

    Ok(RouteRecord {
        from: fields[0].to_string(),
        to: fields[1].to_string(),
        distance,
    })
}

/// `name,price,growing_time,production_cost,weight,transport_cost`.
pub fn parse_good(line: &str) -> Result<Good, RecordError> {
    let fields = fields(line, 6)?;
    Good::new(
        fields[0],
        number(fields[1], "price")?,
        number(fields[2], "growing time")?,
        number(fields[3], "production cost")?,
        number(fields[4], "weight")?,
        number(fields[5], "transport cost")?,
    )
}

/// `destination,good,quantity` with a positive quantity.
pub fn parse_demand(line: &str) -> Result<DemandRecord, RecordError> {
    let fields = fields(line, 3)?;
    DemandRecord::new(fields[0], fields[1], number(fields[2], "quantity")?)
}
