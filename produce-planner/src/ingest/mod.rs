//! Ingestion of the sectioned text data format.
//!
//! A data file holds four comma-separated sections, each introduced by a
//! marker line and followed by a header line:
//!
//! ```text
//! // states.csv
//! name,latitude,longitude
//! Iowa,41.9,-93.1
//! // routes.csv
//! from,to,distance
//! Iowa,Ohio,800
//! // food_items.csv
//! name,price,growing_time,production_cost,weight,transport_cost
//! Corn,8.0,60,3.0,1.0,0.002
//! // state_demands.csv
//! state,food,demand
//! Ohio,Corn,40
//! ```
//!
//! Invalid lines are dropped individually; the rest of the file still loads.

mod loader;
mod section;

pub use loader::{Dataset, LoadError, RejectReason, Rejection, load_file, load_str};
pub use section::{RouteRecord, Section, parse_demand, parse_good, parse_location, parse_route};
