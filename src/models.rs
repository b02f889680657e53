#![allow(proc_macro_derive_resolution_fallback)] // See: https://github.com/diesel-rs/diesel/issues/1785

use chrono::naive::NaiveDate;
use chrono::{DateTime, Utc};

/// `selection` of the beers that can only be bought by special order.
pub const ORDERING_RANGE: &str = "Bestillingsutvalget";

/// `status` of a beer that is currently sold.
pub const ACTIVE: &str = "aktiv";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable)]
pub struct Beer {
    pub beer_id: i64,
    pub name: String,
    pub brewery: String,
    pub country: Option<String>,
    pub style: Option<String>,
    pub price: Option<f64>,
    pub volume: Option<f64>,
    pub abv: Option<f64>,
    pub selection: String,
    pub buyable: bool,
    pub status: String,
    pub launch_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A beer together with its aggregate Untappd rating, if it has been rated.
#[derive(Debug, Clone, Queryable)]
pub struct RatedBeer {
    pub beer: Beer,
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Queryable)]
pub struct Store {
    pub store_id: String,
    pub name: String,
    pub address: Option<String>,
    pub zip_code: Option<String>,
    pub area: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Queryable)]
pub struct Person {
    pub id: i32,
    pub name: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The part of a check-in needed to annotate a listing.
#[derive(Debug, Clone, PartialEq, Queryable)]
pub struct CheckInRating {
    pub beer_id: i64,
    pub rating: f64,
    pub checked_in_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Queryable)]
pub struct UntappdEntry {
    pub beer_id: i64,
    pub beer_name: String,
    pub brewery: String,
    pub style: String,
    pub rating: Option<f64>,
    pub num_ratings: i32,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Serialize, Queryable)]
pub struct UntappdMappingEntry {
    pub beer_id: i64,
    pub beer_name: String,
    pub untappd_id: i64,
    pub auto_match: bool,
    pub verified: bool,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Serialize, Queryable)]
pub struct CheckInEntry {
    pub checkin_id: i64,
    pub person_id: i32,
    pub beer_id: i64,
    pub beer_name: String,
    pub rating: f64,
    pub checked_in_at: DateTime<Utc>,
}
