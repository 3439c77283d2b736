//! CLI subcommand implementations for the propscout binary.

pub mod fetch_cmd;
pub mod search_cmd;

use crate::http::DEFAULT_TIMEOUT_SECS;
use crate::model::{ListingType, PropertyType, QueryType, SearchParams};
use std::time::Duration;

/// Search flags shared by every subcommand.
#[derive(Debug, clap::Args)]
pub struct SearchArgs {
    /// Rent or sale search
    #[arg(long, value_enum, default_value = "rent")]
    pub listing_type: ListingType,

    /// Property category; "all" applies no category filter
    #[arg(long, value_enum, default_value = "all")]
    pub property_type: PropertyType,

    /// Structured location query type (99.co only)
    #[arg(long, value_enum, default_value = "none")]
    pub query_type: QueryType,

    /// Source-specific location token, e.g. "sg-mrt-orchard" (99.co only)
    #[arg(long, default_value = "")]
    pub query_id: String,

    /// Free-text location, e.g. "bukit panjang" (PropertyGuru only)
    #[arg(long)]
    pub freetext: Option<String>,

    /// Minimum price
    #[arg(long)]
    pub min_price: Option<u32>,

    /// Maximum price
    #[arg(long)]
    pub max_price: Option<u32>,

    /// Minimum bedrooms
    #[arg(long)]
    pub min_beds: Option<u32>,

    /// Maximum bedrooms (99.co only)
    #[arg(long)]
    pub max_beds: Option<u32>,

    /// Minimum floor area in sqft, filtered client-side (99.co only)
    #[arg(long)]
    pub min_size: Option<f64>,

    /// Maximum walking minutes to the nearest MRT, filtered client-side
    #[arg(long)]
    pub max_walk_mins: Option<u32>,

    /// Listings to request per source
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Show at most this many listings in the report
    #[arg(long)]
    pub limit: Option<usize>,
}

impl SearchArgs {
    pub fn to_params(&self) -> SearchParams {
        SearchParams {
            listing_type: self.listing_type,
            property_type: self.property_type,
            query_type: self.query_type,
            query_id: self.query_id.clone(),
            freetext: self.freetext.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
            min_bedrooms: self.min_beds,
            max_bedrooms: self.max_beds,
            min_size: self.min_size,
            max_walk_mins: self.max_walk_mins,
            page_size: self.page_size,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}
