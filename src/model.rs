//! Common data model shared by both source adapters.
//!
//! `SearchParams` is the single immutable input to a search; `Listing` is
//! the normalized output record both adapters map into. `price` and `beds`
//! default to 0 rather than being absent so the aggregator can sort and the
//! presenter can print without null checks; every other enrichment is
//! optional because one or both upstreams may simply not carry it.

use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

/// Which upstream site a listing came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
pub enum Source {
    /// The 99.co JSON search API.
    #[serde(rename = "99.co")]
    #[value(name = "99co")]
    NinetyNine,
    /// The PropertyGuru HTML search page.
    #[serde(rename = "PropertyGuru")]
    #[value(name = "propertyguru")]
    PropertyGuru,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::NinetyNine => write!(f, "99.co"),
            Source::PropertyGuru => write!(f, "PropertyGuru"),
        }
    }
}

/// Rental or resale search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListingType {
    Rent,
    Sale,
}

impl ListingType {
    /// Token both upstreams use in URLs.
    pub fn as_query(&self) -> &'static str {
        match self {
            ListingType::Rent => "rent",
            ListingType::Sale => "sale",
        }
    }
}

/// Property category filter. `All` means no category filter at all, not a
/// category of its own: adapters omit the filter entirely for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PropertyType {
    Condo,
    Hdb,
    Landed,
    All,
}

impl PropertyType {
    pub fn as_token(&self) -> &'static str {
        match self {
            PropertyType::Condo => "condo",
            PropertyType::Hdb => "hdb",
            PropertyType::Landed => "landed",
            PropertyType::All => "all",
        }
    }
}

/// Structured location query type understood by the 99.co API.
///
/// PropertyGuru has no location-ID taxonomy; it searches by free text
/// instead (`SearchParams::freetext`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QueryType {
    SubwayStation,
    Zone,
    District,
    None,
}

impl QueryType {
    pub fn as_query(&self) -> &'static str {
        match self {
            QueryType::SubwayStation => "subway_station",
            QueryType::Zone => "zone",
            QueryType::District => "district",
            QueryType::None => "none",
        }
    }
}

/// Search parameters for one invocation.
///
/// A numeric bound participates in the query exactly when it is `Some`.
/// `min_size` and `max_walk_mins` are client-side filters; neither
/// upstream accepts them as query parameters.
#[derive(Debug, Clone)]
pub struct SearchParams {
    pub listing_type: ListingType,
    pub property_type: PropertyType,
    pub query_type: QueryType,
    /// Opaque source-specific location token (e.g. "sg-mrt-orchard").
    /// Only meaningful together with a structured `query_type`.
    pub query_id: String,
    /// Free-form location string, used only by PropertyGuru.
    pub freetext: Option<String>,
    pub min_price: Option<u32>,
    pub max_price: Option<u32>,
    pub min_bedrooms: Option<u32>,
    pub max_bedrooms: Option<u32>,
    /// Minimum floor area in sqft, filtered client-side (99.co only).
    pub min_size: Option<f64>,
    /// Maximum walking minutes to the nearest MRT, filtered client-side.
    pub max_walk_mins: Option<u32>,
    pub page_size: Option<u32>,
}

impl SearchParams {
    pub const DEFAULT_PAGE_SIZE: u32 = 50;

    /// The location filter, when it takes effect: requires a structured
    /// query type AND a non-empty id.
    pub fn location_filter(&self) -> Option<(&'static str, &str)> {
        match self.query_type {
            QueryType::None => None,
            qt => (!self.query_id.is_empty()).then(|| (qt.as_query(), self.query_id.as_str())),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(Self::DEFAULT_PAGE_SIZE)
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            listing_type: ListingType::Rent,
            property_type: PropertyType::All,
            query_type: QueryType::None,
            query_id: String::new(),
            freetext: None,
            min_price: None,
            max_price: None,
            min_bedrooms: None,
            max_bedrooms: None,
            min_size: None,
            max_walk_mins: None,
            page_size: None,
        }
    }
}

/// One normalized real-estate unit record surfaced by a source.
///
/// Values are created fresh per search from one fetch response and are
/// immutable thereafter. The same physical unit found via both sources
/// appears as two separate entries; there is no de-duplication.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub source: Source,
    /// Source-scoped id; not globally unique across sources.
    pub id: String,
    pub address: String,
    /// Project or development name, when the upstream carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// Numeric price, 0 if unknown.
    pub price: f64,
    /// Display string, taken verbatim from the upstream when present.
    pub price_formatted: String,
    /// Bedroom count, 0 if unknown.
    pub beds: u32,
    pub beds_formatted: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baths: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baths_formatted: Option<String>,
    /// Floor area in sqft.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_formatted: Option<String>,
    /// Price per square foot. 99.co only; PropertyGuru exposes no
    /// comparable numeric field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub psf: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub psf_formatted: Option<String>,
    /// Property type label (e.g. "Condominium"). PropertyGuru only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    /// Posted-date label. 99.co only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted: Option<String>,
    /// Walking minutes to the nearest MRT, as reported or derived from
    /// free text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub walk_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest_mrt: Option<String>,
    /// Agent contact. 99.co only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_phone: Option<String>,
    /// Absolute link to the listing page.
    pub url: String,
}

impl Listing {
    /// Report headline: project name falling back to the address.
    pub fn headline(&self) -> &str {
        self.project.as_deref().unwrap_or(&self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_filter_requires_structured_type() {
        let params = SearchParams {
            query_type: QueryType::None,
            query_id: "sg-mrt-orchard".into(),
            ..SearchParams::default()
        };
        assert_eq!(params.location_filter(), None);
    }

    #[test]
    fn test_location_filter_requires_nonempty_id() {
        let params = SearchParams {
            query_type: QueryType::Zone,
            query_id: String::new(),
            ..SearchParams::default()
        };
        assert_eq!(params.location_filter(), None);

        let params = SearchParams {
            query_type: QueryType::Zone,
            query_id: "zobukit_panjang".into(),
            ..params
        };
        assert_eq!(params.location_filter(), Some(("zone", "zobukit_panjang")));
    }

    #[test]
    fn test_page_size_default() {
        assert_eq!(SearchParams::default().page_size(), 50);
        let params = SearchParams {
            page_size: Some(100),
            ..SearchParams::default()
        };
        assert_eq!(params.page_size(), 100);
    }

    #[test]
    fn test_headline_prefers_project() {
        let listing = listing_with(Some("The Orchard Residences"), "21 Orchard Blvd");
        assert_eq!(listing.headline(), "The Orchard Residences");

        let listing = listing_with(None, "21 Orchard Blvd");
        assert_eq!(listing.headline(), "21 Orchard Blvd");
    }

    fn listing_with(project: Option<&str>, address: &str) -> Listing {
        Listing {
            source: Source::NinetyNine,
            id: "x".into(),
            address: address.into(),
            project: project.map(str::to_owned),
            price: 0.0,
            price_formatted: String::new(),
            beds: 0,
            beds_formatted: String::new(),
            baths: None,
            baths_formatted: None,
            size: None,
            size_formatted: None,
            psf: None,
            psf_formatted: None,
            property_type: None,
            posted: None,
            walk_time: None,
            nearest_mrt: None,
            agent_name: None,
            agent_phone: None,
            url: String::new(),
        }
    }
}
