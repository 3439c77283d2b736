//! 99.co search adapter.
//!
//! Queries the site's JSON search API and maps the first section of
//! listings into the common model. The response is deserialized into a
//! typed mirror of the payload in which every nesting level is optional,
//! so a missing `data`, `sections`, or `listings` level yields an empty
//! result rather than an error.

use crate::http::HttpClient;
use crate::model::{Listing, ListingType, PropertyType, SearchParams, Source};
use crate::sources::{apply_policy, FetchPolicy, SourceError};
use serde::Deserialize;
use url::Url;

/// Site origin; serves both the search API and the listing pages the
/// relative `listing_url` paths resolve against.
pub const DEFAULT_ORIGIN: &str = "https://www.99.co";

const SEARCH_PATH: &str = "/api/v10/web/search/listings";

/// Adapter bound to an origin. Production code uses [`NinetyNineSource::new`];
/// tests point it at a mock server.
#[derive(Debug, Clone)]
pub struct NinetyNineSource {
    origin: Url,
}

impl NinetyNineSource {
    pub fn new() -> Self {
        Self::with_origin(Url::parse(DEFAULT_ORIGIN).expect("default origin is a valid url"))
    }

    pub fn with_origin(origin: Url) -> Self {
        Self { origin }
    }

    /// Build the deterministic search query URL.
    ///
    /// Always present: listing type, the residential segment marker, the
    /// recency sort, and the page size. `main_category` is omitted when the
    /// property type is `All` (no category filter); the rental-unit marker
    /// only applies to rent searches; the location pair only applies when
    /// a structured query type carries a non-empty id; numeric bounds only
    /// when set.
    pub fn search_url(&self, params: &SearchParams) -> Url {
        let mut url = self
            .origin
            .join(SEARCH_PATH)
            .expect("search path joins onto origin");

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("listing_type", params.listing_type.as_query());
            query.append_pair("property_segments", "residential");
            query.append_pair("sort_by", "recency");
            query.append_pair("sort_order", "desc");
            query.append_pair("page_size", &params.page_size().to_string());

            if params.property_type != PropertyType::All {
                query.append_pair("main_category", params.property_type.as_token());
            }
            if params.listing_type == ListingType::Rent {
                query.append_pair("rental_type", "unit");
            }
            if let Some((query_type, query_id)) = params.location_filter() {
                query.append_pair("query_type", query_type);
                query.append_pair("query_ids", query_id);
            }
            if let Some(min) = params.min_price {
                query.append_pair("price_min", &min.to_string());
            }
            if let Some(max) = params.max_price {
                query.append_pair("price_max", &max.to_string());
            }
            if let Some(min) = params.min_bedrooms {
                query.append_pair("bedrooms_min", &min.to_string());
            }
            if let Some(max) = params.max_bedrooms {
                query.append_pair("bedrooms_max", &max.to_string());
            }
        }

        url
    }

    /// Search under the given fetch policy.
    pub async fn search(
        &self,
        client: &HttpClient,
        params: &SearchParams,
        policy: FetchPolicy,
    ) -> Result<Vec<Listing>, SourceError> {
        apply_policy(self.fetch(client, params).await, Source::NinetyNine, policy)
    }

    async fn fetch(
        &self,
        client: &HttpClient,
        params: &SearchParams,
    ) -> Result<Vec<Listing>, SourceError> {
        let url = self.search_url(params);
        tracing::debug!(%url, "querying 99.co");

        let response = client.get(url, &[("accept", "application/json")]).await?;
        if !response.is_success() {
            return Err(SourceError::Http {
                status: response.status,
            });
        }

        let body: SearchResponse = serde_json::from_str(&response.body)?;
        let raw = body.first_section_listings();

        let listings = raw
            .into_iter()
            .filter(|listing| passes_filters(listing, params))
            .map(|listing| into_listing(listing, &self.origin))
            .collect();

        Ok(listings)
    }
}

impl Default for NinetyNineSource {
    fn default() -> Self {
        Self::new()
    }
}

// ── Typed response payload ───────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchResponse {
    data: Option<ResponseData>,
}

impl SearchResponse {
    /// The first section's listings; empty when any level is absent.
    fn first_section_listings(self) -> Vec<RawListing> {
        self.data
            .and_then(|data| data.sections)
            .and_then(|mut sections| {
                if sections.is_empty() {
                    None
                } else {
                    Some(sections.swap_remove(0))
                }
            })
            .and_then(|section| section.listings)
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ResponseData {
    sections: Option<Vec<Section>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Section {
    listings: Option<Vec<RawListing>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawListing {
    id: Option<String>,
    address_line_1: Option<String>,
    project_name: Option<String>,
    date_formatted: Option<String>,
    /// Relative path of the listing page on the HTML site.
    listing_url: Option<String>,
    attributes: Option<Attributes>,
    within_distance_from_query: Option<DistanceFromQuery>,
    user: Option<Lister>,
}

impl RawListing {
    fn walk_time(&self) -> Option<u32> {
        self.within_distance_from_query
            .as_ref()
            .and_then(|distance| distance.closest_mrt.as_ref())
            .and_then(|mrt| mrt.walking_time_in_mins)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Attributes {
    price: Option<f64>,
    price_formatted: Option<String>,
    bedrooms: Option<u32>,
    bedrooms_formatted: Option<String>,
    bathrooms: Option<u32>,
    bathrooms_formatted: Option<String>,
    area_size: Option<f64>,
    area_size_formatted: Option<String>,
    area_ppsf: Option<f64>,
    area_ppsf_formatted: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DistanceFromQuery {
    closest_mrt: Option<ClosestMrt>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ClosestMrt {
    walking_time_in_mins: Option<u32>,
    title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Lister {
    name: Option<String>,
    phone: Option<String>,
}

// ── Client-side filters and mapping ──────────────────────────────────────────

/// Independent AND-combined post-filters; a listing is kept only if it
/// passes every active one.
fn passes_filters(raw: &RawListing, params: &SearchParams) -> bool {
    if let Some(min_size) = params.min_size {
        let size = raw
            .attributes
            .as_ref()
            .and_then(|attrs| attrs.area_size)
            .unwrap_or(0.0);
        if size < min_size {
            return false;
        }
    }

    if let Some(max_walk) = params.max_walk_mins {
        // No walk time counts as a failure: the listing cannot prove it is
        // within range of the queried station.
        match raw.walk_time() {
            Some(walk) if walk <= max_walk => {}
            _ => return false,
        }
    }

    true
}

fn into_listing(raw: RawListing, origin: &Url) -> Listing {
    let walk_time = raw.walk_time();
    let attrs = raw.attributes.unwrap_or_default();
    let mrt = raw
        .within_distance_from_query
        .and_then(|distance| distance.closest_mrt);
    let lister = raw.user.unwrap_or_default();

    let url = raw
        .listing_url
        .and_then(|path| origin.join(&path).ok())
        .map(String::from)
        .unwrap_or_default();

    Listing {
        source: Source::NinetyNine,
        id: raw.id.unwrap_or_default(),
        address: raw.address_line_1.unwrap_or_default(),
        project: raw.project_name,
        price: attrs.price.unwrap_or(0.0),
        price_formatted: attrs.price_formatted.unwrap_or_default(),
        beds: attrs.bedrooms.unwrap_or(0),
        beds_formatted: attrs.bedrooms_formatted.unwrap_or_default(),
        baths: attrs.bathrooms,
        baths_formatted: attrs.bathrooms_formatted,
        size: attrs.area_size,
        size_formatted: attrs.area_size_formatted,
        psf: attrs.area_ppsf,
        psf_formatted: attrs.area_ppsf_formatted,
        property_type: None,
        posted: raw.date_formatted,
        walk_time,
        nearest_mrt: mrt.and_then(|mrt| mrt.title),
        agent_name: lister.name,
        agent_phone: lister.phone,
        url,
    }
}
