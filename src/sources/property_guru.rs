//! PropertyGuru search adapter.
//!
//! The site has no public JSON API; its search page ships the result set
//! inside a `__NEXT_DATA__` script tag, so the adapter fetches HTML with a
//! mobile browser User-Agent (the bot-mitigation layer blocks default
//! client strings), extracts the embedded JSON textually, and walks a typed
//! mirror of `props.pageProps.pageData.data.listingsData`.
//!
//! Limitation: `min_size` filtering is not supported here. The floor-area
//! field is a display string with no reliably comparable numeric twin, so
//! the bound is ignored for this source.

use crate::extract;
use crate::http::HttpClient;
use crate::model::{Listing, PropertyType, SearchParams, Source};
use crate::sources::{apply_policy, FetchPolicy, SourceError};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

pub const DEFAULT_ORIGIN: &str = "https://www.propertyguru.com.sg";

/// Mobile Safari string; the site serves a bot challenge to default
/// client User-Agents.
const MOBILE_USER_AGENT: &str =
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15";

/// Adapter bound to an origin. Production code uses
/// [`PropertyGuruSource::new`]; tests point it at a mock server.
#[derive(Debug, Clone)]
pub struct PropertyGuruSource {
    origin: Url,
}

impl PropertyGuruSource {
    pub fn new() -> Self {
        Self::with_origin(Url::parse(DEFAULT_ORIGIN).expect("default origin is a valid url"))
    }

    pub fn with_origin(origin: Url) -> Self {
        Self { origin }
    }

    /// Build the search page URL.
    ///
    /// The path is `<segment>-for-<rent|sale>` where the segment is the
    /// property-type token, or the generic `property` when no category
    /// filter applies. Location is free text only (the site has no
    /// location-ID taxonomy), and each numeric bound is set only when the
    /// parameter is.
    pub fn search_url(&self, params: &SearchParams) -> Url {
        let segment = match params.property_type {
            PropertyType::All => "property",
            other => other.as_token(),
        };
        let path = format!("/{segment}-for-{}", params.listing_type.as_query());
        let mut url = self.origin.join(&path).expect("search path joins onto origin");

        let mut pairs: Vec<(&str, String)> = Vec::new();
        if let Some(freetext) = &params.freetext {
            pairs.push(("freetext", freetext.clone()));
        }
        if let Some(min) = params.min_price {
            pairs.push(("minprice", min.to_string()));
        }
        if let Some(max) = params.max_price {
            pairs.push(("maxprice", max.to_string()));
        }
        if let Some(beds) = params.min_bedrooms {
            pairs.push(("beds", beds.to_string()));
        }
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
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
        apply_policy(
            self.fetch(client, params).await,
            Source::PropertyGuru,
            policy,
        )
    }

    async fn fetch(
        &self,
        client: &HttpClient,
        params: &SearchParams,
    ) -> Result<Vec<Listing>, SourceError> {
        let url = self.search_url(params);
        tracing::debug!(%url, "querying PropertyGuru");

        let response = client.get(url, &[("user-agent", MOBILE_USER_AGENT)]).await?;
        if !response.is_success() {
            return Err(SourceError::Http {
                status: response.status,
            });
        }

        let payload =
            extract::embedded_json(&response.body).ok_or(SourceError::MissingEmbeddedData)?;
        let next_data: NextData = serde_json::from_str(payload)?;

        let listings = next_data
            .listings()
            .into_iter()
            .filter_map(|envelope| envelope.listing_data)
            .filter(|listing| passes_walk_filter(listing, params))
            .map(|listing| into_listing(listing, &self.origin))
            .collect();

        Ok(listings)
    }
}

impl Default for PropertyGuruSource {
    fn default() -> Self {
        Self::new()
    }
}

// ── Typed embedded payload ───────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NextData {
    props: Option<Props>,
}

impl NextData {
    /// Listing envelopes at `props.pageProps.pageData.data.listingsData`;
    /// empty when any level is absent.
    fn listings(self) -> Vec<ListingEnvelope> {
        self.props
            .and_then(|props| props.page_props)
            .and_then(|page_props| page_props.page_data)
            .and_then(|page_data| page_data.data)
            .and_then(|data| data.listings_data)
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Props {
    page_props: Option<PageProps>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PageProps {
    page_data: Option<PageData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PageData {
    data: Option<PageDataInner>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PageDataInner {
    listings_data: Option<Vec<ListingEnvelope>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ListingEnvelope {
    listing_data: Option<RawListing>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawListing {
    id: Option<i64>,
    full_address: Option<String>,
    localized_title: Option<String>,
    price: Option<PriceBlock>,
    headline: Option<Headline>,
    mrt: Option<MrtBlock>,
    listing_features: Option<Value>,
}

impl RawListing {
    fn nearby_text(&self) -> Option<&str> {
        self.mrt.as_ref().and_then(|mrt| mrt.nearby_text.as_deref())
    }

    fn walk_time(&self) -> Option<u32> {
        self.nearby_text().and_then(extract::walk_minutes)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PriceBlock {
    value: Option<f64>,
    pretty: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Headline {
    price_text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct MrtBlock {
    nearby_text: Option<String>,
}

// ── Feature decoding ─────────────────────────────────────────────────────────

/// Decoded `listingFeatures` label texts.
///
/// The payload usually ships features positionally: index 0 holds a nested
/// beds/baths pair, index 1 the floor-area text, index 2 the property-type
/// label. Position is an undocumented upstream contract, so a map shape
/// with named keys is tried first and the positional layout is the
/// fallback; a contract test pinned to a captured payload catches drift.
#[derive(Debug, Default, PartialEq)]
struct FeatureFields {
    beds_text: Option<String>,
    baths_text: Option<String>,
    size_text: Option<String>,
    type_text: Option<String>,
}

impl FeatureFields {
    fn decode(features: Option<&Value>) -> Self {
        let Some(features) = features else {
            return Self::default();
        };

        if let Some(map) = features.as_object() {
            return Self {
                beds_text: label_text(map.get("beds")),
                baths_text: label_text(map.get("baths")),
                size_text: label_text(map.get("area")),
                type_text: label_text(map.get("type")),
            };
        }

        let Some(array) = features.as_array() else {
            return Self::default();
        };
        Self {
            beds_text: label_text(array.first().and_then(|pair| pair.get(0))),
            baths_text: label_text(array.first().and_then(|pair| pair.get(1))),
            size_text: label_text(array.get(1)),
            type_text: label_text(array.get(2)),
        }
    }
}

/// Label text of one feature descriptor: either a bare string or an
/// object carrying a `text` field.
fn label_text(value: Option<&Value>) -> Option<String> {
    let value = value?;
    match value {
        Value::String(text) => Some(text.clone()),
        _ => value
            .get("text")
            .and_then(Value::as_str)
            .map(str::to_owned),
    }
}

// ── Client-side filter and mapping ───────────────────────────────────────────

/// Walk-time filter: minutes are pattern-extracted from the free-text
/// nearby blurb; an unextractable walk time counts as unknown and is
/// rejected while the filter is active.
fn passes_walk_filter(raw: &RawListing, params: &SearchParams) -> bool {
    let Some(max_walk) = params.max_walk_mins else {
        return true;
    };
    matches!(raw.walk_time(), Some(walk) if walk <= max_walk)
}

fn into_listing(raw: RawListing, origin: &Url) -> Listing {
    let walk_time = raw.walk_time();
    let nearby = raw
        .mrt
        .and_then(|mrt| mrt.nearby_text)
        .filter(|text| !text.is_empty());

    let features = FeatureFields::decode(raw.listing_features.as_ref());
    let beds_text = features.beds_text.filter(|text| !text.is_empty());
    let baths_text = features.baths_text.filter(|text| !text.is_empty());
    let size_text = features.size_text.filter(|text| !text.is_empty());

    let beds = beds_text
        .as_deref()
        .and_then(extract::leading_int)
        .unwrap_or(0);
    let baths = baths_text.as_deref().and_then(extract::leading_int);
    let size = size_text
        .as_deref()
        .and_then(extract::leading_int)
        .map(f64::from);

    let price = raw.price.unwrap_or_default();
    let price_formatted = price
        .pretty
        .or(raw.headline.and_then(|headline| headline.price_text))
        .unwrap_or_default();

    let id = raw.id.map(|id| id.to_string()).unwrap_or_default();
    let url = origin
        .join(&format!("/listing/{id}"))
        .map(String::from)
        .unwrap_or_default();

    Listing {
        source: Source::PropertyGuru,
        id,
        address: raw.full_address.unwrap_or_default(),
        project: raw.localized_title.filter(|title| !title.is_empty()),
        price: price.value.unwrap_or(0.0),
        price_formatted,
        beds,
        beds_formatted: beds_text
            .map(|text| format!("{text} Beds"))
            .unwrap_or_default(),
        baths,
        baths_formatted: baths_text.map(|text| format!("{text} Baths")),
        size,
        size_formatted: size_text,
        psf: None,
        psf_formatted: None,
        property_type: features.type_text.filter(|text| !text.is_empty()),
        posted: None,
        walk_time,
        nearest_mrt: nearby,
        agent_name: None,
        agent_phone: None,
        url,
    }
}
