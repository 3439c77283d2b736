//! Combined search across both sources.

use crate::http::HttpClient;
use crate::model::{Listing, SearchParams, Source};
use crate::sources::ninety_nine::NinetyNineSource;
use crate::sources::property_guru::PropertyGuruSource;
use crate::sources::FetchPolicy;

/// Result of a combined search. Per-source counts are kept alongside the
/// merged list so the caller can report them; they are not an error
/// channel, a failed source simply counts zero.
#[derive(Debug)]
pub struct SearchOutcome {
    /// Merged listings, ascending by price.
    pub listings: Vec<Listing>,
    pub ninety_nine_count: usize,
    pub property_guru_count: usize,
}

/// Query both sources concurrently and merge the results.
///
/// The two fetches are independent (neither outcome affects the request
/// sent to the other), so they run under a plain all-complete join with no
/// cancellation. Each adapter runs under `FetchPolicy::Degrade`: a failing
/// source contributes zero listings instead of aborting the search.
///
/// The merge concatenates 99.co results then PropertyGuru results,
/// preserving encountered order within each source, and stable-sorts
/// ascending by numeric price: ties keep their relative order and
/// unknown (zero) prices sort first.
pub async fn search_all(
    client: &HttpClient,
    ninety_nine: &NinetyNineSource,
    property_guru: &PropertyGuruSource,
    params: &SearchParams,
) -> SearchOutcome {
    let (from_99, from_guru) = tokio::join!(
        ninety_nine.search(client, params, FetchPolicy::Degrade),
        property_guru.search(client, params, FetchPolicy::Degrade),
    );

    // Degrade resolves failures to empty lists, so both arms are Ok.
    let from_99 = from_99.unwrap_or_default();
    let from_guru = from_guru.unwrap_or_default();

    tracing::info!(source = %Source::NinetyNine, count = from_99.len(), "source results");
    tracing::info!(source = %Source::PropertyGuru, count = from_guru.len(), "source results");

    let ninety_nine_count = from_99.len();
    let property_guru_count = from_guru.len();

    let mut listings = from_99;
    listings.extend(from_guru);
    listings.sort_by(|a, b| a.price.total_cmp(&b.price));

    SearchOutcome {
        listings,
        ninety_nine_count,
        property_guru_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(source: Source, id: &str, price: f64) -> Listing {
        Listing {
            source,
            id: id.into(),
            address: String::new(),
            project: None,
            price,
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

    fn merge_and_sort(a: Vec<Listing>, b: Vec<Listing>) -> Vec<Listing> {
        let mut merged = a;
        merged.extend(b);
        merged.sort_by(|x, y| x.price.total_cmp(&y.price));
        merged
    }

    #[test]
    fn test_merge_sorts_ascending_with_source_tags() {
        let from_99 = vec![
            listing(Source::NinetyNine, "a", 5000.0),
            listing(Source::NinetyNine, "b", 3000.0),
        ];
        let from_guru = vec![listing(Source::PropertyGuru, "c", 4000.0)];

        let merged = merge_and_sort(from_99, from_guru);
        let prices: Vec<f64> = merged.iter().map(|l| l.price).collect();
        assert_eq!(prices, vec![3000.0, 4000.0, 5000.0]);

        let sources: Vec<Source> = merged.iter().map(|l| l.source).collect();
        assert_eq!(
            sources,
            vec![Source::NinetyNine, Source::PropertyGuru, Source::NinetyNine]
        );
    }

    #[test]
    fn test_merge_keeps_tie_order_stable() {
        let from_99 = vec![
            listing(Source::NinetyNine, "first", 4000.0),
            listing(Source::NinetyNine, "second", 4000.0),
        ];
        let from_guru = vec![listing(Source::PropertyGuru, "third", 4000.0)];

        let merged = merge_and_sort(from_99, from_guru);
        let ids: Vec<&str> = merged.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_unknown_prices_sort_first() {
        let from_99 = vec![listing(Source::NinetyNine, "priced", 2500.0)];
        let from_guru = vec![listing(Source::PropertyGuru, "unknown", 0.0)];

        let merged = merge_and_sort(from_99, from_guru);
        assert_eq!(merged[0].id, "unknown");
        assert_eq!(merged[1].id, "priced");
    }
}
