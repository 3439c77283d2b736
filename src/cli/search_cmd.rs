//! `propscout search` — query both sources and print the merged report.

use crate::aggregate;
use crate::cli::SearchArgs;
use crate::http::HttpClient;
use crate::report;
use crate::sources::ninety_nine::NinetyNineSource;
use crate::sources::property_guru::PropertyGuruSource;
use anyhow::Result;

/// Run the combined search. A failing source degrades to zero results;
/// this command never aborts on an upstream failure.
pub async fn run(args: &SearchArgs, json: bool, quiet: bool) -> Result<()> {
    let params = args.to_params();
    let client = HttpClient::new(args.request_timeout());
    let ninety_nine = NinetyNineSource::new();
    let property_guru = PropertyGuruSource::new();

    if !quiet && !json {
        eprintln!("Searching 99.co and PropertyGuru...");
    }

    let outcome = aggregate::search_all(&client, &ninety_nine, &property_guru, &params).await;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "total": outcome.listings.len(),
                "sources": {
                    "99.co": outcome.ninety_nine_count,
                    "propertyguru": outcome.property_guru_count,
                },
                "listings": outcome.listings,
            }))?
        );
        return Ok(());
    }

    if !quiet {
        eprintln!("  99.co: {} listings", outcome.ninety_nine_count);
        eprintln!("  PropertyGuru: {} listings", outcome.property_guru_count);
        eprintln!();
    }

    print!("{}", report::render(&outcome.listings, args.limit));
    Ok(())
}
