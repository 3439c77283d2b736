//! `propscout fetch <source>` — query a single source, failing loudly.
//!
//! Unlike `search`, this runs under the strict fetch policy: a non-2xx
//! status, a missing embedded payload, or a parse failure propagates as an
//! error and the process exits nonzero.

use crate::cli::SearchArgs;
use crate::http::HttpClient;
use crate::model::Source;
use crate::report;
use crate::sources::ninety_nine::NinetyNineSource;
use crate::sources::property_guru::PropertyGuruSource;
use crate::sources::FetchPolicy;
use anyhow::{Context, Result};

/// Run a single-source fetch.
pub async fn run(source: Source, args: &SearchArgs, json: bool) -> Result<()> {
    let params = args.to_params();
    let client = HttpClient::new(args.request_timeout());

    let listings = match source {
        Source::NinetyNine => {
            NinetyNineSource::new()
                .search(&client, &params, FetchPolicy::Strict)
                .await
        }
        Source::PropertyGuru => {
            PropertyGuruSource::new()
                .search(&client, &params, FetchPolicy::Strict)
                .await
        }
    }
    .with_context(|| format!("{source} fetch failed"))?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "source": source.to_string(),
                "total": listings.len(),
                "listings": listings,
            }))?
        );
        return Ok(());
    }

    print!("{}", report::render(&listings, args.limit));
    Ok(())
}
