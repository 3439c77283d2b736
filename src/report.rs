//! Human-readable rendering of search results.

use crate::model::Listing;
use std::fmt::Write;

const RULE_WIDTH: usize = 80;

/// Render listings as the standard text report.
///
/// A leading total-count banner and rule, then one block per listing:
/// 1-based index, source tag, headline, price/beds/size summary (plus PSF
/// when known), optional walk-time line, optional agent contact line, and
/// the listing URL. With `limit` set, at most that many entries are shown
/// and a trailing remainder line accounts for the rest.
pub fn render(listings: &[Listing], limit: Option<usize>) -> String {
    let shown = limit.map_or(listings.len(), |max| max.min(listings.len()));
    let mut out = String::new();

    let _ = writeln!(out, "Found {} properties total:", listings.len());
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));

    for (index, listing) in listings.iter().take(shown).enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{}. [{}] {}",
            index + 1,
            listing.source,
            listing.headline()
        );

        let mut summary = format!(
            "   {} | {} | {}",
            listing.price_formatted,
            listing.beds_formatted,
            listing.size_formatted.as_deref().unwrap_or("N/A")
        );
        if let Some(psf) = &listing.psf_formatted {
            let _ = write!(summary, " | {psf}");
        }
        let _ = writeln!(out, "{summary}");

        if let Some(walk) = listing.walk_time {
            let _ = writeln!(
                out,
                "   {} min walk - {}",
                walk,
                listing.nearest_mrt.as_deref().unwrap_or_default()
            );
        }
        if let Some(phone) = &listing.agent_phone {
            let _ = writeln!(
                out,
                "   Agent: {} {}",
                listing.agent_name.as_deref().unwrap_or_default(),
                phone
            );
        }
        let _ = writeln!(out, "   {}", listing.url);
    }

    if listings.len() > shown {
        let _ = writeln!(out, "\n... and {} more results", listings.len() - shown);
    }
    let _ = writeln!(out, "\n{}", "=".repeat(RULE_WIDTH));

    out
}
