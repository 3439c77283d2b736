//! Isolated text-pattern extraction helpers.
//!
//! Everything here takes text-shaped data and returns an `Option`, so the
//! rest of the system never inspects raw text directly: raw HTML in,
//! optional embedded-JSON text out; a free-text blurb in, an optional
//! integer out.

use regex::Regex;

/// Pull the raw JSON text out of a page's `__NEXT_DATA__` script tag.
///
/// The tag is matched textually rather than by parsing the DOM: it is a
/// single well-known script element whose body contains no `<`. Returns
/// `None` when the page carries no embedded payload (an error page, a bot
/// challenge, or a site redesign).
pub fn embedded_json(html: &str) -> Option<&str> {
    let re = Regex::new(r#"<script id="__NEXT_DATA__"[^>]*>([^<]+)</script>"#)
        .expect("embedded data regex is valid");
    re.captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Extract the minutes figure from a nearby-transit blurb such as
/// "5 mins walk to Redhill MRT". Returns `None` when no integer precedes
/// a "min" token.
pub fn walk_minutes(text: &str) -> Option<u32> {
    let re = Regex::new(r"(\d+)\s*min").expect("walk time regex is valid");
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

/// Leading integer of a feature label such as "3" or "1,023 sqft".
/// Thousands separators are tolerated.
pub fn leading_int(text: &str) -> Option<u32> {
    let re = Regex::new(r"^\s*(\d[\d,]*)").expect("leading int regex is valid");
    let digits = re.captures(text)?.get(1)?.as_str().replace(',', "");
    digits.parse().ok()
}
