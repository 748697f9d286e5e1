//! Raw feed records to canonical products.

use std::collections::HashSet;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use shopsync_core::{CanonicalProduct, CanonicalVariant, ABSENT_PRICE};

use crate::feed::RawFeedRecord;

const DEFAULT_OPTION_VALUE: &str = "Default Title";
const DEFAULT_OPTION_NAME: &str = "Title";
const INVENTORY_MANAGEMENT: &str = "shopify";

/// ASCII bytes escaped when encoding a full URI: everything except
/// alphanumerics and `;,/?:@&=+$-_.!~*'()#`. Non-ASCII is always escaped.
const URI_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Sanitizes a raw price into a two-decimal string.
///
/// The raw text may hold several candidates separated by `,` or `;`. Each one
/// is trimmed and stripped of non-digits; negative, zero and unparsable
/// candidates are dropped. The smallest survivor wins. Returns `None` when
/// nothing survives.
#[must_use]
pub fn parse_price(raw: Option<&str>) -> Option<String> {
    raw?
        .split([',', ';'])
        .map(str::trim)
        .filter(|fragment| !fragment.starts_with('-'))
        .filter_map(|fragment| {
            let digits: String = fragment.chars().filter(char::is_ascii_digit).collect();
            digits.parse::<u64>().ok()
        })
        .filter(|&candidate| candidate > 0)
        .min()
        .map(|price| format!("{price}.00"))
}

/// Reads the leading integer of a raw stock value; missing, unparsable and
/// negative values clamp to 0.
#[must_use]
pub fn parse_stock(raw: Option<&str>) -> i64 {
    let Some(text) = raw.map(str::trim) else {
        return 0;
    };
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if negative || digits_end == 0 {
        return 0;
    }
    rest[..digits_end].parse::<i64>().unwrap_or(0)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn image_src(photo: Option<&str>) -> Option<String> {
    let photo = non_empty(photo)?.replace('\\', "/");
    Some(utf8_percent_encode(&photo, URI_ESCAPE).to_string())
}

fn canonicalize(sku: String, record: &RawFeedRecord) -> CanonicalProduct {
    let title = non_empty(record.description.as_deref())
        .unwrap_or_default()
        .to_owned();
    let tags = [&record.category, &record.section, &record.brand, &record.unit]
        .into_iter()
        .filter_map(|field| non_empty(field.as_deref()))
        .map(str::to_uppercase)
        .collect();
    let price = parse_price(record.price.as_deref()).unwrap_or_else(|| ABSENT_PRICE.to_owned());

    CanonicalProduct {
        body_html: format!("<p>{title}</p>"),
        title,
        vendor: non_empty(record.brand.as_deref())
            .unwrap_or_default()
            .to_owned(),
        tags,
        image: image_src(record.photo.as_deref()),
        variant: CanonicalVariant {
            option1: DEFAULT_OPTION_VALUE.to_owned(),
            sku: sku.clone(),
            price,
            inventory_quantity: parse_stock(record.stock.as_deref()),
            inventory_management: INVENTORY_MANAGEMENT.to_owned(),
        },
        options: vec![DEFAULT_OPTION_NAME.to_owned()],
        sku,
    }
}

/// Normalizes feed records into canonical products, preserving feed order.
///
/// Records without a SKU are skipped. When a SKU repeats, the first record
/// wins and later ones are dropped.
#[must_use]
pub fn normalize_records(records: &[RawFeedRecord]) -> Vec<CanonicalProduct> {
    let mut seen: HashSet<String> = HashSet::with_capacity(records.len());
    let mut products = Vec::with_capacity(records.len());
    let mut skipped = 0usize;

    for record in records {
        let Some(sku) = non_empty(record.sku.as_deref()) else {
            skipped += 1;
            continue;
        };
        if !seen.insert(sku.to_owned()) {
            skipped += 1;
            continue;
        }
        products.push(canonicalize(sku.to_owned(), record));
    }

    tracing::debug!(
        records = records.len(),
        products = products.len(),
        skipped,
        "normalized feed records"
    );
    products
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
