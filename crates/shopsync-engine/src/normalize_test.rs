use super::*;

fn record(sku: &str) -> RawFeedRecord {
    RawFeedRecord {
        sku: Some(sku.to_owned()),
        description: Some("  Martillo 500g ".to_owned()),
        brand: Some("Stanley".to_owned()),
        category: Some("herramientas".to_owned()),
        section: Some("manuales".to_owned()),
        unit: Some("un".to_owned()),
        price: Some("1500".to_owned()),
        stock: Some("4".to_owned()),
        photo: None,
    }
}

// ---------------------------------------------------------------------------
// parse_price
// ---------------------------------------------------------------------------

#[test]
fn price_takes_minimum_of_valid_fragments() {
    assert_eq!(parse_price(Some("1000,1200;abc")).as_deref(), Some("1000.00"));
    assert_eq!(parse_price(Some("1200 ; 990")).as_deref(), Some("990.00"));
}

#[test]
fn price_strips_non_digits_inside_fragment() {
    assert_eq!(parse_price(Some("$ 1.500")).as_deref(), Some("1500.00"));
}

#[test]
fn price_zero_negative_and_empty_are_absent() {
    assert_eq!(parse_price(Some("0")), None);
    assert_eq!(parse_price(Some("-5")), None);
    assert_eq!(parse_price(Some(" -5 ")), None);
    assert_eq!(parse_price(Some("")), None);
    assert_eq!(parse_price(Some("abc;;")), None);
    assert_eq!(parse_price(None), None);
}

#[test]
fn price_ignores_negative_fragment_among_valid_ones() {
    assert_eq!(parse_price(Some("-5,800")).as_deref(), Some("800.00"));
}

// ---------------------------------------------------------------------------
// parse_stock
// ---------------------------------------------------------------------------

#[test]
fn stock_reads_leading_integer() {
    assert_eq!(parse_stock(Some("12")), 12);
    assert_eq!(parse_stock(Some(" 7 unidades")), 7);
    assert_eq!(parse_stock(Some("3.9")), 3);
    assert_eq!(parse_stock(Some("+2")), 2);
}

#[test]
fn stock_clamps_bad_values_to_zero() {
    assert_eq!(parse_stock(None), 0);
    assert_eq!(parse_stock(Some("")), 0);
    assert_eq!(parse_stock(Some("n/a")), 0);
    assert_eq!(parse_stock(Some("-3")), 0);
    assert_eq!(parse_stock(Some("99999999999999999999999")), 0);
}

// ---------------------------------------------------------------------------
// normalize_records
// ---------------------------------------------------------------------------

#[test]
fn builds_canonical_product() {
    let products = normalize_records(&[record("A-1")]);
    assert_eq!(products.len(), 1);
    let p = &products[0];
    assert_eq!(p.sku, "A-1");
    assert_eq!(p.title, "Martillo 500g");
    assert_eq!(p.body_html, "<p>Martillo 500g</p>");
    assert_eq!(p.vendor, "Stanley");
    assert_eq!(p.tags, vec!["HERRAMIENTAS", "MANUALES", "STANLEY", "UN"]);
    assert_eq!(p.tags_joined(), "HERRAMIENTAS, MANUALES, STANLEY, UN");
    assert_eq!(p.image, None);
    assert_eq!(p.variant.sku, "A-1");
    assert_eq!(p.variant.price, "1500.00");
    assert_eq!(p.variant.inventory_quantity, 4);
    assert_eq!(p.variant.option1, "Default Title");
    assert_eq!(p.variant.inventory_management, "shopify");
    assert_eq!(p.options, vec!["Title"]);
}

#[test]
fn first_record_per_sku_wins() {
    let mut second = record("A-1");
    second.description = Some("Otro".to_owned());
    let products = normalize_records(&[record("A-1"), second, record("B-2")]);
    let skus: Vec<&str> = products.iter().map(|p| p.sku.as_str()).collect();
    assert_eq!(skus, vec!["A-1", "B-2"]);
    assert_eq!(products[0].title, "Martillo 500g");
}

#[test]
fn sku_is_trimmed_before_dedupe() {
    let products = normalize_records(&[record(" A-1 "), record("A-1")]);
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].sku, "A-1");
}

#[test]
fn records_without_sku_are_skipped() {
    let mut missing = record("x");
    missing.sku = None;
    let products = normalize_records(&[missing, record("   "), record("C-3")]);
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].sku, "C-3");
}

#[test]
fn absent_price_becomes_sentinel() {
    let mut r = record("A-1");
    r.price = Some("0".to_owned());
    let products = normalize_records(&[r]);
    assert_eq!(products[0].variant.price, ABSENT_PRICE);
    assert!(!products[0].has_price());
}

#[test]
fn empty_tag_fields_are_dropped() {
    let mut r = record("A-1");
    r.section = Some("  ".to_owned());
    r.unit = None;
    let products = normalize_records(&[r]);
    assert_eq!(products[0].tags, vec!["HERRAMIENTAS", "STANLEY"]);
}

#[test]
fn duplicate_tag_values_are_kept() {
    let mut r = record("A-1");
    r.category = Some("stanley".to_owned());
    let products = normalize_records(&[r]);
    assert_eq!(products[0].tags, vec!["STANLEY", "MANUALES", "STANLEY", "UN"]);
}

#[test]
fn missing_description_yields_empty_title() {
    let mut r = record("A-1");
    r.description = None;
    let products = normalize_records(&[r]);
    assert_eq!(products[0].title, "");
    assert_eq!(products[0].body_html, "<p></p>");
}

#[test]
fn photo_backslashes_become_slashes_and_are_encoded() {
    let mut r = record("A-1");
    r.photo = Some(r"https://img.example.com\fotos\martillo 500g.jpg".to_owned());
    let products = normalize_records(&[r]);
    assert_eq!(
        products[0].image.as_deref(),
        Some("https://img.example.com/fotos/martillo%20500g.jpg")
    );
}

#[test]
fn photo_encoding_keeps_uri_delimiters_and_escapes_non_ascii() {
    let mut r = record("A-1");
    r.photo = Some("https://img.example.com/a?id=1&v=2#x/cañón.jpg".to_owned());
    let products = normalize_records(&[r]);
    assert_eq!(
        products[0].image.as_deref(),
        Some("https://img.example.com/a?id=1&v=2#x/ca%C3%B1%C3%B3n.jpg")
    );
}

#[test]
fn blank_photo_means_no_image() {
    let mut r = record("A-1");
    r.photo = Some("   ".to_owned());
    let products = normalize_records(&[r]);
    assert_eq!(products[0].image, None);
}
