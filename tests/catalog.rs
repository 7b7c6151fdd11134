use std::fs;
use std::io::ErrorKind;

use cinnabar_tree::catalog::csv::{load_products, parse_line};
use cinnabar_tree::{Product, ProductCatalog};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write_catalog(dir: &TempDir, name: &str, lines: &[&str]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, lines.join("\n")).expect("failed to write test catalog");
    path
}

#[test]
fn load_simple_products() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(
        &dir,
        "simple.csv",
        &[
            "P001,Basic Widget,Electronics,29.99",
            "P002,Simple Gadget,Home,15.50",
            "P003,Plain Item,Office,8.25",
        ],
    );

    let products = load_products(&path).unwrap();

    assert_eq!(products.len(), 3);
    assert_eq!(products[0].id(), "P001");
    assert_eq!(products[0].name(), "Basic Widget");
    assert_eq!(products[0].category(), "Electronics");
    assert_eq!(products[0].price(), 29.99);
}

#[test]
fn load_quoted_and_escaped_fields() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(
        &dir,
        "quoted.csv",
        &[
            r#"B001,"Widget, Standard Edition",Electronics,29.99"#,
            r#"B002,Super Gadget,"Home|Kitchen|Appliances",149.50"#,
            r#"B003,"The ""Ultimate"" Tool","Tools|Hardware",89.99"#,
            "B004,Simple Item,Office,12.50",
            r#"B005,"Complex Product, with ""Quotes"" and Commas","Category1|Category2|Category3",199.99"#,
        ],
    );

    let products = load_products(&path).unwrap();

    assert_eq!(products.len(), 5);
    assert_eq!(products[0].name(), "Widget, Standard Edition");
    assert_eq!(products[1].category(), "Home|Kitchen|Appliances");
    assert_eq!(products[2].name(), r#"The "Ultimate" Tool"#);
    assert_eq!(products[4].name(), r#"Complex Product, with "Quotes" and Commas"#);
    assert_eq!(products[4].price(), 199.99);
}

#[test]
fn load_skips_blank_and_malformed_lines() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(
        &dir,
        "mixed.csv",
        &[
            "P001,Widget,Electronics,29.99",
            "",
            "P002,BadLine,TooFewFields",
            "   ",
            "P003,Tool,Hardware,49.99",
            "P004,Item,Office,-5.00",
            "P005,Device,Tech,19.99",
        ],
    );

    let products = load_products(&path).unwrap();
    let ids: Vec<&str> = products.iter().map(Product::id).collect();

    assert_eq!(ids, ["P001", "P003", "P005"]);
}

#[test]
fn load_empty_file() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(&dir, "empty.csv", &[]);

    let products = load_products(&path).unwrap();
    assert!(products.is_empty());
}

#[test]
fn load_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does_not_exist.csv");

    let err = load_products(&missing).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn parse_line_round_trips_through_display() {
    let product = parse_line("1001,Wireless Mouse,Electronics|Accessories,29.99").unwrap();
    let report = product.to_string();

    assert!(report.contains("Product ID: 1001"));
    assert!(report.contains("Name: Wireless Mouse"));
    assert!(report.contains("Category: Electronics|Accessories"));
    assert!(report.contains("Price: $29.99"));
}

#[test]
fn catalog_load_then_search() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(
        &dir,
        "catalog.csv",
        &[
            "1003,Desk Lamp,Home|Lighting,34.00",
            "1001,Wireless Mouse,Electronics|Accessories,29.99",
            r#"1002,"Apple iPhone 14, 128GB",Smartphones|Electronics,999.99"#,
        ],
    );

    let mut catalog = ProductCatalog::new();
    let loaded = catalog.load_csv(&path).unwrap();

    assert_eq!(loaded, 3);
    assert_eq!(catalog.len(), 3);
    assert!(catalog.is_valid());

    let phone = catalog.find("1002").unwrap();
    assert_eq!(phone.name(), "Apple iPhone 14, 128GB");
    assert_eq!(phone.price(), 999.99);

    assert!(catalog.find("9999").is_none());
    assert_eq!(catalog.ids(), ["1001", "1002", "1003"]);
}

#[test]
fn catalog_reload_updates_duplicates() {
    let dir = TempDir::new().unwrap();
    let first = write_catalog(&dir, "v1.csv", &["P001,OriginalName,Cat1,10.00"]);
    let second = write_catalog(&dir, "v2.csv", &["P001,UpdatedName,Cat2,15.00"]);

    let mut catalog = ProductCatalog::new();
    catalog.load_csv(&first).unwrap();
    catalog.load_csv(&second).unwrap();

    assert_eq!(catalog.len(), 1);
    let product = catalog.find("P001").unwrap();
    assert_eq!(product.name(), "UpdatedName");
    assert_eq!(product.price(), 15.0);
    assert!(catalog.is_valid());
}

#[test]
fn catalog_scales_to_many_records() {
    let dir = TempDir::new().unwrap();
    let lines: Vec<String> = (1..=500)
        .map(|i| format!("P{i:05},Product{i},Cat,{}.00", i * 10))
        .collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let path = write_catalog(&dir, "large.csv", &refs);

    let mut catalog = ProductCatalog::new();
    catalog.load_csv(&path).unwrap();

    assert_eq!(catalog.len(), 500);
    assert!(catalog.is_valid());
    for i in (1..=500).step_by(50) {
        let id = format!("P{i:05}");
        assert!(catalog.find(&id).is_some(), "missing {id}");
    }
    // 2 * log2(501) rounds down to 17.
    assert!(catalog.height() <= 17);
}
