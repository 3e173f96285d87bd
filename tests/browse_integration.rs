use assert_cmd::Command;
use predicates::prelude::*;

/// Writes a small three-item catalog and returns its path.
fn write_catalog(dir: &std::path::Path) -> std::path::PathBuf {
    let catalog = serde_json::json!([
        {
            "id": "3f9f3f60-9d5b-4f88-a6ea-2f35c2f1a001",
            "name": "Aurora Phone",
            "category": "Electronics",
            "subcategory": "Phones",
            "brand": "Acme",
            "color": "Red",
            "storage": "128GB",
            "our_price": 500,
            "mrp": 600,
            "rating": 4.2,
            "stock": 3,
            "created_at": "2026-08-01T10:00:00Z",
            "tags": ["5g"]
        },
        {
            "id": "3f9f3f60-9d5b-4f88-a6ea-2f35c2f1a002",
            "name": "Borealis Phone",
            "category": "Electronics",
            "subcategory": "Phones",
            "brand": "Bolt",
            "color": "Blue",
            "storage": "256GB",
            "our_price": 1500,
            "mrp": 1700,
            "rating": 3.1,
            "stock": 0,
            "created_at": "2026-07-15T10:00:00Z"
        },
        {
            "id": "3f9f3f60-9d5b-4f88-a6ea-2f35c2f1a003",
            "name": "Cotton Tee",
            "category": "Clothing",
            "subcategory": "Tops",
            "brand": "Weave",
            "color": "Red",
            "our_price": 25,
            "mrp": 30,
            "rating": 4.9,
            "stock": 12,
            "created_at": "2026-08-10T10:00:00Z",
            "attributes": { "material": "Cotton" }
        }
    ]);

    let path = dir.join("catalog.json");
    std::fs::write(&path, serde_json::to_string_pretty(&catalog).unwrap()).unwrap();
    path
}

fn vitrine() -> Command {
    Command::cargo_bin("vitrine").unwrap()
}

#[test]
fn browse_lists_the_whole_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(dir.path());

    vitrine()
        .arg("browse")
        .arg("--catalog")
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 1-3 of 3 products"))
        .stdout(predicate::str::contains("Aurora Phone"))
        .stdout(predicate::str::contains("Cotton Tee"));
}

#[test]
fn browse_applies_filter_flags_and_prints_a_share_string() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(dir.path());

    vitrine()
        .arg("browse")
        .arg("--catalog")
        .arg(&catalog)
        .arg("--color")
        .arg("Red")
        .arg("--max-price")
        .arg("1000")
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 1-2 of 2 products"))
        .stdout(predicate::str::contains("Aurora Phone"))
        .stdout(predicate::str::contains("Cotton Tee"))
        .stdout(predicate::str::contains("Borealis Phone").not())
        .stdout(predicate::str::contains("color=Red"))
        .stdout(predicate::str::contains("maxPrice=1000"));
}

#[test]
fn a_shared_params_string_reproduces_the_filtered_view() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(dir.path());

    vitrine()
        .arg("browse")
        .arg("--catalog")
        .arg(&catalog)
        .arg("--params")
        .arg("color=Red&maxPrice=1000")
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 1-2 of 2 products"))
        .stdout(predicate::str::contains("Borealis Phone").not());
}

#[test]
fn free_text_query_narrows_by_every_token() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(dir.path());

    vitrine()
        .arg("browse")
        .arg("--catalog")
        .arg(&catalog)
        .arg("-q")
        .arg("acme phone")
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 1-1 of 1 products"))
        .stdout(predicate::str::contains("Aurora Phone"));
}

#[test]
fn in_stock_flag_excludes_sold_out_items() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(dir.path());

    vitrine()
        .arg("browse")
        .arg("--catalog")
        .arg(&catalog)
        .arg("--in-stock")
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 1-2 of 2 products"))
        .stdout(predicate::str::contains("Borealis Phone").not());
}

#[test]
fn listing_columns_align_regardless_of_stock() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(dir.path());

    let output = vitrine()
        .arg("browse")
        .arg("--catalog")
        .arg(&catalog)
        .env("NO_COLOR", "1")
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();

    // Every product row ends at the same column, with or without the
    // out-of-stock marker.
    let widths: Vec<usize> = stdout
        .lines()
        .filter(|l| l.contains('₹'))
        .map(|l| l.chars().count())
        .collect();
    assert_eq!(widths.len(), 3);
    assert!(widths.iter().all(|w| *w == widths[0]), "{:?}", widths);
}

#[test]
fn scope_flags_limit_facets_and_results() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(dir.path());

    vitrine()
        .arg("browse")
        .arg("--catalog")
        .arg(&catalog)
        .arg("--category")
        .arg("clothing")
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 1-1 of 1 products"))
        .stdout(predicate::str::contains("Cotton Tee"));

    vitrine()
        .arg("facets")
        .arg("--catalog")
        .arg(&catalog)
        .arg("--category")
        .arg("clothing")
        .assert()
        .success()
        .stdout(predicate::str::contains("Material"))
        .stdout(predicate::str::contains("Storage").not());
}

#[test]
fn facets_lists_the_derived_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(dir.path());

    vitrine()
        .arg("facets")
        .arg("--catalog")
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("Price"))
        .stdout(predicate::str::contains("Brand"))
        .stdout(predicate::str::contains("4 Stars & Up"))
        .stdout(predicate::str::contains("[ ] Red"));
}

#[test]
fn missing_catalog_file_is_an_error() {
    vitrine()
        .arg("browse")
        .arg("--catalog")
        .arg("/nonexistent/catalog.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Catalog file not found"));
}

#[test]
fn empty_result_set_is_reported_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(dir.path());

    vitrine()
        .arg("browse")
        .arg("--catalog")
        .arg(&catalog)
        .arg("-q")
        .arg("gravity boots")
        .assert()
        .success()
        .stdout(predicate::str::contains("No products found"));
}
