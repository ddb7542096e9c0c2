//! Loading catalogs from disk.

use std::path::PathBuf;

use navtree::{CatalogError, CatalogStore, resolve};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_load_generated_script() {
    let store = CatalogStore::load(fixture("navtree.js")).unwrap();

    assert_eq!(store.roots().len(), 1);
    let main = store.roots().get(0).unwrap();
    assert_eq!(main.label(), "KaRL");
    assert_eq!(main.children().unwrap().len(), 5);
    assert_eq!(store.len(), 10);
}

#[test]
fn test_resolve_in_generated_script() {
    let store = CatalogStore::load(fixture("navtree.js")).unwrap();

    let path = resolve("d7/d23/Utility_8h.html", store.roots()).unwrap();
    assert_eq!(path.indices(), &[0, 3, 0]);
    let path = resolve("classes.html", store.roots()).unwrap();
    assert_eq!(path.indices(), &[0, 1]);
}

#[test]
fn test_load_missing_file() {
    let result = CatalogStore::load(fixture("does-not-exist.json"));
    assert!(matches!(result, Err(CatalogError::Io { .. })));
}
