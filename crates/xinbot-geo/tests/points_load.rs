use std::fs;
use tempfile::TempDir;

use xinbot_geo::PointStore;

#[test]
fn loads_points_from_data_envelope() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("xin_points.json");
    fs::write(
        &path,
        r#"{"data": [
            {"title": "站點一", "address": "台南市東區", "tel": "06-1234567", "lat": 22.99, "lon": 120.21},
            {"title": "站點二", "address": "台南市北區"}
        ]}"#,
    )
    .unwrap();

    let store = PointStore::load(&path).expect("load");
    assert_eq!(store.len(), 2);

    // Only the entry with coordinates can be ranked.
    let hits = store.nearby(22.99, 120.21, 5.0, 5);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].0.title, "站點一");
    assert!(hits[0].1 < 0.1);
}
