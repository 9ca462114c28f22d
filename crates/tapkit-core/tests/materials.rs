use tapkit_core::data::materials::*;

#[test]
fn test_material_id_display() {
    let id = MaterialId("T1".to_string());
    assert_eq!(id.to_string(), "T1");
}

#[test]
fn test_standard_library_contains_builtins() {
    let library = init_standard_library();
    assert_eq!(library.len(), 2);
    assert_eq!(library.get_material("T1").unwrap().name, "EPS T1");
    assert_eq!(library.get_material("T2").unwrap().feed_rate, 500.0);
}

#[test]
fn test_ensure_builtin_keeps_user_overrides() {
    let mut custom = MaterialProfile::eps_t1();
    custom.feed_rate = 450.0;

    let mut library = MaterialLibrary::from_profiles(vec![custom]).unwrap();
    library.ensure_builtin();

    assert_eq!(library.len(), 2);
    assert_eq!(library.get_material("T1").unwrap().feed_rate, 450.0);
    assert!(library.get_material("T2").is_some());
}

#[test]
fn test_require_reports_missing_id() {
    let library = init_standard_library();
    let err = library.require("T7").unwrap_err();
    assert_eq!(err.to_string(), "Material 'T7' not found");
}

#[test]
fn test_get_all_materials_sorted() {
    let library = init_standard_library();
    let ids: Vec<_> = library
        .get_all_materials()
        .iter()
        .map(|m| m.id.as_str().to_string())
        .collect();
    assert_eq!(ids, vec!["T1", "T2"]);
}

#[test]
fn test_profile_toml_shape() {
    let profile = MaterialProfile::eps_t2();
    let text = toml::to_string(&profile).unwrap();
    assert!(text.contains("id = \"T2\""));
    assert!(text.contains("max_distance = 8.0"));

    let back: MaterialProfile = toml::from_str(&text).unwrap();
    assert_eq!(back, profile);
}

#[test]
fn test_library_json_round_trip() {
    let library = init_standard_library();
    let json = serde_json::to_string(&library).unwrap();
    let back: MaterialLibrary = serde_json::from_str(&json).unwrap();
    assert_eq!(back.len(), 2);
    assert_eq!(back.get_material("T2"), library.get_material("T2"));
}

#[test]
fn test_tiers_display_matches_classification_bounds() {
    let tiers = MaterialProfile::eps_t1().tiers;
    assert_eq!(tiers.to_string(), "<5mm: 0s | <50mm: 0.3s | >=50mm: 0.5s");
}
