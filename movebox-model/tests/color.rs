use movebox_model::color::{NAMED_COLORS, nearest_color};
use movebox_model::{ModelError, canonical_color, lookup_color};

#[test]
fn plain_name_is_canonical() {
    assert_eq!(canonical_color("blue").unwrap(), "blue");
}

#[test]
fn name_case_and_spacing_are_ignored() {
    assert_eq!(canonical_color("Light Blue").unwrap(), "lightblue");
    assert_eq!(canonical_color("  DARK_GREEN ").unwrap(), "darkgreen");
    assert_eq!(canonical_color("sky-blue").unwrap(), "skyblue");
}

#[test]
fn grey_spelling_maps_to_gray() {
    assert_eq!(canonical_color("Light Grey").unwrap(), "lightgray");
    assert_eq!(canonical_color("grey").unwrap(), "gray");
}

#[test]
fn hex_triplets() {
    assert_eq!(canonical_color("#ff0000").unwrap(), "red");
    assert_eq!(canonical_color("#ADD8E6").unwrap(), "lightblue");
    assert_eq!(canonical_color("#00f").unwrap(), "blue");
}

#[test]
fn rgb_triples() {
    assert_eq!(canonical_color("rgb(255, 165, 0)").unwrap(), "orange");
    assert_eq!(canonical_color("0,128,0").unwrap(), "green");
}

#[test]
fn off_palette_rgb_picks_nearest() {
    assert_eq!(canonical_color("#fe0101").unwrap(), "red");
    assert_eq!(nearest_color((250, 250, 250)).name, "snow");
}

#[test]
fn unknown_names_are_rejected() {
    assert_eq!(
        canonical_color("blurple"),
        Err(ModelError::InvalidColor("blurple".to_string()))
    );
    assert!(canonical_color("").is_err());
    assert!(canonical_color("#12345").is_err());
    assert!(canonical_color("rgb(300, 0, 0)").is_err());
}

#[test]
fn hex_and_rgb_accessors() {
    let c = lookup_color("orange").unwrap();
    assert_eq!(c.hex(), "#ffa500");
    let (r, g, b) = c.rgb_f32();
    assert!((r - 1.0).abs() < f32::EPSILON);
    assert!(g > 0.6 && g < 0.7);
    assert_eq!(b, 0.0);
}

#[test]
fn palette_names_are_lowercase_and_unique() {
    let mut names: Vec<&str> = NAMED_COLORS.iter().map(|c| c.name).collect();
    assert!(names.iter().all(|n| n.chars().all(|c| c.is_ascii_lowercase())));
    let total = names.len();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), total);
}
