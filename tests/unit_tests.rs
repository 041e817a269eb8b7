// Unit tests for Market Match

use market_match::core::{
    distance::haversine_distance,
    terms::{buyer_matches_supply, producer_matches_needs, resolve_active_terms, TermSet},
};
use market_match::models::Entity;

fn create_entity(product_terms: &str) -> Entity {
    Entity::new("Test Co", "San Luis Obispo", 35.2828, -120.6596, product_terms)
}

#[test]
fn test_haversine_distance_zero() {
    let distance = haversine_distance(35.2828, -120.6596, 35.2828, -120.6596);
    assert_eq!(distance, 0.0);
}

#[test]
fn test_haversine_distance_santa_barbara_to_los_angeles() {
    // Roughly 90 miles as the crow flies
    let distance = haversine_distance(34.4208, -119.6982, 34.0522, -118.2437);
    assert!(distance > 80.0 && distance < 100.0, "got {}", distance);
}

#[test]
fn test_haversine_distance_is_symmetric() {
    let points = [
        (34.4208, -119.6982),
        (-33.8688, 151.2093),
        (0.0, 179.9),
        (0.0, -179.9),
        (89.9, 0.0),
    ];

    for &(lat1, lon1) in &points {
        for &(lat2, lon2) in &points {
            let there = haversine_distance(lat1, lon1, lat2, lon2);
            let back = haversine_distance(lat2, lon2, lat1, lon1);
            assert!(
                (there - back).abs() <= 1e-9 * there.abs().max(1.0),
                "asymmetric: {} vs {}",
                there,
                back
            );
        }
    }
}

#[test]
fn test_haversine_across_antimeridian() {
    // 0.2 degrees of longitude at the equator, not 359.8
    let distance = haversine_distance(0.0, 179.9, 0.0, -179.9);
    assert!((distance - 13.82).abs() < 0.05, "got {}", distance);
}

#[test]
fn test_need_is_substring_of_supply_text() {
    let needs = TermSet::parse("egg");
    assert!(producer_matches_needs(&needs, &create_entity("eggs, dairy")));
}

#[test]
fn test_match_is_case_insensitive() {
    let needs = TermSet::parse("EGGS");
    assert!(producer_matches_needs(&needs, &create_entity("Fresh Eggs")));

    let supply = TermSet::parse("Strawberries");
    assert!(buyer_matches_supply(&supply, &create_entity("STRAWBERRIES, cream")));
}

#[test]
fn test_buyer_all_in_any_case_is_wildcard() {
    for text in ["all", "All", " ALL ", "aLl"] {
        assert!(buyer_matches_supply(&TermSet::default(), &create_entity(text)));
        assert!(buyer_matches_supply(&TermSet::parse("kale"), &create_entity(text)));
    }
}

#[test]
fn test_keyword_equal_to_own_token_keeps_candidates() {
    let own = TermSet::parse("honey");
    let overridden = resolve_active_terms(&own, Some("Honey"));

    for supply in ["raw honey", "honeycomb", "beeswax", "all", ""] {
        let producer = create_entity(supply);
        assert_eq!(
            producer_matches_needs(&own, &producer),
            producer_matches_needs(&overridden, &producer),
            "diverged on {:?}",
            supply
        );
    }
}

#[test]
fn test_keyword_with_commas_is_one_term() {
    let overridden = resolve_active_terms(&TermSet::parse("honey"), Some("eggs, dairy"));

    // "eggs, dairy" must appear verbatim in the counterpart's text
    assert!(!producer_matches_needs(&overridden, &create_entity("eggs")));
    assert!(producer_matches_needs(&overridden, &create_entity("fresh eggs, dairy")));
}
