// Unit tests for Estate Recs scoring factors

use estate_recs::core::factors::{
    amenity_match, clamp_unit, investment_potential, location_match, popularity, price_match,
    type_match, urgency,
};
use estate_recs::core::{NeutralTrend, NoBehavior, RecommendationScorer, UserBehavior};
use estate_recs::models::{InteractionKind, InteractionSignals, Property, RecommendationCriteria, ScoringWeights};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_weights_sum_to_exactly_one() {
    let weights = ScoringWeights::default();
    assert!((weights.sum() - 1.0).abs() < 1e-12);
}

#[test]
fn test_price_without_range_is_neutral_for_any_price() {
    for price in [0.0, 1.0, 50_000.0, 1e9] {
        assert_eq!(price_match(Some(price), None, None), 0.5);
    }
}

#[test]
fn test_price_at_ceiling_is_full_match() {
    assert_eq!(price_match(Some(100_000.0), Some(50_000.0), Some(100_000.0)), 1.0);
}

#[test]
fn test_price_at_double_ceiling_is_zero() {
    for max in [1.0, 750.0, 100_000.0, 2_500_000.0] {
        assert_eq!(price_match(Some(max * 2.0), None, Some(max)), 0.0);
    }
}

#[test]
fn test_price_below_minimum_is_constant() {
    for price in [49_999.0, 10_000.0, 1.0, 0.0] {
        assert_eq!(price_match(Some(price), Some(50_000.0), Some(100_000.0)), 0.8);
    }
}

#[test]
fn test_location_substring_is_case_insensitive() {
    assert_eq!(location_match("Greater ACCRA", &strings(&["accra"])), 1.0);
    assert_eq!(location_match("Kumasi", &strings(&["accra"])), 0.3);
}

#[test]
fn test_type_neutral_is_optimistic() {
    assert!(type_match("bungalow", &[]) > location_match("Kumasi", &[]));
}

#[test]
fn test_amenity_guards_empty_sets() {
    assert_eq!(amenity_match(&[], &[]), 0.5);
    assert_eq!(amenity_match(&strings(&["pool"]), &[]), 0.5);
}

#[test]
fn test_popularity_weights() {
    let viewed = InteractionSignals { viewed: true, ..Default::default() };
    let contacted = InteractionSignals { contacted: true, ..Default::default() };
    assert!((popularity(Some(viewed)) - 0.3).abs() < 1e-9);
    assert!((popularity(Some(contacted)) - 0.3).abs() < 1e-9);
}

#[test]
fn test_urgency_capped() {
    assert_eq!(urgency(true, true), 1.0);
}

#[test]
fn test_investment_boundary_at_reference() {
    // Exactly at the reference price per area counts as at/above
    assert_eq!(investment_potential(Some(200_000.0), Some(100.0), 2000.0), 0.4);
    assert_eq!(investment_potential(Some(199_999.0), Some(100.0), 2000.0), 0.8);
}

#[test]
fn test_clamp_handles_non_finite() {
    assert_eq!(clamp_unit(f64::INFINITY), 1.0);
    assert_eq!(clamp_unit(f64::NEG_INFINITY), 0.0);
    assert_eq!(clamp_unit(f64::NAN), 0.5);
}

#[test]
fn test_every_factor_in_unit_range_for_extreme_inputs() {
    let scorer = RecommendationScorer::default();

    let properties = vec![
        Property::default(),
        Property {
            id: "neg".to_string(),
            price: Some(-500.0),
            area: Some(-10.0),
            ..Default::default()
        },
        Property {
            id: "huge".to_string(),
            city: "Dakar".to_string(),
            price: Some(f64::MAX),
            area: Some(f64::MIN_POSITIVE),
            amenities: strings(&["a", "b", "c", "d"]),
            featured: true,
            premium: true,
            ..Default::default()
        },
        Property {
            id: "nan".to_string(),
            price: Some(f64::NAN),
            area: Some(f64::NAN),
            ..Default::default()
        },
    ];

    let criteria_sets = vec![
        RecommendationCriteria::default(),
        RecommendationCriteria {
            min_price: Some(0.0),
            max_price: Some(0.0),
            locations: strings(&["dakar"]),
            property_types: strings(&[""]),
            amenities: strings(&["a"]),
            ..Default::default()
        },
        RecommendationCriteria {
            min_price: Some(-1.0),
            max_price: Some(-100.0),
            ..Default::default()
        },
        RecommendationCriteria {
            min_price: Some(1e12),
            ..Default::default()
        },
    ];

    let mut behavior = UserBehavior::new();
    behavior.record("huge", InteractionKind::Viewed);
    behavior.record("huge", InteractionKind::Favorited);
    behavior.record("huge", InteractionKind::Contacted);

    for property in &properties {
        for criteria in &criteria_sets {
            for score in [
                scorer.score(property, criteria, &NoBehavior, &NeutralTrend),
                scorer.score(property, criteria, &behavior, &NeutralTrend),
            ] {
                let f = score.factors;
                for value in [
                    f.price_match,
                    f.location_match,
                    f.type_match,
                    f.amenity_match,
                    f.popularity,
                    f.urgency,
                    f.investment_potential,
                    f.market_trend,
                    score.total_score,
                ] {
                    assert!(
                        (0.0..=1.0).contains(&value),
                        "value {} out of range for property {}",
                        value,
                        property.id
                    );
                }
            }
        }
    }
}
