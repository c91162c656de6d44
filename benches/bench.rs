// Criterion benchmarks for Estate Recs

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use estate_recs::core::{NeutralTrend, NoBehavior, RecommendationScorer, Recommender, UserBehavior};
use estate_recs::models::{InteractionKind, Property, RecommendationCriteria};

const CITIES: &[&str] = &["Lagos", "Abuja", "Accra", "Nairobi", "Kigali"];
const TYPES: &[&str] = &["apartment", "house", "duplex", "villa"];
const AMENITIES: &[&str] = &["pool", "gym", "parking", "security", "garden"];

fn create_property(id: usize) -> Property {
    Property {
        id: format!("p{}", id),
        title: format!("Listing {}", id),
        address: format!("{} Estate Road", id),
        city: CITIES[id % CITIES.len()].to_string(),
        price: Some(40_000.0 + (id % 50) as f64 * 5_000.0),
        currency: "USD".to_string(),
        property_type: TYPES[id % TYPES.len()].to_string(),
        bedrooms: Some(1 + (id % 5) as u32),
        bathrooms: Some(1 + (id % 3) as u32),
        area: Some(60.0 + (id % 40) as f64 * 5.0),
        amenities: AMENITIES[..(id % AMENITIES.len()) + 1]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        featured: id % 4 == 0,
        premium: id % 7 == 0,
    }
}

fn create_criteria() -> RecommendationCriteria {
    RecommendationCriteria {
        min_price: Some(50_000.0),
        max_price: Some(150_000.0),
        locations: vec!["Lagos".to_string(), "Accra".to_string()],
        property_types: vec!["apartment".to_string()],
        amenities: vec!["pool".to_string(), "gym".to_string()],
        min_bedrooms: Some(2),
        ..Default::default()
    }
}

fn bench_score_single(c: &mut Criterion) {
    let scorer = RecommendationScorer::default();
    let property = create_property(7);
    let criteria = create_criteria();

    c.bench_function("score_single_property", |b| {
        b.iter(|| {
            scorer.score(
                black_box(&property),
                black_box(&criteria),
                &NoBehavior,
                &NeutralTrend,
            )
        });
    });
}

fn bench_recommend(c: &mut Criterion) {
    let recommender = Recommender::with_default_weights();
    let criteria = create_criteria();

    let mut behavior = UserBehavior::new();
    for i in (0..1000).step_by(9) {
        behavior.record(format!("p{}", i), InteractionKind::Viewed);
    }

    let mut group = c.benchmark_group("recommend");

    for candidate_count in [10, 50, 100, 500, 1000].iter() {
        let candidates: Vec<Property> = (0..*candidate_count).map(create_property).collect();

        group.bench_with_input(
            BenchmarkId::new("recommend", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    recommender.recommend(
                        black_box(&criteria),
                        black_box(candidates.clone()),
                        &behavior,
                        &NeutralTrend,
                        black_box(12),
                        &[],
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_score_single, bench_recommend);

criterion_main!(benches);
