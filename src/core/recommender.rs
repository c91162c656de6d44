use std::cmp::Ordering;

use crate::core::{
    behavior::BehaviorLookup,
    filters::{is_excluded, matches_room_bounds},
    scoring::RecommendationScorer,
    trend::MarketTrend,
};
use crate::models::{Property, RankedProperty, RecommendationCriteria, ScoringWeights};

/// Properties must score strictly above this total to be recommended
pub const MIN_TOTAL_SCORE: f64 = 0.3;

/// Number of recommendations returned when the caller does not ask for more
pub const DEFAULT_LIMIT: usize = 12;

/// Result of the ranking process
#[derive(Debug)]
pub struct RecommendationResult {
    pub recommendations: Vec<RankedProperty>,
    pub total_candidates: usize,
}

/// Ranking orchestrator
///
/// # Pipeline Stages
/// 1. Exclusion and room-bound pre-filter
/// 2. Scoring
/// 3. Minimum score cut-off
/// 4. Ranking and truncation
#[derive(Debug, Clone)]
pub struct Recommender {
    scorer: RecommendationScorer,
}

impl Recommender {
    pub fn new(scorer: RecommendationScorer) -> Self {
        Self { scorer }
    }

    pub fn with_default_weights() -> Self {
        Self::new(RecommendationScorer::default())
    }

    pub fn with_weights(weights: ScoringWeights, market_avg_price_per_area: f64) -> Self {
        Self::new(RecommendationScorer::new(weights, market_avg_price_per_area))
    }

    pub fn scorer(&self) -> &RecommendationScorer {
        &self.scorer
    }

    /// Rank candidate properties for a criteria set
    ///
    /// # Arguments
    /// * `criteria` - The user's recommendation criteria
    /// * `candidates` - Properties currently in the catalog
    /// * `behavior` - Interaction signals for the user being served
    /// * `trend` - Market trend source
    /// * `limit` - Maximum number of recommendations to return
    /// * `exclude_ids` - Property ids to leave out
    ///
    /// # Returns
    /// RecommendationResult ordered by total score, ties broken by property id
    pub fn recommend(
        &self,
        criteria: &RecommendationCriteria,
        candidates: Vec<Property>,
        behavior: &dyn BehaviorLookup,
        trend: &dyn MarketTrend,
        limit: usize,
        exclude_ids: &[String],
    ) -> RecommendationResult {
        let total_candidates = candidates.len();

        let mut ranked: Vec<RankedProperty> = candidates
            .into_iter()
            // Stage 1: Pre-filter
            .filter(|property| !is_excluded(property, exclude_ids))
            .filter(|property| matches_room_bounds(property, criteria))
            // Stage 2 & 3: Score and cut off
            .filter_map(|property| {
                let score = self.scorer.score(&property, criteria, behavior, trend);
                if score.total_score > MIN_TOTAL_SCORE {
                    Some(RankedProperty { property, score })
                } else {
                    None
                }
            })
            .collect();

        // Sort by score (descending) and then by id (ascending)
        ranked.sort_by(|a, b| {
            b.score
                .total_score
                .partial_cmp(&a.score.total_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.property.id.cmp(&b.property.id))
        });

        ranked.truncate(limit);

        tracing::debug!(
            "Ranked {} of {} candidates (limit {})",
            ranked.len(),
            total_candidates,
            limit
        );

        RecommendationResult {
            recommendations: ranked,
            total_candidates,
        }
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::behavior::NoBehavior;
    use crate::core::trend::{FixedTrend, NeutralTrend};

    fn create_candidate(id: &str, city: &str, price: f64, featured: bool) -> Property {
        Property {
            id: id.to_string(),
            title: format!("Listing {}", id),
            city: city.to_string(),
            price: Some(price),
            currency: "USD".to_string(),
            property_type: "house".to_string(),
            bedrooms: Some(3),
            bathrooms: Some(2),
            area: Some(150.0),
            amenities: vec!["parking".to_string()],
            featured,
            ..Default::default()
        }
    }

    fn create_criteria() -> RecommendationCriteria {
        RecommendationCriteria {
            min_price: Some(100_000.0),
            max_price: Some(300_000.0),
            locations: vec!["Nairobi".to_string()],
            property_types: vec!["house".to_string()],
            amenities: vec!["parking".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_recommend_basic() {
        let recommender = Recommender::with_default_weights();
        let criteria = create_criteria();

        let candidates = vec![
            create_candidate("1", "Nairobi", 200_000.0, true),  // Strong match
            create_candidate("2", "Mombasa", 250_000.0, false), // Wrong city
            create_candidate("3", "Nairobi", 900_000.0, false), // Far over budget
        ];

        let result = recommender.recommend(&criteria, candidates, &NoBehavior, &NeutralTrend, 10, &[]);

        assert_eq!(result.total_candidates, 3);
        assert_eq!(result.recommendations[0].property.id, "1");
        for pair in result.recommendations.windows(2) {
            assert!(pair[0].score.total_score >= pair[1].score.total_score);
        }
    }

    #[test]
    fn test_respects_limit() {
        let recommender = Recommender::with_default_weights();
        let criteria = create_criteria();

        let candidates: Vec<Property> = (0..20)
            .map(|i| create_candidate(&i.to_string(), "Nairobi", 150_000.0 + i as f64 * 1000.0, i % 2 == 0))
            .collect();

        let result = recommender.recommend(&criteria, candidates, &NoBehavior, &NeutralTrend, DEFAULT_LIMIT, &[]);

        assert_eq!(result.recommendations.len(), DEFAULT_LIMIT);
        assert_eq!(result.total_candidates, 20);
    }

    #[test]
    fn test_excluded_and_room_filtered() {
        let recommender = Recommender::with_default_weights();
        let mut criteria = create_criteria();
        criteria.min_bedrooms = Some(4);

        let mut big = create_candidate("big", "Nairobi", 200_000.0, false);
        big.bedrooms = Some(5);
        let small = create_candidate("small", "Nairobi", 200_000.0, false);
        let mut hidden = create_candidate("hidden", "Nairobi", 200_000.0, false);
        hidden.bedrooms = Some(5);

        let result = recommender.recommend(
            &criteria,
            vec![big, small, hidden],
            &NoBehavior,
            &NeutralTrend,
            10,
            &["hidden".to_string()],
        );

        let ids: Vec<&str> = result.recommendations.iter().map(|r| r.property.id.as_str()).collect();
        assert_eq!(ids, vec!["big"]);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // All weight on the trend factor makes the total equal the trend value
        let weights = ScoringWeights {
            price: 0.0,
            location: 0.0,
            property_type: 0.0,
            amenity: 0.0,
            popularity: 0.0,
            urgency: 0.0,
            investment: 0.0,
            trend: 1.0,
        };
        let recommender = Recommender::with_weights(weights, 2000.0);
        let criteria = RecommendationCriteria::default();
        let candidates = vec![create_candidate("1", "Nairobi", 1.0, false)];

        let at = recommender.recommend(&criteria, candidates.clone(), &NoBehavior, &FixedTrend(0.3), 10, &[]);
        assert!(at.recommendations.is_empty());

        let above = recommender.recommend(&criteria, candidates, &NoBehavior, &FixedTrend(0.31), 10, &[]);
        assert_eq!(above.recommendations.len(), 1);
        assert!((above.recommendations[0].score.total_score - 0.31).abs() < 1e-12);
    }

    #[test]
    fn test_ties_break_by_id() {
        let recommender = Recommender::with_default_weights();
        let criteria = create_criteria();
        let candidates = vec![
            create_candidate("c", "Nairobi", 200_000.0, false),
            create_candidate("a", "Nairobi", 200_000.0, false),
            create_candidate("b", "Nairobi", 200_000.0, false),
        ];

        let result = recommender.recommend(&criteria, candidates, &NoBehavior, &NeutralTrend, 10, &[]);
        let ids: Vec<&str> = result.recommendations.iter().map(|r| r.property.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
