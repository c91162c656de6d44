use crate::core::behavior::BehaviorLookup;
use crate::core::factors::{self, clamp_unit};
use crate::core::trend::MarketTrend;
use crate::models::{FactorScores, Property, RecommendationCriteria, RecommendationScore, ScoringWeights};

/// Default market average price per unit area used by the investment factor
pub const DEFAULT_MARKET_AVG_PRICE_PER_AREA: f64 = 2000.0;

// Explanation thresholds; a factor must strictly exceed its threshold
const PRICE_THRESHOLD: f64 = 0.8;
const LOCATION_THRESHOLD: f64 = 0.8;
const TYPE_THRESHOLD: f64 = 0.8;
const AMENITY_THRESHOLD: f64 = 0.7;
const POPULARITY_THRESHOLD: f64 = 0.7;
const URGENCY_THRESHOLD: f64 = 0.7;
const INVESTMENT_THRESHOLD: f64 = 0.7;

/// Scores a property against a criteria set
///
/// Scoring formula:
/// total = (
///     price_match * 0.25 +
///     location_match * 0.20 +
///     type_match * 0.15 +
///     amenity_match * 0.10 +
///     popularity * 0.10 +
///     urgency * 0.08 +
///     investment_potential * 0.07 +
///     market_trend * 0.05
/// )
///
/// Pure and deterministic: behavior and market trend are passed in by the
/// caller, and no input can make scoring fail.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationScorer {
    weights: ScoringWeights,
    market_avg_price_per_area: f64,
}

impl RecommendationScorer {
    pub fn new(weights: ScoringWeights, market_avg_price_per_area: f64) -> Self {
        Self {
            weights,
            market_avg_price_per_area,
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn market_avg_price_per_area(&self) -> f64 {
        self.market_avg_price_per_area
    }

    pub fn score(
        &self,
        property: &Property,
        criteria: &RecommendationCriteria,
        behavior: &dyn BehaviorLookup,
        trend: &dyn MarketTrend,
    ) -> RecommendationScore {
        let factors = FactorScores {
            price_match: clamp_unit(factors::price_match(
                property.price,
                criteria.min_price,
                criteria.max_price,
            )),
            location_match: clamp_unit(factors::location_match(
                &property.city,
                &criteria.locations,
            )),
            type_match: clamp_unit(factors::type_match(
                &property.property_type,
                &criteria.property_types,
            )),
            amenity_match: clamp_unit(factors::amenity_match(
                &property.amenities,
                &criteria.amenities,
            )),
            popularity: clamp_unit(factors::popularity(behavior.signals(&property.id))),
            urgency: clamp_unit(factors::urgency(property.featured, property.premium)),
            investment_potential: clamp_unit(factors::investment_potential(
                property.price,
                property.area,
                self.market_avg_price_per_area,
            )),
            market_trend: clamp_unit(trend.trend(property)),
        };

        let total_score = clamp_unit(weighted_total(&factors, &self.weights));
        let explanations = explain(&factors);

        RecommendationScore {
            property_id: property.id.clone(),
            factors,
            total_score,
            explanations,
        }
    }
}

impl Default for RecommendationScorer {
    fn default() -> Self {
        Self::new(ScoringWeights::default(), DEFAULT_MARKET_AVG_PRICE_PER_AREA)
    }
}

#[inline]
fn weighted_total(f: &FactorScores, w: &ScoringWeights) -> f64 {
    f.price_match * w.price
        + f.location_match * w.location
        + f.type_match * w.property_type
        + f.amenity_match * w.amenity
        + f.popularity * w.popularity
        + f.urgency * w.urgency
        + f.investment_potential * w.investment
        + f.market_trend * w.trend
}

/// Human-readable reasons, in fixed priority order
fn explain(f: &FactorScores) -> Vec<String> {
    let checks = [
        (f.price_match, PRICE_THRESHOLD, "Fits within your budget"),
        (f.location_match, LOCATION_THRESHOLD, "Located in one of your preferred areas"),
        (f.type_match, TYPE_THRESHOLD, "Matches your preferred property type"),
        (f.amenity_match, AMENITY_THRESHOLD, "Offers the amenities you asked for"),
        (f.popularity, POPULARITY_THRESHOLD, "Popular with buyers like you"),
        (f.urgency, URGENCY_THRESHOLD, "Featured listing with high demand"),
        (
            f.investment_potential,
            INVESTMENT_THRESHOLD,
            "Priced below the market average for its size",
        ),
    ];

    checks
        .iter()
        .filter(|(value, threshold, _)| value > threshold)
        .map(|(_, _, text)| text.to_string())
        .collect()
}
