//! Estate Recs - property recommendation service for the estate platform
//!
//! This library scores real-estate listings against a user's criteria and
//! ranks them. Scoring is pure: interaction history and market trend are
//! passed in explicitly, so identical inputs always produce identical output.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{BehaviorLookup, MarketTrend, NeutralTrend, NoBehavior, RecommendationScorer, Recommender, UserBehavior};
pub use models::{Property, RecommendationCriteria, RecommendationScore, FactorScores, ScoringWeights, RecommendRequest, RecommendResponse};
