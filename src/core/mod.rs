// Core algorithm exports
pub mod behavior;
pub mod factors;
pub mod filters;
pub mod recommender;
pub mod scoring;
pub mod trend;

pub use behavior::{BehaviorLookup, NoBehavior, UserBehavior};
pub use filters::{is_excluded, matches_room_bounds};
pub use recommender::{RecommendationResult, Recommender, DEFAULT_LIMIT, MIN_TOTAL_SCORE};
pub use scoring::{RecommendationScorer, DEFAULT_MARKET_AVG_PRICE_PER_AREA};
pub use trend::{FixedTrend, MarketTrend, NeutralTrend};
