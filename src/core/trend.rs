use crate::models::Property;

/// Market trend signal for a listing
///
/// No real market feed exists yet, so the default implementation is a fixed
/// neutral value. Implementations must be deterministic.
pub trait MarketTrend {
    fn trend(&self, property: &Property) -> f64;
}

/// Neutral trend (0.5) for every listing
#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralTrend;

impl MarketTrend for NeutralTrend {
    fn trend(&self, _property: &Property) -> f64 {
        super::factors::NEUTRAL
    }
}

/// Constant trend value supplied by the caller
#[derive(Debug, Clone, Copy)]
pub struct FixedTrend(pub f64);

impl MarketTrend for FixedTrend {
    fn trend(&self, _property: &Property) -> f64 {
        self.0
    }
}
