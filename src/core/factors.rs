use crate::models::InteractionSignals;

/// Neutral value used whenever a factor has nothing to judge
pub const NEUTRAL: f64 = 0.5;

/// Default type factor when the user expressed no type preference
///
/// Slightly optimistic: a type mismatch is less disqualifying than a
/// location mismatch.
pub const TYPE_NEUTRAL: f64 = 0.7;

/// Score given to a location or type that matches none of the preferences
pub const MISMATCH: f64 = 0.3;

/// Score given to a property priced below the requested minimum
pub const UNDER_BUDGET: f64 = 0.8;

const VIEWED_WEIGHT: f64 = 0.3;
const FAVORITED_WEIGHT: f64 = 0.4;
const CONTACTED_WEIGHT: f64 = 0.3;

const URGENCY_BASELINE: f64 = 0.3;
const FEATURED_BOOST: f64 = 0.3;
const PREMIUM_BOOST: f64 = 0.4;

const BELOW_MARKET: f64 = 0.8;
const AT_OR_ABOVE_MARKET: f64 = 0.4;

/// Clamp a factor to [0, 1], mapping NaN to neutral
#[inline]
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        NEUTRAL
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Price factor
///
/// - inside [min, max] (inclusive, either bound optional): 1.0
/// - below min: 0.8 regardless of distance
/// - above max: linear decay reaching 0 at twice the ceiling
/// - no bounds, or no listed price: neutral
#[inline]
pub fn price_match(price: Option<f64>, min: Option<f64>, max: Option<f64>) -> f64 {
    if min.is_none() && max.is_none() {
        return NEUTRAL;
    }
    let Some(price) = price.filter(|p| p.is_finite()) else {
        return NEUTRAL;
    };

    // Tolerate an inverted range from the client
    let (min, max) = match (min, max) {
        (Some(lo), Some(hi)) if lo > hi => (Some(hi), Some(lo)),
        bounds => bounds,
    };

    if let Some(min) = min {
        if price < min {
            return UNDER_BUDGET;
        }
    }

    match max {
        Some(max) if price > max => {
            if max <= 0.0 {
                return NEUTRAL;
            }
            (1.0 - (price - max) / max).max(0.0)
        }
        _ => 1.0,
    }
}

/// Location factor: case-insensitive substring match of the city
#[inline]
pub fn location_match(city: &str, locations: &[String]) -> f64 {
    preference_match(city, locations, NEUTRAL)
}

/// Property type factor: same rule as location, with a more optimistic default
#[inline]
pub fn type_match(property_type: &str, property_types: &[String]) -> f64 {
    preference_match(property_type, property_types, TYPE_NEUTRAL)
}

fn preference_match(value: &str, preferred: &[String], neutral: f64) -> f64 {
    let wanted: Vec<String> = preferred
        .iter()
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .collect();

    if wanted.is_empty() {
        return neutral;
    }

    let value = value.to_lowercase();
    if wanted.iter().any(|w| value.contains(w.as_str())) {
        1.0
    } else {
        MISMATCH
    }
}

/// Amenity factor: property amenity count over requested count, capped at 1
#[inline]
pub fn amenity_match(property_amenities: &[String], requested: &[String]) -> f64 {
    if property_amenities.is_empty() || requested.is_empty() {
        return NEUTRAL;
    }
    (property_amenities.len() as f64 / requested.len() as f64).min(1.0)
}

/// Popularity factor from the user's interaction flags
///
/// `None` means no behavior source is wired in and yields neutral.
#[inline]
pub fn popularity(signals: Option<InteractionSignals>) -> f64 {
    let Some(signals) = signals else {
        return NEUTRAL;
    };

    let mut score = 0.0;
    if signals.viewed {
        score += VIEWED_WEIGHT;
    }
    if signals.favorited {
        score += FAVORITED_WEIGHT;
    }
    if signals.contacted {
        score += CONTACTED_WEIGHT;
    }
    score.min(1.0)
}

/// Urgency factor from listing promotion flags
#[inline]
pub fn urgency(featured: bool, premium: bool) -> f64 {
    let mut score = URGENCY_BASELINE;
    if featured {
        score += FEATURED_BOOST;
    }
    if premium {
        score += PREMIUM_BOOST;
    }
    score.min(1.0)
}

/// Investment factor: price per unit area against a market reference
///
/// Static heuristic. Missing price or area, or a non-positive area or
/// reference, yields neutral.
#[inline]
pub fn investment_potential(
    price: Option<f64>,
    area: Option<f64>,
    market_avg_price_per_area: f64,
) -> f64 {
    let (Some(price), Some(area)) = (price, area) else {
        return NEUTRAL;
    };
    let usable = |v: f64| v.is_finite() && v > 0.0;
    if !usable(area) || !usable(market_avg_price_per_area) || !price.is_finite() {
        return NEUTRAL;
    }

    if price / area < market_avg_price_per_area {
        BELOW_MARKET
    } else {
        AT_OR_ABOVE_MARKET
    }
}
