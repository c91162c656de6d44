use crate::models::{Property, RecommendationCriteria};

/// Check a property against the criteria's bedroom and bathroom bounds
///
/// Pre-filter stage of the ranking pipeline. A property with an unknown
/// room count passes: missing data is never a penalty.
#[inline]
pub fn matches_room_bounds(property: &Property, criteria: &RecommendationCriteria) -> bool {
    within(property.bedrooms, criteria.min_bedrooms, criteria.max_bedrooms)
        && within(property.bathrooms, criteria.min_bathrooms, criteria.max_bathrooms)
}

#[inline]
fn within(value: Option<u32>, min: Option<u32>, max: Option<u32>) -> bool {
    let Some(value) = value else {
        return true;
    };
    // Inverted bounds are swapped
    let (min, max) = match (min, max) {
        (Some(lo), Some(hi)) if lo > hi => (Some(hi), Some(lo)),
        bounds => bounds,
    };
    min.map_or(true, |min| value >= min) && max.map_or(true, |max| value <= max)
}

/// Check whether the caller asked to leave this property out
#[inline]
pub fn is_excluded(property: &Property, exclude_ids: &[String]) -> bool {
    exclude_ids.iter().any(|id| id == &property.id)
}
