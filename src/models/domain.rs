use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Property listing as served by the property backend
///
/// Read-only from the scorer's point of view. Every field the backend may
/// omit deserializes to an empty/`None` value instead of failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Property {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub currency: String,
    #[serde(rename = "type", default)]
    pub property_type: String,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<u32>,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub premium: bool,
}

/// Backends disagree on whether ids are strings or numbers
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

/// User-chosen or inferred recommendation preferences
///
/// All fields are optional. An absent field means "no preference":
/// - no price bounds: price factor is neutral (0.5)
/// - no locations: location factor is neutral (0.5)
/// - no property types: type factor is 0.7
/// - no amenities: amenity factor is neutral (0.5)
/// - no room bounds: no property is pre-filtered on rooms
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationCriteria {
    #[serde(rename = "minPrice", default)]
    pub min_price: Option<f64>,
    #[serde(rename = "maxPrice", default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(rename = "propertyTypes", default)]
    pub property_types: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(rename = "minBedrooms", default)]
    pub min_bedrooms: Option<u32>,
    #[serde(rename = "maxBedrooms", default)]
    pub max_bedrooms: Option<u32>,
    #[serde(rename = "minBathrooms", default)]
    pub min_bathrooms: Option<u32>,
    #[serde(rename = "maxBathrooms", default)]
    pub max_bathrooms: Option<u32>,
}

impl RecommendationCriteria {
    /// True when either price bound is set
    pub fn has_price_range(&self) -> bool {
        self.min_price.is_some() || self.max_price.is_some()
    }
}

/// Individual factor scores, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorScores {
    #[serde(rename = "priceMatch")]
    pub price_match: f64,
    #[serde(rename = "locationMatch")]
    pub location_match: f64,
    #[serde(rename = "typeMatch")]
    pub type_match: f64,
    #[serde(rename = "amenityMatch")]
    pub amenity_match: f64,
    pub popularity: f64,
    pub urgency: f64,
    #[serde(rename = "investmentPotential")]
    pub investment_potential: f64,
    #[serde(rename = "marketTrend")]
    pub market_trend: f64,
}

/// Score breakdown for one (property, criteria) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationScore {
    #[serde(rename = "propertyId")]
    pub property_id: String,
    pub factors: FactorScores,
    #[serde(rename = "totalScore")]
    pub total_score: f64,
    pub explanations: Vec<String>,
}

/// A property paired with its score, as returned by the ranking pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedProperty {
    pub property: Property,
    pub score: RecommendationScore,
}

/// Scoring weights
///
/// Must sum to 1.0 so the total score stays a convex combination of the
/// factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub price: f64,
    pub location: f64,
    pub property_type: f64,
    pub amenity: f64,
    pub popularity: f64,
    pub urgency: f64,
    pub investment: f64,
    pub trend: f64,
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.price
            + self.location
            + self.property_type
            + self.amenity
            + self.popularity
            + self.urgency
            + self.investment
            + self.trend
    }

    /// Reject negative weights or weights that do not sum to 1
    pub fn validate(&self) -> Result<(), String> {
        let all = [
            self.price,
            self.location,
            self.property_type,
            self.amenity,
            self.popularity,
            self.urgency,
            self.investment,
            self.trend,
        ];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err("scoring weights must be finite and non-negative".to_string());
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(format!("scoring weights must sum to 1.0, got {}", sum));
        }
        Ok(())
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            price: 0.25,
            location: 0.20,
            property_type: 0.15,
            amenity: 0.10,
            popularity: 0.10,
            urgency: 0.08,
            investment: 0.07,
            trend: 0.05,
        }
    }
}

/// Interaction flags for one (user, property) pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionSignals {
    pub viewed: bool,
    pub favorited: bool,
    pub contacted: bool,
}

impl InteractionSignals {
    pub fn apply(&mut self, kind: InteractionKind) {
        match kind {
            InteractionKind::Viewed => self.viewed = true,
            InteractionKind::Favorited => self.favorited = true,
            InteractionKind::Contacted => self.contacted = true,
        }
    }
}

/// Kind of a recorded user interaction with a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "interaction_kind", rename_all = "lowercase")]
pub enum InteractionKind {
    Viewed,
    Favorited,
    Contacted,
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InteractionKind::Viewed => "viewed",
            InteractionKind::Favorited => "favorited",
            InteractionKind::Contacted => "contacted",
        };
        f.write_str(s)
    }
}

impl FromStr for InteractionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "viewed" => Ok(InteractionKind::Viewed),
            "favorited" => Ok(InteractionKind::Favorited),
            "contacted" => Ok(InteractionKind::Contacted),
            other => Err(format!("unknown interaction kind: {}", other)),
        }
    }
}

/// Stored interaction row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRecord {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "propertyId")]
    pub property_id: String,
    pub kind: InteractionKind,
    #[serde(rename = "recordedAt")]
    pub recorded_at: chrono::DateTime<chrono::Utc>,
}

/// Filter passed to the property backend when listing the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CatalogQuery {
    pub city: Option<String>,
    pub property_type: Option<String>,
    pub limit: Option<usize>,
}
