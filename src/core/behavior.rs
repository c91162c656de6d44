use std::collections::HashMap;

use crate::models::{InteractionKind, InteractionRecord, InteractionSignals};

/// Source of per-property interaction signals for the user being served
///
/// Passed into every scoring call so the scorer never reads shared state.
pub trait BehaviorLookup {
    /// `None` means no behavior data is available at all
    fn signals(&self, property_id: &str) -> Option<InteractionSignals>;
}

/// Lookup used when no behavior source is wired in
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBehavior;

impl BehaviorLookup for NoBehavior {
    fn signals(&self, _property_id: &str) -> Option<InteractionSignals> {
        None
    }
}

/// In-memory interaction snapshot for a single user
///
/// A user with no recorded interactions has no signal at all and reports
/// `None` like [`NoBehavior`]. Once anything is recorded, properties the
/// user never touched report empty signals.
#[derive(Debug, Clone, Default)]
pub struct UserBehavior {
    signals: HashMap<String, InteractionSignals>,
}

impl UserBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, property_id: impl Into<String>, kind: InteractionKind) {
        self.signals
            .entry(property_id.into())
            .or_default()
            .apply(kind);
    }

    /// Fold stored interaction rows into per-property signals
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a InteractionRecord>,
    {
        let mut behavior = Self::new();
        for record in records {
            behavior.record(record.property_id.clone(), record.kind);
        }
        behavior
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

impl BehaviorLookup for UserBehavior {
    fn signals(&self, property_id: &str) -> Option<InteractionSignals> {
        if self.signals.is_empty() {
            return None;
        }
        Some(self.signals.get(property_id).copied().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(property_id: &str, kind: InteractionKind) -> InteractionRecord {
        InteractionRecord {
            user_id: "u1".to_string(),
            property_id: property_id.to_string(),
            kind,
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn test_no_behavior_is_absent() {
        assert!(NoBehavior.signals("p1").is_none());
    }

    #[test]
    fn test_user_behavior_folds_records() {
        let records = vec![
            record("p1", InteractionKind::Viewed),
            record("p1", InteractionKind::Contacted),
            record("p2", InteractionKind::Favorited),
        ];
        let behavior = UserBehavior::from_records(&records);

        assert_eq!(behavior.len(), 2);
        let p1 = behavior.signals("p1").unwrap();
        assert!(p1.viewed && p1.contacted && !p1.favorited);
        assert!(behavior.signals("p2").unwrap().favorited);
    }

    #[test]
    fn test_empty_user_behavior_has_no_signal() {
        let behavior = UserBehavior::new();
        assert!(behavior.is_empty());
        assert!(behavior.signals("p1").is_none());
    }

    #[test]
    fn test_user_behavior_unknown_property_is_empty() {
        let mut behavior = UserBehavior::new();
        behavior.record("p1", InteractionKind::Viewed);
        assert_eq!(behavior.signals("missing"), Some(InteractionSignals::default()));
    }
}
