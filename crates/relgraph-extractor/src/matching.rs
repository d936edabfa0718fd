//! Fuzzy entity matching
//!
//! A string is a valid entity when some entry of the entity list has a
//! normalized Indel similarity of at least the cutoff.

/// Check a candidate against an entity list
pub fn is_valid_entity(candidate: &str, entities: &[String], cutoff: f64) -> bool {
    entities
        .iter()
        .any(|entity| rapidfuzz::fuzz::ratio(candidate.chars(), entity.chars()) >= cutoff)
}

/// Entity list bound to a similarity cutoff
#[derive(Debug, Clone, Copy)]
pub struct EntityMatcher<'a> {
    entities: &'a [String],
    cutoff: f64,
}

impl<'a> EntityMatcher<'a> {
    pub fn new(entities: &'a [String], cutoff: f64) -> Self {
        Self { entities, cutoff }
    }

    pub fn matches(&self, candidate: &str) -> bool {
        is_valid_entity(candidate, self.entities, self.cutoff)
    }

    /// Best score against any entity, 0 for an empty list
    pub fn best_score(&self, candidate: &str) -> f64 {
        self.entities
            .iter()
            .map(|entity| rapidfuzz::fuzz::ratio(candidate.chars(), entity.chars()))
            .fold(0.0, f64::max)
    }
}
