//! Fixed label dictionaries for form identifiers.
//!
//! The public form submits short identifiers; notifications and records
//! display human-readable labels. Lookup misses fall back to the raw
//! identifier unaltered so an out-of-date form never drops data.

use std::collections::HashMap;

/// The four fixed identifier-to-label dictionaries.
///
/// Constructed once at startup and passed explicitly into the normalizer
/// and formatter so components stay independently testable.
#[derive(Debug, Clone)]
pub struct LabelSet {
    services: HashMap<&'static str, &'static str>,
    project_types: HashMap<&'static str, &'static str>,
    timelines: HashMap<&'static str, &'static str>,
    referrals: HashMap<&'static str, &'static str>,
}

impl LabelSet {
    /// Builds the label set used in production.
    pub fn new() -> Self {
        Self {
            services: HashMap::from([
                ("landscape", "Landscape Design"),
                ("irrigation", "Irrigation Repair & Service"),
                ("maintenance", "Commercial Maintenance"),
                ("mowing", "Lawn Care & Mowing"),
                ("fertilization", "Fertilization & Weed Control"),
                ("cleanup", "Yard Cleanup"),
                ("lighting", "Low Volt Lighting"),
                ("snow", "Commercial Snow Removal"),
            ]),
            project_types: HashMap::from([
                ("new", "New Landscape"),
                ("renovation", "Landscape Renovation"),
                ("maintenance", "Ongoing Maintenance"),
                ("seasonal", "Seasonal Service"),
                ("other", "Other"),
            ]),
            timelines: HashMap::from([
                ("immediate", "Immediate (0-1 month)"),
                ("soon", "Soon (1-3 months)"),
                ("future", "Future (3-6 months)"),
                ("planning", "Just Planning (6+ months)"),
            ]),
            referrals: HashMap::from([
                ("referral", "Referral"),
                ("search", "Search Engine"),
                ("social", "Social Media"),
                ("ad", "Advertisement"),
                ("other", "Other"),
            ]),
        }
    }

    /// Maps a service identifier to its display label.
    pub fn service(&self, id: &str) -> String {
        lookup(&self.services, id)
    }

    /// Maps a project type identifier to its display label.
    pub fn project_type(&self, id: &str) -> String {
        lookup(&self.project_types, id)
    }

    /// Maps a timeline identifier to its display label.
    pub fn timeline(&self, id: &str) -> String {
        lookup(&self.timelines, id)
    }

    /// Maps a referral source identifier to its display label.
    pub fn referral(&self, id: &str) -> String {
        lookup(&self.referrals, id)
    }
}

impl Default for LabelSet {
    fn default() -> Self {
        Self::new()
    }
}

fn lookup(map: &HashMap<&'static str, &'static str>, id: &str) -> String {
    map.get(id).map_or_else(|| id.to_string(), |label| (*label).to_string())
}
