use serde::Deserialize;

/// Cascade Router configuration: tiers plus escalation thresholds
/// (`spec.md` §4.4, §6).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CascadeConfig {
    #[serde(default = "default_min_confidence")]
    pub min_confidence_to_proceed: f64,
    #[serde(default = "default_max_escalations")]
    pub max_escalations: u32,
    /// Tier 1 (small/fast) logical model ids, in preference order.
    #[serde(default)]
    pub tier_1: Vec<String>,
    /// Tier 2 (standard) logical model ids, in preference order.
    #[serde(default)]
    pub tier_2: Vec<String>,
    /// Tier 3 (premium/reasoning) logical model ids, in preference order.
    #[serde(default)]
    pub tier_3: Vec<String>,
    /// Logical model ids preferred for `task_type=coding`, consulted up
    /// to tier 2 before falling back to the tier's own ordering.
    #[serde(default)]
    pub coding_preference: Vec<String>,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            min_confidence_to_proceed: default_min_confidence(),
            max_escalations: default_max_escalations(),
            tier_1: Vec::new(),
            tier_2: Vec::new(),
            tier_3: Vec::new(),
            coding_preference: Vec::new(),
        }
    }
}

const fn default_min_confidence() -> f64 {
    0.70
}

const fn default_max_escalations() -> u32 {
    2
}

impl CascadeConfig {
    /// The ordered candidate list for a given tier (1..=3).
    #[must_use]
    pub fn tier_models(&self, tier: u8) -> &[String] {
        match tier {
            1 => &self.tier_1,
            2 => &self.tier_2,
            _ => &self.tier_3,
        }
    }
}
