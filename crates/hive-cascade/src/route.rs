//! The Cascade Router's escalation loop (`spec.md` §4.4).

use hive_config::CascadeConfig;
use hive_core::{CorrelationId, ErrorKind, HiveError, Request, TaskCategory};
use hive_provider::{ChatParams, Message, ProviderRouter};
use serde::Serialize;

use crate::classify::{classify, starting_tier};
use crate::confidence::estimate_confidence;

/// The cascade's return shape (`spec.md` §4.4: "{response, model_used,
/// tier_used, escalation_count, latency_ms, confidence, cost_estimate}").
#[derive(Debug, Clone, Serialize)]
pub struct CascadeReport {
    pub response: String,
    pub model_used: String,
    pub tier_used: u8,
    pub escalation_count: u32,
    pub latency_ms: u64,
    pub confidence: f64,
    pub cost_estimate: f64,
}

/// Tier cost multiplier relative to tier 1 (`spec.md` §9: "tier
/// multipliers (1x/5x/15x), not true per-token pricing").
const fn tier_cost_multiplier(tier: u8) -> f64 {
    match tier {
        1 => 1.0,
        2 => 5.0,
        _ => 15.0,
    }
}

/// First model in `tier`'s ordered list that is in `available`, with the
/// coding-preference list consulted first for `task_category=coding` up
/// to tier 2.
fn pick_model(
    config: &CascadeConfig,
    tier: u8,
    task_category: TaskCategory,
    available: &std::collections::BTreeSet<String>,
) -> Option<String> {
    if task_category == TaskCategory::Coding && tier <= 2 {
        if let Some(model_id) = config.coding_preference.iter().find(|id| available.contains(*id)) {
            return Some(model_id.clone());
        }
    }
    config.tier_models(tier).iter().find(|id| available.contains(*id)).cloned()
}

/// Route `request` through the cascade: classify, pick a starting tier,
/// dispatch, and escalate on low confidence up to `max_escalations+1`
/// total attempts (`spec.md` §4.4's algorithm).
pub async fn route(
    router: &ProviderRouter,
    config: &CascadeConfig,
    request: &Request,
    correlation_id: CorrelationId,
) -> Result<CascadeReport, HiveError> {
    let messages = [Message::user(request.query.clone())];
    let params = ChatParams::default();

    let mut tier = starting_tier(classify(&request.query));
    let mut escalation_count = 0u32;
    let mut total_latency_ms = 0u64;
    let mut last_attempt: Option<(String, String, f64, u8)> = None;

    while tier <= 3 && escalation_count <= config.max_escalations {
        let Some(model_id) = pick_model(config, tier, request.task_category, &request.available_model_ids) else {
            tier += 1;
            continue;
        };

        let response = router
            .dispatch(&model_id, &messages, &params, correlation_id, "cascade")
            .await?;
        total_latency_ms += response.latency_ms;
        let confidence = estimate_confidence(&request.query, &response.content);

        if confidence >= config.min_confidence_to_proceed {
            return Ok(CascadeReport {
                response: response.content,
                model_used: response.model_id,
                tier_used: tier,
                escalation_count,
                latency_ms: total_latency_ms,
                confidence,
                cost_estimate: tier_cost_multiplier(tier),
            });
        }

        tracing::debug!(tier, model_id = %response.model_id, confidence, "cascade escalating");
        last_attempt = Some((response.model_id, response.content, confidence, tier));
        escalation_count += 1;
        tier += 1;
    }

    match last_attempt {
        Some((model_used, response, confidence, tier_used)) => Ok(CascadeReport {
            response,
            model_used,
            tier_used,
            escalation_count,
            latency_ms: total_latency_ms,
            confidence,
            cost_estimate: tier_cost_multiplier(tier_used),
        }),
        None => Err(HiveError::new(
            ErrorKind::Validation,
            "no cascade tier had an available model for this request",
            correlation_id,
        )),
    }
}
