use std::sync::{Arc, OnceLock};

use axum::response::Response;
use serde_json::Value;

use crate::guidelines::{
    guideline_router, FindingValues, GuidelineRegistry, GuidelineService, Outcome, Tier,
};

pub(super) fn registry() -> &'static GuidelineRegistry {
    static REGISTRY: OnceLock<GuidelineRegistry> = OnceLock::new();
    REGISTRY.get_or_init(GuidelineRegistry::standard)
}

pub(super) fn finding(pairs: &[(&str, &str)]) -> FindingValues {
    pairs.iter().copied().collect()
}

pub(super) fn evaluate(guideline_id: &str, pairs: &[(&str, &str)]) -> Option<Outcome> {
    registry().evaluate(guideline_id, &finding(pairs))
}

pub(super) fn evaluate_values(guideline_id: &str, values: &FindingValues) -> Option<Outcome> {
    registry().evaluate(guideline_id, values)
}

/// Evaluates and asserts the tier plus a fragment of the recommendation.
pub(super) fn assert_outcome(
    guideline_id: &str,
    pairs: &[(&str, &str)],
    tier: Tier,
    fragment: &str,
) -> Outcome {
    let outcome = evaluate(guideline_id, pairs)
        .unwrap_or_else(|| panic!("{guideline_id} should produce an outcome for {pairs:?}"));
    assert_eq!(outcome.tier, tier, "{guideline_id}: {}", outcome.recommendation);
    assert!(
        outcome.recommendation.contains(fragment),
        "{guideline_id}: expected '{fragment}' in '{}'",
        outcome.recommendation
    );
    outcome
}

pub(super) fn service() -> Arc<GuidelineService> {
    Arc::new(GuidelineService::new(registry().clone()))
}

pub(super) fn router() -> axum::Router {
    guideline_router(service())
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
