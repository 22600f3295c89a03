use axum::{Extension, Json, response::IntoResponse};
use ossb_core::framework::ActionProcessor;
use ossb_sdk::objects::{ActionRuleObject, ActionsJson};

/// `GET /actions.json` — map the action directory onto itself so clients
/// can discover the donate action from the site root.
pub(super) async fn actions_json(
    Extension(processor): Extension<ActionProcessor>,
) -> impl IntoResponse {
    Json(rules_for(&processor.config.action_path))
}

/// `/api/actions/donate` → `/api/actions/**`.
pub(super) fn rules_for(action_path: &str) -> ActionsJson {
    let pattern = match action_path.rsplit_once('/') {
        Some((parent, _)) if !parent.is_empty() => format!("{parent}/**"),
        _ => "/**".to_owned(),
    };
    ActionsJson {
        rules: vec![ActionRuleObject {
            path_pattern: pattern.clone(),
            api_path: pattern,
        }],
    }
}
