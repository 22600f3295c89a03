use axum::{
    Extension, Json,
    body::Bytes,
    extract::RawQuery,
    response::IntoResponse,
};
use kanau::processor::Processor;
use ossb_core::framework::ActionProcessor;
use ossb_core::processors::BuildDonationTransaction;
use ossb_core::validation::DonationQuery;
use ossb_sdk::objects::ActionPostRequest;

use super::ActionApiError;

/// `POST {action_path}?to=&repo=&amount=` — build an unsigned donation.
///
/// The body is decoded by hand so that a malformed or mistyped body gets
/// the same plain-text 400 as every other rejection.
pub(super) async fn post_action(
    Extension(processor): Extension<ActionProcessor>,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Result<impl IntoResponse, ActionApiError> {
    let query = DonationQuery::from_query_string(query.as_deref().unwrap_or_default());
    let ActionPostRequest { account } =
        serde_json::from_slice(&body).map_err(ActionApiError::MalformedBody)?;

    let response = processor
        .process(BuildDonationTransaction { query, account })
        .await?;
    Ok(Json(response))
}
