use axum::{Extension, Json, extract::RawQuery, response::IntoResponse};
use kanau::processor::Processor;
use ossb_core::framework::ActionProcessor;
use ossb_core::processors::DescribeDonation;
use ossb_core::validation::DonationQuery;

use super::ActionApiError;

/// `GET {action_path}?to=&repo=&amount=` — describe the donate action.
///
/// Repository metadata is best effort; only invalid parameters fail.
pub(super) async fn get_action(
    Extension(processor): Extension<ActionProcessor>,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse, ActionApiError> {
    let query = DonationQuery::from_query_string(query.as_deref().unwrap_or_default());
    let document = processor.process(DescribeDonation { query }).await?;
    Ok(Json(document))
}
