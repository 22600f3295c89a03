//! `GET` side of the donate action: the metadata document a Blink renders.

use kanau::processor::Processor;
use ossb_sdk::links::{AMOUNT_TEMPLATE, donate_url_with_amount};
use ossb_sdk::objects::{
    ActionGetResponse, ActionLinks, ActionParameter, ActionType, LinkedAction, LinkedActionType,
};
use tracing::debug;

use crate::config::ActionConfig;
use crate::framework::ActionProcessor;
use crate::repository::RepositoryMetadata;
use crate::validation::{DonationQuery, DonationRequest, ValidationError};

/// Fixed amounts offered as one-click buttons.
pub const PRESET_AMOUNTS: [u32; 3] = [10, 50, 100];

/// Describe the donate action for a query.
pub struct DescribeDonation {
    pub query: DonationQuery,
}

impl Processor<DescribeDonation> for ActionProcessor {
    type Output = ActionGetResponse;
    type Error = ValidationError;
    #[tracing::instrument(skip_all, name = "Action:DescribeDonation")]
    async fn process(&self, describe: DescribeDonation) -> Result<ActionGetResponse, ValidationError> {
        let request = describe.query.validate(&self.config.defaults)?;

        // The default repository is presented with the configured icon and
        // no description, without asking GitHub.
        let metadata = if request.repository_supplied {
            self.repositories
                .lookup(&request.repository)
                .await
                .unwrap_or_empty()
        } else {
            RepositoryMetadata::default()
        };

        debug!(
            destination = %request.destination,
            repo = %request.repository.url,
            name = %metadata.display_name,
            "Describing donation"
        );
        Ok(action_metadata(&self.config, &request, &metadata))
    }
}

/// Assemble the metadata document from a validated request.
pub fn action_metadata(
    config: &ActionConfig,
    request: &DonationRequest,
    metadata: &RepositoryMetadata,
) -> ActionGetResponse {
    let symbol = &config.token.symbol;
    let endpoint = config.action_endpoint();
    let repo = request.repository.url.as_str();

    let icon = if metadata.avatar_url.is_empty() {
        config.defaults.icon.clone()
    } else {
        metadata.avatar_url.clone()
    };
    let description = if metadata.description.is_empty() {
        String::new()
    } else {
        format!("Repo description: {}", metadata.description)
    };

    let mut actions: Vec<LinkedAction> = PRESET_AMOUNTS
        .iter()
        .map(|amount| LinkedAction {
            label: format!("Send {amount} {symbol}"),
            href: donate_url_with_amount(
                &endpoint,
                &request.destination,
                repo,
                &amount.to_string(),
            ),
            kind: LinkedActionType::Transaction,
            parameters: Vec::new(),
        })
        .collect();
    actions.push(LinkedAction {
        label: format!("Send {symbol}"),
        href: donate_url_with_amount(&endpoint, &request.destination, repo, AMOUNT_TEMPLATE),
        kind: LinkedActionType::Transaction,
        parameters: vec![ActionParameter {
            name: "amount".into(),
            label: Some(format!("Enter the amount of {symbol} to send")),
            required: true,
        }],
    });

    ActionGetResponse {
        kind: ActionType::Action,
        title: format!("Donate {symbol} to {repo}"),
        icon,
        description,
        label: "Donate".into(),
        disabled: None,
        links: Some(ActionLinks { actions }),
    }
}
