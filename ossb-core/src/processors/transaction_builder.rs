//! `POST` side of the donate action: build the unsigned transfer.

use kanau::processor::Processor;
use ossb_sdk::objects::{ActionPostResponse, LinkedActionType};
use ossb_sdk::solana::spl_token::{
    create_associated_token_account, get_associated_token_address, transfer,
};
use ossb_sdk::solana::{Message, SolError, UnsignedTransaction};
use thiserror::Error;
use tracing::{debug, info};

use crate::framework::ActionProcessor;
use crate::rpc::RpcError;
use crate::utils::to_base_units;
use crate::validation::{DonationQuery, ValidationError, parse_account};

/// Errors that can occur building a donation transaction.
#[derive(Debug, Error)]
pub enum DonationError {
    /// The request itself is invalid
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The RPC node could not be queried
    #[error("RPC failure: {0}")]
    Rpc(#[from] RpcError),

    /// Address derivation or message compilation failed
    #[error("transaction build failure: {0}")]
    Solana(#[from] SolError),
}

/// Build an unsigned donation from `account` for a query.
pub struct BuildDonationTransaction {
    pub query: DonationQuery,
    pub account: String,
}

impl Processor<BuildDonationTransaction> for ActionProcessor {
    type Output = ActionPostResponse;
    type Error = DonationError;
    #[tracing::instrument(skip_all, name = "Action:BuildDonationTransaction")]
    async fn process(
        &self,
        build: BuildDonationTransaction,
    ) -> Result<ActionPostResponse, DonationError> {
        let BuildDonationTransaction { query, account } = build;
        let request = query.validate(&self.config.defaults)?;
        let donor = parse_account(&account)?;

        let token = &self.config.token;
        let base_units = to_base_units(request.amount, token.decimals)
            .map_err(|_| ValidationError::InvalidAmount)?;

        let donor_ata = get_associated_token_address(&donor, &token.mint)?;
        let destination_ata = get_associated_token_address(&request.destination, &token.mint)?;

        let mut instructions = Vec::with_capacity(2);
        if !self.rpc.account_exists(&destination_ata).await? {
            debug!(ata = %destination_ata, "Destination token account missing, creating it");
            instructions.push(create_associated_token_account(
                &donor,
                &destination_ata,
                &request.destination,
                &token.mint,
            ));
        }
        instructions.push(transfer(&donor_ata, &destination_ata, &donor, base_units)?);

        let blockhash = self.rpc.latest_blockhash().await?;
        let message = Message::compile(&instructions, &donor, blockhash)?;
        let transaction = UnsignedTransaction::new(message).to_base64()?;

        info!(
            donor = %donor,
            destination = %request.destination,
            base_units,
            instructions = instructions.len(),
            "Built donation transaction"
        );

        Ok(ActionPostResponse {
            kind: LinkedActionType::Transaction,
            transaction,
            message: Some(format!(
                "Donated {} {} to {}",
                request.amount, token.symbol, request.destination
            )),
        })
    }
}
