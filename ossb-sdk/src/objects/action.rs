//! Solana Actions request and response documents.
//!
//! These mirror the JSON shapes a Blink client expects from an action
//! endpoint: the metadata returned by `GET`, the body posted by the wallet
//! and the unsigned transaction returned by `POST`.

use serde::{Deserialize, Serialize};

/// The `type` discriminator of an action document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    #[default]
    Action,
    Completed,
}

/// The kind of request a linked action triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkedActionType {
    #[default]
    Transaction,
    Message,
    Post,
    External,
}

/// Response body of `GET` on an action endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionGetResponse {
    #[serde(rename = "type")]
    pub kind: ActionType,
    pub title: String,
    pub icon: String,
    pub description: String,
    /// Ignored by clients when `links.actions` is present.
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<ActionLinks>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLinks {
    pub actions: Vec<LinkedAction>,
}

/// One button (optionally with inputs) rendered by the Blink client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedAction {
    pub label: String,
    pub href: String,
    #[serde(rename = "type")]
    pub kind: LinkedActionType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ActionParameter>,
}

/// A user input whose value is substituted into `{name}` in the href.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionParameter {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub required: bool,
}

/// Body the wallet posts to an action endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionPostRequest {
    /// Base58 address of the signing account.
    pub account: String,
}

/// Response body of `POST` on an action endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPostResponse {
    #[serde(rename = "type")]
    pub kind: LinkedActionType,
    /// Base64 wire transaction with empty signature slots.
    pub transaction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Rules file served at `/actions.json` on the site root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionsJson {
    pub rules: Vec<ActionRuleObject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRuleObject {
    pub path_pattern: String,
    pub api_path: String,
}
