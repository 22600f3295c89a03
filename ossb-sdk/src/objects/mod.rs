pub mod action;
pub mod blockchains;

pub use action::{
    ActionGetResponse, ActionLinks, ActionParameter, ActionPostRequest, ActionPostResponse,
    ActionRuleObject, ActionType, ActionsJson, LinkedAction, LinkedActionType,
};
pub use blockchains::Cluster;
