use serde::Serialize;

use authchain::chain::{Condition, StepReport};

/// JSON response for `authchain check --json`.
#[derive(Serialize)]
pub struct CheckResponse {
    pub principal: String,
    pub authenticated: bool,
    pub authorities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<StepReport>>,
}

/// JSON response for `authchain validate --json`.
#[derive(Serialize)]
pub struct ValidateResponse {
    pub path: String,
    pub entries: Vec<ChainEntryItem>,
}

#[derive(Serialize)]
pub struct ChainEntryItem {
    pub index: usize,
    pub provider: String,
    pub condition: Condition,
}

/// JSON response for `authchain hash-password --json`.
#[derive(Serialize)]
pub struct HashPasswordResponse {
    pub hash: String,
}
