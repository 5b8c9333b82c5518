use anyhow::anyhow;
use serde_json::Value;
use thiserror::Error;

use super::dto::{AnalyzeRequest, MealPlanResponse};
use super::{prompt, schema};
use crate::completion::{CompletionError, CompletionRequest};
use crate::state::AppState;

/// Terminal outcomes for one analyze request. No variant is retried.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid request")]
    Invalid(Vec<String>),
    #[error("model output failed validation: {0}")]
    Format(String),
    #[error(transparent)]
    Provider(anyhow::Error),
}

/// validate -> build prompt -> one completion call -> validate response.
pub async fn analyze(state: &AppState, raw: Value) -> Result<MealPlanResponse, PlanError> {
    let request: AnalyzeRequest =
        serde_json::from_value(raw).map_err(|e| PlanError::Invalid(vec![format!("body: {e}")]))?;
    let plan_request = request.validate().map_err(PlanError::Invalid)?;

    let completion_request = CompletionRequest {
        system: prompt::SYSTEM_PROMPT.to_string(),
        user: prompt::user_prompt(&plan_request),
        schema_name: schema::SCHEMA_NAME,
        schema: schema::meal_plan_schema(),
    };

    // The provider call runs on its own task; a dropped client connection
    // does not abort it mid-flight.
    let completion = state.completion.clone();
    let value = tokio::spawn(async move { completion.complete(completion_request).await })
        .await
        .map_err(|e| PlanError::Provider(anyhow!("completion task failed: {e}")))?
        .map_err(|e| match e {
            CompletionError::Format(msg) => PlanError::Format(msg),
            CompletionError::Provider(msg) => PlanError::Provider(anyhow!(msg)),
        })?;

    let plan: MealPlanResponse = serde_json::from_value(value)
        .map_err(|e| PlanError::Format(format!("plan does not match expected shape: {e}")))?;
    plan.validate()
        .map_err(|issues| PlanError::Format(issues.join("; ")))?;

    Ok(plan)
}
