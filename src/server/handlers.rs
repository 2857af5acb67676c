use std::time::Instant;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{error, info, warn};

use crate::error::Result;
use crate::interface::render::format_suggestion;
use crate::models::{Filters, Goal, SearchParams, Solution};
use crate::needs::{Profile, calculate_nutrition_needs};
use crate::planner::{CompatibilityChecker, suggest_from_shortlist, suggest_report};
use crate::server::SharedState;

pub const NO_MEAL_MESSAGE: &str = "No suitable meal found.";

/// Body of `POST /suggest`. Search fields override the server defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestRequest {
    pub calorie_goal: f64,
    pub protein_goal: f64,
    #[serde(default)]
    pub carbs_goal: Option<f64>,
    #[serde(default)]
    pub fat_goal: Option<f64>,
    #[serde(default)]
    pub fiber_goal: Option<f64>,
    #[serde(default)]
    pub vegan: bool,
    #[serde(default)]
    pub allergen: Option<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub shortlist: Option<Vec<String>>,
    #[serde(default)]
    pub tolerance: Option<f64>,
    #[serde(default)]
    pub max_items: Option<usize>,
    #[serde(default)]
    pub max_servings: Option<u32>,
    #[serde(default)]
    pub top_k: Option<usize>,
    #[serde(default)]
    pub protein_window: Option<f64>,
    #[serde(default)]
    pub max_alternatives: Option<usize>,
}

impl SuggestRequest {
    pub fn goal(&self) -> Goal {
        Goal {
            calories: self.calorie_goal,
            protein_g: self.protein_goal,
            carbs_g: self.carbs_goal,
            fat_g: self.fat_goal,
            fiber_g: self.fiber_goal,
        }
    }

    pub fn filters(&self) -> Filters {
        Filters {
            vegan_only: self.vegan,
            allergen: self.allergen.clone().filter(|a| !a.trim().is_empty()),
            excluded_categories: self.exclude.clone(),
        }
    }

    pub fn params(&self, defaults: &SearchParams) -> SearchParams {
        SearchParams {
            tolerance: self.tolerance.unwrap_or(defaults.tolerance),
            max_items: self.max_items.unwrap_or(defaults.max_items),
            max_servings: self.max_servings.unwrap_or(defaults.max_servings),
            top_k: self.top_k.unwrap_or(defaults.top_k),
            protein_window: self.protein_window.unwrap_or(defaults.protein_window),
            max_alternatives: self.max_alternatives.unwrap_or(defaults.max_alternatives),
        }
    }

    /// Validated goal, filters and parameters.
    ///
    /// With a shortlist, the bounds are checked for every listed item being
    /// a candidate.
    pub fn resolve(&self, defaults: &SearchParams) -> Result<(Goal, Filters, SearchParams)> {
        let goal = self.goal();
        goal.validate()?;
        let params = self.params(defaults);
        match &self.shortlist {
            Some(names) => params.for_shortlist(names.len()).validate()?,
            None => params.validate()?,
        }
        Ok((goal, self.filters(), params))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal: Option<Solution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SuggestResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            ..Default::default()
        }
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// `POST /suggest`: run the search on a blocking thread under the deadline.
pub async fn suggest_meal(
    State(state): State<SharedState>,
    body: std::result::Result<Json<SuggestRequest>, JsonRejection>,
) -> (StatusCode, Json<SuggestResponse>) {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(SuggestResponse::failure(format!(
                    "Invalid request body: {}",
                    rejection.body_text()
                ))),
            );
        }
    };

    let (goal, filters, params) = match request.resolve(&state.defaults) {
        Ok(resolved) => resolved,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(SuggestResponse::failure(e.to_string())),
            );
        }
    };

    let worker_state = state.clone();
    let worker_goal = goal.clone();
    let shortlist = request.shortlist.clone();
    let mut task = tokio::task::spawn_blocking(move || match shortlist {
        Some(names) => suggest_from_shortlist(
            &worker_state.catalog,
            &names,
            &worker_goal,
            &filters,
            &params,
            &worker_state.pairings,
        ),
        None => {
            let checker = CompatibilityChecker::new(&worker_state.pairings);
            suggest_report(&worker_state.catalog, &worker_goal, &filters, &params, &checker)
                .solution
        }
    });

    match tokio::time::timeout(state.deadline, &mut task).await {
        Ok(Ok(Some(meal))) => {
            let text = format_suggestion(&meal, &state.catalog, &goal);
            (
                StatusCode::OK,
                Json(SuggestResponse {
                    success: true,
                    text: Some(text),
                    meal: Some(meal),
                    error: None,
                }),
            )
        }
        Ok(Ok(None)) => (StatusCode::OK, Json(SuggestResponse::failure(NO_MEAL_MESSAGE))),
        Ok(Err(e)) => {
            error!(error = %e, "search task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SuggestResponse::failure("Error computing suggestion")),
            )
        }
        Err(_) => {
            let deadline_ms = state.deadline.as_millis() as u64;
            warn!(deadline_ms, "search exceeded deadline");

            // a blocking thread cannot be cancelled; report when it finally ends
            let started = Instant::now();
            tokio::spawn(async move {
                match task.await {
                    Ok(_) => info!(
                        deadline_ms,
                        overrun_ms = started.elapsed().as_millis() as u64,
                        "late search finished; result discarded"
                    ),
                    Err(e) => error!(error = %e, "late search task failed"),
                }
            });

            (
                StatusCode::GATEWAY_TIMEOUT,
                Json(SuggestResponse::failure("Search exceeded the time limit")),
            )
        }
    }
}

/// `POST /needs`: daily targets for a profile.
pub async fn nutrition_needs(
    body: std::result::Result<Json<Profile>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let profile = match body {
        Ok(Json(profile)) => profile,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "error": rejection.body_text() })),
            );
        }
    };

    match calculate_nutrition_needs(&profile) {
        Ok(needs) => (
            StatusCode::OK,
            Json(json!({ "success": true, "needs": needs })),
        ),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": e.to_string() })),
        ),
    }
}
