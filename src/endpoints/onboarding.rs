use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};

use super::extractors::IncomeChoice;
use crate::error::{AppError, Result};
use crate::services::onboarding::{self, Transition};
use crate::state::AppState;

pub fn onboarding_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/impact", get(impact_dashboard))
        .route("/start-onboarding", get(start_onboarding))
        .route("/onboarding/{step}", get(onboarding_step))
        .route("/complete", get(onboarding_complete))
        .route("/complete-onboarding", post(complete_onboarding))
        .with_state(state)
}

/// Turn a state machine transition into an HTTP response
fn respond(state: &AppState, transition: Transition) -> Result<Response> {
    match transition {
        Transition::Render(view) => Ok(Html(state.views.render(view)?).into_response()),
        Transition::Redirect(route) => Ok(Redirect::to(&route.path()).into_response()),
    }
}

async fn index(State(state): State<AppState>) -> Result<Response> {
    respond(&state, onboarding::landing())
}

async fn impact_dashboard(State(state): State<AppState>) -> Result<Response> {
    respond(&state, onboarding::impact())
}

async fn start_onboarding(State(state): State<AppState>) -> Result<Response> {
    respond(&state, onboarding::start())
}

async fn onboarding_step(
    State(state): State<AppState>,
    Path(step): Path<String>,
) -> Result<Response> {
    let transition = onboarding::advance_segment(&step)
        .ok_or_else(|| AppError::NotFound(format!("No onboarding page '{}'", step)))?;

    if let Transition::Redirect(_) = transition {
        tracing::debug!(step = %step, "Onboarding step out of range, restarting");
    }

    respond(&state, transition)
}

async fn onboarding_complete(State(state): State<AppState>) -> Result<Response> {
    respond(&state, onboarding::complete())
}

/// Final submission. Always lands on the confirmation page; persistence
/// failures are only visible in logs and the completion counters.
async fn complete_onboarding(
    State(state): State<AppState>,
    IncomeChoice(choice): IncomeChoice,
) -> Result<Response> {
    let outcome = state
        .completion
        .submit_completion(choice.as_deref())
        .await;

    respond(&state, Transition::Redirect(outcome.redirect()))
}
