// SPDX-License-Identifier: MIT
// rest/routes/plans.rs — Plan REST routes, including the day-completion
// mutation that drives streaks and achievements.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::ApiError;
use crate::progress::{self, DayUpdateRequest, DayUpdateResponse};
use crate::rest::auth::require_user_id;
use crate::AppContext;

#[derive(Deserialize)]
pub struct CreatePlanRequest {
    pub title: Option<String>,
    pub duration: u32,
}

pub async fn create_plan(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Json(body): Json<CreatePlanRequest>,
) -> Result<Json<Value>, ApiError> {
    let user_id = require_user_id(&headers)?;
    if body.duration != 7 && body.duration != 21 {
        return Err(ApiError::InvalidPayload("duration must be 7 or 21".into()));
    }
    let plan = ctx
        .storage
        .create_plan(&user_id, body.title.as_deref(), body.duration)
        .await?;
    Ok(Json(json!({ "plan": plan })))
}

pub async fn get_plan(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Path(plan_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let user_id = require_user_id(&headers)?;
    let (plan, days, progress) = progress::plan_overview(&ctx.storage, &user_id, &plan_id).await?;
    Ok(Json(json!({
        "plan": plan,
        "days": days,
        "progress": progress,
    })))
}

pub async fn update_day(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Path((plan_id, day_number)): Path<(String, u32)>,
    Json(body): Json<DayUpdateRequest>,
) -> Result<Json<DayUpdateResponse>, ApiError> {
    let user_id = require_user_id(&headers)?;
    let response = progress::apply_day_update(
        &ctx.storage,
        &ctx.progress_locks,
        &user_id,
        &plan_id,
        day_number,
        &body,
        Utc::now(),
    )
    .await?;
    Ok(Json(response))
}
