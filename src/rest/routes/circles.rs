// rest/routes/circles.rs — Read-side circle statistics and milestones.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::circles::{self, MilestoneCategory};
use crate::error::ApiError;
use crate::rest::auth::require_user_id;
use crate::AppContext;

#[derive(Deserialize)]
pub struct StatsQuery {
    /// Optional category filter for the next-milestone lookup.
    pub category: Option<String>,
}

fn parse_category(s: &str) -> Result<MilestoneCategory, ApiError> {
    let cat = match s {
        "days" => MilestoneCategory::Days,
        "progress" => MilestoneCategory::Progress,
        "reflections" => MilestoneCategory::Reflections,
        "prayers" => MilestoneCategory::Prayers,
        "verses" => MilestoneCategory::Verses,
        "active_days" => MilestoneCategory::ActiveDays,
        "members" => MilestoneCategory::Members,
        "studies" => MilestoneCategory::Studies,
        "streak" => MilestoneCategory::Streak,
        "comments" => MilestoneCategory::Comments,
        "support" => MilestoneCategory::Support,
        other => {
            return Err(ApiError::InvalidPayload(format!(
                "unknown milestone category '{other}'"
            )))
        }
    };
    Ok(cat)
}

pub async fn circle_stats(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Path(circle_id): Path<String>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<Value>, ApiError> {
    require_user_id(&headers)?;
    let category = query.category.as_deref().map(parse_category).transpose()?;

    let stats = ctx
        .storage
        .circle_stats(&circle_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("circle not found".into()))?;

    let satisfied: Vec<Value> = circles::satisfied_milestones(&stats)
        .into_iter()
        .map(|m| {
            json!({
                "id": m.id,
                "title": m.title,
                "description": m.description,
                "category": m.category,
                "threshold": m.threshold,
            })
        })
        .collect();

    Ok(Json(json!({
        "stats": stats,
        "milestones": satisfied,
        "next_milestone": circles::next_milestone(&stats, category),
    })))
}
