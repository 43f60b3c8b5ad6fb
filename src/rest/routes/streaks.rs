// rest/routes/streaks.rs — The caller's streak record plus the
// "almost there" achievement list.

use axum::{extract::State, http::HeaderMap, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::ApiError;
use crate::progress;
use crate::rest::auth::require_user_id;
use crate::AppContext;

pub async fn my_streak(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let user_id = require_user_id(&headers)?;
    let (row, next) =
        progress::streak_overview(&ctx.storage, &user_id, ctx.config.next_achievements_limit)
            .await?;
    Ok(Json(json!({
        "streak": {
            "current_streak": row.current_streak,
            "longest_streak": row.longest_streak,
            "last_completed_at": row.last_completed_at,
            "total_plans_completed": row.total_plans_completed,
            "total_7day_completed": row.total_7day_completed,
            "total_21day_completed": row.total_21day_completed,
            "total_days_studied": row.total_days_studied,
            "total_verses_from_plans": row.total_verses_from_plans,
            "total_prayers_from_plans": row.total_prayers_from_plans,
            "unlocked_achievements": row.achievement_ids(),
        },
        "next_achievements": next,
    })))
}
