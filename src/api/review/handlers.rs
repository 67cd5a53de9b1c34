use crate::api::models::*;
use crate::storage::BookReview;
use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
};
use tracing::info;

pub async fn list_reviews_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<BookReview>>, AppError> {
    let reviews = state
        .store
        .list()
        .await
        .map_err(|e| AppError::Internal(format!("List reviews failed: {}", e)))?;

    Ok(Json(reviews))
}

pub async fn get_review_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<BookReview>, AppError> {
    let review = state
        .store
        .find(id)
        .await
        .map_err(|e| AppError::Internal(format!("Lookup failed: {}", e)))?
        .ok_or_else(|| AppError::NotFound(format!("No review with id {}", id)))?;

    Ok(Json(review))
}

pub async fn summary_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<BookReview>>, AppError> {
    let summaries = state
        .store
        .summary()
        .await
        .map_err(|e| AppError::Internal(format!("Summary failed: {}", e)))?;

    Ok(Json(summaries))
}

pub async fn create_review_handler(
    State(state): State<AppState>,
    Json(request): Json<ReviewRequest>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<BookReview>), AppError> {
    // Validate
    request.validate().map_err(AppError::Unprocessable)?;

    let review = state
        .store
        .insert(&request.title, request.rating)
        .await
        .map_err(|e| AppError::Internal(format!("Create review failed: {}", e)))?;

    info!(id = review.id, title = %review.title, "Review created");

    let location = format!("/api/reviews/{}", review.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(review),
    ))
}

pub async fn update_review_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<ReviewRequest>,
) -> Result<StatusCode, AppError> {
    // Validate before the lookup
    request.validate().map_err(AppError::Unprocessable)?;

    let updated = state
        .store
        .update(id, &request.title, request.rating)
        .await
        .map_err(|e| AppError::Internal(format!("Update review failed: {}", e)))?;

    if !updated {
        return Err(AppError::NotFound(format!("No review with id {}", id)));
    }

    info!(id, "Review updated");

    Ok(StatusCode::OK)
}

pub async fn delete_review_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let deleted = state
        .store
        .delete(id)
        .await
        .map_err(|e| AppError::Internal(format!("Delete review failed: {}", e)))?;

    if !deleted {
        return Err(AppError::NotFound(format!("No review with id {}", id)));
    }

    info!(id, "Review deleted");

    Ok(StatusCode::OK)
}
