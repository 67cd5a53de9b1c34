use crate::api::models::AppState;
use crate::api::review::handlers::{
    create_review_handler, delete_review_handler, get_review_handler, list_reviews_handler,
    summary_handler, update_review_handler,
};
use axum::{Router, routing::get};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/reviews",
            get(list_reviews_handler).post(create_review_handler),
        )
        .route("/api/reviews/summary", get(summary_handler))
        .route(
            "/api/reviews/{id}",
            get(get_review_handler)
                .put(update_review_handler)
                .delete(delete_review_handler),
        )
}
