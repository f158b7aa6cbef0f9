use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::web::handlers;
use crate::web::state::SharedState;

/// 构建完整路由
pub fn router(state: SharedState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        // 页面
        .route("/", get(handlers::index))
        .route("/study", get(handlers::study))
        .route("/progress", get(handlers::progress))
        .route("/upload_syllabus", post(handlers::upload_syllabus))
        // JSON 接口
        .route("/get_response", post(handlers::get_response))
        .route("/generate_quiz_question", post(handlers::generate_quiz_question))
        .route("/generate_summary", post(handlers::generate_summary))
        .route("/sync_quiz_data", post(handlers::sync_quiz_data))
        .route("/file_summary", get(handlers::file_summary))
        .route("/health", get(handlers::health))
        .nest_service("/static", static_files)
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
