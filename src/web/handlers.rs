//! 请求处理函数
//!
//! LLM、提取、解析失败都在这里换成固定的兜底内容，不向浏览器返回错误

use axum::extract::{Multipart, State};
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, Html, IntoResponse, Redirect, Response};
use axum::Json;
use serde_json::{json, Value as JsonValue};
use tracing::{debug, error, info, warn};

use crate::error::{AppError, AppResult, ExtractionError};
use crate::models::{
    ChatReply, ChatRequest, QuizRequest, QuizResponse, QuizSync, SummaryRequest, SummaryResponse,
    SummaryScratch,
};
use crate::web::session::Session;
use crate::web::state::SharedState;

pub const CHAT_FALLBACK: &str =
    "I apologize, but I'm having difficulty with that request. Could you rephrase it?";
pub const SUMMARY_FALLBACK: &str =
    "I apologize, but I'm having trouble generating a summary. Please try again.";

/// 上传表单里的文件字段名
const UPLOAD_FIELD: &str = "file";

pub async fn index(State(state): State<SharedState>) -> AppResult<Html<String>> {
    Ok(Html(state.views.render_index()?))
}

/// 上传大纲
///
/// 没有名为 `file` 的文件部分时重定向回首页；其余情况都渲染学习页
pub async fn upload_syllabus(
    State(state): State<SharedState>,
    Session(mut session): Session,
    mut multipart: Multipart,
) -> AppResult<Response> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ExtractionError::UploadReadFailed(e.to_string()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        // 只接受文件部分，同名的普通表单字段跳过
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ExtractionError::UploadReadFailed(e.to_string()))?;
        upload = Some((filename, bytes.to_vec()));
        break;
    }

    let Some((filename, bytes)) = upload else {
        debug!("上传请求中没有文件字段，返回首页");
        return Ok(Redirect::to("/").into_response());
    };

    let outcome = state.syllabus_flow.run(&filename, bytes).await;
    let html = state
        .views
        .render_study(Some(&outcome.summary), outcome.current_topic.as_deref())?;

    match outcome.session_topic {
        Some(topic) => {
            session.current_topic = Some(topic);
            let cookie = state.sessions.set_cookie(&session)?;
            Ok((AppendHeaders([(SET_COOKIE, cookie)]), Html(html)).into_response())
        }
        None => Ok(Html(html).into_response()),
    }
}

/// 对话
pub async fn get_response(
    State(state): State<SharedState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatReply> {
    match state.tutor.reply(&request.user_message).await {
        Ok(reply) => Json(reply),
        Err(e) => {
            error!("❌ 生成回答失败: {}", e);
            Json(ChatReply::text(CHAT_FALLBACK))
        }
    }
}

/// 出题，失败时返回带 `error` 字段的兜底题
pub async fn generate_quiz_question(
    State(state): State<SharedState>,
    Json(request): Json<QuizRequest>,
) -> Json<QuizResponse> {
    match state
        .tutor
        .generate_quiz(request.topic.as_deref(), &request.conversation)
        .await
    {
        Ok(quiz) => Json(QuizResponse::success(quiz)),
        Err(e) => {
            error!("❌ 生成测验题失败: {}", e);
            Json(QuizResponse::fallback())
        }
    }
}

/// 对话总结
pub async fn generate_summary(
    State(state): State<SharedState>,
    Json(request): Json<SummaryRequest>,
) -> Json<SummaryResponse> {
    let summary = match state
        .tutor
        .summarize_conversation(&request.topic, &request.conversation)
        .await
    {
        Ok(summary) => summary,
        Err(e) => {
            error!("❌ 生成对话总结失败: {}", e);
            SUMMARY_FALLBACK.to_string()
        }
    };
    Json(SummaryResponse { summary })
}

/// 前端同步测验成绩到会话
pub async fn sync_quiz_data(
    State(state): State<SharedState>,
    Session(mut session): Session,
    Json(sync): Json<QuizSync>,
) -> AppResult<impl IntoResponse> {
    session.apply_sync(sync);
    info!("🧮 同步测验成绩: {}", session.score());

    let cookie = state.sessions.set_cookie(&session)?;
    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(json!({ "status": "success" })),
    ))
}

pub async fn progress(
    State(state): State<SharedState>,
    Session(session): Session,
) -> AppResult<Html<String>> {
    Ok(Html(state.views.render_progress(&session)?))
}

pub async fn study(
    State(state): State<SharedState>,
    Session(session): Session,
) -> AppResult<Html<String>> {
    Ok(Html(
        state
            .views
            .render_study(None, Some(session.topic_or_default()))?,
    ))
}

/// 最近一次上传生成的摘要
pub async fn file_summary(State(state): State<SharedState>) -> AppResult<Json<SummaryScratch>> {
    match state.summaries.read().await? {
        Some(scratch) => Ok(Json(scratch)),
        None => {
            warn!("摘要文件不存在: {}", state.summaries.path().display());
            Err(AppError::NotFound("no summary available".into()))
        }
    }
}

pub async fn health() -> Json<JsonValue> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
