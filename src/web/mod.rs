//! Web 层
//!
//! axum 路由、请求处理函数、会话提取器和页面模板

pub mod handlers;
pub mod routes;
pub mod session;
pub mod state;
pub mod views;

pub use routes::router;
pub use session::{Session, SessionSigner};
pub use state::{AppState, SharedState};
