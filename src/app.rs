//! 编排层
//!
//! 管理应用生命周期：组装共享状态、绑定端口、启动服务、优雅退出

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::clients::{CompletionProvider, LlmClient};
use crate::config::Config;
use crate::utils::logging::log_startup;
use crate::web::{self, SharedState};

/// 应用主结构
pub struct App {
    config: Config,
    state: SharedState,
}

impl App {
    /// 初始化应用
    ///
    /// 创建 LLM 客户端（没有 API Key 时为空）并组装共享状态
    pub async fn initialize(config: Config) -> Result<Self> {
        let provider =
            LlmClient::new(&config).map(|client| Arc::new(client) as Arc<dyn CompletionProvider>);
        Self::with_provider(config, provider)
    }

    /// 使用指定的补全服务初始化（测试中注入假的 provider）
    pub fn with_provider(
        config: Config,
        provider: Option<Arc<dyn CompletionProvider>>,
    ) -> Result<Self> {
        if provider.is_none() {
            warn!("⚠️ LLM 不可用，所有生成功能将返回兜底内容");
        }
        let state = web::AppState::build(config.clone(), provider)
            .context("failed to build application state")?;
        Ok(Self { config, state })
    }

    pub fn router(&self) -> Router {
        web::router(self.state.clone())
    }

    /// 绑定配置中的地址并运行，直到收到 Ctrl+C
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.bind_addr)
            .await
            .with_context(|| format!("failed to bind {}", self.config.bind_addr))?;
        self.serve(listener).await
    }

    /// 在已绑定的监听器上运行
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        log_startup(&self.config);
        if let Ok(addr) = listener.local_addr() {
            info!("✅ 服务已就绪: http://{}", addr);
        }

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("server error")?;

        info!("👋 服务已停止");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("无法监听 Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("🛑 收到退出信号，正在停止服务...");
}
