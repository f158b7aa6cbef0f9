use std::sync::Arc;

use crate::clients::CompletionProvider;
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::DocumentExtractor;
use crate::services::{SummaryStore, TutorService};
use crate::web::session::SessionSigner;
use crate::web::views::Views;
use crate::workflow::SyllabusFlow;

pub type SharedState = Arc<AppState>;

/// 所有请求共享的状态，进程启动时创建一次
pub struct AppState {
    pub config: Config,
    pub tutor: TutorService,
    pub syllabus_flow: SyllabusFlow,
    pub summaries: SummaryStore,
    pub views: Views,
    pub sessions: SessionSigner,
}

impl AppState {
    /// 组装共享状态
    ///
    /// # 参数
    /// - `config`: 程序配置
    /// - `provider`: LLM 补全服务，`None` 时所有 LLM 功能走降级路径
    pub fn build(
        config: Config,
        provider: Option<Arc<dyn CompletionProvider>>,
    ) -> AppResult<SharedState> {
        let tutor = TutorService::new(provider, config.max_syllabus_chars);
        let summaries = SummaryStore::new(&config.summary_file);
        let syllabus_flow =
            SyllabusFlow::new(tutor.clone(), DocumentExtractor::new(), summaries.clone());

        Ok(Arc::new(Self {
            views: Views::new()?,
            sessions: SessionSigner::new(&config.session_secret),
            tutor,
            syllabus_flow,
            summaries,
            config,
        }))
    }
}
