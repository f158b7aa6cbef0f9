use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use syllabus_tutor::utils::logging;
use syllabus_tutor::{App, Config};

/// 大纲学习助手 Web 服务
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// TOML 配置文件路径
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 监听地址，覆盖配置文件和环境变量
    #[arg(short, long)]
    bind: Option<String>,

    /// 显示详细日志
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.bind_addr = bind;
    }
    config.verbose_logging |= cli.verbose;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config).await?.run().await
}
