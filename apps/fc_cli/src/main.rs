// apps/fc_cli/src/main.rs

//! FoamCase 命令行界面
//!
//! 提供案例配置文件的验证与信息查看工具。
//!
//! # 架构层级
//!
//! 本模块属于 **Layer 5: Application**：仅组合下层 API，
//! 不包含任何模式或绑定逻辑。

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// FoamCase 案例配置工具
#[derive(Parser)]
#[command(name = "fc_cli")]
#[command(author = "FoamCase Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "FoamCase mesh and boundary-condition case toolkit", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 验证案例配置
    Validate(commands::validate::ValidateArgs),
    /// 显示信息
    Info(commands::info::InfoArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // 执行命令
    match cli.command {
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::Info(args) => commands::info::execute(args),
    }
}
