// apps/sgs_cli/src/main.rs

//! SgsLab 命令行界面
//!
//! 在周期盒上驱动 LES 亚格子闭合，或检查 `LESProperties` 配置文件。
//!
//! # 架构层级
//!
//! 本模块属于 **Layer 5: Application**，只负责参数解析与日志初始化，
//! 物理计算全部委托给 `sgs_physics`。

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::FmtSubscriber;

/// SgsLab 亚格子闭合命令行工具
#[derive(Parser)]
#[command(name = "sgs_cli")]
#[command(author = "SgsLab Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "LES subgrid-scale closure driver", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 在 Taylor-Green 涡上运行闭合
    Run(commands::run::RunArgs),
    /// 检查配置文件
    CheckConfig(commands::check_config::CheckConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // try_init 同时桥接库中的 log 宏
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish()
        .try_init()?;

    match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::CheckConfig(args) => commands::check_config::execute(args),
    }
}
