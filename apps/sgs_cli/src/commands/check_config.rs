// apps/sgs_cli/src/commands/check_config.rs

//! 配置检查命令
//!
//! 读取并校验 `LESProperties` 文件，打印补全默认值后的配置。

use anyhow::{Context, Result};
use clap::Args;
use sgs_config::LesProperties;
use std::path::PathBuf;
use tracing::info;

/// 检查参数
#[derive(Args)]
pub struct CheckConfigArgs {
    /// 配置文件路径
    pub config: PathBuf,

    /// 打印补全默认值后的完整配置
    #[arg(long)]
    pub print: bool,
}

/// 执行检查命令
pub fn execute(args: CheckConfigArgs) -> Result<()> {
    info!("检查配置文件: {}", args.config.display());

    let props = LesProperties::from_file(&args.config)
        .with_context(|| format!("配置无效: {}", args.config.display()))?;

    println!("✓ 配置有效");
    println!("  模型:   {}", props.model);
    println!("  滤波尺度: {:?}", props.delta);
    println!("  ν:      {:e} m²/s", props.transport.nu);

    if args.print {
        let json = props.to_json_string().context("无法序列化配置")?;
        println!("{}", json);
    }

    Ok(())
}
