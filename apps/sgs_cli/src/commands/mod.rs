// apps/sgs_cli/src/commands/mod.rs

//! 子命令实现

pub mod check_config;
pub mod run;
