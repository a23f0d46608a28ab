// crates/sgs_config/src/lib.rs

//! SgsLab Config Layer
//!
//! LES 模型属性字典：模型选择、滤波尺度、测试滤波器、模型系数和输运属性。
//! 全部数值使用 f64，JSON 键名为 camelCase，所有键可缺省。
//!
//! # 模块概览
//!
//! - [`les_properties`]: `LesProperties` 及其子配置
//! - [`error`]: 配置错误类型
//!
//! # 校验策略
//!
//! - 缺失的可选键回退到默认值
//! - 存在但无效的值（类型错误、非有限数、负的模型常数、未知名称）
//!   在加载时即报错，不会被静默替换为零

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod les_properties;

/// 层级标识
pub const LAYER: u8 = 3;

pub use error::ConfigError;
pub use les_properties::{
    DeltaConfig, DynamicCoeffs, FilterConfig, LesProperties, ModelKind, QrCoeffs,
    TransportConfig, DEFAULT_CE, DEFAULT_CK,
};
