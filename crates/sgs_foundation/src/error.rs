// crates/sgs_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `SgsError` 枚举和 `SgsResult` 类型别名。
//!
//! 注意：闭合模型内部的数值病态（动态比值分母趋零、负有效粘性）
//! 在局部被恢复，不会以错误形式向上传播；这里只定义真正需要
//! 调用方处理的错误。
//!
//! # 示例
//!
//! ```
//! use sgs_foundation::error::{SgsError, SgsResult};
//!
//! fn read_coeffs() -> SgsResult<()> {
//!     Err(SgsError::config("qrCoeffs.ck 必须为有限数"))
//! }
//! assert!(read_coeffs().is_err());
//! ```

use thiserror::Error;

use crate::dimension::Dimensions;

/// 统一结果类型
pub type SgsResult<T> = Result<T, SgsError>;

/// SgsLab 错误类型
#[derive(Error, Debug)]
pub enum SgsError {
    /// 配置错误
    #[error("配置错误: {message}")]
    Config {
        /// 具体错误信息
        message: String,
    },

    /// 配置值无效
    #[error("配置值无效: {key}={value}, 原因: {reason}")]
    InvalidConfig {
        /// 配置键名
        key: String,
        /// 配置值
        value: String,
        /// 无效原因说明
        reason: String,
    },

    /// 无效输入
    #[error("无效的输入数据: {message}")]
    InvalidInput {
        /// 说明无效原因
        message: String,
    },

    /// 数组大小不匹配
    #[error("数组大小不匹配: {name} 期望{expected}, 实际{actual}")]
    SizeMismatch {
        /// 数据名称
        name: &'static str,
        /// 期望大小
        expected: usize,
        /// 实际大小
        actual: usize,
    },

    /// 无效网格
    #[error("无效的网格: {message}")]
    InvalidMesh {
        /// 具体错误信息
        message: String,
    },

    /// 量纲不一致
    #[error("量纲不一致: {operation} 左操作数 {lhs}, 右操作数 {rhs}")]
    DimensionMismatch {
        /// 运算名称
        operation: &'static str,
        /// 左操作数量纲
        lhs: Dimensions,
        /// 右操作数量纲
        rhs: Dimensions,
    },

    /// 内部错误
    #[error("内部错误: {message}")]
    Internal {
        /// 内部错误描述
        message: String,
    },
}

impl SgsError {
    /// 配置错误
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// 配置值无效
    pub fn invalid_config(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// 无效输入
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// 数组大小不匹配
    pub fn size_mismatch(name: &'static str, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            name,
            expected,
            actual,
        }
    }

    /// 无效网格
    pub fn invalid_mesh(message: impl Into<String>) -> Self {
        Self::InvalidMesh {
            message: message.into(),
        }
    }

    /// 量纲不一致
    pub fn dimension_mismatch(operation: &'static str, lhs: Dimensions, rhs: Dimensions) -> Self {
        Self::DimensionMismatch {
            operation,
            lhs,
            rhs,
        }
    }

    /// 内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// 是否为配置类错误
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Config { .. } | Self::InvalidConfig { .. })
    }
}
