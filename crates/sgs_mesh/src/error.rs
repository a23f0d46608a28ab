// crates/sgs_mesh/src/error.rs
//! 网格处理错误类型
//!
//! 所有错误可转换为 `sgs_foundation::SgsError` 向上传播

use sgs_foundation::SgsError;
use thiserror::Error;

/// 网格模块结果类型
pub type MeshResult<T> = Result<T, MeshError>;

/// 网格错误枚举
#[derive(Error, Debug)]
pub enum MeshError {
    /// 拓扑错误
    #[error("拓扑错误: {operation} 失败, {details}")]
    InvalidTopology {
        /// 出错的操作
        operation: &'static str,
        /// 细节
        details: String,
    },

    /// 几何错误
    #[error("几何错误: 元素 {element_id}, {message}")]
    InvalidGeometry {
        /// 单元或面索引
        element_id: usize,
        /// 细节
        message: String,
    },

    /// 网格参数无效
    #[error("网格参数无效: {name}={value}, {reason}")]
    InvalidParameter {
        /// 参数名
        name: &'static str,
        /// 参数值
        value: String,
        /// 原因
        reason: &'static str,
    },

    /// 数组长度不一致
    #[error("数组长度不一致: {name} 期望 {expected}, 实际 {actual}")]
    LengthMismatch {
        /// 数组名
        name: &'static str,
        /// 期望长度
        expected: usize,
        /// 实际长度
        actual: usize,
    },
}

impl MeshError {
    /// 拓扑错误
    pub fn topology(operation: &'static str, details: impl Into<String>) -> Self {
        Self::InvalidTopology {
            operation,
            details: details.into(),
        }
    }

    /// 几何错误
    pub fn geometry(element_id: usize, message: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            element_id,
            message: message.into(),
        }
    }
}

impl From<MeshError> for SgsError {
    fn from(err: MeshError) -> Self {
        SgsError::invalid_mesh(err.to_string())
    }
}
