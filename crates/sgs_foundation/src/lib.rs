// crates/sgs_foundation/src/lib.rs

//! SgsLab Foundation Layer
//!
//! 基础层，提供整个工作区共用的底层抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型 `SgsError` / `SgsResult`
//! - [`dimension`]: 物理量纲（SI 基本单位指数），用于场运算的单位一致性检查
//! - [`tolerance`]: 数值容差
//!
//! # 设计原则
//!
//! 1. **最少依赖**: 仅依赖 serde 和 thiserror
//! 2. **量纲安全**: 单位不一致属于编程错误，在检测点立即失败
//! 3. **参数注入**: 容差通过结构体传递，不使用全局可变状态
//!
//! # 示例
//!
//! ```
//! use sgs_foundation::dimension::Dimensions;
//!
//! let nu = Dimensions::KINEMATIC_VISCOSITY;
//! let delta = Dimensions::LENGTH;
//! // ν / δ² = 1/s
//! assert_eq!(nu / (delta * delta), Dimensions::RATE);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dimension;
pub mod error;
pub mod tolerance;

// 重导出常用类型
pub use dimension::Dimensions;
pub use error::{SgsError, SgsResult};
pub use tolerance::Tolerance;

/// 层级标识
pub const LAYER: u8 = 1;

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::dimension::Dimensions;
    pub use crate::error::{SgsError, SgsResult};
    pub use crate::tolerance::Tolerance;
}
