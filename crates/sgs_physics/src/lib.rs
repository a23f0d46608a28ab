// crates/sgs_physics/src/lib.rs

//! SgsLab 物理模块
//!
//! LES 亚格子尺度闭合，包括：
//! - 带量纲的离散场及场代数 (fields)
//! - 离散算子：梯度、插值、面平均 (numerics)
//! - 测试滤波器 (filters)
//! - 亚格子模型与闭合驱动器 (turbulence)
//!
//! # Trait 抽象
//!
//! - [`SgsClosure`]: 亚格子模型接口
//! - [`SpatialFilter`]: 测试滤波器接口
//! - [`FlowProperties`]: 粘性、密度、相分数、质量通量
//! - [`GradientScheme`]: 梯度格式

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod fields;
pub mod filters;
pub mod numerics;
pub mod turbulence;

/// 层级标识
pub const LAYER: u8 = 4;

// 重导出常用类型
pub use fields::{
    Field, FieldLocation, FieldValue, ScalarField, SymmTensor, SymmTensorField, TensorField,
    VectorField,
};
pub use filters::{BoxFilter, LesFilter, SimpleFilter, SpatialFilter};
pub use numerics::{GradientScheme, GreenGaussGradient};
pub use turbulence::{
    CorrectionReport, DynamicCubicRootModel, FlowProperties, IncompressibleFlow, LesDelta,
    LesEddyViscosity, QrModel, SgsClosure, SgsModel,
};
