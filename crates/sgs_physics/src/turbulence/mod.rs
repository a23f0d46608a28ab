// crates/sgs_physics/src/turbulence/mod.rs

//! LES 亚格子湍流闭合
//!
//! - [`qr`]: 等容 QR 代数模型（固定系数 ck）
//! - [`dynamic_cubic_root`]: 动态立方根模型（Germano-Lilly 动态 cD / cI）
//! - [`eddy_viscosity`]: 闭合驱动器，负责梯度、裁剪和有效粘性
//!
//! # 模型对比
//!
//! | 模型 | k | νsgs | 滤波 |
//! |------|---|------|------|
//! | qr | (2ck/ce)·δ²·\|D\|² | ck·√k·δ | 无 |
//! | dynamicCubicRoot | cI·δ²·\|dev(D)\|² | cD·δ²·\|D\| | 测试滤波器 |
//!
//! # 使用
//!
//! ```ignore
//! use sgs_physics::turbulence::{IncompressibleFlow, LesEddyViscosity};
//!
//! let mut les = LesEddyViscosity::new(mesh, &props, IncompressibleFlow::new(1.5e-5))?;
//! les.correct(&u);
//! let k = les.k(&u);
//! ```

pub mod delta;
pub mod dynamic_cubic_root;
pub mod eddy_viscosity;
pub mod flow;
pub mod model;
pub mod qr;
pub mod strain_rate;
pub mod traits;

pub use delta::LesDelta;
pub use dynamic_cubic_root::{face_averaged_ratio, DynamicCubicRootModel};
pub use eddy_viscosity::{CorrectionReport, LesEddyViscosity};
pub use flow::{FlowProperties, IncompressibleFlow};
pub use model::SgsModel;
pub use qr::QrModel;
pub use strain_rate::strain_rate;
pub use traits::{ClosureInputs, CoefficientReport, SgsClosure};
