// crates/sgs_physics/src/numerics/mod.rs

//! 离散算子
//!
//! - [`gradient`]: Green-Gauss 梯度
//! - [`interpolation`]: 单元 ↔ 面插值与面平均

pub mod gradient;
pub mod interpolation;

pub use gradient::{GradientScheme, GreenGaussConfig, GreenGaussGradient};
pub use interpolation::{average, face_average, interpolate};
