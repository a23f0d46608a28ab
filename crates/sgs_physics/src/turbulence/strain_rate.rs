// crates/sgs_physics/src/turbulence/strain_rate.rs

//! 应变率张量 `D = symm(∇U)`

use crate::fields::{SymmTensorField, TensorField};

/// 由速度梯度计算应变率
pub fn strain_rate(grad_u: &TensorField) -> SymmTensorField {
    grad_u.symm().renamed("D")
}
