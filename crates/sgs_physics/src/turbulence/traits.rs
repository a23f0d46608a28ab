// crates/sgs_physics/src/turbulence/traits.rs

//! 亚格子闭合 trait
//!
//! 静态模型与动态模型共享同一接口：驱动器先调用
//! [`SgsClosure::update_coefficients`]，再由 `k` / `nu_sgs` 组装闭合场。

use sgs_config::LesProperties;
use sgs_mesh::FvMesh;

use crate::fields::{ScalarField, SymmTensorField, VectorField};

/// 一次修正步的输入
#[derive(Debug, Clone, Copy)]
pub struct ClosureInputs<'a> {
    /// 网格
    pub mesh: &'a FvMesh,
    /// 已解析速度 U
    pub velocity: &'a VectorField,
    /// 应变率 D
    pub strain_rate: &'a SymmTensorField,
    /// 滤波尺度 δ
    pub delta: &'a ScalarField,
}

/// 系数更新统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoefficientReport {
    /// cD 分母病态、保留旧值的单元数
    pub cd_fallback: usize,
    /// cI 分母病态、保留旧值的单元数
    pub ci_fallback: usize,
}

/// 亚格子闭合模型
pub trait SgsClosure: Send + Sync {
    /// 模型名称
    fn name(&self) -> &'static str;

    /// 按当前流场更新模型系数（静态模型无操作）
    fn update_coefficients(&mut self, _inputs: &ClosureInputs<'_>) -> CoefficientReport {
        CoefficientReport::default()
    }

    /// 亚格子动能 k [m²/s²]
    fn k(&self, strain_rate: &SymmTensorField, delta: &ScalarField) -> ScalarField;

    /// 未裁剪的亚格子粘性 νsgs [m²/s]
    fn nu_sgs(&self, strain_rate: &SymmTensorField, delta: &ScalarField) -> ScalarField;

    /// 耗散常数 ce
    fn ce(&self) -> f64;

    /// 重新读取可由用户修改的系数，返回是否有变化
    fn read(&mut self, props: &LesProperties) -> bool;

    /// 是否为动态模型
    fn is_dynamic(&self) -> bool {
        false
    }
}
