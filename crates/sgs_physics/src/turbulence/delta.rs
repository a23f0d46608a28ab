// crates/sgs_physics/src/turbulence/delta.rs

//! LES 滤波尺度 δ
//!
//! ```text
//! cubeRootVol: δ = c · V^(1/3)
//! uniform:     δ = const
//! ```

use sgs_config::DeltaConfig;
use sgs_foundation::Dimensions;
use sgs_mesh::FvMesh;

use crate::fields::{FieldLocation, ScalarField};

/// 滤波尺度模型
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LesDelta {
    /// 单元体积立方根乘以系数
    CubeRootVol {
        /// 比例系数
        delta_coeff: f64,
    },
    /// 全场统一值 [m]
    Uniform {
        /// δ [m]
        value: f64,
    },
}

impl LesDelta {
    /// 从配置创建
    pub fn from_config(config: &DeltaConfig) -> Self {
        match *config {
            DeltaConfig::CubeRootVol { delta_coeff } => Self::CubeRootVol { delta_coeff },
            DeltaConfig::Uniform { value } => Self::Uniform { value },
        }
    }

    /// 对应的配置
    pub fn config(&self) -> DeltaConfig {
        match *self {
            Self::CubeRootVol { delta_coeff } => DeltaConfig::CubeRootVol { delta_coeff },
            Self::Uniform { value } => DeltaConfig::Uniform { value },
        }
    }

    /// 名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::CubeRootVol { .. } => "cubeRootVol",
            Self::Uniform { .. } => "uniform",
        }
    }

    /// 计算 δ 场
    pub fn compute(&self, mesh: &FvMesh) -> ScalarField {
        ScalarField::from_fn(
            "delta",
            Dimensions::LENGTH,
            FieldLocation::Cell,
            mesh.n_cells(),
            |cell| match *self {
                Self::CubeRootVol { delta_coeff } => delta_coeff * mesh.cell_volume(cell).cbrt(),
                Self::Uniform { value } => value,
            },
        )
    }
}

impl Default for LesDelta {
    fn default() -> Self {
        Self::from_config(&DeltaConfig::default())
    }
}
