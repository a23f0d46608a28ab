// crates/sgs_physics/src/turbulence/model.rs

//! 按配置选择的亚格子模型

use sgs_config::{LesProperties, ModelKind};
use sgs_mesh::FvMesh;

use super::dynamic_cubic_root::DynamicCubicRootModel;
use super::qr::QrModel;
use super::traits::{ClosureInputs, CoefficientReport, SgsClosure};
use crate::fields::{ScalarField, SymmTensorField};

/// 亚格子模型
#[derive(Debug)]
pub enum SgsModel {
    /// 等容 QR 代数模型
    Qr(QrModel),
    /// 动态立方根模型
    DynamicCubicRoot(DynamicCubicRootModel),
}

impl SgsModel {
    /// 按配置构造
    pub fn from_properties(mesh: &FvMesh, props: &LesProperties) -> Self {
        match props.model {
            ModelKind::Qr => Self::Qr(QrModel::from_coeffs(&props.qr_coeffs)),
            ModelKind::DynamicCubicRoot => {
                Self::DynamicCubicRoot(DynamicCubicRootModel::new(mesh, &props.dynamic_coeffs))
            }
        }
    }

    /// 模型类型
    pub fn kind(&self) -> ModelKind {
        match self {
            Self::Qr(_) => ModelKind::Qr,
            Self::DynamicCubicRoot(_) => ModelKind::DynamicCubicRoot,
        }
    }

    /// 动态模型（若是）
    pub fn as_dynamic(&self) -> Option<&DynamicCubicRootModel> {
        match self {
            Self::DynamicCubicRoot(model) => Some(model),
            Self::Qr(_) => None,
        }
    }

    /// 可变动态模型（若是）
    pub fn as_dynamic_mut(&mut self) -> Option<&mut DynamicCubicRootModel> {
        match self {
            Self::DynamicCubicRoot(model) => Some(model),
            Self::Qr(_) => None,
        }
    }

    fn closure(&self) -> &dyn SgsClosure {
        match self {
            Self::Qr(model) => model,
            Self::DynamicCubicRoot(model) => model,
        }
    }

    fn closure_mut(&mut self) -> &mut dyn SgsClosure {
        match self {
            Self::Qr(model) => model,
            Self::DynamicCubicRoot(model) => model,
        }
    }
}

impl SgsClosure for SgsModel {
    fn name(&self) -> &'static str {
        self.closure().name()
    }

    fn update_coefficients(&mut self, inputs: &ClosureInputs<'_>) -> CoefficientReport {
        self.closure_mut().update_coefficients(inputs)
    }

    fn k(&self, strain_rate: &SymmTensorField, delta: &ScalarField) -> ScalarField {
        self.closure().k(strain_rate, delta)
    }

    fn nu_sgs(&self, strain_rate: &SymmTensorField, delta: &ScalarField) -> ScalarField {
        self.closure().nu_sgs(strain_rate, delta)
    }

    fn ce(&self) -> f64 {
        self.closure().ce()
    }

    fn read(&mut self, props: &LesProperties) -> bool {
        self.closure_mut().read(props)
    }

    fn is_dynamic(&self) -> bool {
        self.closure().is_dynamic()
    }
}
