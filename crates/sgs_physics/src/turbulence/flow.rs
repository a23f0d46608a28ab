// crates/sgs_physics/src/turbulence/flow.rs

//! 流动属性
//!
//! 闭合驱动器通过 [`FlowProperties`] 获取分子粘性、密度、相分数和质量通量，
//! 不依赖具体的不可压/可压/多相求解器类型。

use sgs_foundation::Dimensions;
use sgs_mesh::FvMesh;

use crate::fields::{FieldLocation, ScalarField, VectorField};
use crate::numerics::interpolate;

/// 流动属性接口
pub trait FlowProperties: Send + Sync {
    /// 分子运动粘性 ν [m²/s]
    fn nu(&self, mesh: &FvMesh) -> ScalarField;

    /// 密度 ρ
    fn density(&self, mesh: &FvMesh) -> ScalarField;

    /// 相分数 α
    fn phase_fraction(&self, mesh: &FvMesh) -> ScalarField;

    /// 面质量通量 `ρ_f α_f U_f·Sf`
    fn mass_flux(&self, mesh: &FvMesh, velocity: &VectorField) -> ScalarField {
        let rho_alpha = &self.density(mesh) * &self.phase_fraction(mesh);
        let rho_alpha_f = interpolate(mesh, &rho_alpha);
        let u_f = interpolate(mesh, velocity);
        ScalarField::from_fn(
            "phi",
            rho_alpha.dimensions() * velocity.dimensions() * Dimensions::AREA,
            FieldLocation::Face,
            mesh.n_faces(),
            |face| rho_alpha_f[face] * u_f[face].dot(mesh.face_area_vector(face)),
        )
    }
}

/// 单相不可压流动（运动学形式，ρ = α = 1）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncompressibleFlow {
    /// 分子运动粘性 [m²/s]
    pub nu: f64,
}

impl IncompressibleFlow {
    /// 创建
    pub fn new(nu: f64) -> Self {
        Self { nu }
    }
}

impl FlowProperties for IncompressibleFlow {
    fn nu(&self, mesh: &FvMesh) -> ScalarField {
        ScalarField::uniform("nu", Dimensions::KINEMATIC_VISCOSITY, mesh.n_cells(), self.nu)
    }

    fn density(&self, mesh: &FvMesh) -> ScalarField {
        ScalarField::uniform("rho", Dimensions::DIMLESS, mesh.n_cells(), 1.0)
    }

    fn phase_fraction(&self, mesh: &FvMesh) -> ScalarField {
        ScalarField::uniform("alpha", Dimensions::DIMLESS, mesh.n_cells(), 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use sgs_mesh::BoxMeshBuilder;

    #[test]
    fn test_incompressible_properties() {
        let mesh = BoxMeshBuilder::new(2, 2, 2).build().unwrap();
        let flow = IncompressibleFlow::new(1e-5);
        let nu = flow.nu(&mesh);
        assert_eq!(nu.len(), 8);
        assert_eq!(nu.dimensions(), Dimensions::KINEMATIC_VISCOSITY);
        assert!(nu.iter().all(|&v| v == 1e-5));
        assert!(flow.density(&mesh).iter().all(|&v| v == 1.0));
        assert!(flow.phase_fraction(&mesh).iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_mass_flux_of_uniform_stream() {
        let mesh = BoxMeshBuilder::new(4, 2, 2)
            .with_lengths(2.0, 1.0, 1.0)
            .build()
            .unwrap();
        let u = VectorField::uniform("U", Dimensions::VELOCITY, mesh.n_cells(), DVec3::X * 3.0);
        let phi = IncompressibleFlow::new(1e-5).mass_flux(&mesh, &u);
        assert_eq!(phi.location(), FieldLocation::Face);
        assert_eq!(phi.dimensions(), Dimensions::VOLUMETRIC_FLUX);
        // 每个单元净通量为零
        for cell in mesh.cells() {
            let net: f64 = mesh
                .cell_faces(cell)
                .iter()
                .map(|&f| phi[f] * mesh.face_sign(f, cell))
                .sum();
            assert!(net.abs() < 1e-14);
        }
        // x 向内部面通量 = 3 · 0.25
        assert!((phi[0] - 0.75).abs() < 1e-14);
    }
}
