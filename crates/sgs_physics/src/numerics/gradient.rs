// crates/sgs_physics/src/numerics/gradient.rs

//! Green-Gauss 梯度计算
//!
//! 使用 Gauss 定理将体积分转化为面积分:
//!
//! ```text
//! (∇φ)_c ≈ (1/V_c) Σ_f Sf ⊗ φ_f
//! ```
//!
//! 张量梯度按 `(∇U)_ij = ∂_i U_j` 约定存储。
//! 内部面值线性插值，边界面取 owner 值（零梯度边界）。

use glam::{DMat3, DVec3};
use rayon::prelude::*;
use sgs_foundation::Dimensions;
use sgs_mesh::FvMesh;

use crate::fields::{Field, FieldLocation, FieldValue, ScalarField, TensorField, VectorField};
use crate::numerics::interpolation::assert_cell_field;

/// 梯度格式接口
pub trait GradientScheme: Send + Sync {
    /// 格式名称
    fn name(&self) -> &'static str;

    /// 标量场梯度
    fn grad_scalar(&self, mesh: &FvMesh, field: &ScalarField) -> VectorField;

    /// 向量场梯度
    fn grad_vector(&self, mesh: &FvMesh, field: &VectorField) -> TensorField;
}

/// Green-Gauss 梯度配置
#[derive(Debug, Clone)]
pub struct GreenGaussConfig {
    /// 是否启用并行
    pub parallel: bool,
    /// 并行阈值（单元数）
    pub parallel_threshold: usize,
}

impl Default for GreenGaussConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 1000,
        }
    }
}

/// Green-Gauss 梯度计算器
#[derive(Debug, Clone, Default)]
pub struct GreenGaussGradient {
    config: GreenGaussConfig,
}

impl GreenGaussGradient {
    /// 创建新实例
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用配置创建
    pub fn with_config(config: GreenGaussConfig) -> Self {
        Self { config }
    }

    /// 设置并行开关
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.config.parallel = enabled;
        self
    }

    /// 设置并行阈值
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.config.parallel_threshold = threshold;
        self
    }

    /// 单个单元的面积分 `Σ_f Sf ⊗ φ_f / V`
    fn cell_gradient<T, G, F>(&self, mesh: &FvMesh, values: &[T], cell: usize, outer: F) -> G
    where
        T: FieldValue,
        G: FieldValue,
        F: Fn(DVec3, T) -> G,
    {
        let phi_c = values[cell];
        let mut grad = G::ZERO;

        for &face in mesh.cell_faces(cell) {
            let ds = mesh.face_area_vector(face) * mesh.face_sign(face, cell);
            let phi_face = match mesh.face_neighbour(face) {
                Some(neighbour) => {
                    let phi_o = values[mesh.face_owner(face)];
                    let phi_n = values[neighbour];
                    phi_n + (phi_o - phi_n) * mesh.face_weight(face)
                }
                None => phi_c,
            };
            grad = grad + outer(ds, phi_face);
        }

        grad * (1.0 / mesh.cell_volume(cell))
    }

    fn compute<T, G, F>(&self, mesh: &FvMesh, field: &Field<T>, outer: F) -> Field<G>
    where
        T: FieldValue,
        G: FieldValue,
        F: Fn(DVec3, T) -> G + Send + Sync,
    {
        assert_cell_field(mesh, field);
        let values = field.values();
        let n = mesh.n_cells();

        let grads: Vec<G> = if self.config.parallel && n >= self.config.parallel_threshold {
            (0..n)
                .into_par_iter()
                .map(|cell| self.cell_gradient(mesh, values, cell, &outer))
                .collect()
        } else {
            (0..n)
                .map(|cell| self.cell_gradient(mesh, values, cell, &outer))
                .collect()
        };

        Field::new(
            format!("grad({})", field.name()),
            field.dimensions() / Dimensions::LENGTH,
            FieldLocation::Cell,
            grads,
        )
    }
}

impl GradientScheme for GreenGaussGradient {
    fn name(&self) -> &'static str {
        "Gauss linear"
    }

    fn grad_scalar(&self, mesh: &FvMesh, field: &ScalarField) -> VectorField {
        self.compute(mesh, field, |ds, phi| ds * phi)
    }

    fn grad_vector(&self, mesh: &FvMesh, field: &VectorField) -> TensorField {
        self.compute(mesh, field, |ds, u| {
            DMat3::from_cols(ds * u.x, ds * u.y, ds * u.z)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sgs_mesh::BoxMeshBuilder;

    #[test]
    fn test_uniform_field_has_zero_gradient() {
        let mesh = BoxMeshBuilder::new(3, 3, 3).build().unwrap();
        let u = VectorField::uniform("U", Dimensions::VELOCITY, mesh.n_cells(), DVec3::new(1.0, 2.0, 3.0));
        let grad = GreenGaussGradient::new().grad_vector(&mesh, &u);
        assert_eq!(grad.dimensions(), Dimensions::RATE);
        assert!(grad.iter().all(|g| *g == DMat3::ZERO));
    }

    #[test]
    fn test_linear_scalar_interior_cell() {
        let mesh = BoxMeshBuilder::new(4, 4, 4).build().unwrap();
        let phi = ScalarField::from_fn(
            "phi",
            Dimensions::LENGTH,
            FieldLocation::Cell,
            mesh.n_cells(),
            |i| {
                let c = mesh.cell_centre(i);
                2.0 * c.x - c.y + 0.5 * c.z
            },
        );
        let grad = GreenGaussGradient::new().grad_scalar(&mesh, &phi);
        assert_eq!(grad.dimensions(), Dimensions::DIMLESS);
        // 内部单元 (1,1,1) 与 (2,2,2) 精确
        for cell in [1 + 4 * (1 + 4), 2 + 4 * (2 + 4 * 2)] {
            let g = grad[cell];
            assert!((g - DVec3::new(2.0, -1.0, 0.5)).length() < 1e-12, "{:?}", g);
        }
    }

    #[test]
    fn test_shear_flow_gradient_convention() {
        // U = (y, 0, 0): ∂_y U_x = 1
        let mesh = BoxMeshBuilder::new(4, 4, 4).build().unwrap();
        let u = VectorField::from_fn(
            "U",
            Dimensions::VELOCITY,
            FieldLocation::Cell,
            mesh.n_cells(),
            |i| DVec3::new(mesh.cell_centre(i).y, 0.0, 0.0),
        );
        let grad = GreenGaussGradient::new().grad_vector(&mesh, &u);
        let g = grad[1 + 4 * (1 + 4)];
        // T_yx 位于第 x 列的 y 分量
        assert!((g.x_axis.y - 1.0).abs() < 1e-12);
        assert!(g.x_axis.x.abs() < 1e-12);
        assert!(g.y_axis.length() < 1e-12);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let mesh = BoxMeshBuilder::new(6, 5, 4).periodic_all().build().unwrap();
        let u = VectorField::from_fn(
            "U",
            Dimensions::VELOCITY,
            FieldLocation::Cell,
            mesh.n_cells(),
            |i| {
                let c = mesh.cell_centre(i);
                DVec3::new(c.y.sin(), c.z.cos(), c.x * c.y)
            },
        );
        let serial = GreenGaussGradient::new().with_parallel(false).grad_vector(&mesh, &u);
        let parallel = GreenGaussGradient::new().with_threshold(1).grad_vector(&mesh, &u);
        assert_eq!(serial, parallel);
    }
}
