// crates/sgs_physics/src/filters/simple.rs

//! 简单滤波器：插值到面再按面积加权平均回单元

use sgs_mesh::FvMesh;

use super::SpatialFilter;
use crate::fields::{Field, FieldValue};
use crate::numerics::face_average;

/// 简单滤波器
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimpleFilter;

impl SpatialFilter for SimpleFilter {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn apply<T: FieldValue>(&self, mesh: &FvMesh, field: &Field<T>) -> Field<T> {
        face_average(mesh, field).renamed(format!("simpleFilter({})", field.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::ScalarField;
    use sgs_foundation::Dimensions;
    use sgs_mesh::BoxMeshBuilder;

    #[test]
    fn test_one_dimensional_stencil() {
        // 3×1×1 非周期、单位单元：中间单元六个面中 x 方向两面来自邻居
        let mesh = BoxMeshBuilder::new(3, 1, 1)
            .with_lengths(3.0, 1.0, 1.0)
            .build()
            .unwrap();
        let phi = ScalarField::cells("phi", Dimensions::DIMLESS, vec![0.0, 3.0, 0.0]);
        let filtered = SimpleFilter.apply(&mesh, &phi);
        // 面值: x 两面 1.5，其余四面 3.0，面积相同
        let expected = (2.0 * 1.5 + 4.0 * 3.0) / 6.0;
        assert!((filtered[1] - expected).abs() < 1e-14);
    }
}
