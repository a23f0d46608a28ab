// crates/sgs_physics/src/filters/mod.rs

//! LES 测试滤波器
//!
//! 动态模型在比网格更宽的尺度上重新滤波已解析场。滤波器在模型构造时
//! 按配置选定，之后不再替换。
//!
//! 所有滤波器都精确保持均匀场，且不改变场的量纲。

mod box_filter;
mod simple;

pub use box_filter::BoxFilter;
pub use simple::SimpleFilter;

use sgs_config::FilterConfig;
use sgs_mesh::FvMesh;

use crate::fields::{Field, FieldValue};

/// 空间滤波器接口
pub trait SpatialFilter: Send + Sync {
    /// 滤波器名称
    fn name(&self) -> &'static str;

    /// 对单元场滤波，返回同量纲的单元场
    fn apply<T: FieldValue>(&self, mesh: &FvMesh, field: &Field<T>) -> Field<T>;
}

/// 按配置选择的测试滤波器
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LesFilter {
    /// 面插值-面积加权平均
    Simple(SimpleFilter),
    /// 单元及其面邻居的体积加权平均
    Box(BoxFilter),
}

impl LesFilter {
    /// 从配置创建
    pub fn from_config(config: &FilterConfig) -> Self {
        match config {
            FilterConfig::Simple => Self::Simple(SimpleFilter),
            FilterConfig::Box => Self::Box(BoxFilter),
        }
    }

    /// 对应的配置
    pub fn config(&self) -> FilterConfig {
        match self {
            Self::Simple(_) => FilterConfig::Simple,
            Self::Box(_) => FilterConfig::Box,
        }
    }
}

impl Default for LesFilter {
    fn default() -> Self {
        Self::from_config(&FilterConfig::default())
    }
}

impl SpatialFilter for LesFilter {
    fn name(&self) -> &'static str {
        match self {
            Self::Simple(f) => f.name(),
            Self::Box(f) => f.name(),
        }
    }

    fn apply<T: FieldValue>(&self, mesh: &FvMesh, field: &Field<T>) -> Field<T> {
        match self {
            Self::Simple(f) => f.apply(mesh, field),
            Self::Box(f) => f.apply(mesh, field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{FieldLocation, ScalarField, SymmTensor, SymmTensorField, VectorField};
    use glam::DVec3;
    use sgs_foundation::Dimensions;
    use sgs_mesh::BoxMeshBuilder;

    fn filters() -> [LesFilter; 2] {
        [
            LesFilter::from_config(&FilterConfig::Simple),
            LesFilter::from_config(&FilterConfig::Box),
        ]
    }

    #[test]
    fn test_from_config_roundtrip() {
        for config in [FilterConfig::Simple, FilterConfig::Box] {
            let filter = LesFilter::from_config(&config);
            assert_eq!(filter.config(), config);
            assert_eq!(filter.name(), config.name());
        }
        assert_eq!(LesFilter::default().name(), "simple");
    }

    #[test]
    fn test_uniform_fields_pass_unchanged() {
        let mesh = BoxMeshBuilder::new(4, 3, 5)
            .with_lengths(1.3, 0.2, 2.9)
            .with_periodic([true, false, true])
            .build()
            .unwrap();
        let n = mesh.n_cells();
        let s = ScalarField::uniform("k", Dimensions::SPECIFIC_ENERGY, n, 0.37);
        let v = VectorField::uniform("U", Dimensions::VELOCITY, n, DVec3::new(1.1, -0.3, 9.5));
        let t = SymmTensorField::uniform(
            "D",
            Dimensions::RATE,
            n,
            SymmTensor::new(0.1, 0.2, 0.3, 0.4, 0.5, 0.6),
        );
        for filter in filters() {
            assert_eq!(filter.apply(&mesh, &s).values(), s.values());
            assert_eq!(filter.apply(&mesh, &v).values(), v.values());
            assert_eq!(filter.apply(&mesh, &t).values(), t.values());
            assert_eq!(filter.apply(&mesh, &t).dimensions(), Dimensions::RATE);
        }
    }

    #[test]
    fn test_filter_smooths_checkerboard() {
        let mesh = BoxMeshBuilder::new(4, 4, 4).periodic_all().build().unwrap();
        let phi = ScalarField::from_fn(
            "phi",
            Dimensions::DIMLESS,
            FieldLocation::Cell,
            mesh.n_cells(),
            |cell| {
                let (i, j, k) = (cell % 4, (cell / 4) % 4, cell / 16);
                if (i + j + k) % 2 == 0 {
                    1.0
                } else {
                    -1.0
                }
            },
        );
        for filter in filters() {
            let filtered = filter.apply(&mesh, &phi);
            let amplitude = filtered.max() - filtered.min();
            assert!(amplitude < 2.0, "{}: {}", filter.name(), amplitude);
            // 周期网格上滤波保持均值
            assert!(filtered.mean().abs() < 1e-14);
        }
    }
}
