// crates/sgs_physics/src/filters/box_filter.rs

//! 盒式滤波器：单元与其面邻居的体积加权平均
//!
//! ```text
//! φ̄_c = (V_c φ_c + Σ_nb V_nb φ_nb) / (V_c + Σ_nb V_nb)
//! ```

use sgs_mesh::FvMesh;

use super::SpatialFilter;
use crate::fields::{Field, FieldLocation, FieldValue};
use crate::numerics::interpolation::assert_cell_field;

/// 盒式滤波器
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoxFilter;

impl SpatialFilter for BoxFilter {
    fn name(&self) -> &'static str {
        "box"
    }

    fn apply<T: FieldValue>(&self, mesh: &FvMesh, field: &Field<T>) -> Field<T> {
        assert_cell_field(mesh, field);
        let values = field.values();
        Field::from_fn(
            format!("boxFilter({})", field.name()),
            field.dimensions(),
            FieldLocation::Cell,
            mesh.n_cells(),
            |cell| {
                let centre = values[cell];
                let mut sum = T::ZERO;
                let mut volume = mesh.cell_volume(cell);
                for nb in mesh.cell_neighbours(cell) {
                    let v = mesh.cell_volume(nb);
                    sum = sum + (values[nb] - centre) * v;
                    volume += v;
                }
                centre + sum * (1.0 / volume)
            },
        )
    }
}
