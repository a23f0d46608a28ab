// crates/sgs_physics/src/numerics/interpolation.rs

//! 单元 ↔ 面插值
//!
//! - [`interpolate`]: 单元值线性插值到面，边界面取 owner 值（零梯度）
//! - [`average`]: 面值按 |Sf| 加权平均回单元
//! - [`face_average`]: `average ∘ interpolate`
//!
//! 插值写成 `φ_N + w(φ_O - φ_N)` 的增量形式，均匀场精确保持不变。

use sgs_mesh::FvMesh;

use crate::fields::{Field, FieldLocation, FieldValue};

/// 单元场线性插值到面
///
/// # Panics
///
/// 输入不是单元场或长度与网格单元数不一致时 panic。
#[track_caller]
pub fn interpolate<T: FieldValue>(mesh: &FvMesh, field: &Field<T>) -> Field<T> {
    assert_cell_field(mesh, field);
    let values = field.values();
    Field::from_fn(
        format!("interpolate({})", field.name()),
        field.dimensions(),
        FieldLocation::Face,
        mesh.n_faces(),
        |face| {
            let owner = values[mesh.face_owner(face)];
            match mesh.face_neighbour(face) {
                Some(neighbour) => {
                    let neighbour = values[neighbour];
                    neighbour + (owner - neighbour) * mesh.face_weight(face)
                }
                None => owner,
            }
        },
    )
}

/// 面场按面积加权平均到单元
///
/// # Panics
///
/// 输入不是面场或长度与网格面数不一致时 panic。
#[track_caller]
pub fn average<T: FieldValue>(mesh: &FvMesh, face_field: &Field<T>) -> Field<T> {
    assert_eq!(face_field.location(), FieldLocation::Face, "average 需要面场");
    assert_eq!(face_field.len(), mesh.n_faces(), "面场长度与网格不一致");
    let values = face_field.values();
    Field::from_fn(
        format!("average({})", face_field.name()),
        face_field.dimensions(),
        FieldLocation::Cell,
        mesh.n_cells(),
        |cell| {
            let mut sum = T::ZERO;
            let mut mag = 0.0;
            for &face in mesh.cell_faces(cell) {
                let area = mesh.face_area(face);
                sum = sum + values[face] * area;
                mag += area;
            }
            sum * (1.0 / mag)
        },
    )
}

/// 单元 → 面 → 单元 的面积加权平均
///
/// 与 `average(interpolate(φ))` 在数学上相同，按偏差 `φ_f - φ_c` 累加，
/// 均匀场逐位不变。
#[track_caller]
pub fn face_average<T: FieldValue>(mesh: &FvMesh, field: &Field<T>) -> Field<T> {
    let faces = interpolate(mesh, field);
    let cell_values = field.values();
    let face_values = faces.values();
    Field::from_fn(
        format!("faceAverage({})", field.name()),
        field.dimensions(),
        FieldLocation::Cell,
        mesh.n_cells(),
        |cell| {
            let centre = cell_values[cell];
            let mut sum = T::ZERO;
            let mut mag = 0.0;
            for &face in mesh.cell_faces(cell) {
                let area = mesh.face_area(face);
                sum = sum + (face_values[face] - centre) * area;
                mag += area;
            }
            centre + sum * (1.0 / mag)
        },
    )
}

#[track_caller]
pub(crate) fn assert_cell_field<T: FieldValue>(mesh: &FvMesh, field: &Field<T>) {
    assert_eq!(
        field.location(),
        FieldLocation::Cell,
        "'{}' 不是单元场",
        field.name()
    );
    assert_eq!(
        field.len(),
        mesh.n_cells(),
        "'{}' 长度与网格单元数不一致",
        field.name()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{ScalarField, VectorField};
    use glam::DVec3;
    use sgs_foundation::Dimensions;
    use sgs_mesh::BoxMeshBuilder;

    #[test]
    fn test_interpolate_internal_and_boundary() {
        let mesh = BoxMeshBuilder::new(2, 1, 1).build().unwrap();
        let phi = ScalarField::cells("phi", Dimensions::DIMLESS, vec![1.0, 3.0]);
        let faces = interpolate(&mesh, &phi);
        assert_eq!(faces.location(), FieldLocation::Face);
        assert_eq!(faces.len(), mesh.n_faces());
        // 唯一内部面
        assert_eq!(faces[0], 2.0);
        for face in mesh.boundary_faces() {
            assert_eq!(faces[face], phi[mesh.face_owner(face)]);
        }
    }

    #[test]
    fn test_face_average_matches_average_of_interpolate() {
        let mesh = BoxMeshBuilder::new(3, 2, 2).build().unwrap();
        let phi = ScalarField::from_fn(
            "phi",
            Dimensions::DIMLESS,
            FieldLocation::Cell,
            mesh.n_cells(),
            |i| (i as f64 * 0.7).sin(),
        );
        let a = face_average(&mesh, &phi);
        let b = average(&mesh, &interpolate(&mesh, &phi));
        for cell in mesh.cells() {
            assert!((a[cell] - b[cell]).abs() < 1e-14);
        }
    }

    #[test]
    fn test_face_average_preserves_uniform_field() {
        let mesh = BoxMeshBuilder::new(3, 3, 3)
            .with_lengths(0.3, 0.7, 1.1)
            .periodic_all()
            .build()
            .unwrap();
        let u0 = DVec3::new(0.1, -2.3, 7.7);
        let u = VectorField::uniform("U", Dimensions::VELOCITY, mesh.n_cells(), u0);
        let f = face_average(&mesh, &u);
        assert!(f.iter().all(|&v| v == u0));
    }

    #[test]
    #[should_panic(expected = "不是单元场")]
    fn test_interpolate_rejects_face_field() {
        let mesh = BoxMeshBuilder::new(2, 1, 1).build().unwrap();
        let phi = ScalarField::new(
            "phi",
            Dimensions::DIMLESS,
            FieldLocation::Face,
            vec![0.0; mesh.n_cells()],
        );
        let _ = interpolate(&mesh, &phi);
    }
}
