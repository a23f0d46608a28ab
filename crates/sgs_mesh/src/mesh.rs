// crates/sgs_mesh/src/mesh.rs

//! 有限体积网格
//!
//! 只读 SoA 布局，单元→面关系使用压缩格式 (offsets + indices)。
//!
//! # 设计要点
//!
//! 1. **内部面在前**: `0..n_internal_faces` 为内部面，其后为边界面
//! 2. **只读**: 构造完成后不可修改，可放入 `Arc` 在闭合模型间共享
//! 3. **构造即校验**: `from_data` 检查索引范围、体积、权重和单元封闭性

use glam::DVec3;
use std::ops::Range;

use crate::error::{MeshError, MeshResult};

/// 构造网格所需的原始数组
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// 单元中心
    pub cell_centre: Vec<DVec3>,
    /// 单元体积
    pub cell_volume: Vec<f64>,
    /// 面中心
    pub face_centre: Vec<DVec3>,
    /// 面积向量（owner → neighbour）
    pub face_area: Vec<DVec3>,
    /// 面 owner
    pub face_owner: Vec<usize>,
    /// 内部面 neighbour（长度即内部面数量）
    pub face_neighbour: Vec<usize>,
    /// owner 侧线性插值权重（长度为内部面数量，边界面隐含为 1）
    pub face_weight: Vec<f64>,
}

/// 网格统计信息
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshStatistics {
    /// 单元数
    pub n_cells: usize,
    /// 面数
    pub n_faces: usize,
    /// 内部面数
    pub n_internal_faces: usize,
    /// 最小单元体积
    pub min_volume: f64,
    /// 最大单元体积
    pub max_volume: f64,
    /// 总体积
    pub total_volume: f64,
}

/// 有限体积网格
#[derive(Debug, Clone)]
pub struct FvMesh {
    cell_centre: Vec<DVec3>,
    cell_volume: Vec<f64>,
    face_centre: Vec<DVec3>,
    face_area: Vec<DVec3>,
    face_mag_area: Vec<f64>,
    face_owner: Vec<usize>,
    face_neighbour: Vec<usize>,
    face_weight: Vec<f64>,
    cell_face_offsets: Vec<usize>,
    cell_face_indices: Vec<usize>,
}

impl FvMesh {
    /// 从原始数组构造并校验
    pub fn from_data(data: MeshData) -> MeshResult<Self> {
        let n_cells = data.cell_centre.len();
        let n_faces = data.face_area.len();
        let n_internal = data.face_neighbour.len();

        check_len("cell_volume", n_cells, data.cell_volume.len())?;
        check_len("face_centre", n_faces, data.face_centre.len())?;
        check_len("face_owner", n_faces, data.face_owner.len())?;
        check_len("face_weight", n_internal, data.face_weight.len())?;

        if n_cells == 0 {
            return Err(MeshError::topology("from_data", "网格没有单元"));
        }
        if n_internal > n_faces {
            return Err(MeshError::topology(
                "from_data",
                format!("内部面数 {} 超过总面数 {}", n_internal, n_faces),
            ));
        }

        for (face, &owner) in data.face_owner.iter().enumerate() {
            if owner >= n_cells {
                return Err(MeshError::topology(
                    "from_data",
                    format!("面 {} 的 owner {} 越界", face, owner),
                ));
            }
        }
        for (face, &neighbour) in data.face_neighbour.iter().enumerate() {
            if neighbour >= n_cells {
                return Err(MeshError::topology(
                    "from_data",
                    format!("面 {} 的 neighbour {} 越界", face, neighbour),
                ));
            }
        }

        // 单元 → 面（压缩格式）
        let mut counts = vec![0usize; n_cells];
        for face in 0..n_faces {
            counts[data.face_owner[face]] += 1;
            if face < n_internal {
                counts[data.face_neighbour[face]] += 1;
            }
        }
        let mut cell_face_offsets = Vec::with_capacity(n_cells + 1);
        cell_face_offsets.push(0);
        for &c in &counts {
            let last = cell_face_offsets[cell_face_offsets.len() - 1];
            cell_face_offsets.push(last + c);
        }
        let mut cursor = cell_face_offsets[..n_cells].to_vec();
        let mut cell_face_indices = vec![0usize; cell_face_offsets[n_cells]];
        for face in 0..n_faces {
            let owner = data.face_owner[face];
            cell_face_indices[cursor[owner]] = face;
            cursor[owner] += 1;
            if face < n_internal {
                let neighbour = data.face_neighbour[face];
                cell_face_indices[cursor[neighbour]] = face;
                cursor[neighbour] += 1;
            }
        }

        let face_mag_area = data.face_area.iter().map(|sf| sf.length()).collect();

        let mesh = Self {
            cell_centre: data.cell_centre,
            cell_volume: data.cell_volume,
            face_centre: data.face_centre,
            face_area: data.face_area,
            face_mag_area,
            face_owner: data.face_owner,
            face_neighbour: data.face_neighbour,
            face_weight: data.face_weight,
            cell_face_offsets,
            cell_face_indices,
        };
        mesh.validate()?;

        log::debug!(
            "网格构造完成: {} 单元, {} 面 ({} 内部)",
            mesh.n_cells(),
            mesh.n_faces(),
            mesh.n_internal_faces()
        );
        Ok(mesh)
    }

    // ========== 基本信息 ==========

    /// 单元数量
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.cell_volume.len()
    }

    /// 面数量
    #[inline]
    pub fn n_faces(&self) -> usize {
        self.face_area.len()
    }

    /// 内部面数量
    #[inline]
    pub fn n_internal_faces(&self) -> usize {
        self.face_neighbour.len()
    }

    /// 边界面数量
    #[inline]
    pub fn n_boundary_faces(&self) -> usize {
        self.n_faces() - self.n_internal_faces()
    }

    /// 单元索引范围
    #[inline]
    pub fn cells(&self) -> Range<usize> {
        0..self.n_cells()
    }

    /// 内部面索引范围
    #[inline]
    pub fn internal_faces(&self) -> Range<usize> {
        0..self.n_internal_faces()
    }

    /// 边界面索引范围
    #[inline]
    pub fn boundary_faces(&self) -> Range<usize> {
        self.n_internal_faces()..self.n_faces()
    }

    // ========== 几何数据 ==========

    /// 单元中心
    #[inline]
    pub fn cell_centre(&self, cell: usize) -> DVec3 {
        self.cell_centre[cell]
    }

    /// 单元体积
    #[inline]
    pub fn cell_volume(&self, cell: usize) -> f64 {
        self.cell_volume[cell]
    }

    /// 全部单元体积
    #[inline]
    pub fn cell_volumes(&self) -> &[f64] {
        &self.cell_volume
    }

    /// 面中心
    #[inline]
    pub fn face_centre(&self, face: usize) -> DVec3 {
        self.face_centre[face]
    }

    /// 面积向量 Sf
    #[inline]
    pub fn face_area_vector(&self, face: usize) -> DVec3 {
        self.face_area[face]
    }

    /// 面积 |Sf|
    #[inline]
    pub fn face_area(&self, face: usize) -> f64 {
        self.face_mag_area[face]
    }

    /// owner 侧插值权重（边界面为 1）
    #[inline]
    pub fn face_weight(&self, face: usize) -> f64 {
        self.face_weight.get(face).copied().unwrap_or(1.0)
    }

    // ========== 拓扑数据 ==========

    /// 面的 owner 单元
    #[inline]
    pub fn face_owner(&self, face: usize) -> usize {
        self.face_owner[face]
    }

    /// 面的 neighbour 单元（边界面返回 None）
    #[inline]
    pub fn face_neighbour(&self, face: usize) -> Option<usize> {
        self.face_neighbour.get(face).copied()
    }

    /// 是否为边界面
    #[inline]
    pub fn is_boundary_face(&self, face: usize) -> bool {
        face >= self.n_internal_faces()
    }

    /// 单元的所有面索引
    #[inline]
    pub fn cell_faces(&self, cell: usize) -> &[usize] {
        let start = self.cell_face_offsets[cell];
        let end = self.cell_face_offsets[cell + 1];
        &self.cell_face_indices[start..end]
    }

    /// 单元的相邻单元（经由内部面）
    pub fn cell_neighbours(&self, cell: usize) -> impl Iterator<Item = usize> + '_ {
        self.cell_faces(cell).iter().filter_map(move |&face| {
            let neighbour = self.face_neighbour(face)?;
            let owner = self.face_owner[face];
            Some(if owner == cell { neighbour } else { owner })
        })
    }

    /// 面积向量相对于 `cell` 的外法向符号（owner 为 +1，neighbour 为 -1）
    #[inline]
    pub fn face_sign(&self, face: usize, cell: usize) -> f64 {
        if self.face_owner[face] == cell {
            1.0
        } else {
            -1.0
        }
    }

    // ========== 统计与校验 ==========

    /// 网格统计
    pub fn statistics(&self) -> MeshStatistics {
        let (min_volume, max_volume, total_volume) = self.cell_volume.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(lo, hi, sum), &v| (lo.min(v), hi.max(v), sum + v),
        );
        MeshStatistics {
            n_cells: self.n_cells(),
            n_faces: self.n_faces(),
            n_internal_faces: self.n_internal_faces(),
            min_volume,
            max_volume,
            total_volume,
        }
    }

    /// 校验几何与封闭性
    ///
    /// - 单元体积为正
    /// - 内部面权重在 [0, 1]
    /// - 每个单元的外法向面积向量之和为零（封闭单元）
    pub fn validate(&self) -> MeshResult<()> {
        for (cell, &v) in self.cell_volume.iter().enumerate() {
            if !(v > 0.0 && v.is_finite()) {
                return Err(MeshError::geometry(cell, format!("单元体积无效: {}", v)));
            }
        }

        for (face, &w) in self.face_weight.iter().enumerate() {
            if !(0.0..=1.0).contains(&w) {
                return Err(MeshError::geometry(face, format!("插值权重越界: {}", w)));
            }
        }

        for cell in self.cells() {
            let mut sum = DVec3::ZERO;
            let mut mag = 0.0;
            for &face in self.cell_faces(cell) {
                sum += self.face_area[face] * self.face_sign(face, cell);
                mag += self.face_mag_area[face];
            }
            if sum.length() > 1e-10 * mag.max(f64::MIN_POSITIVE) {
                return Err(MeshError::geometry(
                    cell,
                    format!("单元不封闭: |ΣSf| = {:.3e}", sum.length()),
                ));
            }
        }

        Ok(())
    }
}

fn check_len(name: &'static str, expected: usize, actual: usize) -> MeshResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(MeshError::LengthMismatch {
            name,
            expected,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 两个单位立方体沿 x 方向并排
    fn two_cube_data() -> MeshData {
        let mut data = MeshData {
            cell_centre: vec![DVec3::new(0.5, 0.5, 0.5), DVec3::new(1.5, 0.5, 0.5)],
            cell_volume: vec![1.0, 1.0],
            ..Default::default()
        };

        // 内部面
        data.face_centre.push(DVec3::new(1.0, 0.5, 0.5));
        data.face_area.push(DVec3::X);
        data.face_owner.push(0);
        data.face_neighbour.push(1);
        data.face_weight.push(0.5);

        // 边界面
        for (cell, x0) in [(0usize, 0.0), (1usize, 1.0)] {
            let faces = [
                (DVec3::new(x0 + 0.5, 0.0, 0.5), -DVec3::Y),
                (DVec3::new(x0 + 0.5, 1.0, 0.5), DVec3::Y),
                (DVec3::new(x0 + 0.5, 0.5, 0.0), -DVec3::Z),
                (DVec3::new(x0 + 0.5, 0.5, 1.0), DVec3::Z),
            ];
            for (c, sf) in faces {
                data.face_centre.push(c);
                data.face_area.push(sf);
                data.face_owner.push(cell);
            }
        }
        data.face_centre.push(DVec3::new(0.0, 0.5, 0.5));
        data.face_area.push(-DVec3::X);
        data.face_owner.push(0);
        data.face_centre.push(DVec3::new(2.0, 0.5, 0.5));
        data.face_area.push(DVec3::X);
        data.face_owner.push(1);

        data
    }

    #[test]
    fn test_from_data_counts() {
        let mesh = FvMesh::from_data(two_cube_data()).unwrap();
        assert_eq!(mesh.n_cells(), 2);
        assert_eq!(mesh.n_faces(), 11);
        assert_eq!(mesh.n_internal_faces(), 1);
        assert_eq!(mesh.n_boundary_faces(), 10);
        assert_eq!(mesh.cell_faces(0).len(), 6);
        assert_eq!(mesh.cell_faces(1).len(), 6);
    }

    #[test]
    fn test_neighbours_and_signs() {
        let mesh = FvMesh::from_data(two_cube_data()).unwrap();
        let n0: Vec<usize> = mesh.cell_neighbours(0).collect();
        let n1: Vec<usize> = mesh.cell_neighbours(1).collect();
        assert_eq!(n0, vec![1]);
        assert_eq!(n1, vec![0]);
        assert_eq!(mesh.face_sign(0, 0), 1.0);
        assert_eq!(mesh.face_sign(0, 1), -1.0);
        assert_eq!(mesh.face_weight(0), 0.5);
        assert_eq!(mesh.face_weight(5), 1.0);
        assert!(mesh.is_boundary_face(5));
        assert_eq!(mesh.face_neighbour(5), None);
    }

    #[test]
    fn test_statistics() {
        let mesh = FvMesh::from_data(two_cube_data()).unwrap();
        let stats = mesh.statistics();
        assert_eq!(stats.min_volume, 1.0);
        assert_eq!(stats.max_volume, 1.0);
        assert_eq!(stats.total_volume, 2.0);
    }

    #[test]
    fn test_open_cell_rejected() {
        let mut data = two_cube_data();
        // 去掉最后一个边界面，单元 1 不再封闭
        data.face_centre.pop();
        data.face_area.pop();
        data.face_owner.pop();
        let err = FvMesh::from_data(data).unwrap_err();
        assert!(matches!(err, MeshError::InvalidGeometry { element_id: 1, .. }));
    }

    #[test]
    fn test_out_of_range_owner_rejected() {
        let mut data = two_cube_data();
        data.face_owner[3] = 7;
        assert!(matches!(
            FvMesh::from_data(data),
            Err(MeshError::InvalidTopology { .. })
        ));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let mut data = two_cube_data();
        data.cell_volume.push(1.0);
        assert!(matches!(
            FvMesh::from_data(data),
            Err(MeshError::LengthMismatch { name: "cell_volume", .. })
        ));
    }

    #[test]
    fn test_negative_volume_rejected() {
        let mut data = two_cube_data();
        data.cell_volume[0] = -1.0;
        assert!(FvMesh::from_data(data).is_err());
    }
}
