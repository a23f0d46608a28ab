// crates/sgs_mesh/src/builder.rs

//! 结构化盒形网格生成
//!
//! 生成均匀六面体网格 `nx × ny × nz`，单元编号为
//! `cell = i + nx·(j + ny·k)`。
//!
//! 周期方向上，最后一层单元的 `+` 侧面与第一层单元连接成内部面，
//! 插值权重取 ½；非周期方向两端生成边界面。

use glam::DVec3;

use crate::error::{MeshError, MeshResult};
use crate::mesh::{FvMesh, MeshData};

/// 盒形网格生成器
#[derive(Debug, Clone)]
pub struct BoxMeshBuilder {
    n: [usize; 3],
    lengths: DVec3,
    origin: DVec3,
    periodic: [bool; 3],
}

impl BoxMeshBuilder {
    /// 创建生成器（默认单位立方体、无周期）
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self {
            n: [nx, ny, nz],
            lengths: DVec3::ONE,
            origin: DVec3::ZERO,
            periodic: [false; 3],
        }
    }

    /// 设置盒子边长
    pub fn with_lengths(mut self, lx: f64, ly: f64, lz: f64) -> Self {
        self.lengths = DVec3::new(lx, ly, lz);
        self
    }

    /// 设置原点
    pub fn with_origin(mut self, origin: DVec3) -> Self {
        self.origin = origin;
        self
    }

    /// 设置各方向周期
    pub fn with_periodic(mut self, periodic: [bool; 3]) -> Self {
        self.periodic = periodic;
        self
    }

    /// 三个方向全部周期
    pub fn periodic_all(self) -> Self {
        self.with_periodic([true; 3])
    }

    /// 单元尺寸
    pub fn spacing(&self) -> DVec3 {
        DVec3::new(
            self.lengths.x / self.n[0] as f64,
            self.lengths.y / self.n[1] as f64,
            self.lengths.z / self.n[2] as f64,
        )
    }

    fn check(&self) -> MeshResult<()> {
        for d in 0..3 {
            if self.n[d] == 0 {
                return Err(MeshError::InvalidParameter {
                    name: "n",
                    value: format!("{:?}", self.n),
                    reason: "每个方向至少一个单元",
                });
            }
            if self.periodic[d] && self.n[d] < 2 {
                return Err(MeshError::InvalidParameter {
                    name: "periodic",
                    value: format!("{:?}", self.periodic),
                    reason: "周期方向至少需要两个单元",
                });
            }
        }
        let l = self.lengths.to_array();
        if l.iter().any(|&x| !(x > 0.0 && x.is_finite())) {
            return Err(MeshError::InvalidParameter {
                name: "lengths",
                value: format!("{:?}", l),
                reason: "边长必须为正的有限数",
            });
        }
        Ok(())
    }

    /// 生成网格
    pub fn build(&self) -> MeshResult<FvMesh> {
        self.check()?;

        let [nx, ny, nz] = self.n;
        let h = self.spacing();
        let cell_volume = h.x * h.y * h.z;
        let face_mag = [h.y * h.z, h.x * h.z, h.x * h.y];
        let n_cells = nx * ny * nz;
        let index = |i: usize, j: usize, k: usize| i + nx * (j + ny * k);

        let mut data = MeshData {
            cell_centre: Vec::with_capacity(n_cells),
            cell_volume: vec![cell_volume; n_cells],
            ..Default::default()
        };
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    let ijk = DVec3::new(i as f64 + 0.5, j as f64 + 0.5, k as f64 + 0.5);
                    data.cell_centre.push(self.origin + ijk * h);
                }
            }
        }

        let mut boundary: Vec<(DVec3, DVec3, usize)> = Vec::new();

        for d in 0..3 {
            let unit = DVec3::AXES[d];
            let sf = unit * face_mag[d];
            let half = unit * (0.5 * h[d]);

            for k in 0..nz {
                for j in 0..ny {
                    for i in 0..nx {
                        let ijk = [i, j, k];
                        let cell = index(i, j, k);
                        let centre = data.cell_centre[cell];

                        // + 侧面
                        if ijk[d] + 1 < self.n[d] || self.periodic[d] {
                            let mut next = ijk;
                            next[d] = (ijk[d] + 1) % self.n[d];
                            data.face_centre.push(centre + half);
                            data.face_area.push(sf);
                            data.face_owner.push(cell);
                            data.face_neighbour.push(index(next[0], next[1], next[2]));
                            data.face_weight.push(0.5);
                        } else {
                            boundary.push((centre + half, sf, cell));
                        }

                        // - 侧边界面
                        if ijk[d] == 0 && !self.periodic[d] {
                            boundary.push((centre - half, -sf, cell));
                        }
                    }
                }
            }
        }

        for (centre, sf, owner) in boundary {
            data.face_centre.push(centre);
            data.face_area.push(sf);
            data.face_owner.push(owner);
        }

        log::info!(
            "盒形网格: {}x{}x{}, 周期 {:?}, 单元尺寸 ({:.4e}, {:.4e}, {:.4e})",
            nx,
            ny,
            nz,
            self.periodic,
            h.x,
            h.y,
            h.z
        );

        FvMesh::from_data(data)
    }
}
