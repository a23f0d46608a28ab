// crates/sgs_mesh/src/lib.rs

//! SgsLab 网格模块
//!
//! 为亚格子闭合提供有限体积网格的只读拓扑与几何。
//!
//! # 核心类型
//!
//! - [`FvMesh`]: 只读 SoA 布局网格（单元中心/体积，面中心/面积向量/owner/neighbour）
//! - [`BoxMeshBuilder`]: 结构化六面体盒形网格生成器，支持逐方向周期
//!
//! # 约定
//!
//! - 内部面排在前，边界面排在后
//! - 面积向量 `Sf` 由 owner 指向 neighbour（边界面指向域外）
//! - 线性插值权重 `w` 作用在 owner 上：`φ_f = w·φ_O + (1-w)·φ_N`
//!
//! # 示例
//!
//! ```
//! use sgs_mesh::BoxMeshBuilder;
//!
//! let mesh = BoxMeshBuilder::new(4, 4, 4)
//!     .with_lengths(1.0, 1.0, 1.0)
//!     .periodic_all()
//!     .build()
//!     .unwrap();
//! assert_eq!(mesh.n_cells(), 64);
//! assert_eq!(mesh.n_boundary_faces(), 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod error;
pub mod mesh;

pub use builder::BoxMeshBuilder;
pub use error::{MeshError, MeshResult};
pub use mesh::{FvMesh, MeshStatistics};
