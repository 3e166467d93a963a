// crates/mf_mesh/src/lib.rs

//! MariFoam 网格层
//!
//! 提供有限体积离散所消费的网格几何：单元体积与形心、面积矢量与面形心、
//! owner/neighbour 拓扑、边界 patch 以及求解器使用的 LDU 寻址。
//!
//! # 模块
//!
//! - [`fv_mesh`]: 只读网格与构造校验
//! - [`patch`]: 边界 patch
//! - [`ldu`]: LDU 寻址（行起点、按 neighbour 排序）
//! - [`generation`]: 均匀六面体网格生成器

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod fv_mesh;
pub mod generation;
pub mod ldu;
pub mod patch;

pub use fv_mesh::{FvMesh, FvMeshData};
pub use generation::{BoxMeshGenerator, BoxSide};
pub use ldu::LduAddressing;
pub use patch::{BoundaryPatch, PatchType};

/// Prelude 模块
pub mod prelude {
    pub use crate::fv_mesh::{FvMesh, FvMeshData};
    pub use crate::generation::{BoxMeshGenerator, BoxSide};
    pub use crate::patch::{BoundaryPatch, PatchType};
}
