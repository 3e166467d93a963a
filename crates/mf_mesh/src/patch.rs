// crates/mf_mesh/src/patch.rs

//! 边界 patch 描述
//!
//! 边界面按 patch 连续存放在所有内部面之后，每个 patch 记录名称、类型标签、
//! 面数和起始面索引。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Patch 类型标签
///
/// 仅描述网格层面的几何类型，边界条件由场的边界定义决定。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PatchType {
    /// 一般边界
    Patch,
    /// 固壁
    Wall,
    /// 空边界（降维方向，不参与计算）
    Empty,
    /// 对称面
    SymmetryPlane,
}

impl PatchType {
    /// 类型名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Patch => "patch",
            Self::Wall => "wall",
            Self::Empty => "empty",
            Self::SymmetryPlane => "symmetryPlane",
        }
    }
}

impl fmt::Display for PatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 边界 patch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryPatch {
    /// 名称
    pub name: String,
    /// 类型标签
    pub patch_type: PatchType,
    /// 面数
    pub n_faces: usize,
    /// 起始面索引（全局面编号）
    pub start_face: usize,
}

impl BoundaryPatch {
    /// 创建 patch
    pub fn new(
        name: impl Into<String>,
        patch_type: PatchType,
        n_faces: usize,
        start_face: usize,
    ) -> Self {
        Self {
            name: name.into(),
            patch_type,
            n_faces,
            start_face,
        }
    }

    /// 全局面索引范围
    #[inline]
    pub fn faces(&self) -> Range<usize> {
        self.start_face..self.start_face + self.n_faces
    }

    /// 在边界值数组中的索引范围（以第一个边界面为 0）
    #[inline]
    pub fn boundary_range(&self, n_internal_faces: usize) -> Range<usize> {
        let start = self.start_face - n_internal_faces;
        start..start + self.n_faces
    }
}
