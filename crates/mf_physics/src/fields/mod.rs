// crates/mf_physics/src/fields/mod.rs

//! 场模型
//!
//! 场以分量数参数化（1 为标量，3 为矢量），数据按 `[分量][索引]` 存储：
//!
//! - [`VolField`]: 单元中心场，另存每个边界面的值
//! - [`SurfaceField`]: 面场（通量），边界面与内部面存于同一数组
//! - [`FieldSnapshot`]: 供外部写出器使用的只读视图
//!
//! 每个场有进程内唯一的 [`FieldId`]，线性系统据此判断未知量是否相同。

pub mod snapshot;
pub mod surface_field;
pub mod vol_field;

pub use snapshot::{
    FieldClass, FieldSnapshot, FieldWriter, JsonDirWriter, MemoryWriter, NullWriter, PatchSnapshot,
    PatchValue,
};
pub use surface_field::SurfaceField;
pub use vol_field::VolField;

use mf_foundation::scalar::{SCALAR_COMPONENTS, VECTOR_COMPONENTS};
use mf_foundation::{MfError, MfResult};
use mf_mesh::FvMesh;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_FIELD_ID: AtomicU64 = AtomicU64::new(1);

/// 场标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(u64);

impl FieldId {
    /// 分配新标识
    pub(crate) fn next() -> Self {
        Self(NEXT_FIELD_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// 分量数必须为 1 或 3
#[inline]
pub(crate) fn check_supported_components(operation: &'static str, n: usize) -> MfResult<()> {
    if n == SCALAR_COMPONENTS || n == VECTOR_COMPONENTS {
        Ok(())
    } else {
        Err(MfError::unsupported_components(operation, n))
    }
}

/// 两个操作数必须在同一网格上
#[inline]
pub(crate) fn check_same_mesh(operation: &'static str, a: &Arc<FvMesh>, b: &Arc<FvMesh>) -> MfResult<()> {
    if Arc::ptr_eq(a, b) {
        Ok(())
    } else {
        Err(MfError::mesh_mismatch(operation))
    }
}
