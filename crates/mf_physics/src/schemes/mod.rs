// crates/mf_physics/src/schemes/mod.rs

//! 离散格式库
//!
//! - [`fvm`]: 隐式算子，填充系数与源项
//! - [`fvc`]: 显式算子，只填源项
//!
//! 每个算子是 `(网格, 未知量, 辅助输入) → FvMatrix` 的纯函数。
//! [`fvm::construct`] 按 `(OperatorKind, SchemeKind)` 标签分派到具体实现，
//! 不兼容的组合返回配置错误。

pub mod fvc;
pub mod fvm;

use crate::fields::{SurfaceField, VolField};
use mf_foundation::{MfError, MfResult};
use mf_mesh::FvMesh;

pub use mf_config::{OperatorKind, SchemeKind};

/// 扩散系数
#[derive(Debug, Clone, Copy)]
pub enum Diffusivity<'a> {
    /// 常数
    Uniform(f64),
    /// 单元场（标量），内部面按反距离插值，边界面取边界值
    Field(&'a VolField),
}

impl Diffusivity<'_> {
    /// 面上的扩散系数
    pub(crate) fn face_value(&self, mesh: &FvMesh, face: usize) -> f64 {
        match self {
            Self::Uniform(v) => *v,
            Self::Field(f) => {
                if face < mesh.n_internal_faces() {
                    let w = mesh.interpolation_weight(face);
                    let gamma = f.cell_values(0);
                    w * gamma[mesh.owner(face)] + (1.0 - w) * gamma[mesh.neighbour(face)]
                } else {
                    f.boundary_face_value(0, face)
                }
            }
        }
    }

    pub(crate) fn check(&self) -> MfResult<()> {
        if let Self::Field(f) = self {
            MfError::check_components("laplacian", 1, f.n_components())?;
        }
        Ok(())
    }
}

/// 算子的辅助输入
#[derive(Debug, Clone, Copy)]
pub enum SchemeInput<'a> {
    /// 时间步长（ddt）
    TimeStep(f64),
    /// 面通量（隐式 div）
    Flux(&'a SurfaceField),
    /// 扩散系数（laplacian）
    Diffusivity(Diffusivity<'a>),
    /// 被作用的场（显式 grad/div）
    Field(&'a VolField),
}

impl SchemeInput<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Self::TimeStep(_) => "时间步长",
            Self::Flux(_) => "面通量",
            Self::Diffusivity(_) => "扩散系数",
            Self::Field(_) => "场",
        }
    }
}

/// 检查格式能否用于该算子
pub(crate) fn check_scheme(operator: OperatorKind, scheme: SchemeKind, implicit: bool) -> MfResult<()> {
    if scheme.supports(operator, implicit) {
        Ok(())
    } else {
        Err(MfError::invalid_config(
            format!("schemes.{operator}"),
            scheme.name(),
            format!("格式不适用于{}算子 {}", if implicit { "隐式" } else { "显式" }, operator),
        ))
    }
}

/// 输入与算子不匹配
pub(crate) fn input_mismatch(operator: OperatorKind, input: &SchemeInput<'_>) -> MfError {
    MfError::config(format!("算子 {} 不接受{}作为输入", operator, input.kind()))
}
