// crates/mf_physics/src/lib.rs

//! MariFoam 物理层
//!
//! 非结构多面体网格上的有限体积离散与分离式求解：
//!
//! - 场模型 (fields) - 体积场、面场、快照与写出器
//! - 边界值计算 (boundary) - 按规则标签分派
//! - 线性系统 (matrix) - LDU 存储、组合、松弛、`A`/`rA`/`H`/残差
//! - 离散格式 (schemes) - 隐式 fvm 与显式 fvc 算子
//! - 线性求解器 (solvers) - Gauss-Seidel、Point-Jacobi
//! - 耦合控制 (coupling) - PISO/SIMPLE、标量扩散、时间控制
//!
//! # 层级架构
//!
//! ```text
//! Layer 4: mf_physics    ─> 离散、求解与耦合 (本层)
//! Layer 3: mf_config     ─> CaseConfig 快照
//! Layer 2: mf_mesh       ─> FvMesh
//! Layer 1: mf_foundation ─> MfError, 常量, 容差
//! ```
//!
//! # 特性
//!
//! - `parallel`（默认启用）: Point-Jacobi 扫描使用 rayon 并行

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod boundary;
pub mod coupling;
pub mod fields;
pub mod matrix;
pub mod schemes;
pub mod solvers;

/// 层级标识
pub const LAYER: u8 = 4;

// 重导出常用类型
pub use coupling::{
    run, ContinuityErrors, PressureVelocitySolver, RunSummary, RunTime, ScalarTransportSolver,
    SegregatedSolver, StepReport,
};
pub use fields::{
    FieldClass, FieldId, FieldSnapshot, FieldWriter, JsonDirWriter, MemoryWriter, NullWriter,
    SurfaceField, VolField,
};
pub use matrix::FvMatrix;
pub use schemes::{fvc, fvm, Diffusivity, SchemeInput};
pub use solvers::{GaussSeidel, PointJacobi, Smoother, SolverPerformance, SolverStatus};

/// Prelude 模块
pub mod prelude {
    pub use crate::coupling::{run, PressureVelocitySolver, ScalarTransportSolver, SegregatedSolver};
    pub use crate::fields::{FieldWriter, SurfaceField, VolField};
    pub use crate::matrix::FvMatrix;
    pub use crate::schemes::{fvc, fvm, Diffusivity};
    pub use mf_config::{BoundaryDefinition, BoundaryRule, CaseConfig, SchemeKind, SolverControls};
    pub use mf_foundation::prelude::*;
    pub use mf_mesh::prelude::*;
}
