// crates/mf_config/src/lib.rs

//! MariFoam Config Layer
//!
//! 配置层，提供不可变的算例配置快照。
//!
//! # 模块概览
//!
//! - [`case`]: `CaseConfig` 算例快照（场、输运系数、时间控制）
//! - [`boundary`]: 边界条件规则与边界定义
//! - [`schemes`]: 离散算子与格式枚举
//! - [`solution`]: 线性求解器选项与耦合算法
//! - [`watcher`]: 快照来源与热加载
//! - [`error`]: 配置错误类型
//!
//! # 层级架构
//!
//! ```text
//! Layer 4: mf_physics    ─> 每个时间步消费一个 CaseConfig 快照
//! Layer 3: mf_config     ─> CaseConfig, CaseSource (本层)
//! Layer 2: mf_mesh
//! Layer 1: mf_foundation
//! ```
//!
//! 名称（格式、求解器、边界类型）在加载阶段解析为枚举，未知名称不会进入求解阶段。

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod boundary;
pub mod case;
pub mod error;
pub mod schemes;
pub mod solution;
pub mod watcher;

/// 层级标识
pub const LAYER: u8 = 3;

// 重导出核心类型
pub use boundary::{BoundaryDefinition, BoundaryRule};
pub use case::{CaseConfig, FieldConfig, TimeControls, TransportProperties};
pub use error::ConfigError;
pub use schemes::{FvSchemes, OperatorKind, SchemeKind};
pub use solution::{CouplingAlgorithm, FvSolution, LinearSolverKind, SolverControls};
pub use watcher::{CaseSource, CaseWatcher, StaticCase};
