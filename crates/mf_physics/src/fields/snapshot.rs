// crates/mf_physics/src/fields/snapshot.rs

//! 场快照与写出
//!
//! 快照是场在某一时刻的只读拷贝，按 patch 给出边界描述：
//! fixedValue/fixedGradient 写出规则参数，calculated 写出逐面值，empty 不带数据。
//! 写出器只依赖快照，不关心求解器内部的场类型。

use super::{SurfaceField, VolField};
use mf_config::BoundaryRule;
use mf_foundation::{MfError, MfResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 场类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldClass {
    /// 体积标量场
    VolScalar,
    /// 体积矢量场
    VolVector,
    /// 面标量场
    SurfaceScalar,
    /// 面矢量场
    SurfaceVector,
}

impl FieldClass {
    fn vol(n_components: usize) -> Self {
        if n_components == 1 { Self::VolScalar } else { Self::VolVector }
    }

    fn surface(n_components: usize) -> Self {
        if n_components == 1 { Self::SurfaceScalar } else { Self::SurfaceVector }
    }
}

/// 单个 patch 的边界描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PatchValue {
    /// 固定值
    FixedValue {
        /// 每个分量的值
        value: Vec<f64>,
    },
    /// 固定梯度
    FixedGradient {
        /// 每个分量的法向梯度
        gradient: Vec<f64>,
    },
    /// 逐面值，`[分量][patch 内面]`
    Calculated {
        /// 面值
        values: Vec<Vec<f64>>,
    },
    /// 二维算例的空方向
    Empty,
}

/// patch 快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchSnapshot {
    /// patch 名称
    pub name: String,
    /// 边界描述
    pub value: PatchValue,
}

/// 场快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSnapshot {
    /// 场名
    pub name: String,
    /// 类别
    pub class: FieldClass,
    /// 分量数
    pub n_components: usize,
    /// 内部值 `[分量][单元或内部面]`
    pub internal: Vec<Vec<f64>>,
    /// 边界
    pub patches: Vec<PatchSnapshot>,
}

impl FieldSnapshot {
    /// 体积场快照
    pub fn from_vol(field: &VolField) -> MfResult<Self> {
        let mesh = field.mesh();
        let n_internal = mesh.n_internal_faces();
        let mut patches = Vec::with_capacity(mesh.patches().len());

        for patch in mesh.patches() {
            let rule = crate::boundary::rule_for(field.definition(), patch)?;
            let range = patch.boundary_range(n_internal);
            let value = match rule {
                BoundaryRule::FixedValue { value } => PatchValue::FixedValue { value: value.clone() },
                BoundaryRule::FixedGradient { gradient } => PatchValue::FixedGradient {
                    gradient: gradient.clone(),
                },
                BoundaryRule::Calculated => PatchValue::Calculated {
                    values: field
                        .boundary()
                        .iter()
                        .map(|b| b[range.clone()].to_vec())
                        .collect(),
                },
                BoundaryRule::Empty => PatchValue::Empty,
            };
            patches.push(PatchSnapshot { name: patch.name.clone(), value });
        }

        Ok(Self {
            name: field.name().to_string(),
            class: FieldClass::vol(field.n_components()),
            n_components: field.n_components(),
            internal: field.cells().to_vec(),
            patches,
        })
    }

    /// 面场快照，边界面值一律按 patch 逐面写出（empty 除外）
    pub fn from_surface(field: &SurfaceField) -> Self {
        let mesh = field.mesh();
        let n_internal = mesh.n_internal_faces();
        let n = field.n_components();

        let patches = mesh
            .patches()
            .iter()
            .map(|patch| {
                let empty = field
                    .definition()
                    .get(&patch.name)
                    .map_or(false, BoundaryRule::is_empty);
                let value = if empty {
                    PatchValue::Empty
                } else {
                    PatchValue::Calculated {
                        values: (0..n).map(|c| field.values(c)[patch.faces()].to_vec()).collect(),
                    }
                };
                PatchSnapshot { name: patch.name.clone(), value }
            })
            .collect();

        Self {
            name: field.name().to_string(),
            class: FieldClass::surface(n),
            n_components: n,
            internal: (0..n).map(|c| field.values(c)[..n_internal].to_vec()).collect(),
            patches,
        }
    }

    /// 按名称查找 patch
    pub fn patch(&self, name: &str) -> Option<&PatchValue> {
        self.patches.iter().find(|p| p.name == name).map(|p| &p.value)
    }

    /// 序列化为 JSON
    pub fn to_json(&self) -> MfResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| MfError::serialization(e.to_string()))
    }
}

// =============================================================================
// 写出器
// =============================================================================

/// 场写出器
pub trait FieldWriter {
    /// 写出某一时刻的一组场
    fn write(&mut self, time: f64, fields: &[FieldSnapshot]) -> MfResult<()>;
}

/// 丢弃全部输出
#[derive(Debug, Default, Clone, Copy)]
pub struct NullWriter;

impl FieldWriter for NullWriter {
    fn write(&mut self, _time: f64, _fields: &[FieldSnapshot]) -> MfResult<()> {
        Ok(())
    }
}

/// 在内存中保存全部输出帧
#[derive(Debug, Default, Clone)]
pub struct MemoryWriter {
    /// `(时间, 快照)` 列表
    pub frames: Vec<(f64, Vec<FieldSnapshot>)>,
}

impl MemoryWriter {
    /// 创建
    pub fn new() -> Self {
        Self::default()
    }

    /// 最后一帧
    pub fn last(&self) -> Option<&(f64, Vec<FieldSnapshot>)> {
        self.frames.last()
    }

    /// 写出时刻列表
    pub fn times(&self) -> Vec<f64> {
        self.frames.iter().map(|(t, _)| *t).collect()
    }
}

impl FieldWriter for MemoryWriter {
    fn write(&mut self, time: f64, fields: &[FieldSnapshot]) -> MfResult<()> {
        self.frames.push((time, fields.to_vec()));
        Ok(())
    }
}

/// 以 `<root>/<time>/<field>.json` 布局写出 JSON 文件
#[derive(Debug, Clone)]
pub struct JsonDirWriter {
    root: PathBuf,
}

impl JsonDirWriter {
    /// 创建，输出目录在首次写出时建立
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    /// 某一时刻的输出目录
    pub fn time_dir(&self, time: f64) -> PathBuf {
        self.root.join(format!("{time}"))
    }
}

impl FieldWriter for JsonDirWriter {
    fn write(&mut self, time: f64, fields: &[FieldSnapshot]) -> MfResult<()> {
        let dir = self.time_dir(time);
        std::fs::create_dir_all(&dir)
            .map_err(|e| MfError::io(format!("无法创建输出目录 {}: {}", dir.display(), e)))?;
        for field in fields {
            let path = dir.join(format!("{}.json", field.name));
            std::fs::write(&path, field.to_json()?)
                .map_err(|e| MfError::io(format!("写出 {} 失败: {}", path.display(), e)))?;
        }
        log::debug!("写出 {} 个场到 {}", fields.len(), dir.display());
        Ok(())
    }
}
