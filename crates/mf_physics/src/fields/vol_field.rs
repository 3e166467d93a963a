// crates/mf_physics/src/fields/vol_field.rs

//! 体积场（单元中心场）
//!
//! 每个单元一个值，另存每个边界面一个值。边界值始终与当前单元值和边界定义一致：
//! 修改单元值或边界定义后需调用 [`VolField::correct_boundary_values`] 或
//! [`VolField::set_boundary_values`]。
//!
//! # 使用示例
//!
//! ```ignore
//! use mf_physics::fields::VolField;
//!
//! let mut p = VolField::initialize(mesh.clone(), "p", p_boundary, &[0.0])?;
//! let grad_p = p.grad()?;                  // 3 分量
//! let hbya = r_au.multiply(&h_u)?;         // 1 x 3 -> 3 分量
//! p.set_reference_value(0, 0.0)?;
//! ```

use super::surface_field::SurfaceField;
use super::{check_same_mesh, check_supported_components, FieldId};
use crate::boundary::{check_definition, evaluate_boundary, evaluate_gradient_boundary};
use crate::schemes::fvc::grad::accumulate_gradient;
use mf_config::{BoundaryDefinition, FieldConfig};
use mf_foundation::{MfError, MfResult};
use mf_mesh::FvMesh;
use std::sync::Arc;

/// 体积场
#[derive(Debug)]
pub struct VolField {
    id: FieldId,
    mesh: Arc<FvMesh>,
    name: String,
    /// `[分量][单元]`
    cells: Vec<Vec<f64>>,
    /// `[分量][边界面]`
    boundary: Vec<Vec<f64>>,
    definition: BoundaryDefinition,
}

impl VolField {
    // =========================================================================
    // 构造
    // =========================================================================

    /// 以均匀值初始化，并按边界定义计算边界值
    pub fn initialize(
        mesh: Arc<FvMesh>,
        name: impl Into<String>,
        definition: BoundaryDefinition,
        uniform: &[f64],
    ) -> MfResult<Self> {
        let name = name.into();
        check_supported_components("initialize", uniform.len())?;
        check_definition(&mesh, &name, &definition, uniform.len())?;

        let cells = uniform.iter().map(|&v| vec![v; mesh.n_cells()]).collect();
        let boundary = uniform
            .iter()
            .map(|&v| vec![v; mesh.n_boundary_faces()])
            .collect();
        let mut field = Self {
            id: FieldId::next(),
            mesh,
            name,
            cells,
            boundary,
            definition,
        };
        field.correct_boundary_values()?;
        Ok(field)
    }

    /// 由算例配置初始化
    pub fn from_config(
        mesh: Arc<FvMesh>,
        name: impl Into<String>,
        config: &FieldConfig,
    ) -> MfResult<Self> {
        Self::initialize(mesh, name, config.boundary.clone(), &config.internal)
    }

    /// 由单元值构造并计算边界值
    pub(crate) fn from_cells(
        mesh: Arc<FvMesh>,
        name: impl Into<String>,
        cells: Vec<Vec<f64>>,
        definition: BoundaryDefinition,
    ) -> MfResult<Self> {
        let boundary = vec![vec![0.0; mesh.n_boundary_faces()]; cells.len()];
        let mut field = Self::from_parts(mesh, name, cells, boundary, definition);
        field.correct_boundary_values()?;
        Ok(field)
    }

    /// 由现成的单元值和边界值构造（不重新计算边界）
    pub(crate) fn from_parts(
        mesh: Arc<FvMesh>,
        name: impl Into<String>,
        cells: Vec<Vec<f64>>,
        boundary: Vec<Vec<f64>>,
        definition: BoundaryDefinition,
    ) -> Self {
        Self {
            id: FieldId::next(),
            mesh,
            name: name.into(),
            cells,
            boundary,
            definition,
        }
    }

    // =========================================================================
    // 访问
    // =========================================================================

    /// 场标识
    #[inline]
    pub fn id(&self) -> FieldId {
        self.id
    }

    /// 名称
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 重命名
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// 网格
    #[inline]
    pub fn mesh(&self) -> &Arc<FvMesh> {
        &self.mesh
    }

    /// 分量数
    #[inline]
    pub fn n_components(&self) -> usize {
        self.cells.len()
    }

    /// 单元值
    #[inline]
    pub fn cell_values(&self, cmpt: usize) -> &[f64] {
        &self.cells[cmpt]
    }

    /// 可变单元值
    ///
    /// 修改后需重新计算边界值。
    #[inline]
    pub fn cell_values_mut(&mut self, cmpt: usize) -> &mut [f64] {
        &mut self.cells[cmpt]
    }

    /// 全部分量的单元值
    #[inline]
    pub fn cells(&self) -> &[Vec<f64>] {
        &self.cells
    }

    /// 边界面值（以第一个边界面为 0）
    #[inline]
    pub fn boundary_values(&self, cmpt: usize) -> &[f64] {
        &self.boundary[cmpt]
    }

    /// 全部分量的边界面值
    #[inline]
    pub fn boundary(&self) -> &[Vec<f64>] {
        &self.boundary
    }

    /// 给定全局面编号的边界值
    #[inline]
    pub fn boundary_face_value(&self, cmpt: usize, face: usize) -> f64 {
        self.boundary[cmpt][face - self.mesh.n_internal_faces()]
    }

    /// 边界定义
    #[inline]
    pub fn definition(&self) -> &BoundaryDefinition {
        &self.definition
    }

    // =========================================================================
    // 边界
    // =========================================================================

    /// 更换边界定义并重新计算全部边界值
    pub fn set_boundary_values(&mut self, definition: &BoundaryDefinition) -> MfResult<()> {
        check_definition(&self.mesh, &self.name, definition, self.n_components())?;
        self.definition = definition.clone();
        self.correct_boundary_values()
    }

    /// 按当前边界定义重新计算边界值
    pub fn correct_boundary_values(&mut self) -> MfResult<()> {
        evaluate_boundary(&self.mesh, &self.definition, &self.cells, &mut self.boundary)
    }

    // =========================================================================
    // 代数运算
    // =========================================================================

    fn check_binary(&self, operation: &'static str, other: &VolField) -> MfResult<()> {
        check_same_mesh(operation, &self.mesh, &other.mesh)?;
        MfError::check_components(operation, self.n_components(), other.n_components())
    }

    fn zip_with(&self, other: &VolField, name: String, op: impl Fn(f64, f64) -> f64) -> VolField {
        let combine = |a: &[Vec<f64>], b: &[Vec<f64>]| -> Vec<Vec<f64>> {
            a.iter()
                .zip(b)
                .map(|(x, y)| x.iter().zip(y).map(|(&p, &q)| op(p, q)).collect())
                .collect()
        };
        VolField::from_parts(
            Arc::clone(&self.mesh),
            name,
            combine(&self.cells, &other.cells),
            combine(&self.boundary, &other.boundary),
            self.definition.derived_calculated(),
        )
    }

    /// 逐分量相加
    pub fn add(&self, other: &VolField) -> MfResult<VolField> {
        self.check_binary("add", other)?;
        Ok(self.zip_with(other, format!("({}+{})", self.name, other.name), |a, b| a + b))
    }

    /// 逐分量相减
    pub fn subtract(&self, other: &VolField) -> MfResult<VolField> {
        self.check_binary("subtract", other)?;
        Ok(self.zip_with(other, format!("({}-{})", self.name, other.name), |a, b| a - b))
    }

    /// 外积乘法
    ///
    /// N 分量乘 M 分量得到 N×M 分量（`i * M + j`），结果只允许为 1 或 3 分量。
    pub fn multiply(&self, other: &VolField) -> MfResult<VolField> {
        check_same_mesh("multiply", &self.mesh, &other.mesh)?;
        let n = self.n_components() * other.n_components();
        check_supported_components("multiply", n)?;

        let outer = |a: &[Vec<f64>], b: &[Vec<f64>]| -> Vec<Vec<f64>> {
            let mut out = Vec::with_capacity(n);
            for ai in a {
                for bj in b {
                    out.push(ai.iter().zip(bj).map(|(&x, &y)| x * y).collect());
                }
            }
            out
        };
        Ok(VolField::from_parts(
            Arc::clone(&self.mesh),
            format!("({}*{})", self.name, other.name),
            outer(&self.cells, &other.cells),
            outer(&self.boundary, &other.boundary),
            self.definition.derived_calculated(),
        ))
    }

    /// 乘以常数
    pub fn scale(&self, factor: f64) -> VolField {
        let scale = |a: &[Vec<f64>]| -> Vec<Vec<f64>> {
            a.iter().map(|x| x.iter().map(|&v| v * factor).collect()).collect()
        };
        VolField::from_parts(
            Arc::clone(&self.mesh),
            format!("({}*{})", factor, self.name),
            scale(&self.cells),
            scale(&self.boundary),
            self.definition.derived_calculated(),
        )
    }

    /// 深拷贝（新标识，同名、同边界定义）
    pub fn copy(&self) -> VolField {
        VolField::from_parts(
            Arc::clone(&self.mesh),
            self.name.clone(),
            self.cells.clone(),
            self.boundary.clone(),
            self.definition.clone(),
        )
    }

    /// 用另一个场的单元值和边界值替换本场的值，保留标识、名称和边界定义
    pub fn assign(&mut self, other: &VolField) -> MfResult<()> {
        self.check_binary("assign", other)?;
        for (dst, src) in self.cells.iter_mut().zip(&other.cells) {
            dst.copy_from_slice(src);
        }
        for (dst, src) in self.boundary.iter_mut().zip(&other.boundary) {
            dst.copy_from_slice(src);
        }
        Ok(())
    }

    // =========================================================================
    // 松弛与参考值
    // =========================================================================

    /// 显式松弛：`ψ = ψ_prev + α(ψ − ψ_prev)`，单元值与边界值同时处理
    ///
    /// `factor` 缺省为 1（不松弛）。
    pub fn relax(&mut self, previous: &VolField, factor: Option<f64>) -> MfResult<()> {
        self.check_binary("relax", previous)?;
        let alpha = factor.unwrap_or(1.0);
        let blend = |new: &mut [Vec<f64>], old: &[Vec<f64>]| {
            for (n, o) in new.iter_mut().zip(old) {
                for (x, &x0) in n.iter_mut().zip(o) {
                    *x = x0 + alpha * (*x - x0);
                }
            }
        };
        blend(&mut self.cells, &previous.cells);
        blend(&mut self.boundary, &previous.boundary);
        Ok(())
    }

    /// 设置参考值
    ///
    /// 存在 fixedValue patch 时不做任何处理；否则将全部单元值和边界值平移，
    /// 使 `ref_cell` 的值等于 `ref_value`（纯 Neumann 系统只确定到一个常数）。
    pub fn set_reference_value(&mut self, ref_cell: usize, ref_value: f64) -> MfResult<()> {
        if self.definition.has_fixed_value() {
            log::debug!("{} 存在 fixedValue 边界，跳过参考值设置", self.name);
            return Ok(());
        }
        MfError::check_index("refCell", ref_cell, self.mesh.n_cells())?;

        for c in 0..self.n_components() {
            let shift = ref_value - self.cells[c][ref_cell];
            if shift == 0.0 {
                continue;
            }
            self.cells[c].iter_mut().for_each(|v| *v += shift);
            self.boundary[c].iter_mut().for_each(|v| *v += shift);
            self.cells[c][ref_cell] = ref_value;
        }
        Ok(())
    }

    // =========================================================================
    // 体积换算
    // =========================================================================

    /// 单元值与边界值乘以（owner）单元体积
    pub fn volume_integrate(&mut self) {
        self.apply_volume(|v, vol| v * vol);
    }

    /// 单元值与边界值除以（owner）单元体积
    pub fn volume_divide(&mut self) {
        self.apply_volume(|v, vol| v / vol);
    }

    fn apply_volume(&mut self, op: impl Fn(f64, f64) -> f64) {
        let mesh = &self.mesh;
        let n_internal = mesh.n_internal_faces();
        for cells in &mut self.cells {
            for (i, v) in cells.iter_mut().enumerate() {
                *v = op(*v, mesh.cell_volume(i));
            }
        }
        for boundary in &mut self.boundary {
            for (b, v) in boundary.iter_mut().enumerate() {
                *v = op(*v, mesh.cell_volume(mesh.owner(n_internal + b)));
            }
        }
    }

    // =========================================================================
    // 派生场
    // =========================================================================

    /// 梯度场（线性插值 Gauss 梯度除以单元体积）
    ///
    /// 结果分量按 `axis * n + cmpt` 排列，只支持标量场（结果为矢量）。
    pub fn grad(&self) -> MfResult<VolField> {
        let n_grad = 3 * self.n_components();
        check_supported_components("grad", n_grad)?;

        let mut cells = accumulate_gradient(self);
        for g in &mut cells {
            for (i, v) in g.iter_mut().enumerate() {
                *v /= self.mesh.cell_volume(i);
            }
        }
        let mut boundary = vec![vec![0.0; self.mesh.n_boundary_faces()]; n_grad];
        evaluate_gradient_boundary(&self.mesh, &self.cells, &self.boundary, &cells, &mut boundary);

        Ok(VolField::from_parts(
            Arc::clone(&self.mesh),
            format!("grad({})", self.name),
            cells,
            boundary,
            self.definition.derived_calculated(),
        ))
    }

    /// 面通量的散度 `Σ±φ / V`，边界为零梯度
    pub fn divergence(phi: &SurfaceField) -> MfResult<VolField> {
        MfError::check_components("divergence", 1, phi.n_components())?;
        let mesh = phi.mesh();
        let values = phi.values(0);
        let mut div = vec![0.0; mesh.n_cells()];

        for face in 0..mesh.n_internal_faces() {
            div[mesh.owner(face)] += values[face];
            div[mesh.neighbour(face)] -= values[face];
        }
        for face in mesh.n_internal_faces()..mesh.n_faces() {
            div[mesh.owner(face)] += values[face];
        }
        for (i, v) in div.iter_mut().enumerate() {
            *v /= mesh.cell_volume(i);
        }

        VolField::from_cells(
            Arc::clone(mesh),
            format!("div({})", phi.name()),
            vec![div],
            phi.definition().zero_gradient(1),
        )
    }
}
