// crates/mf_physics/src/matrix/mod.rs

//! 有限体积线性系统
//!
//! LDU 存储：每个单元一个对角系数，每个内部面一对非对角系数
//! （`upper` 作用于 owner 行的 neighbour 列，`lower` 作用于 neighbour 行的 owner 列），
//! 每个分量一列源项。系数在分量间共享，源项逐分量存储。
//!
//! 行的含义为 `A·ψ − b = 算子 × V`，求解 `A·ψ = b`。
//! 显式算子（fvc）只填源项，其值为 `+算子 × V`，
//! 因此 [`FvMatrix::equate`] 将右端系统的源项与左端相加。
//!
//! # 使用示例
//!
//! ```ignore
//! let u_eqn = fvm::ddt(&u, SchemeKind::Euler, dt)?
//!     .add(&fvm::div(&u, SchemeKind::Upwind, &phi)?)?
//!     .subtract(&fvm::laplacian(&u, SchemeKind::LinearOrthogonal, Diffusivity::Uniform(nu))?)?;
//! u_eqn.clone().equate(&grad_p.negate())?.solve(&mut u, controls)?;
//! ```

mod derived;

use crate::fields::{FieldId, VolField};
use crate::solvers::{self, SolverPerformance};
use mf_config::SolverControls;
use mf_foundation::{MfError, MfResult};
use mf_mesh::FvMesh;
use std::sync::Arc;

/// 有限体积线性系统
#[derive(Debug, Clone)]
pub struct FvMatrix {
    mesh: Arc<FvMesh>,
    psi: FieldId,
    psi_name: String,
    /// `[分量][单元]`
    source: Vec<Vec<f64>>,
    /// `[内部面]`
    lower: Vec<f64>,
    /// `[单元]`
    diag: Vec<f64>,
    /// `[内部面]`
    upper: Vec<f64>,
}

impl FvMatrix {
    /// 以 `psi` 为未知量的全零系统，分量数与 `psi` 相同
    pub fn zeros(psi: &VolField) -> Self {
        let mesh = psi.mesh();
        Self {
            mesh: Arc::clone(mesh),
            psi: psi.id(),
            psi_name: psi.name().to_string(),
            source: vec![vec![0.0; mesh.n_cells()]; psi.n_components()],
            lower: vec![0.0; mesh.n_internal_faces()],
            diag: vec![0.0; mesh.n_cells()],
            upper: vec![0.0; mesh.n_internal_faces()],
        }
    }

    // =========================================================================
    // 访问
    // =========================================================================

    /// 网格
    #[inline]
    pub fn mesh(&self) -> &Arc<FvMesh> {
        &self.mesh
    }

    /// 未知量标识
    #[inline]
    pub fn psi(&self) -> FieldId {
        self.psi
    }

    /// 未知量名称
    #[inline]
    pub fn psi_name(&self) -> &str {
        &self.psi_name
    }

    /// 分量数
    #[inline]
    pub fn n_components(&self) -> usize {
        self.source.len()
    }

    /// 源项
    #[inline]
    pub fn source(&self, cmpt: usize) -> &[f64] {
        &self.source[cmpt]
    }

    /// 对角系数
    #[inline]
    pub fn diag(&self) -> &[f64] {
        &self.diag
    }

    /// 上三角系数
    #[inline]
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// 下三角系数
    #[inline]
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    pub(crate) fn source_mut(&mut self, cmpt: usize) -> &mut [f64] {
        &mut self.source[cmpt]
    }

    pub(crate) fn sources_mut(&mut self) -> &mut [Vec<f64>] {
        &mut self.source
    }

    pub(crate) fn diag_mut(&mut self) -> &mut [f64] {
        &mut self.diag
    }

    pub(crate) fn upper_mut(&mut self) -> &mut [f64] {
        &mut self.upper
    }

    pub(crate) fn lower_mut(&mut self) -> &mut [f64] {
        &mut self.lower
    }

    /// 第 `cell` 行的非零系数 `(列, 系数)`，对角元在前
    pub fn row(&self, cell: usize) -> Vec<(usize, f64)> {
        let ldu = self.mesh.ldu();
        let mut row = vec![(cell, self.diag[cell])];
        for face in ldu.upper_faces(cell) {
            row.push((self.mesh.neighbour(face), self.upper[face]));
        }
        for &face in ldu.lower_faces(cell) {
            row.push((self.mesh.owner(face), self.lower[face]));
        }
        row
    }

    /// 是否仅有对角系数
    pub fn is_diagonal(&self) -> bool {
        self.upper.iter().chain(&self.lower).all(|&c| c == 0.0)
    }

    // =========================================================================
    // 组合
    // =========================================================================

    fn check_compatible(&self, operation: &'static str, other: &FvMatrix) -> MfResult<()> {
        if !Arc::ptr_eq(&self.mesh, &other.mesh) {
            return Err(MfError::mesh_mismatch(operation));
        }
        if self.psi != other.psi {
            return Err(MfError::unknown_mismatch(operation));
        }
        MfError::check_components(operation, self.n_components(), other.n_components())
    }

    pub(crate) fn check_psi(&self, operation: &'static str, psi: &VolField) -> MfResult<()> {
        if !Arc::ptr_eq(&self.mesh, psi.mesh()) {
            return Err(MfError::mesh_mismatch(operation));
        }
        if self.psi != psi.id() {
            return Err(MfError::unknown_mismatch(operation));
        }
        Ok(())
    }

    fn combine(
        mut self,
        operation: &'static str,
        other: &FvMatrix,
        source_sign: f64,
        coeff_sign: f64,
    ) -> MfResult<Self> {
        self.check_compatible(operation, other)?;
        for (a, b) in self.source.iter_mut().zip(&other.source) {
            a.iter_mut().zip(b).for_each(|(x, y)| *x += source_sign * y);
        }
        for (a, b) in [
            (&mut self.lower, &other.lower),
            (&mut self.diag, &other.diag),
            (&mut self.upper, &other.upper),
        ] {
            a.iter_mut().zip(b).for_each(|(x, y)| *x += coeff_sign * y);
        }
        Ok(self)
    }

    /// `A + B`
    pub fn add(self, other: &FvMatrix) -> MfResult<Self> {
        self.combine("add", other, 1.0, 1.0)
    }

    /// `A − B`
    pub fn subtract(self, other: &FvMatrix) -> MfResult<Self> {
        self.combine("subtract", other, -1.0, -1.0)
    }

    /// `A == B`：系数取 `A − B`，源项取 `A.source + B.source`
    pub fn equate(self, other: &FvMatrix) -> MfResult<Self> {
        self.combine("equate", other, 1.0, -1.0)
    }

    /// `−A`
    pub fn negate(mut self) -> Self {
        for s in &mut self.source {
            s.iter_mut().for_each(|v| *v = -*v);
        }
        for c in [&mut self.lower, &mut self.diag, &mut self.upper] {
            c.iter_mut().for_each(|v| *v = -*v);
        }
        self
    }

    // =========================================================================
    // 隐式松弛
    // =========================================================================

    /// 隐式欠松弛
    ///
    /// `diag' = diag / α`，源项加上 `(diag' − diag)·ψ`，收敛解不变。
    pub fn relax(&mut self, psi: &VolField, factor: f64) -> MfResult<()> {
        self.check_psi("relax", psi)?;
        if !(factor > 0.0) {
            return Err(MfError::invalid_config("relaxation", factor.to_string(), "松弛因子必须为正"));
        }
        self.shift_diagonal(psi, |d| d / factor);
        Ok(())
    }

    /// 撤销隐式欠松弛：`diag' = diag·α`，源项相应扣除
    pub fn de_relax(&mut self, psi: &VolField, factor: f64) -> MfResult<()> {
        self.check_psi("de_relax", psi)?;
        self.shift_diagonal(psi, |d| d * factor);
        Ok(())
    }

    fn shift_diagonal(&mut self, psi: &VolField, new_diag: impl Fn(f64) -> f64) {
        for (i, d) in self.diag.iter_mut().enumerate() {
            let d_new = new_diag(*d);
            let delta = d_new - *d;
            for (c, s) in self.source.iter_mut().enumerate() {
                s[i] += delta * psi.cell_values(c)[i];
            }
            *d = d_new;
        }
    }

    // =========================================================================
    // 求解
    // =========================================================================

    /// 逐分量求解，结果写入 `psi` 的单元值
    ///
    /// 边界值不会自动更新，调用方需随后调用 `set_boundary_values`。
    pub fn solve(&self, psi: &mut VolField, controls: &SolverControls) -> MfResult<Vec<SolverPerformance>> {
        self.check_psi("solve", psi)?;
        MfError::check_components("solve", self.n_components(), psi.n_components())?;
        solvers::solve(self, psi, controls)
    }
}
