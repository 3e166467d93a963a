// crates/mf_physics/src/solvers/mod.rs

//! 迭代线性求解器
//!
//! 对 [`FvMatrix`] 的每个分量独立求解 `A·ψ = b`：
//!
//! 1. 计算归一化因子（本次求解内固定）与初始残差
//! 2. 初始残差为零时直接返回
//! 3. 否则反复扫描，直到迭代次数不少于 `min_iter` 且（收敛或达到 `max_iter`）；
//!    残差变为非有限值时立即停止
//!
//! 未收敛不是错误：求解器在 `max_iter` 处停止并报告残差，由调用方判断。
//!
//! # 求解器类型
//!
//! - [`GaussSeidel`]: 按单元顺序原地更新
//! - [`PointJacobi`]: 全部使用上一轮的值，启用 `parallel` 特性时并行扫描

mod gauss_seidel;
mod point_jacobi;

pub use gauss_seidel::GaussSeidel;
pub use point_jacobi::PointJacobi;

use crate::fields::VolField;
use crate::matrix::FvMatrix;
use mf_config::{LinearSolverKind, SolverControls};
use mf_foundation::scalar::component_suffix;
use mf_foundation::MfResult;
use serde::Serialize;

/// 单次扫描
pub trait Smoother {
    /// 求解器名称
    fn name(&self) -> &'static str;

    /// 对第 `cmpt` 分量做一次扫描，原地更新 `x`
    fn sweep(&mut self, matrix: &FvMatrix, cmpt: usize, x: &mut [f64]);
}

/// 按名称标签创建求解器
pub fn smoother_for(kind: LinearSolverKind) -> Box<dyn Smoother> {
    match kind {
        LinearSolverKind::GaussSeidel => Box::new(GaussSeidel),
        LinearSolverKind::PointJacobi => Box::new(PointJacobi::default()),
    }
}

/// 求解状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SolverStatus {
    /// 收敛
    Converged,
    /// 达到最大迭代次数
    MaxIterationsReached,
}

/// 单个分量的求解报告
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolverPerformance {
    /// 求解器名称
    pub solver: &'static str,
    /// 场名（含分量后缀）
    pub field: String,
    /// 初始残差
    pub initial_residual: f64,
    /// 最终残差
    pub final_residual: f64,
    /// 迭代次数
    pub iterations: usize,
    /// 状态
    pub status: SolverStatus,
}

impl SolverPerformance {
    /// 是否收敛
    pub fn is_converged(&self) -> bool {
        self.status == SolverStatus::Converged
    }
}

/// 逐分量求解
pub(crate) fn solve(
    matrix: &FvMatrix,
    psi: &mut VolField,
    controls: &SolverControls,
) -> MfResult<Vec<SolverPerformance>> {
    let mut smoother = smoother_for(controls.solver);
    let n = psi.n_components();
    let max_iter = controls.max_iterations();
    let mut performances = Vec::with_capacity(n);

    for cmpt in 0..n {
        let field = format!("{}{}", psi.name(), component_suffix(n, cmpt));
        let x = psi.cell_values_mut(cmpt);

        let norm_factor = matrix.norm_factor(x, cmpt);
        let initial = matrix.residual(x, cmpt, norm_factor);
        let mut residual = initial;
        let mut iterations = 0;

        if initial > 0.0 {
            let mut converged = false;
            while iterations < controls.min_iter || (!converged && iterations < max_iter) {
                smoother.sweep(matrix, cmpt, x);
                iterations += 1;
                residual = matrix.residual(x, cmpt, norm_factor);
                if !residual.is_finite() {
                    log::warn!("{} 残差发散为 {}，停止迭代（对角项是否为零？）", field, residual);
                    break;
                }
                converged = controls.converged(residual, initial);
            }
        }

        let status = if initial == 0.0 || controls.converged(residual, initial) {
            SolverStatus::Converged
        } else {
            SolverStatus::MaxIterationsReached
        };
        log::info!(
            "{}:  Solving for {}, Initial residual = {:e}, Final residual = {:e}, No Iterations {}",
            smoother.name(),
            field,
            initial,
            residual,
            iterations
        );
        if status == SolverStatus::MaxIterationsReached {
            log::warn!("{} 在 {} 次迭代后未收敛，残差 {:e}", field, iterations, residual);
        }

        performances.push(SolverPerformance {
            solver: smoother.name(),
            field,
            initial_residual: initial,
            final_residual: residual,
            iterations,
            status,
        });
    }
    Ok(performances)
}
