// crates/mf_physics/src/matrix/derived.rs

//! 由系数导出的量：`A`、`rA`、`H` 与残差
//!
//! `A`、`rA`、`H` 的边界一律取零梯度（empty 保留），只用于压力-速度耦合的内部计算。

use super::FvMatrix;
use crate::fields::VolField;
use mf_foundation::scalar::VSMALL;
use mf_foundation::MfResult;
use std::sync::Arc;

impl FvMatrix {
    /// `A = diag·V`
    pub fn a(&self, psi: &VolField) -> MfResult<VolField> {
        self.check_psi("A", psi)?;
        let cells = self
            .diag
            .iter()
            .zip(self.mesh.cell_volumes())
            .map(|(d, v)| d * v)
            .collect();
        VolField::from_cells(
            Arc::clone(&self.mesh),
            format!("A({})", self.psi_name),
            vec![cells],
            psi.definition().zero_gradient(1),
        )
    }

    /// `rA = V / diag`
    ///
    /// 与 [`FvMatrix::a`] 都按单元体积缩放，二者乘积为 `V²`。
    pub fn r_a(&self, psi: &VolField) -> MfResult<VolField> {
        self.check_psi("rA", psi)?;
        let cells = self
            .diag
            .iter()
            .zip(self.mesh.cell_volumes())
            .map(|(d, v)| v / d)
            .collect();
        VolField::from_cells(
            Arc::clone(&self.mesh),
            format!("rA({})", self.psi_name),
            vec![cells],
            psi.definition().zero_gradient(1),
        )
    }

    /// `H = (b − Σ a_nb·ψ_nb) / V`，逐分量
    pub fn h(&self, psi: &VolField) -> MfResult<VolField> {
        self.check_psi("H", psi)?;
        let n = psi.n_components();
        let mesh = &self.mesh;
        let mut cells = Vec::with_capacity(n);

        for c in 0..n {
            let x = psi.cell_values(c);
            let mut h = self.source[c].clone();
            for face in 0..mesh.n_internal_faces() {
                let (own, nei) = (mesh.owner(face), mesh.neighbour(face));
                h[own] -= self.upper[face] * x[nei];
                h[nei] -= self.lower[face] * x[own];
            }
            for (i, v) in h.iter_mut().enumerate() {
                *v /= mesh.cell_volume(i);
            }
            cells.push(h);
        }

        VolField::from_cells(
            Arc::clone(mesh),
            format!("H({})", self.psi_name),
            cells,
            psi.definition().zero_gradient(n),
        )
    }

    /// `out = A·x`（第 `cmpt` 分量，系数共享）
    pub(crate) fn multiply_into(&self, x: &[f64], out: &mut [f64]) {
        let mesh = &self.mesh;
        for (i, o) in out.iter_mut().enumerate() {
            *o = self.diag[i] * x[i];
        }
        for face in 0..mesh.n_internal_faces() {
            let (own, nei) = (mesh.owner(face), mesh.neighbour(face));
            out[own] += self.upper[face] * x[nei];
            out[nei] += self.lower[face] * x[own];
        }
    }

    /// 残差归一化因子
    ///
    /// `Σ|A·x − diag·x̄| + Σ|b − diag·x̄| + VSMALL`，`x̄` 为单元平均值。
    /// 每次求解在迭代前计算一次，迭代中保持不变。
    pub fn norm_factor(&self, x: &[f64], cmpt: usize) -> f64 {
        let n = x.len().max(1) as f64;
        let mean = x.iter().sum::<f64>() / n;
        let mut ax = vec![0.0; x.len()];
        self.multiply_into(x, &mut ax);

        let b = &self.source[cmpt];
        let mut factor = 0.0;
        for i in 0..x.len() {
            let d_mean = self.diag[i] * mean;
            factor += (ax[i] - d_mean).abs() + (b[i] - d_mean).abs();
        }
        factor + VSMALL
    }

    /// 归一化残差 `Σ|b − A·x| / norm_factor`
    pub fn residual(&self, x: &[f64], cmpt: usize, norm_factor: f64) -> f64 {
        let mut ax = vec![0.0; x.len()];
        self.multiply_into(x, &mut ax);
        let sum: f64 = self.source[cmpt]
            .iter()
            .zip(&ax)
            .map(|(b, a)| (b - a).abs())
            .sum();
        sum / norm_factor
    }
}
