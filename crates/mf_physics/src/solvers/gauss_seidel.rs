// crates/mf_physics/src/solvers/gauss_seidel.rs

//! Gauss-Seidel 扫描

use super::Smoother;
use crate::matrix::FvMatrix;

/// Gauss-Seidel
///
/// 按单元编号顺序扫描，每个单元立即使用本轮已更新的邻居值。
/// 扫描顺序决定结果，因此不做并行化。
#[derive(Debug, Default, Clone, Copy)]
pub struct GaussSeidel;

impl Smoother for GaussSeidel {
    fn name(&self) -> &'static str {
        "GaussSeidel"
    }

    fn sweep(&mut self, matrix: &FvMatrix, cmpt: usize, x: &mut [f64]) {
        let mesh = matrix.mesh();
        let ldu = mesh.ldu();
        let (diag, upper, lower) = (matrix.diag(), matrix.upper(), matrix.lower());
        let b = matrix.source(cmpt);

        for cell in 0..x.len() {
            let mut sum = b[cell];
            for face in ldu.upper_faces(cell) {
                sum -= upper[face] * x[mesh.neighbour(face)];
            }
            for &face in ldu.lower_faces(cell) {
                sum -= lower[face] * x[mesh.owner(face)];
            }
            x[cell] = sum / diag[cell];
        }
    }
}
