// crates/mf_physics/src/solvers/point_jacobi.rs

//! Point-Jacobi 扫描

use super::Smoother;
use crate::matrix::FvMatrix;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Point-Jacobi
///
/// 与 Gauss-Seidel 相同的更新公式，但全部使用上一轮的值。
/// 各单元互不依赖，启用 `parallel` 特性时用 rayon 并行扫描，结果与串行一致。
#[derive(Debug, Default, Clone)]
pub struct PointJacobi {
    previous: Vec<f64>,
}

impl PointJacobi {
    fn update(matrix: &FvMatrix, cmpt: usize, old: &[f64], cell: usize) -> f64 {
        let mesh = matrix.mesh();
        let ldu = mesh.ldu();
        let mut sum = matrix.source(cmpt)[cell];
        for face in ldu.upper_faces(cell) {
            sum -= matrix.upper()[face] * old[mesh.neighbour(face)];
        }
        for &face in ldu.lower_faces(cell) {
            sum -= matrix.lower()[face] * old[mesh.owner(face)];
        }
        sum / matrix.diag()[cell]
    }
}

impl Smoother for PointJacobi {
    fn name(&self) -> &'static str {
        "PointJacobi"
    }

    fn sweep(&mut self, matrix: &FvMatrix, cmpt: usize, x: &mut [f64]) {
        self.previous.clear();
        self.previous.extend_from_slice(x);
        let old = &self.previous;
        update_cells(x, |cell| Self::update(matrix, cmpt, old, cell));
    }
}

#[cfg(feature = "parallel")]
fn update_cells(x: &mut [f64], f: impl Fn(usize) -> f64 + Sync + Send) {
    x.par_iter_mut().enumerate().for_each(|(cell, v)| *v = f(cell));
}

#[cfg(not(feature = "parallel"))]
fn update_cells(x: &mut [f64], f: impl Fn(usize) -> f64) {
    for (cell, v) in x.iter_mut().enumerate() {
        *v = f(cell);
    }
}
