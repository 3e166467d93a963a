// crates/mf_mesh/src/ldu.rs

//! LDU 寻址
//!
//! 内部面按 owner 升序排列时，每个单元作为 owner 的面构成一段连续区间，
//! 由 `owner_start` 给出（上三角行）。作为 neighbour 的面不连续，
//! 通过 `losort` 按 neighbour 重新分组（下三角行）。
//!
//! 单元 `i` 的矩阵行：
//!
//! ```text
//! diag[i]·ψ[i]
//!   + Σ_{f ∈ owner_start[i]..owner_start[i+1]}        upper[f]·ψ[neighbour[f]]
//!   + Σ_{f ∈ losort[losort_start[i]..losort_start[i+1]]} lower[f]·ψ[owner[f]]
//!   = source[i]
//! ```

/// LDU 寻址数组
#[derive(Debug, Clone, PartialEq)]
pub struct LduAddressing {
    owner_start: Vec<usize>,
    losort: Vec<usize>,
    losort_start: Vec<usize>,
}

impl LduAddressing {
    /// 由内部面的 owner/neighbour 数组构建
    ///
    /// 要求 `owner` 非降序（由网格校验保证）。
    pub fn new(n_cells: usize, owner: &[usize], neighbour: &[usize]) -> Self {
        let n_internal = neighbour.len();

        // owner 行起点
        let mut owner_start = vec![0usize; n_cells + 1];
        for &o in &owner[..n_internal] {
            owner_start[o + 1] += 1;
        }
        for i in 0..n_cells {
            owner_start[i + 1] += owner_start[i];
        }

        // 按 neighbour 计数排序（稳定）
        let mut losort_start = vec![0usize; n_cells + 1];
        for &n in neighbour {
            losort_start[n + 1] += 1;
        }
        for i in 0..n_cells {
            losort_start[i + 1] += losort_start[i];
        }
        let mut cursor = losort_start.clone();
        let mut losort = vec![0usize; n_internal];
        for (face, &n) in neighbour.iter().enumerate() {
            losort[cursor[n]] = face;
            cursor[n] += 1;
        }

        Self {
            owner_start,
            losort,
            losort_start,
        }
    }

    /// 单元作为 owner 的内部面（上三角系数所在面）
    #[inline]
    pub fn upper_faces(&self, cell: usize) -> std::ops::Range<usize> {
        self.owner_start[cell]..self.owner_start[cell + 1]
    }

    /// 单元作为 neighbour 的内部面（下三角系数所在面）
    #[inline]
    pub fn lower_faces(&self, cell: usize) -> &[usize] {
        &self.losort[self.losort_start[cell]..self.losort_start[cell + 1]]
    }

    /// owner 行起点数组（长度 n_cells + 1）
    #[inline]
    pub fn owner_start(&self) -> &[usize] {
        &self.owner_start
    }

    /// 按 neighbour 分组的内部面索引
    #[inline]
    pub fn losort(&self) -> &[usize] {
        &self.losort
    }
}
