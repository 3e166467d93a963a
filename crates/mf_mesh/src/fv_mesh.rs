// crates/mf_mesh/src/fv_mesh.rs

//! 有限体积网格
//!
//! 只读 SoA 布局的多面体网格几何。网格的构造（读取点/面/owner/neighbour
//! 并计算几何量）由外部完成，这里只负责校验约定并提供离散所需的访问接口。
//!
//! # 面编号约定
//!
//! 1. 所有内部面在前，按 owner 非降序排列，且 `owner < neighbour`
//! 2. 边界面随后，按 patch 连续分组
//! 3. 面积矢量由 owner 指向 neighbour（边界面指向域外）
//!
//! # 使用示例
//!
//! ```ignore
//! use mf_mesh::{FvMesh, FvMeshData};
//!
//! let mesh = FvMesh::new(data)?;
//! for face in 0..mesh.n_internal_faces() {
//!     let w = mesh.interpolation_weight(face);
//!     // ...
//! }
//! ```

use crate::ldu::LduAddressing;
use crate::patch::{BoundaryPatch, PatchType};
use glam::DVec3;
use mf_foundation::{ensure, MfError, MfResult};

/// 网格原始数据（由外部网格读取器提供）
#[derive(Debug, Clone, Default)]
pub struct FvMeshData {
    /// 单元体积
    pub cell_volumes: Vec<f64>,
    /// 单元形心
    pub cell_centres: Vec<DVec3>,
    /// 面积矢量
    pub face_areas: Vec<DVec3>,
    /// 面形心
    pub face_centres: Vec<DVec3>,
    /// 每个面的 owner 单元（长度 = 面总数）
    pub owner: Vec<usize>,
    /// 每个内部面的 neighbour 单元（长度 = 内部面数）
    pub neighbour: Vec<usize>,
    /// 边界 patch 列表
    pub patches: Vec<BoundaryPatch>,
}

/// 有限体积网格
#[derive(Debug, Clone)]
pub struct FvMesh {
    n_cells: usize,
    n_faces: usize,
    n_internal_faces: usize,

    // ===== 单元数据 =====
    cell_volumes: Vec<f64>,
    cell_centres: Vec<DVec3>,

    // ===== 面数据 =====
    face_areas: Vec<DVec3>,
    face_area_mags: Vec<f64>,
    face_centres: Vec<DVec3>,
    owner: Vec<usize>,
    neighbour: Vec<usize>,

    // ===== 边界数据 =====
    patches: Vec<BoundaryPatch>,
    /// 边界面所属 patch（以第一个边界面为 0）
    boundary_face_patch: Vec<usize>,

    ldu: LduAddressing,
}

impl FvMesh {
    /// 校验并构建网格
    pub fn new(data: FvMeshData) -> MfResult<Self> {
        let n_cells = data.cell_volumes.len();
        let n_faces = data.owner.len();
        let n_internal_faces = data.neighbour.len();

        ensure!(n_cells > 0, MfError::invalid_mesh("网格没有单元"));
        MfError::check_size("cell_centres", n_cells, data.cell_centres.len())?;
        MfError::check_size("face_areas", n_faces, data.face_areas.len())?;
        MfError::check_size("face_centres", n_faces, data.face_centres.len())?;
        ensure!(
            n_internal_faces <= n_faces,
            MfError::invalid_mesh(format!(
                "内部面数 {} 超过面总数 {}",
                n_internal_faces, n_faces
            ))
        );

        for (cell, &v) in data.cell_volumes.iter().enumerate() {
            ensure!(
                v > 0.0 && v.is_finite(),
                MfError::invalid_mesh(format!("单元 {} 体积非正: {}", cell, v))
            );
        }

        for (face, &o) in data.owner.iter().enumerate() {
            MfError::check_index("owner", o, n_cells)?;
            if face < n_internal_faces {
                let n = data.neighbour[face];
                MfError::check_index("neighbour", n, n_cells)?;
                ensure!(
                    o < n,
                    MfError::invalid_mesh(format!(
                        "内部面 {} 的 owner {} 不小于 neighbour {}",
                        face, o, n
                    ))
                );
                if face > 0 {
                    ensure!(
                        data.owner[face - 1] <= o,
                        MfError::invalid_mesh(format!("内部面 {} 未按 owner 排序", face))
                    );
                }
            }
        }

        // patch 必须从第一个边界面开始连续覆盖所有边界面
        let mut expected_start = n_internal_faces;
        let mut boundary_face_patch = Vec::with_capacity(n_faces - n_internal_faces);
        for (pi, patch) in data.patches.iter().enumerate() {
            ensure!(
                patch.start_face == expected_start,
                MfError::invalid_mesh(format!(
                    "patch '{}' 起始面 {} 不连续（期望 {}）",
                    patch.name, patch.start_face, expected_start
                ))
            );
            expected_start += patch.n_faces;
            boundary_face_patch.extend(std::iter::repeat(pi).take(patch.n_faces));
        }
        ensure!(
            expected_start == n_faces,
            MfError::invalid_mesh(format!(
                "patch 覆盖到面 {}，但面总数为 {}",
                expected_start, n_faces
            ))
        );

        let face_area_mags = data.face_areas.iter().map(|s| s.length()).collect();
        let ldu = LduAddressing::new(n_cells, &data.owner, &data.neighbour);

        log::debug!(
            "网格: {} 单元, {} 面 ({} 内部), {} 个 patch",
            n_cells,
            n_faces,
            n_internal_faces,
            data.patches.len()
        );

        Ok(Self {
            n_cells,
            n_faces,
            n_internal_faces,
            cell_volumes: data.cell_volumes,
            cell_centres: data.cell_centres,
            face_areas: data.face_areas,
            face_area_mags,
            face_centres: data.face_centres,
            owner: data.owner,
            neighbour: data.neighbour,
            patches: data.patches,
            boundary_face_patch,
            ldu,
        })
    }

    // =========================================================================
    // 拓扑
    // =========================================================================

    /// 单元数
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.n_cells
    }

    /// 面总数
    #[inline]
    pub fn n_faces(&self) -> usize {
        self.n_faces
    }

    /// 内部面数
    #[inline]
    pub fn n_internal_faces(&self) -> usize {
        self.n_internal_faces
    }

    /// 边界面数
    #[inline]
    pub fn n_boundary_faces(&self) -> usize {
        self.n_faces - self.n_internal_faces
    }

    /// 面的 owner 单元
    #[inline]
    pub fn owner(&self, face: usize) -> usize {
        self.owner[face]
    }

    /// 内部面的 neighbour 单元
    #[inline]
    pub fn neighbour(&self, face: usize) -> usize {
        self.neighbour[face]
    }

    /// owner 数组（所有面）
    #[inline]
    pub fn owners(&self) -> &[usize] {
        &self.owner
    }

    /// neighbour 数组（内部面）
    #[inline]
    pub fn neighbours(&self) -> &[usize] {
        &self.neighbour
    }

    /// 边界 patch 列表
    #[inline]
    pub fn patches(&self) -> &[BoundaryPatch] {
        &self.patches
    }

    /// 按名称查找 patch
    pub fn patch_by_name(&self, name: &str) -> Option<&BoundaryPatch> {
        self.patches.iter().find(|p| p.name == name)
    }

    /// 边界面所属 patch 索引（全局面编号）
    #[inline]
    pub fn patch_of_face(&self, face: usize) -> usize {
        self.boundary_face_patch[face - self.n_internal_faces]
    }

    /// 是否存在 empty 类型 patch
    pub fn has_empty_patches(&self) -> bool {
        self.patches
            .iter()
            .any(|p| p.patch_type == PatchType::Empty)
    }

    /// LDU 寻址
    #[inline]
    pub fn ldu(&self) -> &LduAddressing {
        &self.ldu
    }

    // =========================================================================
    // 几何
    // =========================================================================

    /// 单元体积
    #[inline]
    pub fn cell_volume(&self, cell: usize) -> f64 {
        self.cell_volumes[cell]
    }

    /// 单元体积数组
    #[inline]
    pub fn cell_volumes(&self) -> &[f64] {
        &self.cell_volumes
    }

    /// 平均单元体积
    pub fn mean_cell_volume(&self) -> f64 {
        self.cell_volumes.iter().sum::<f64>() / self.n_cells as f64
    }

    /// 单元形心
    #[inline]
    pub fn cell_centre(&self, cell: usize) -> DVec3 {
        self.cell_centres[cell]
    }

    /// 面积矢量
    #[inline]
    pub fn face_area(&self, face: usize) -> DVec3 {
        self.face_areas[face]
    }

    /// 面积大小
    #[inline]
    pub fn face_area_mag(&self, face: usize) -> f64 {
        self.face_area_mags[face]
    }

    /// 面形心
    #[inline]
    pub fn face_centre(&self, face: usize) -> DVec3 {
        self.face_centres[face]
    }

    /// 内部面 owner 侧的反距离插值权重
    ///
    /// `w = |Cf − C_N| / (|Cf − C_P| + |Cf − C_N|)`，面值为 `w·ψ_P + (1 − w)·ψ_N`。
    #[inline]
    pub fn interpolation_weight(&self, face: usize) -> f64 {
        let cf = self.face_centres[face];
        let d_own = (cf - self.cell_centres[self.owner[face]]).length();
        let d_nei = (cf - self.cell_centres[self.neighbour[face]]).length();
        d_nei / (d_own + d_nei)
    }

    /// 内部面两侧单元形心距离 |C_N − C_P|
    #[inline]
    pub fn delta(&self, face: usize) -> f64 {
        (self.cell_centres[self.neighbour[face]] - self.cell_centres[self.owner[face]]).length()
    }

    /// 边界面到 owner 形心的距离 |Cf − C_P|
    #[inline]
    pub fn boundary_distance(&self, face: usize) -> f64 {
        (self.face_centres[face] - self.cell_centres[self.owner[face]]).length()
    }
}
