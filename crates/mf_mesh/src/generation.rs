// crates/mf_mesh/src/generation.rs

//! 结构化网格生成器
//!
//! 生成长方体区域上的均匀六面体网格，用于测试与演示算例。
//! 生成结果满足 [`FvMesh`] 的全部面编号约定。
//!
//! # 使用示例
//!
//! ```ignore
//! use mf_mesh::{BoxMeshGenerator, BoxSide, PatchType};
//!
//! // 顶盖驱动方腔：20x20x1
//! let mesh = BoxMeshGenerator::new(20, 20, 1, 0.1, 0.1, 0.01)
//!     .patch("movingWall", PatchType::Wall, &[BoxSide::YMax])
//!     .patch("fixedWalls", PatchType::Wall, &[BoxSide::XMin, BoxSide::XMax, BoxSide::YMin])
//!     .patch("frontAndBack", PatchType::Empty, &[BoxSide::ZMin, BoxSide::ZMax])
//!     .build()?;
//! ```

use crate::fv_mesh::{FvMesh, FvMeshData};
use crate::patch::{BoundaryPatch, PatchType};
use glam::DVec3;
use mf_foundation::{ensure, MfError, MfResult};

/// 长方体的六个侧面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxSide {
    /// x 最小侧
    XMin,
    /// x 最大侧
    XMax,
    /// y 最小侧
    YMin,
    /// y 最大侧
    YMax,
    /// z 最小侧
    ZMin,
    /// z 最大侧
    ZMax,
}

impl BoxSide {
    /// 全部侧面
    pub const ALL: [BoxSide; 6] = [
        BoxSide::XMin,
        BoxSide::XMax,
        BoxSide::YMin,
        BoxSide::YMax,
        BoxSide::ZMin,
        BoxSide::ZMax,
    ];

    /// 默认 patch 名称
    pub fn default_name(&self) -> &'static str {
        match self {
            Self::XMin => "xMin",
            Self::XMax => "xMax",
            Self::YMin => "yMin",
            Self::YMax => "yMax",
            Self::ZMin => "zMin",
            Self::ZMax => "zMax",
        }
    }
}

/// 均匀六面体网格生成器
#[derive(Debug, Clone)]
pub struct BoxMeshGenerator {
    /// 各方向单元数
    pub n: [usize; 3],
    /// 各方向长度
    pub length: [f64; 3],
    /// 原点
    pub origin: DVec3,
    patches: Vec<(String, PatchType, Vec<BoxSide>)>,
}

impl BoxMeshGenerator {
    /// 创建生成器
    pub fn new(nx: usize, ny: usize, nz: usize, lx: f64, ly: f64, lz: f64) -> Self {
        Self {
            n: [nx, ny, nz],
            length: [lx, ly, lz],
            origin: DVec3::ZERO,
            patches: Vec::new(),
        }
    }

    /// 设置原点
    pub fn with_origin(mut self, origin: DVec3) -> Self {
        self.origin = origin;
        self
    }

    /// 将若干侧面合并为一个命名 patch
    ///
    /// patch 顺序即添加顺序；未被认领的侧面各自成为默认命名的 `Patch`。
    pub fn patch(mut self, name: impl Into<String>, patch_type: PatchType, sides: &[BoxSide]) -> Self {
        self.patches.push((name.into(), patch_type, sides.to_vec()));
        self
    }

    /// 单元数
    pub fn n_cells(&self) -> usize {
        self.n[0] * self.n[1] * self.n[2]
    }

    /// 单元尺寸
    pub fn spacing(&self) -> DVec3 {
        DVec3::new(
            self.length[0] / self.n[0] as f64,
            self.length[1] / self.n[1] as f64,
            self.length[2] / self.n[2] as f64,
        )
    }

    #[inline]
    fn cell_index(&self, i: usize, j: usize, k: usize) -> usize {
        i + self.n[0] * (j + self.n[1] * k)
    }

    fn cell_centre(&self, i: usize, j: usize, k: usize) -> DVec3 {
        let h = self.spacing();
        self.origin + DVec3::new((i as f64 + 0.5) * h.x, (j as f64 + 0.5) * h.y, (k as f64 + 0.5) * h.z)
    }

    /// 生成网格
    pub fn build(&self) -> MfResult<FvMesh> {
        let [nx, ny, nz] = self.n;
        ensure!(
            nx > 0 && ny > 0 && nz > 0,
            MfError::invalid_mesh("各方向单元数必须为正")
        );
        ensure!(
            self.length.iter().all(|&l| l > 0.0),
            MfError::invalid_mesh("各方向长度必须为正")
        );

        // 整理 patch 与侧面的归属
        let mut claimed = Vec::new();
        let mut groups: Vec<(String, PatchType, Vec<BoxSide>)> = Vec::new();
        for (name, patch_type, sides) in &self.patches {
            for side in sides {
                ensure!(
                    !claimed.contains(side),
                    MfError::invalid_mesh(format!("侧面 {:?} 被多个 patch 认领", side))
                );
                claimed.push(*side);
            }
            groups.push((name.clone(), *patch_type, sides.clone()));
        }
        for side in BoxSide::ALL {
            if !claimed.contains(&side) {
                groups.push((side.default_name().to_string(), PatchType::Patch, vec![side]));
            }
        }

        let h = self.spacing();
        let (ax, ay, az) = (h.y * h.z, h.x * h.z, h.x * h.y);

        let mut data = FvMeshData::default();
        data.cell_volumes = vec![h.x * h.y * h.z; self.n_cells()];
        data.cell_centres = Vec::with_capacity(self.n_cells());
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    data.cell_centres.push(self.cell_centre(i, j, k));
                }
            }
        }

        // 内部面：按 owner 顺序，每个单元依次添加 +x、+y、+z 方向的面
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    let c = self.cell_index(i, j, k);
                    let cc = data.cell_centres[c];
                    if i + 1 < nx {
                        data.owner.push(c);
                        data.neighbour.push(self.cell_index(i + 1, j, k));
                        data.face_areas.push(DVec3::new(ax, 0.0, 0.0));
                        data.face_centres.push(cc + DVec3::new(0.5 * h.x, 0.0, 0.0));
                    }
                    if j + 1 < ny {
                        data.owner.push(c);
                        data.neighbour.push(self.cell_index(i, j + 1, k));
                        data.face_areas.push(DVec3::new(0.0, ay, 0.0));
                        data.face_centres.push(cc + DVec3::new(0.0, 0.5 * h.y, 0.0));
                    }
                    if k + 1 < nz {
                        data.owner.push(c);
                        data.neighbour.push(self.cell_index(i, j, k + 1));
                        data.face_areas.push(DVec3::new(0.0, 0.0, az));
                        data.face_centres.push(cc + DVec3::new(0.0, 0.0, 0.5 * h.z));
                    }
                }
            }
        }

        // 边界面
        for (name, patch_type, sides) in groups {
            let start_face = data.owner.len();
            for side in sides {
                self.push_side(&mut data, side);
            }
            let n_faces = data.owner.len() - start_face;
            data.patches
                .push(BoundaryPatch::new(name, patch_type, n_faces, start_face));
        }

        FvMesh::new(data)
    }

    fn push_side(&self, data: &mut FvMeshData, side: BoxSide) {
        let [nx, ny, nz] = self.n;
        let h = self.spacing();
        let (ax, ay, az) = (h.y * h.z, h.x * h.z, h.x * h.y);

        let mut push = |c: usize, area: DVec3, offset: DVec3| {
            data.owner.push(c);
            data.face_areas.push(area);
            data.face_centres.push(data.cell_centres[c] + offset);
        };

        match side {
            BoxSide::XMin | BoxSide::XMax => {
                let (i, sign) = if side == BoxSide::XMin { (0, -1.0) } else { (nx - 1, 1.0) };
                for k in 0..nz {
                    for j in 0..ny {
                        push(
                            self.cell_index(i, j, k),
                            DVec3::new(sign * ax, 0.0, 0.0),
                            DVec3::new(sign * 0.5 * h.x, 0.0, 0.0),
                        );
                    }
                }
            }
            BoxSide::YMin | BoxSide::YMax => {
                let (j, sign) = if side == BoxSide::YMin { (0, -1.0) } else { (ny - 1, 1.0) };
                for k in 0..nz {
                    for i in 0..nx {
                        push(
                            self.cell_index(i, j, k),
                            DVec3::new(0.0, sign * ay, 0.0),
                            DVec3::new(0.0, sign * 0.5 * h.y, 0.0),
                        );
                    }
                }
            }
            BoxSide::ZMin | BoxSide::ZMax => {
                let (k, sign) = if side == BoxSide::ZMin { (0, -1.0) } else { (nz - 1, 1.0) };
                for j in 0..ny {
                    for i in 0..nx {
                        push(
                            self.cell_index(i, j, k),
                            DVec3::new(0.0, 0.0, sign * az),
                            DVec3::new(0.0, 0.0, sign * 0.5 * h.z),
                        );
                    }
                }
            }
        }
    }
}
