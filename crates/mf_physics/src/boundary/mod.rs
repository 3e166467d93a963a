// crates/mf_physics/src/boundary/mod.rs

//! 边界值计算
//!
//! 边界面值由单元值和每个 patch 的规则决定，计算逻辑按规则标签分派，
//! 与场本身的种类无关。
//!
//! | 规则 | 边界值 |
//! |------|--------|
//! | fixedValue | 指定常量 |
//! | fixedGradient | `ψ_P + g·|Cf − C_P|`，距离为零时直接取 `ψ_P` |
//! | calculated | 不变（由外部计算给定） |
//! | empty | `ψ_P` |
//!
//! 梯度场另有专门的边界外推，见 [`evaluate_gradient_boundary`]。

pub use mf_config::{BoundaryDefinition, BoundaryRule};

use mf_foundation::{MfError, MfResult, Tolerance};
use mf_mesh::{BoundaryPatch, FvMesh};

/// 查找 patch 对应的规则
pub(crate) fn rule_for<'a>(
    definition: &'a BoundaryDefinition,
    patch: &BoundaryPatch,
) -> MfResult<&'a BoundaryRule> {
    definition
        .get(&patch.name)
        .ok_or_else(|| MfError::missing_config(format!("boundary.{}", patch.name)))
}

/// 检查边界定义覆盖网格的全部 patch 且分量数一致
pub(crate) fn check_definition(
    mesh: &FvMesh,
    field: &str,
    definition: &BoundaryDefinition,
    n_components: usize,
) -> MfResult<()> {
    for patch in mesh.patches() {
        if definition.get(&patch.name).is_none() {
            return Err(MfError::missing_config(format!(
                "fields.{}.boundary.{}",
                field, patch.name
            )));
        }
    }
    for (name, _) in definition.iter() {
        if mesh.patch_by_name(name).is_none() {
            log::warn!("场 {} 的边界定义包含网格中不存在的 patch: {}", field, name);
        }
    }
    definition.validate_components(&format!("fields.{field}.boundary"), n_components)?;
    Ok(())
}

/// 按边界定义重新计算全部边界面值
///
/// `cells`/`boundary` 均为 `[分量][索引]` 布局，`boundary` 以第一个边界面为 0。
pub(crate) fn evaluate_boundary(
    mesh: &FvMesh,
    definition: &BoundaryDefinition,
    cells: &[Vec<f64>],
    boundary: &mut [Vec<f64>],
) -> MfResult<()> {
    let tol = Tolerance::default();
    let n_internal = mesh.n_internal_faces();

    for patch in mesh.patches() {
        let rule = rule_for(definition, patch)?;
        for face in patch.faces() {
            let b = face - n_internal;
            let own = mesh.owner(face);
            match rule {
                BoundaryRule::FixedValue { value } => {
                    for (c, v) in value.iter().enumerate() {
                        boundary[c][b] = *v;
                    }
                }
                BoundaryRule::FixedGradient { gradient } => {
                    let d = mesh.boundary_distance(face);
                    for (c, g) in gradient.iter().enumerate() {
                        boundary[c][b] = if tol.is_distance_zero(d) {
                            cells[c][own]
                        } else {
                            cells[c][own] + g * d
                        };
                    }
                }
                BoundaryRule::Empty => {
                    for c in 0..cells.len() {
                        boundary[c][b] = cells[c][own];
                    }
                }
                BoundaryRule::Calculated => {}
            }
        }
    }
    Ok(())
}

/// 梯度场的边界值
///
/// 对每个坐标轴：若 owner 形心与面形心在该轴上的距离为零，取单元梯度分量；
/// 否则由 owner 值与边界值的差商给出 `(ψ_P − ψ_b) / (C_P − Cf)`。
/// 零梯度壁面因此得到零法向梯度，修正后的边界通量保持守恒。
///
/// 梯度分量按 `axis * n + cmpt` 排列，`n` 为原场分量数。
pub(crate) fn evaluate_gradient_boundary(
    mesh: &FvMesh,
    psi_cells: &[Vec<f64>],
    psi_boundary: &[Vec<f64>],
    grad_cells: &[Vec<f64>],
    grad_boundary: &mut [Vec<f64>],
) {
    let tol = Tolerance::default();
    let n = psi_cells.len();
    let n_internal = mesh.n_internal_faces();

    for face in n_internal..mesh.n_faces() {
        let b = face - n_internal;
        let own = mesh.owner(face);
        let dist = mesh.cell_centre(own) - mesh.face_centre(face);
        for axis in 0..3 {
            let d = dist[axis];
            for c in 0..n {
                let g = axis * n + c;
                grad_boundary[g][b] = if tol.is_distance_zero(d) {
                    grad_cells[g][own]
                } else {
                    (psi_cells[c][own] - psi_boundary[c][b]) / d
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mf_mesh::{BoxMeshGenerator, BoxSide, PatchType};

    fn channel() -> FvMesh {
        BoxMeshGenerator::new(4, 1, 1, 4.0, 1.0, 1.0)
            .patch("left", PatchType::Patch, &[BoxSide::XMin])
            .patch("right", PatchType::Patch, &[BoxSide::XMax])
            .patch(
                "sides",
                PatchType::Empty,
                &[BoxSide::YMin, BoxSide::YMax, BoxSide::ZMin, BoxSide::ZMax],
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_rule_laws() {
        let mesh = channel();
        let def = BoundaryDefinition::new()
            .with("left", BoundaryRule::FixedValue { value: vec![7.0] })
            .with("right", BoundaryRule::FixedGradient { gradient: vec![2.0] })
            .with("sides", BoundaryRule::Empty);
        let cells = vec![vec![1.0, 2.0, 3.0, 4.0]];
        let mut boundary = vec![vec![-1.0; mesh.n_boundary_faces()]];
        evaluate_boundary(&mesh, &def, &cells, &mut boundary).unwrap();

        let nb = |face: usize| face - mesh.n_internal_faces();
        let left = mesh.patch_by_name("left").unwrap();
        let right = mesh.patch_by_name("right").unwrap();
        assert_eq!(boundary[0][nb(left.start_face)], 7.0);
        // 4 + 2 * 0.5
        assert!((boundary[0][nb(right.start_face)] - 5.0).abs() < 1e-14);
        for face in mesh.patch_by_name("sides").unwrap().faces() {
            assert_eq!(boundary[0][nb(face)], cells[0][mesh.owner(face)]);
        }
    }

    #[test]
    fn test_calculated_is_untouched() {
        let mesh = channel();
        let def = BoundaryDefinition::new()
            .with("left", BoundaryRule::Calculated)
            .with("right", BoundaryRule::Calculated)
            .with("sides", BoundaryRule::Calculated);
        let cells = vec![vec![1.0; 4]];
        let mut boundary = vec![vec![42.0; mesh.n_boundary_faces()]];
        evaluate_boundary(&mesh, &def, &cells, &mut boundary).unwrap();
        assert!(boundary[0].iter().all(|&v| v == 42.0));
    }

    #[test]
    fn test_missing_patch_rule() {
        let mesh = channel();
        let def = BoundaryDefinition::new().with("left", BoundaryRule::Empty);
        assert!(check_definition(&mesh, "T", &def, 1).is_err());
        let cells = vec![vec![0.0; 4]];
        let mut boundary = vec![vec![0.0; mesh.n_boundary_faces()]];
        assert!(evaluate_boundary(&mesh, &def, &cells, &mut boundary).is_err());
    }

    #[test]
    fn test_gradient_boundary_normal_difference() {
        let mesh = channel();
        // ψ = x，右端边界值 4.0
        let psi_cells = vec![vec![0.5, 1.5, 2.5, 3.5]];
        let mut psi_boundary = vec![vec![0.0; mesh.n_boundary_faces()]];
        let def = BoundaryDefinition::new()
            .with("left", BoundaryRule::FixedValue { value: vec![0.0] })
            .with("right", BoundaryRule::FixedValue { value: vec![4.0] })
            .with("sides", BoundaryRule::Empty);
        evaluate_boundary(&mesh, &def, &psi_cells, &mut psi_boundary).unwrap();

        let grad_cells = vec![vec![1.0; 4], vec![0.0; 4], vec![0.0; 4]];
        let mut grad_boundary = vec![vec![0.0; mesh.n_boundary_faces()]; 3];
        evaluate_gradient_boundary(&mesh, &psi_cells, &psi_boundary, &grad_cells, &mut grad_boundary);

        let right = mesh.patch_by_name("right").unwrap();
        let b = right.start_face - mesh.n_internal_faces();
        assert!((grad_boundary[0][b] - 1.0).abs() < 1e-12);
        // y 方向面：x 轴距离为零，取单元梯度；y 轴为差商（empty 镜像值，结果为零）
        let sides = mesh.patch_by_name("sides").unwrap();
        let b = sides.start_face - mesh.n_internal_faces();
        assert!((grad_boundary[0][b] - 1.0).abs() < 1e-12);
        assert!(grad_boundary[1][b].abs() < 1e-12);
    }
}
