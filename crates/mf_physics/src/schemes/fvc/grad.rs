// crates/mf_physics/src/schemes/fvc/grad.rs

//! 显式梯度（Gauss 线性）

use crate::fields::VolField;
use crate::matrix::FvMatrix;
use crate::schemes::{check_scheme, OperatorKind, SchemeKind};
use mf_config::BoundaryRule;
use mf_foundation::{MfError, MfResult};
use std::sync::Arc;

/// `Σ_f ψ_f ⊗ Sf`，按 `axis * n + cmpt` 排列，每个单元未除以体积
///
/// 内部面取反距离插值，边界面取边界值；empty patch 不参与。
pub(crate) fn accumulate_gradient(field: &VolField) -> Vec<Vec<f64>> {
    let mesh = field.mesh();
    let n = field.n_components();
    let mut acc = vec![vec![0.0; mesh.n_cells()]; 3 * n];

    for face in 0..mesh.n_internal_faces() {
        let w = mesh.interpolation_weight(face);
        let (own, nei) = (mesh.owner(face), mesh.neighbour(face));
        let sf = mesh.face_area(face);
        for c in 0..n {
            let x = field.cell_values(c);
            let psi_f = w * x[own] + (1.0 - w) * x[nei];
            for axis in 0..3 {
                let v = psi_f * sf[axis];
                acc[axis * n + c][own] += v;
                acc[axis * n + c][nei] -= v;
            }
        }
    }

    for patch in mesh.patches() {
        let empty = field
            .definition()
            .get(&patch.name)
            .map_or(false, BoundaryRule::is_empty);
        if empty {
            continue;
        }
        for face in patch.faces() {
            let own = mesh.owner(face);
            let sf = mesh.face_area(face);
            for c in 0..n {
                let psi_b = field.boundary_face_value(c, face);
                for axis in 0..3 {
                    acc[axis * n + c][own] += psi_b * sf[axis];
                }
            }
        }
    }
    acc
}

/// 显式梯度 `∇field × V`，结果以 `psi` 为未知量
///
/// 结果分量数为 `3 × field` 分量数，需与 `psi` 一致（标量压力的梯度作用于速度方程）。
pub fn grad(psi: &VolField, scheme: SchemeKind, field: &VolField) -> MfResult<FvMatrix> {
    check_scheme(OperatorKind::Grad, scheme, false)?;
    if !Arc::ptr_eq(psi.mesh(), field.mesh()) {
        return Err(MfError::mesh_mismatch("grad"));
    }
    MfError::check_components("grad", psi.n_components(), 3 * field.n_components())?;

    let mut m = FvMatrix::zeros(psi);
    for (dst, src) in m.sources_mut().iter_mut().zip(accumulate_gradient(field)) {
        *dst = src;
    }
    Ok(m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mf_config::BoundaryDefinition;
    use mf_mesh::{BoxMeshGenerator, BoxSide, FvMesh, PatchType};

    fn mesh() -> Arc<FvMesh> {
        Arc::new(
            BoxMeshGenerator::new(3, 3, 1, 3.0, 3.0, 1.0)
                .patch("walls", PatchType::Wall, &[BoxSide::XMin, BoxSide::XMax, BoxSide::YMin, BoxSide::YMax])
                .patch("frontAndBack", PatchType::Empty, &[BoxSide::ZMin, BoxSide::ZMax])
                .build()
                .unwrap(),
        )
    }

    fn fields(mesh: &Arc<FvMesh>) -> (VolField, VolField) {
        let u_def = BoundaryDefinition::new()
            .with("walls", BoundaryRule::FixedValue { value: vec![0.0; 3] })
            .with("frontAndBack", BoundaryRule::Empty);
        let p_def = BoundaryDefinition::new()
            .with("walls", BoundaryRule::zero_gradient(1))
            .with("frontAndBack", BoundaryRule::Empty);
        (
            VolField::initialize(mesh.clone(), "U", u_def, &[0.0; 3]).unwrap(),
            VolField::initialize(mesh.clone(), "p", p_def, &[4.0]).unwrap(),
        )
    }

    #[test]
    fn test_uniform_field_has_zero_gradient() {
        let mesh = mesh();
        let (u, p) = fields(&mesh);
        let m = grad(&u, SchemeKind::Linear, &p).unwrap();
        assert_eq!(m.n_components(), 3);
        assert_eq!(m.psi(), u.id());
        for c in 0..3 {
            assert!(m.source(c).iter().all(|v| v.abs() < 1e-12));
        }
        assert!(m.is_diagonal());
    }

    #[test]
    fn test_component_layout() {
        let mesh = mesh();
        let (u, mut p) = fields(&mesh);
        // p = y
        for i in 0..mesh.n_cells() {
            p.cell_values_mut(0)[i] = mesh.cell_centre(i).y;
        }
        p.correct_boundary_values().unwrap();
        let m = grad(&u, SchemeKind::Linear, &p).unwrap();
        // 中心单元的 y 分量 = 1 × V
        let centre = 4;
        assert!((m.source(1)[centre] - mesh.cell_volume(centre)).abs() < 1e-12);
        assert!(m.source(0)[centre].abs() < 1e-12);
    }

    #[test]
    fn test_component_mismatch() {
        let mesh = mesh();
        let (u, p) = fields(&mesh);
        assert!(matches!(
            grad(&p, SchemeKind::Linear, &p),
            Err(MfError::ComponentMismatch { .. })
        ));
        assert!(grad(&u, SchemeKind::Upwind, &p).is_err());
    }
}
