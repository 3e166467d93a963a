// crates/mf_physics/src/schemes/fvm/div.rs

//! 对流项（迎风）

use crate::boundary::rule_for;
use crate::fields::{SurfaceField, VolField};
use crate::matrix::FvMatrix;
use crate::schemes::{check_scheme, OperatorKind, SchemeKind};
use mf_config::BoundaryRule;
use mf_foundation::{MfError, MfResult};
use std::sync::Arc;

/// 隐式对流项 `∇·(φψ)`，一阶迎风
///
/// 内部面（通量 `F` 由 owner 指向 neighbour）：
/// - owner 对角 `+max(F, 0)`，neighbour 对角 `+max(−F, 0)`
/// - `upper += min(F, 0)`，`lower += min(−F, 0)`
///
/// 边界面（流出通量 `F`）：
/// - fixedValue/calculated: `source −= F·ψ_b`
/// - fixedGradient: `diag += F`，`source −= F·d·g`
/// - empty: 无贡献
pub fn div(psi: &VolField, scheme: SchemeKind, phi: &SurfaceField) -> MfResult<FvMatrix> {
    check_scheme(OperatorKind::Div, scheme, true)?;
    if !Arc::ptr_eq(psi.mesh(), phi.mesh()) {
        return Err(MfError::mesh_mismatch("div"));
    }
    MfError::check_components("div", 1, phi.n_components())?;

    let mesh = Arc::clone(psi.mesh());
    let flux = phi.values(0);
    let mut m = FvMatrix::zeros(psi);

    for face in 0..mesh.n_internal_faces() {
        let f = flux[face];
        let (own, nei) = (mesh.owner(face), mesh.neighbour(face));
        m.diag_mut()[own] += f.max(0.0);
        m.diag_mut()[nei] += (-f).max(0.0);
        m.upper_mut()[face] += f.min(0.0);
        m.lower_mut()[face] += (-f).min(0.0);
    }

    for patch in mesh.patches() {
        let rule = rule_for(psi.definition(), patch)?;
        for face in patch.faces() {
            let f = flux[face];
            let own = mesh.owner(face);
            match rule {
                BoundaryRule::FixedValue { .. } | BoundaryRule::Calculated => {
                    for c in 0..psi.n_components() {
                        m.source_mut(c)[own] -= f * psi.boundary_face_value(c, face);
                    }
                }
                BoundaryRule::FixedGradient { gradient } => {
                    let d = mesh.boundary_distance(face);
                    m.diag_mut()[own] += f;
                    for (c, g) in gradient.iter().enumerate() {
                        m.source_mut(c)[own] -= f * d * g;
                    }
                }
                BoundaryRule::Empty => {}
            }
        }
    }
    Ok(m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mf_config::BoundaryDefinition;
    use mf_mesh::{BoxMeshGenerator, BoxSide, FvMesh, PatchType};

    fn channel() -> Arc<FvMesh> {
        Arc::new(
            BoxMeshGenerator::new(3, 1, 1, 3.0, 1.0, 1.0)
                .patch("inlet", PatchType::Patch, &[BoxSide::XMin])
                .patch("outlet", PatchType::Patch, &[BoxSide::XMax])
                .patch(
                    "sides",
                    PatchType::Empty,
                    &[BoxSide::YMin, BoxSide::YMax, BoxSide::ZMin, BoxSide::ZMax],
                )
                .build()
                .unwrap(),
        )
    }

    fn setup(mesh: &Arc<FvMesh>) -> (VolField, SurfaceField) {
        let t_def = BoundaryDefinition::new()
            .with("inlet", BoundaryRule::FixedValue { value: vec![2.0] })
            .with("outlet", BoundaryRule::zero_gradient(1))
            .with("sides", BoundaryRule::Empty);
        let t = VolField::initialize(mesh.clone(), "T", t_def, &[0.0]).unwrap();

        let u_def = BoundaryDefinition::new()
            .with("inlet", BoundaryRule::FixedValue { value: vec![1.0, 0.0, 0.0] })
            .with("outlet", BoundaryRule::zero_gradient(3))
            .with("sides", BoundaryRule::Empty);
        let u = VolField::initialize(mesh.clone(), "U", u_def, &[1.0, 0.0, 0.0]).unwrap();
        (t, SurfaceField::flux(&u).unwrap())
    }

    #[test]
    fn test_upwind_coefficients() {
        let mesh = channel();
        let (t, phi) = setup(&mesh);
        let m = div(&t, SchemeKind::Upwind, &phi).unwrap();

        // 正向流动：upper 为 0，lower 为 −F
        assert!(m.upper().iter().all(|&u| u == 0.0));
        assert!(m.lower().iter().all(|&l| (l + 1.0).abs() < 1e-14));
        // 入口：source = −F·ψ_b = 2
        assert!((m.source(0)[0] - 2.0).abs() < 1e-14);
        // 出口零梯度：对角加 F
        assert!((m.diag()[2] - 1.0).abs() < 1e-14);
        assert!((m.diag()[0] - 1.0).abs() < 1e-14);
    }

    #[test]
    fn test_pure_advection_transports_inlet_value() {
        let mesh = channel();
        let (t, phi) = setup(&mesh);
        let m = div(&t, SchemeKind::Upwind, &phi).unwrap();
        // 稳态纯对流：下游全部等于入口值
        let x = vec![2.0; 3];
        let nf = m.norm_factor(&x, 0);
        assert!(m.residual(&x, 0, nf) < 1e-12);
    }

    #[test]
    fn test_rejects_foreign_flux_and_explicit_scheme() {
        let mesh = channel();
        let (t, phi) = setup(&mesh);
        let (_, foreign) = setup(&channel());
        assert!(matches!(
            div(&t, SchemeKind::Upwind, &foreign),
            Err(MfError::MeshMismatch { .. })
        ));
        assert!(div(&t, SchemeKind::Linear, &phi).is_err());
    }
}
