// crates/mf_physics/src/schemes/fvm/laplacian.rs

//! 扩散项（正交网格）

use crate::boundary::rule_for;
use crate::fields::VolField;
use crate::matrix::FvMatrix;
use crate::schemes::{check_scheme, Diffusivity, OperatorKind, SchemeKind};
use mf_config::BoundaryRule;
use mf_foundation::MfResult;
use std::sync::Arc;

/// 隐式拉普拉斯 `∇·(Γ∇ψ)`，不做非正交修正
///
/// 内部面系数 `c = Γ_f·|Sf| / |C_N − C_P|`：两侧对角 `−c`，`upper`/`lower` 各 `+c`。
///
/// 边界面：
/// - fixedValue/calculated: `c_b = Γ_b·|Sf| / |Cf − C_P|`，对角 `−c_b`，`source −= c_b·ψ_b`
/// - fixedGradient: `source −= Γ_b·|Sf|·g`
/// - empty: 无贡献
///
/// 对角为负，扩散方程通常写作 `ddt − laplacian`。
pub fn laplacian(psi: &VolField, scheme: SchemeKind, gamma: Diffusivity<'_>) -> MfResult<FvMatrix> {
    check_scheme(OperatorKind::Laplacian, scheme, true)?;
    gamma.check()?;

    let mesh = Arc::clone(psi.mesh());
    let mut m = FvMatrix::zeros(psi);

    for face in 0..mesh.n_internal_faces() {
        let c = gamma.face_value(&mesh, face) * mesh.face_area_mag(face) / mesh.delta(face);
        let (own, nei) = (mesh.owner(face), mesh.neighbour(face));
        m.diag_mut()[own] -= c;
        m.diag_mut()[nei] -= c;
        m.upper_mut()[face] += c;
        m.lower_mut()[face] += c;
    }

    for patch in mesh.patches() {
        let rule = rule_for(psi.definition(), patch)?;
        for face in patch.faces() {
            let own = mesh.owner(face);
            let gamma_mag_sf = gamma.face_value(&mesh, face) * mesh.face_area_mag(face);
            match rule {
                BoundaryRule::FixedValue { .. } | BoundaryRule::Calculated => {
                    let c_b = gamma_mag_sf / mesh.boundary_distance(face);
                    m.diag_mut()[own] -= c_b;
                    for c in 0..psi.n_components() {
                        m.source_mut(c)[own] -= c_b * psi.boundary_face_value(c, face);
                    }
                }
                BoundaryRule::FixedGradient { gradient } => {
                    for (c, g) in gradient.iter().enumerate() {
                        m.source_mut(c)[own] -= gamma_mag_sf * g;
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

    fn rod() -> Arc<FvMesh> {
        Arc::new(
            BoxMeshGenerator::new(4, 1, 1, 1.0, 0.1, 0.1)
                .patch("hot", PatchType::Patch, &[BoxSide::XMin])
                .patch("cold", PatchType::Patch, &[BoxSide::XMax])
                .patch(
                    "sides",
                    PatchType::Empty,
                    &[BoxSide::YMin, BoxSide::YMax, BoxSide::ZMin, BoxSide::ZMax],
                )
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_symmetric_coefficients() {
        let mesh = rod();
        let def = BoundaryDefinition::new()
            .with("hot", BoundaryRule::FixedValue { value: vec![1.0] })
            .with("cold", BoundaryRule::FixedValue { value: vec![0.0] })
            .with("sides", BoundaryRule::Empty);
        let t = VolField::initialize(mesh.clone(), "T", def, &[0.0]).unwrap();
        let m = laplacian(&t, SchemeKind::LinearOrthogonal, Diffusivity::Uniform(3.0)).unwrap();

        assert_eq!(m.upper(), m.lower());
        // |Sf| = 0.01, δ = 0.25
        assert!((m.upper()[0] - 3.0 * 0.01 / 0.25).abs() < 1e-14);
        // 边界单元：内部 c + 边界 c_b（距离减半）
        assert!((m.diag()[0] + 0.12 + 0.24).abs() < 1e-12);
        assert!((m.source(0)[0] + 0.24).abs() < 1e-12);
        assert_eq!(m.source(0)[3], 0.0);
    }

    #[test]
    fn test_fixed_gradient_flux() {
        let mesh = rod();
        let def = BoundaryDefinition::new()
            .with("hot", BoundaryRule::FixedGradient { gradient: vec![5.0] })
            .with("cold", BoundaryRule::FixedValue { value: vec![0.0] })
            .with("sides", BoundaryRule::Empty);
        let t = VolField::initialize(mesh.clone(), "T", def, &[0.0]).unwrap();
        let m = laplacian(&t, SchemeKind::LinearOrthogonal, Diffusivity::Uniform(2.0)).unwrap();
        // 对角只含内部面
        assert!((m.diag()[0] + 2.0 * 0.01 / 0.25).abs() < 1e-12);
        assert!((m.source(0)[0] + 2.0 * 0.01 * 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_field_diffusivity_matches_uniform() {
        let mesh = rod();
        let def = BoundaryDefinition::new()
            .with("hot", BoundaryRule::zero_gradient(1))
            .with("cold", BoundaryRule::zero_gradient(1))
            .with("sides", BoundaryRule::Empty);
        let t = VolField::initialize(mesh.clone(), "T", def.clone(), &[0.0]).unwrap();
        let gamma = VolField::initialize(mesh, "DT", def, &[0.7]).unwrap();

        let a = laplacian(&t, SchemeKind::LinearOrthogonal, Diffusivity::Uniform(0.7)).unwrap();
        let b = laplacian(&t, SchemeKind::LinearOrthogonal, Diffusivity::Field(&gamma)).unwrap();
        for (x, y) in a.diag().iter().zip(b.diag()) {
            assert!((x - y).abs() < 1e-14);
        }
    }
}
