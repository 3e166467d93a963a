// crates/mf_physics/src/schemes/fvm/ddt.rs

//! 时间导数

use crate::fields::VolField;
use crate::matrix::FvMatrix;
use crate::schemes::{check_scheme, OperatorKind, SchemeKind};
use mf_foundation::{MfError, MfResult};
use std::sync::Arc;

/// 隐式时间导数
///
/// - Euler: `diag = V/Δt`，`source = V·ψ_old/Δt`（`ψ_old` 取构造时的单元值）
/// - steadyState: 全零
pub fn ddt(psi: &VolField, scheme: SchemeKind, delta_t: f64) -> MfResult<FvMatrix> {
    check_scheme(OperatorKind::Ddt, scheme, true)?;
    let mut m = FvMatrix::zeros(psi);
    if scheme == SchemeKind::SteadyState {
        return Ok(m);
    }
    if !(delta_t > 0.0) {
        return Err(MfError::invalid_config("time.delta_t", delta_t.to_string(), "时间步长必须为正"));
    }

    let mesh = Arc::clone(psi.mesh());
    for (i, d) in m.diag_mut().iter_mut().enumerate() {
        *d = mesh.cell_volume(i) / delta_t;
    }
    for (c, source) in m.sources_mut().iter_mut().enumerate() {
        let old = psi.cell_values(c);
        for (i, s) in source.iter_mut().enumerate() {
            *s = mesh.cell_volume(i) * old[i] / delta_t;
        }
    }
    Ok(m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mf_config::{BoundaryDefinition, BoundaryRule};
    use mf_mesh::{BoxMeshGenerator, BoxSide, PatchType};

    fn velocity() -> VolField {
        let mesh = Arc::new(
            BoxMeshGenerator::new(2, 2, 1, 1.0, 1.0, 0.5)
                .patch("walls", PatchType::Wall, &[BoxSide::XMin, BoxSide::XMax, BoxSide::YMin, BoxSide::YMax])
                .patch("frontAndBack", PatchType::Empty, &[BoxSide::ZMin, BoxSide::ZMax])
                .build()
                .unwrap(),
        );
        let def = BoundaryDefinition::new()
            .with("walls", BoundaryRule::FixedValue { value: vec![0.0; 3] })
            .with("frontAndBack", BoundaryRule::Empty);
        VolField::initialize(mesh, "U", def, &[1.0, 2.0, 0.0]).unwrap()
    }

    #[test]
    fn test_euler() {
        let u = velocity();
        let m = ddt(&u, SchemeKind::Euler, 0.1).unwrap();
        let v = u.mesh().cell_volume(0);
        assert!((m.diag()[0] - v / 0.1).abs() < 1e-12);
        assert!((m.source(1)[3] - 2.0 * v / 0.1).abs() < 1e-12);
        assert!(m.is_diagonal());
    }

    #[test]
    fn test_steady_state_is_zero() {
        let u = velocity();
        let m = ddt(&u, SchemeKind::SteadyState, 0.1).unwrap();
        assert!(m.diag().iter().all(|&d| d == 0.0));
        assert!((0..3).all(|c| m.source(c).iter().all(|&s| s == 0.0)));
    }

    #[test]
    fn test_bad_time_step() {
        let u = velocity();
        assert!(ddt(&u, SchemeKind::Euler, 0.0).is_err());
        assert!(ddt(&u, SchemeKind::Upwind, 0.1).is_err());
    }
}
