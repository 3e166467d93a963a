// crates/mf_physics/src/schemes/fvm/mod.rs

//! 隐式离散算子
//!
//! | 算子 | 格式 | 输入 |
//! |------|------|------|
//! | ddt | Euler, steadyState | 时间步长 |
//! | div | upwind | 面通量 |
//! | laplacian | linearOrthogonal | 扩散系数 |
//!
//! 边界面的贡献按未知量的边界规则决定；calculated 与 fixedValue 一样使用当前边界值。

mod ddt;
mod div;
mod laplacian;

pub use ddt::ddt;
pub use div::div;
pub use laplacian::laplacian;

use super::{fvc, input_mismatch, OperatorKind, SchemeInput, SchemeKind};
use crate::fields::VolField;
use crate::matrix::FvMatrix;
use mf_foundation::MfResult;

/// 按算子与格式标签构造线性系统
///
/// 隐式格式（Euler、steadyState、upwind、linearOrthogonal）走 fvm 实现，
/// 显式格式（linear）走 [`fvc`] 实现。
pub fn construct(
    psi: &VolField,
    operator: OperatorKind,
    scheme: SchemeKind,
    input: SchemeInput<'_>,
) -> MfResult<FvMatrix> {
    let implicit = !matches!(scheme, SchemeKind::Linear);
    match (operator, input) {
        (OperatorKind::Ddt, SchemeInput::TimeStep(dt)) => ddt(psi, scheme, dt),
        (OperatorKind::Div, SchemeInput::Flux(phi)) if implicit => div(psi, scheme, phi),
        (OperatorKind::Div, SchemeInput::Field(field)) if !implicit => fvc::div(psi, scheme, field),
        (OperatorKind::Laplacian, SchemeInput::Diffusivity(gamma)) => laplacian(psi, scheme, gamma),
        (OperatorKind::Grad, SchemeInput::Field(field)) => fvc::grad(psi, scheme, field),
        (operator, input) => Err(input_mismatch(operator, &input)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemes::Diffusivity;
    use mf_config::{BoundaryDefinition, BoundaryRule};
    use mf_foundation::MfError;
    use mf_mesh::{BoxMeshGenerator, BoxSide, PatchType};
    use std::sync::Arc;

    fn field() -> VolField {
        let mesh = Arc::new(
            BoxMeshGenerator::new(3, 1, 1, 3.0, 1.0, 1.0)
                .patch("ends", PatchType::Patch, &[BoxSide::XMin, BoxSide::XMax])
                .patch(
                    "sides",
                    PatchType::Empty,
                    &[BoxSide::YMin, BoxSide::YMax, BoxSide::ZMin, BoxSide::ZMax],
                )
                .build()
                .unwrap(),
        );
        let def = BoundaryDefinition::new()
            .with("ends", BoundaryRule::FixedValue { value: vec![1.0] })
            .with("sides", BoundaryRule::Empty);
        VolField::initialize(mesh, "T", def, &[1.0]).unwrap()
    }

    #[test]
    fn test_dispatch() {
        let t = field();
        let m = construct(&t, OperatorKind::Ddt, SchemeKind::Euler, SchemeInput::TimeStep(0.5)).unwrap();
        assert_eq!(m.diag()[0], 2.0);

        let m = construct(
            &t,
            OperatorKind::Laplacian,
            SchemeKind::LinearOrthogonal,
            SchemeInput::Diffusivity(Diffusivity::Uniform(1.0)),
        )
        .unwrap();
        assert!(m.diag()[1] < 0.0);
    }

    #[test]
    fn test_incompatible_scheme() {
        let t = field();
        let r = construct(&t, OperatorKind::Ddt, SchemeKind::Upwind, SchemeInput::TimeStep(0.5));
        assert!(matches!(r, Err(MfError::InvalidConfig { .. })));

        let r = construct(
            &t,
            OperatorKind::Laplacian,
            SchemeKind::Euler,
            SchemeInput::Diffusivity(Diffusivity::Uniform(1.0)),
        );
        assert!(r.unwrap_err().is_configuration());
    }

    #[test]
    fn test_input_mismatch() {
        let t = field();
        let r = construct(&t, OperatorKind::Grad, SchemeKind::Linear, SchemeInput::TimeStep(0.1));
        assert!(matches!(r, Err(MfError::Config { .. })));
    }
}
