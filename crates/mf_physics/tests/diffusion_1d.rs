// crates/mf_physics/tests/diffusion_1d.rs

//! 一维稳态扩散
//! 两端 fixedValue 0 与 100，线性分布是离散方程的精确解

use mf_physics::prelude::*;
use mf_config::LinearSolverKind;
use std::sync::Arc;

fn rod(n: usize) -> Arc<FvMesh> {
    Arc::new(
        BoxMeshGenerator::new(n, 1, 1, 1.0, 0.1, 0.1)
            .patch("left", PatchType::Patch, &[BoxSide::XMin])
            .patch("right", PatchType::Patch, &[BoxSide::XMax])
            .patch(
                "sides",
                PatchType::Empty,
                &[BoxSide::YMin, BoxSide::YMax, BoxSide::ZMin, BoxSide::ZMax],
            )
            .build()
            .unwrap(),
    )
}

fn temperature(mesh: &Arc<FvMesh>) -> VolField {
    let def = BoundaryDefinition::new()
        .with("left", BoundaryRule::FixedValue { value: vec![0.0] })
        .with("right", BoundaryRule::FixedValue { value: vec![100.0] })
        .with("sides", BoundaryRule::Empty);
    VolField::initialize(mesh.clone(), "T", def, &[0.0]).unwrap()
}

fn solve_steady(solver: LinearSolverKind) -> VolField {
    let mesh = rod(10);
    let mut t = temperature(&mesh);
    let eqn = fvm::laplacian(&t, SchemeKind::LinearOrthogonal, Diffusivity::Uniform(1.0))
        .unwrap()
        .negate();
    let controls = SolverControls::new(solver)
        .with_tolerance(1e-12)
        .with_iterations(0, 20_000);
    let perf = eqn.solve(&mut t, &controls).unwrap();
    assert!(perf[0].is_converged());
    let def = t.definition().clone();
    t.set_boundary_values(&def).unwrap();
    t
}

/// 测试线性分布
#[test]
fn test_linear_profile() {
    let t = solve_steady(LinearSolverKind::GaussSeidel);
    for (i, v) in t.cell_values(0).iter().enumerate() {
        let exact = 100.0 * (i as f64 + 0.5) / 10.0;
        assert!((v - exact).abs() < 1e-6, "cell {i}: {v} vs {exact}");
    }
}

/// 测试边界值
#[test]
fn test_boundary_values_after_solve() {
    let t = solve_steady(LinearSolverKind::GaussSeidel);
    let mesh = t.mesh().clone();
    let right = mesh.patch_by_name("right").unwrap();
    assert_eq!(t.boundary_face_value(0, right.start_face), 100.0);
    for face in mesh.patch_by_name("sides").unwrap().faces() {
        assert_eq!(t.boundary_face_value(0, face), t.cell_values(0)[mesh.owner(face)]);
    }
}

/// 测试非均匀扩散系数场
#[test]
fn test_uniform_field_diffusivity() {
    let mesh = rod(10);
    let mut t = temperature(&mesh);
    let gamma_def = BoundaryDefinition::new()
        .with("left", BoundaryRule::zero_gradient(1))
        .with("right", BoundaryRule::zero_gradient(1))
        .with("sides", BoundaryRule::Empty);
    let gamma = VolField::initialize(mesh.clone(), "DT", gamma_def, &[4.0]).unwrap();
    let eqn = fvm::laplacian(&t, SchemeKind::LinearOrthogonal, Diffusivity::Field(&gamma))
        .unwrap()
        .negate();
    let controls = SolverControls::new(LinearSolverKind::GaussSeidel)
        .with_tolerance(1e-12)
        .with_iterations(0, 20_000);
    eqn.solve(&mut t, &controls).unwrap();
    // 常数扩散系数不改变稳态分布
    assert!((t.cell_values(0)[4] - 45.0).abs() < 1e-6);
}

/// 测试瞬态扩散趋于稳态
#[test]
fn test_transient_approaches_steady() {
    let mesh = rod(10);
    let mut t = temperature(&mesh);
    let controls = SolverControls::new(LinearSolverKind::GaussSeidel).with_tolerance(1e-10);
    for _ in 0..200 {
        let eqn = fvm::ddt(&t, SchemeKind::Euler, 0.05)
            .unwrap()
            .subtract(
                &fvm::laplacian(&t, SchemeKind::LinearOrthogonal, Diffusivity::Uniform(1.0))
                    .unwrap(),
            )
            .unwrap();
        eqn.solve(&mut t, &controls).unwrap();
        let def = t.definition().clone();
        t.set_boundary_values(&def).unwrap();
    }
    assert!((t.cell_values(0)[9] - 95.0).abs() < 1e-2);
}
