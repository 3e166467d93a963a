// crates/mf_physics/tests/scalar_transport.rs

//! 从配置文件驱动的标量扩散，输出写到临时目录

use mf_config::CaseWatcher;
use mf_physics::fields::PatchValue;
use mf_physics::prelude::*;
use mf_physics::{FieldSnapshot, JsonDirWriter};
use std::sync::Arc;

const CASE: &str = r#"{
    "fields": {
        "T": {
            "internal": [0.0],
            "boundary": {
                "left": {"type": "fixedValue", "value": [1.0]},
                "right": {"type": "fixedGradient", "gradient": [0.0]},
                "sides": {"type": "empty"}
            }
        }
    },
    "transport": {"diffusivity": 0.05},
    "time": {"end_time": 0.4, "delta_t": 0.1, "write_interval": 0.2},
    "solution": {
        "solvers": {
            "T": {"solver": "PointJacobi", "tolerance": 1e-10}
        }
    }
}"#;

fn rod() -> Arc<FvMesh> {
    Arc::new(
        BoxMeshGenerator::new(8, 1, 1, 1.0, 0.1, 0.1)
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

/// 测试运行并按时间目录写出 JSON
#[test]
fn test_run_from_case_file() {
    let dir = tempfile::tempdir().unwrap();
    let case_path = dir.path().join("case.json");
    std::fs::write(&case_path, CASE).unwrap();
    let output = dir.path().join("output");

    let mut watcher = CaseWatcher::open(&case_path).unwrap();
    let mut solver = ScalarTransportSolver::new(rod(), &watcher.current()).unwrap();
    let mut writer = JsonDirWriter::new(&output);
    let summary = run(&mut solver, &mut watcher, &mut writer).unwrap();

    assert_eq!(summary.steps, 4);
    assert_eq!(summary.writes, 3);
    for report in &summary.reports {
        assert!(report.last_solve("T").unwrap().is_converged());
    }

    let t_file = writer.time_dir(summary.final_time).join("T.json");
    let snapshot: FieldSnapshot =
        serde_json::from_str(&std::fs::read_to_string(t_file).unwrap()).unwrap();
    assert_eq!(snapshot.n_components, 1);
    assert_eq!(snapshot.internal[0].len(), 8);
    assert!(matches!(snapshot.patch("left"), Some(PatchValue::FixedValue { .. })));
    assert!(matches!(snapshot.patch("sides"), Some(PatchValue::Empty)));

    // 热量从左端进入
    let t = &snapshot.internal[0];
    assert!(t[0] > t[3] && t[3] > t[7]);
    assert!(t.iter().all(|&v| v > 0.0 && v < 1.0));

    assert!(writer.time_dir(summary.final_time).join("grad(T).json").exists());

    // 起始时刻写出初始场
    let initial: FieldSnapshot = serde_json::from_str(
        &std::fs::read_to_string(writer.time_dir(0.0).join("T.json")).unwrap(),
    )
    .unwrap();
    assert!(initial.internal[0].iter().all(|&v| v == 0.0));
    assert!(writer.time_dir(0.2).join("T.json").exists());
}

/// 测试缺少扩散系数时拒绝创建
#[test]
fn test_missing_diffusivity() {
    let case = CaseConfig::from_json_str(&CASE.replace(r#""transport": {"diffusivity": 0.05},"#, ""))
        .unwrap();
    let err = ScalarTransportSolver::new(rod(), &case).unwrap_err();
    assert!(err.is_configuration());
}
