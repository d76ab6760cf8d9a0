//! 파라메트릭 스터디 테스트.
use chem_engineering_toolkit::equations::{Equation, EquationError};
use chem_engineering_toolkit::sweep::{linspace, run_sweep, SweepError, SweepRequest, DEFAULT_MAX_STEPS};
use proptest::prelude::*;

#[test]
fn sweep_returns_requested_points_with_exact_bounds() {
    let req = SweepRequest::with_defaults(Equation::Reynolds, "v", 0.1, 10.0, 50);
    let sweep = run_sweep(&req, DEFAULT_MAX_STEPS).expect("sweep");
    assert_eq!(sweep.len(), 50);
    assert_eq!(sweep.points()[0].input, 0.1);
    assert_eq!(sweep.points()[49].input, 10.0);
    assert_eq!(sweep.gap_count(), 0);
    // Re는 속도에 비례
    let outputs: Vec<f64> = sweep.points().iter().filter_map(|p| p.output).collect();
    assert!(outputs.windows(2).all(|w| w[1] > w[0]));
    assert_eq!(sweep.title(), "Reynolds Number vs Fluid Velocity");
}

#[test]
fn out_of_domain_samples_become_gaps() {
    let req = SweepRequest::with_defaults(Equation::DarcyWeisbach, "L", -10.0, 10.0, 21);
    let sweep = run_sweep(&req, DEFAULT_MAX_STEPS).expect("sweep");
    assert_eq!(sweep.len(), 21);
    // L <= 0 인 점 (-10 ~ 0) 11개
    assert_eq!(sweep.gap_count(), 11);
    assert_eq!(sweep.plot_points().len(), 10);
    assert!(sweep.points().iter().all(|p| p.output.is_some() == (p.input > 0.0)));
}

#[test]
fn csv_has_header_and_one_row_per_point() {
    let req = SweepRequest::with_defaults(Equation::DarcyWeisbach, "L", 0.0, 10.0, 3);
    let sweep = run_sweep(&req, DEFAULT_MAX_STEPS).expect("sweep");
    let csv = sweep.to_csv();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "Pipe Length (m),Pressure Drop (Pa)");
    assert_eq!(lines[1], "0,");
    assert!(lines[2].starts_with("5,"));
    assert_eq!(sweep.default_file_name(), "darcy-weisbach_parametric_study.csv");
}

#[test]
fn single_step_sweep_uses_start() {
    let req = SweepRequest::with_defaults(Equation::Cstr, "tau", 4.0, 8.0, 1);
    let sweep = run_sweep(&req, DEFAULT_MAX_STEPS).expect("sweep");
    assert_eq!(sweep.len(), 1);
    assert_eq!(sweep.points()[0].input, 4.0);
}

#[test]
fn descending_range_is_allowed() {
    let req = SweepRequest::with_defaults(Equation::Lmtd, "dT1", 50.0, 20.0, 4);
    let sweep = run_sweep(&req, DEFAULT_MAX_STEPS).expect("sweep");
    let xs: Vec<f64> = sweep.points().iter().map(|p| p.input).collect();
    assert_eq!(xs, vec![50.0, 40.0, 30.0, 20.0]);
}

#[test]
fn invalid_requests_are_rejected() {
    let unknown = SweepRequest::with_defaults(Equation::Reynolds, "x", 0.0, 1.0, 10);
    assert!(matches!(
        run_sweep(&unknown, DEFAULT_MAX_STEPS),
        Err(SweepError::UnknownVariable { .. })
    ));

    let zero = SweepRequest::with_defaults(Equation::Reynolds, "v", 0.0, 1.0, 0);
    assert!(matches!(
        run_sweep(&zero, DEFAULT_MAX_STEPS),
        Err(SweepError::InvalidSteps { steps: 0, .. })
    ));

    let too_many = SweepRequest::with_defaults(Equation::Reynolds, "v", 0.0, 1.0, 11);
    assert!(matches!(
        run_sweep(&too_many, 10),
        Err(SweepError::InvalidSteps { steps: 11, max: 10 })
    ));

    let nan = SweepRequest::with_defaults(Equation::Reynolds, "v", f64::NAN, 1.0, 10);
    assert!(matches!(
        run_sweep(&nan, DEFAULT_MAX_STEPS),
        Err(SweepError::NonFiniteBound)
    ));
}

#[test]
fn missing_constant_parameter_is_an_error() {
    let mut req = SweepRequest::with_defaults(Equation::PumpPower, "Q", 0.0, 1.0, 5);
    req.fixed = [("rho", 1000.0), ("H", 10.0)].into_iter().collect();
    match run_sweep(&req, DEFAULT_MAX_STEPS) {
        Err(SweepError::Equation(EquationError::MissingParameter { param, .. })) => {
            assert_eq!(param, "eff")
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn linspace_edges() {
    assert!(linspace(0.0, 1.0, 0).is_empty());
    assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
    assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
}

proptest! {
    #[test]
    fn linspace_is_monotonic_and_sized(start in -1.0e3f64..1.0e3, span in 0.0f64..1.0e3, n in 1usize..300) {
        let end = start + span;
        let xs = linspace(start, end, n);
        prop_assert_eq!(xs.len(), n);
        prop_assert_eq!(xs[0], start);
        if n > 1 {
            prop_assert_eq!(xs[n - 1], end);
        }
        prop_assert!(xs.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn sweep_point_count_matches_steps(steps in 1usize..=DEFAULT_MAX_STEPS) {
        let req = SweepRequest::with_defaults(Equation::Arrhenius, "T", 250.0, 400.0, steps);
        let sweep = run_sweep(&req, DEFAULT_MAX_STEPS).expect("sweep");
        prop_assert_eq!(sweep.len(), steps);
        prop_assert_eq!(sweep.gap_count(), 0);
    }
}
