//! 공식별 수치와 입력 범위 검증.
use chem_engineering_toolkit::equations::{
    antoine_vapor_pressure, arrhenius_rate_constant, batch_reactor, cstr, darcy_weisbach, lmtd,
    pump_power, reynolds_number, AntoineInput, ArrheniusInput, BatchReactorInput, CstrInput,
    DarcyWeisbachInput, Equation, EquationError, FlowRegime, LmtdInput, ParamValues,
    PumpPowerInput, ReynoldsInput,
};
use proptest::prelude::*;

fn assert_close(actual: f64, expected: f64, rel: f64) {
    let tol = rel * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tol,
        "actual={actual} expected={expected} tol={tol}"
    );
}

#[test]
fn reynolds_water_in_small_pipe_is_turbulent() {
    let res = reynolds_number(&ReynoldsInput {
        density_kg_per_m3: 1000.0,
        velocity_m_per_s: 1.0,
        diameter_m: 0.05,
        viscosity_pa_s: 0.001,
    })
    .expect("reynolds");
    assert_close(res.reynolds, 50_000.0, 1e-12);
    assert_eq!(res.regime, FlowRegime::Turbulent);
}

#[test]
fn flow_regime_boundaries() {
    assert_eq!(FlowRegime::from_reynolds(0.0), FlowRegime::Laminar);
    assert_eq!(FlowRegime::from_reynolds(2299.9), FlowRegime::Laminar);
    assert_eq!(FlowRegime::from_reynolds(2300.0), FlowRegime::Transitional);
    assert_eq!(FlowRegime::from_reynolds(4000.0), FlowRegime::Transitional);
    assert_eq!(FlowRegime::from_reynolds(4000.1), FlowRegime::Turbulent);
}

#[test]
fn reynolds_rejects_zero_viscosity() {
    let err = reynolds_number(&ReynoldsInput {
        density_kg_per_m3: 1000.0,
        velocity_m_per_s: 1.0,
        diameter_m: 0.05,
        viscosity_pa_s: 0.0,
    })
    .unwrap_err();
    assert!(matches!(err, EquationError::OutOfDomain { .. }), "{err}");
}

#[test]
fn darcy_weisbach_pressure_drop_and_head() {
    let res = darcy_weisbach(&DarcyWeisbachInput {
        friction_factor: 0.02,
        length_m: 100.0,
        diameter_m: 0.05,
        density_kg_per_m3: 1000.0,
        velocity_m_per_s: 2.0,
    })
    .expect("darcy");
    assert_close(res.pressure_drop_pa, 80_000.0, 1e-12);
    assert_close(res.head_loss_m, 80_000.0 / (1000.0 * 9.81), 1e-12);
}

#[test]
fn darcy_weisbach_rejects_negative_length() {
    let err = darcy_weisbach(&DarcyWeisbachInput {
        friction_factor: 0.02,
        length_m: -5.0,
        diameter_m: 0.05,
        density_kg_per_m3: 1000.0,
        velocity_m_per_s: 2.0,
    })
    .unwrap_err();
    assert!(matches!(err, EquationError::OutOfDomain { value, .. } if value == -5.0));
}

#[test]
fn pump_power_divides_by_efficiency() {
    let res = pump_power(&PumpPowerInput {
        density_kg_per_m3: 1000.0,
        flow_m3_per_s: 0.01,
        head_m: 10.0,
        efficiency: 0.8,
    })
    .expect("pump");
    assert_close(res.hydraulic_power_w, 981.0, 1e-12);
    assert_close(res.shaft_power_w, 1226.25, 1e-12);
}

#[test]
fn pump_power_efficiency_must_be_in_unit_interval() {
    for eff in [0.0, -0.5, 1.2] {
        let res = pump_power(&PumpPowerInput {
            density_kg_per_m3: 1000.0,
            flow_m3_per_s: 0.01,
            head_m: 10.0,
            efficiency: eff,
        });
        assert!(res.is_err(), "efficiency {eff} accepted");
    }
}

#[test]
fn antoine_water_boils_near_760_mmhg() {
    let res = antoine_vapor_pressure(&AntoineInput {
        a: 8.07131,
        b: 1730.63,
        c: 233.426,
        temperature_c: 100.0,
    })
    .expect("antoine");
    assert!((res.vapor_pressure_mmhg - 760.0).abs() < 1.0, "{}", res.vapor_pressure_mmhg);
    assert_close(res.vapor_pressure_pa, res.vapor_pressure_mmhg * 133.322, 1e-9);
}

#[test]
fn antoine_rejects_pressure_that_overflows_in_pascal() {
    // 1e308 mmHg는 유한하지만 Pa로 바꾸면 무한대
    let err = antoine_vapor_pressure(&AntoineInput {
        a: 308.0,
        b: 0.0,
        c: 0.0,
        temperature_c: 25.0,
    })
    .unwrap_err();
    assert_eq!(
        err,
        EquationError::NonFiniteResult {
            equation: "Antoine equation"
        }
    );
}

#[test]
fn antoine_singular_denominator() {
    let err = antoine_vapor_pressure(&AntoineInput {
        a: 8.0,
        b: 1700.0,
        c: 200.0,
        temperature_c: -200.0,
    })
    .unwrap_err();
    assert!(matches!(err, EquationError::Singular(_)));
}

#[test]
fn reactors_first_order() {
    let batch = batch_reactor(&BatchReactorInput {
        rate_constant_per_s: 0.1,
        time_s: 10.0,
        initial_concentration_mol_per_l: 1.0,
    })
    .expect("batch");
    assert_close(batch.concentration_mol_per_l, (-1.0_f64).exp(), 1e-12);
    assert_close(batch.conversion, 1.0 - (-1.0_f64).exp(), 1e-12);

    let tank = cstr(&CstrInput {
        rate_constant_per_s: 0.1,
        residence_time_s: 10.0,
        feed_concentration_mol_per_l: 2.0,
    })
    .expect("cstr");
    assert_close(tank.concentration_mol_per_l, 1.0, 1e-12);
    assert_close(tank.conversion, 0.5, 1e-12);
}

#[test]
fn cstr_converts_less_than_batch_for_same_kt() {
    let batch = batch_reactor(&BatchReactorInput {
        rate_constant_per_s: 0.2,
        time_s: 5.0,
        initial_concentration_mol_per_l: 1.0,
    })
    .expect("batch");
    let tank = cstr(&CstrInput {
        rate_constant_per_s: 0.2,
        residence_time_s: 5.0,
        feed_concentration_mol_per_l: 1.0,
    })
    .expect("cstr");
    assert!(tank.conversion < batch.conversion);
}

#[test]
fn lmtd_values() {
    let v = lmtd(&LmtdInput {
        delta_t1_k: 30.0,
        delta_t2_k: 10.0,
    })
    .expect("lmtd");
    assert_close(v, 20.0 / 3.0_f64.ln(), 1e-12);

    let equal = lmtd(&LmtdInput {
        delta_t1_k: 15.0,
        delta_t2_k: 15.0,
    })
    .expect("equal deltas");
    assert_close(equal, 15.0, 1e-12);

    assert!(lmtd(&LmtdInput {
        delta_t1_k: 0.0,
        delta_t2_k: 10.0
    })
    .is_err());
}

#[test]
fn arrhenius_grows_with_temperature() {
    let k = |t: f64| {
        arrhenius_rate_constant(&ArrheniusInput {
            pre_exponential: 1e10,
            activation_energy_j_per_mol: 50_000.0,
            temperature_k: t,
        })
        .expect("arrhenius")
    };
    assert_close(k(298.0), 1e10 * (-50_000.0 / (8.314 * 298.0_f64)).exp(), 1e-12);
    assert!(k(350.0) > k(298.0));
}

#[test]
fn every_equation_evaluates_its_defaults() {
    for eq in Equation::ALL {
        let eval = eq.evaluate(&eq.default_values()).expect("defaults are valid");
        assert!(eval.value().is_finite() && eval.value() >= 0.0, "{eq}: {}", eval.value());
        assert_eq!(eval.primary.label, eq.spec().result_label);
    }
}

#[test]
fn missing_parameter_is_reported_by_key() {
    let values: ParamValues = Equation::Reynolds
        .spec()
        .params
        .iter()
        .filter(|p| p.key != "mu")
        .map(|p| (p.key, p.default))
        .collect();
    let err = Equation::Reynolds.evaluate(&values).unwrap_err();
    assert_eq!(
        err,
        EquationError::MissingParameter {
            equation: "Reynolds Number",
            param: "mu".into()
        }
    );
}

#[test]
fn unknown_parameter_is_rejected() {
    let mut values = Equation::Lmtd.default_values();
    values.insert("dT3", 5.0);
    let err = Equation::Lmtd.evaluate(&values).unwrap_err();
    assert!(matches!(err, EquationError::UnknownParameter { ref param, .. } if param == "dT3"));
}

#[test]
fn equation_names_parse() {
    assert_eq!("darcy-weisbach".parse::<Equation>(), Ok(Equation::DarcyWeisbach));
    assert_eq!("Reynolds Number".parse::<Equation>(), Ok(Equation::Reynolds));
    assert_eq!("CSTR".parse::<Equation>(), Ok(Equation::Cstr));
    assert!(matches!(
        "boiler".parse::<Equation>(),
        Err(EquationError::UnknownEquation(_))
    ));
    for eq in Equation::ALL {
        assert_eq!(eq.slug().parse::<Equation>(), Ok(eq));
    }
}

proptest! {
    #[test]
    fn reynolds_is_non_negative(
        rho in 1.0f64..2000.0,
        v in 0.0f64..50.0,
        d in 1e-3f64..2.0,
        mu in 1e-5f64..1.0,
    ) {
        let res = reynolds_number(&ReynoldsInput {
            density_kg_per_m3: rho,
            velocity_m_per_s: v,
            diameter_m: d,
            viscosity_pa_s: mu,
        }).unwrap();
        prop_assert!(res.reynolds.is_finite() && res.reynolds >= 0.0);
        prop_assert_eq!(res.regime, FlowRegime::from_reynolds(res.reynolds));
    }

    #[test]
    fn pressure_drop_is_non_negative(
        f in 1e-3f64..0.1,
        l in 0.1f64..1000.0,
        d in 0.01f64..2.0,
        rho in 1.0f64..2000.0,
        v in 0.0f64..20.0,
    ) {
        let res = darcy_weisbach(&DarcyWeisbachInput {
            friction_factor: f,
            length_m: l,
            diameter_m: d,
            density_kg_per_m3: rho,
            velocity_m_per_s: v,
        }).unwrap();
        prop_assert!(res.pressure_drop_pa >= 0.0);
        prop_assert!(res.head_loss_m >= 0.0);
    }

    #[test]
    fn shaft_power_covers_hydraulic_power(
        rho in 1.0f64..2000.0,
        q in 0.0f64..10.0,
        h in 0.0f64..200.0,
        eff in 0.05f64..=1.0,
    ) {
        let res = pump_power(&PumpPowerInput {
            density_kg_per_m3: rho,
            flow_m3_per_s: q,
            head_m: h,
            efficiency: eff,
        }).unwrap();
        prop_assert!(res.hydraulic_power_w >= 0.0);
        prop_assert!(res.shaft_power_w >= res.hydraulic_power_w);
    }

    #[test]
    fn reactor_conversion_stays_between_zero_and_one(
        k in 0.0f64..10.0,
        t in 0.0f64..1000.0,
        c0 in 0.01f64..10.0,
    ) {
        let batch = batch_reactor(&BatchReactorInput {
            rate_constant_per_s: k,
            time_s: t,
            initial_concentration_mol_per_l: c0,
        }).unwrap();
        prop_assert!((0.0..=1.0).contains(&batch.conversion), "batch X = {}", batch.conversion);
        prop_assert!(batch.concentration_mol_per_l >= 0.0 && batch.concentration_mol_per_l <= c0);

        let mixed = cstr(&CstrInput {
            rate_constant_per_s: k,
            residence_time_s: t,
            feed_concentration_mol_per_l: c0,
        }).unwrap();
        prop_assert!((0.0..=1.0).contains(&mixed.conversion), "CSTR X = {}", mixed.conversion);
        prop_assert!(mixed.concentration_mol_per_l > 0.0 && mixed.concentration_mol_per_l <= c0);
    }

    #[test]
    fn lmtd_lies_between_the_end_differences(dt1 in 0.1f64..200.0, dt2 in 0.1f64..200.0) {
        let value = lmtd(&LmtdInput { delta_t1_k: dt1, delta_t2_k: dt2 }).unwrap();
        let (lo, hi) = (dt1.min(dt2), dt1.max(dt2));
        prop_assert!(value >= lo * (1.0 - 1e-6) && value <= hi * (1.0 + 1e-6), "{value} not in [{lo}, {hi}]");
    }

    #[test]
    fn arrhenius_never_exceeds_frequency_factor(
        a in 1.0f64..1e12,
        ea in 0.0f64..2e5,
        t in 200.0f64..1500.0,
    ) {
        let k = arrhenius_rate_constant(&ArrheniusInput {
            pre_exponential: a,
            activation_energy_j_per_mol: ea,
            temperature_k: t,
        }).unwrap();
        prop_assert!(k > 0.0 && k <= a, "k = {k}, A = {a}");
    }

    #[test]
    fn antoine_pressure_is_positive(
        a in 6.0f64..9.0,
        b in 1000.0f64..2000.0,
        c in 150.0f64..250.0,
        t in 0.0f64..150.0,
    ) {
        let res = antoine_vapor_pressure(&AntoineInput { a, b, c, temperature_c: t }).unwrap();
        prop_assert!(res.vapor_pressure_mmhg > 0.0 && res.vapor_pressure_mmhg.is_finite());
        prop_assert!(res.vapor_pressure_pa > res.vapor_pressure_mmhg);
    }
}
