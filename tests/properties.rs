use proptest::prelude::*;

use pv_forecast::sim::{CurveSimulator, ModelVariant, PanelConfig};

fn variant() -> impl Strategy<Value = ModelVariant> {
    prop_oneof![
        Just(ModelVariant::Physics),
        Just(ModelVariant::MlStatistical),
        Just(ModelVariant::DeepLearning),
    ]
}

prop_compose! {
    fn panel()(
        latitude in -90.0f64..=90.0,
        longitude in -180.0f64..=180.0,
        capacity_kw in 0.0f64..500.0,
        tilt_deg in 0.0f64..=90.0,
        azimuth_deg in 0.0f64..360.0,
        model in variant(),
    ) -> PanelConfig {
        PanelConfig { latitude, longitude, capacity_kw, tilt_deg, azimuth_deg, model }
    }
}

proptest! {
    #[test]
    fn valid_configs_always_simulate(cfg in panel(), seed in any::<u64>()) {
        let forecast = CurveSimulator.simulate_seeded(&cfg, seed).expect("valid config");
        prop_assert_eq!(forecast.len(), 24);
        for (i, p) in forecast.iter().enumerate() {
            prop_assert_eq!(usize::from(p.hour), i);
            prop_assert!(p.power_kw >= 0.0);
            prop_assert!(p.power_kw.is_finite());
            // Peak factor 1.02 plus the widest perturbation (cap/30).
            prop_assert!(p.power_kw <= cfg.capacity_kw * (1.02 + 1.0 / 30.0) + 0.01);
            let scaled = p.power_kw * 100.0;
            prop_assert!((scaled - scaled.round()).abs() < 1e-6);
        }
    }

    #[test]
    fn same_seed_same_forecast(cfg in panel(), seed in any::<u64>()) {
        let a = CurveSimulator.simulate_seeded(&cfg, seed).expect("valid");
        let b = CurveSimulator.simulate_seeded(&cfg, seed).expect("valid");
        prop_assert_eq!(a, b);
    }

    #[test]
    fn negative_capacity_never_simulates(cfg in panel(), capacity in -1e6f64..-1e-9) {
        let cfg = PanelConfig { capacity_kw: capacity, ..cfg };
        prop_assert!(CurveSimulator.simulate_seeded(&cfg, 0).is_err());
    }
}
