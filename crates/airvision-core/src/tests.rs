use crate::advisory::{classify, color_for, ADVISORY_LADDER};
use crate::config::{AirVisionConfig, DEFAULT_BASELINE_AQI};
use crate::forecast::{calibrate, calibrated_forecast, labelled};
use crate::models::{ClassifierExport, ForecastExport, ImportanceSource, ModelContext};
use crate::policy::{baseline_or_default, effectiveness, simulate, PolicyLevers};
use crate::pollutant::{Pollutant, PollutantWeights};
use crate::sources::{attribute, SourceBucket, SourceShares};
use crate::ModelError;
use rand::Rng;
use std::path::{Path, PathBuf};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn weights(pm25: f64, pm10: f64, no2: f64, so2: f64, co: f64, o3: f64) -> PollutantWeights {
    PollutantWeights::new([pm25, pm10, no2, so2, co, o3])
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("airvision-core-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn classify_boundaries_belong_to_lower_tier() {
    assert_eq!(classify(50.0).status, "Good");
    assert_eq!(classify(50.5).status, "Satisfactory");
    assert_eq!(classify(100.0).status, "Satisfactory");
    assert_eq!(classify(200.0).status, "Moderate");
    assert_eq!(classify(300.0).status, "Poor");
    assert_eq!(classify(400.0).status, "Very Poor");
    assert_eq!(classify(400.01).status, "Severe");
}

#[test]
fn classify_is_total() {
    assert_eq!(classify(-25.0).status, "Good");
    assert_eq!(classify(0.0).status, "Good");
    assert_eq!(classify(999.0).status, "Severe");
    assert_eq!(classify(f64::INFINITY).status, "Severe");
    assert_eq!(classify(f64::NAN).status, "Severe");

    let mut rng = rand::thread_rng();
    for _ in 0..500 {
        let aqi = rng.gen_range(-100.0..1000.0);
        let tier = classify(aqi);
        assert_eq!(tier, classify(aqi));
        if aqi <= 50.0 {
            assert_eq!(tier.status, "Good");
        }
        if aqi > 400.0 {
            assert_eq!(tier.status, "Severe");
        }
    }
}

#[test]
fn tiers_carry_guidance_and_ordinals() {
    let poor = classify(250.0);
    assert_eq!(poor.mask_guidance, "N95 mask essential");
    assert_eq!(poor.label(), "Poor 😷");
    assert_eq!(poor.ordinal(), 3);
    assert_eq!(classify(10.0).ordinal(), 0);
    assert_eq!(classify(450.0).ordinal(), ADVISORY_LADDER.len());
    assert_eq!(color_for(75.0), "#e3c84e");
    assert_eq!(color_for(401.0), "#ff0000");
}

#[test]
fn calibrate_shifts_to_live_reading() {
    assert_eq!(calibrate(&[100.0, 110.0, 120.0], Some(130.0)), vec![130.0, 140.0, 150.0]);
    assert_eq!(calibrate(&[200.0, 180.0], Some(150.0)), vec![150.0, 130.0]);
}

#[test]
fn calibrate_passes_through_without_anchor() {
    assert!(calibrate(&[], Some(130.0)).is_empty());
    assert_eq!(calibrate(&[90.0, 95.0], None), vec![90.0, 95.0]);
}

#[test]
fn calibrate_preserves_deltas() {
    let mut rng = rand::thread_rng();
    for _ in 0..100 {
        let raw: Vec<f64> = (0..rng.gen_range(1..8)).map(|_| rng.gen_range(0.0..500.0)).collect();
        let live = rng.gen_range(0.0..500.0);
        let out = calibrate(&raw, Some(live));
        assert_eq!(out.len(), raw.len());
        assert!(close(out[0], live));
        for i in 1..raw.len() {
            assert!((out[i] - out[i - 1] - (raw[i] - raw[i - 1])).abs() < 1e-6);
        }
    }
}

#[test]
fn calibrated_forecast_uses_forecaster_horizon() {
    let model = ForecastExport {
        forecast: vec![180.0, 190.0, 210.0, 230.0],
    };
    assert_eq!(calibrated_forecast(&model, Some(160.0), 3), vec![160.0, 170.0, 190.0]);
    assert_eq!(calibrated_forecast(&model, None, 2), vec![180.0, 190.0]);
    assert!(calibrated_forecast(&ForecastExport::default(), Some(100.0), 3).is_empty());
}

#[test]
fn labelled_forecast_names_days() {
    let days = labelled(&[45.0, 150.0, 320.0, 420.0]);
    assert_eq!(days[0].label, "Tomorrow");
    assert_eq!(days[1].label, "Day After");
    assert_eq!(days[2].label, "In 3 Days");
    assert_eq!(days[3].label, "Day 4");
    assert_eq!(days[1].tier.status, "Moderate");
    assert_eq!(days[3].tier.status, "Severe");
}

#[test]
fn attribute_splits_into_buckets() {
    let shares = attribute(&weights(10.0, 10.0, 5.0, 5.0, 5.0, 5.0));
    assert!(close(shares.get(SourceBucket::Traffic), 25.0));
    assert!(close(shares.get(SourceBucket::DustStubble), 50.0));
    assert!(close(shares.get(SourceBucket::Industry), 12.5));
    assert!(close(shares.get(SourceBucket::Photochemical), 12.5));
    assert!(close(shares.total(), 100.0));
}

#[test]
fn attribute_all_zero_is_degenerate_not_fatal() {
    let shares = attribute(&PollutantWeights::default());
    for (_, pct) in shares.iter() {
        assert_eq!(pct, 0.0);
    }
}

#[test]
fn attribute_sums_to_hundred_and_ignores_build_order() {
    let mut rng = rand::thread_rng();
    for _ in 0..100 {
        let scores: Vec<f64> = (0..6).map(|_| rng.gen_range(0.0..1.0)).collect();
        let forward = PollutantWeights::from_named(
            Pollutant::ALL.iter().map(|p| p.feature_name()).zip(scores.iter().copied()),
        );
        let backward = PollutantWeights::from_named(
            Pollutant::ALL
                .iter()
                .rev()
                .map(|p| p.feature_name())
                .zip(scores.iter().rev().copied()),
        );
        let a = attribute(&forward);
        let b = attribute(&backward);
        assert_eq!(a, b);
        assert!((a.total() - 100.0).abs() < 1e-9);
        assert!(a.iter().all(|(_, pct)| pct >= 0.0));
    }
}

#[test]
fn pollutant_percentages_follow_importances() {
    let shares: Vec<_> = weights(10.0, 10.0, 5.0, 5.0, 5.0, 15.0).percentages().collect();
    assert_eq!(shares[0], (Pollutant::Pm25, 20.0));
    assert_eq!(shares[5], (Pollutant::O3, 30.0));
    assert!(close(shares.iter().map(|(_, pct)| pct).sum::<f64>(), 100.0));

    assert!(PollutantWeights::default().percentages().all(|(_, pct)| pct == 0.0));
    assert!(PollutantWeights::uniform()
        .percentages()
        .all(|(_, pct)| close(pct, 100.0 / 6.0)));
}

#[test]
fn bucket_order_is_display_order() {
    let order: Vec<_> = attribute(&PollutantWeights::uniform()).iter().map(|(b, _)| b).collect();
    assert_eq!(order, SourceBucket::ALL.to_vec());
    assert_eq!(SourceBucket::DustStubble.label(), "Dust & Stubble (PM2.5 + PM10)");
}

#[test]
fn simulate_with_idle_levers_keeps_baseline() {
    let shares = attribute(&weights(0.3, 0.2, 0.1, 0.05, 0.25, 0.1));
    let outcome = simulate(&shares, &PolicyLevers::uniform(0.0), 287.0);
    assert_eq!(outcome.projected_index, 287.0);
    assert_eq!(outcome.effectiveness, 0.0);
    assert_eq!(outcome.tier.status, "Poor");
}

#[test]
fn simulate_caps_at_sixty_percent() {
    let shares = attribute(&weights(10.0, 10.0, 5.0, 5.0, 5.0, 5.0));
    let outcome = simulate(&shares, &PolicyLevers::uniform(60.0), 300.0);
    assert_eq!(outcome.projected_index, 120.0);
    assert_eq!(outcome.projected_index, 0.4 * 300.0);
    assert_eq!(outcome.tier.status, "Moderate");

    // Out-of-range sliders are clamped to the same ceiling.
    let clamped = simulate(&shares, &PolicyLevers::new(95.0, 80.0, 61.0, 1000.0), 300.0);
    assert_eq!(clamped.projected_index, outcome.projected_index);
}

#[test]
fn simulate_clamps_levers_that_bypass_the_constructor() {
    let shares = SourceShares::new([25.0, 50.0, 12.5, 12.5]);
    let wild = PolicyLevers {
        traffic: 100.0,
        dust_stubble: 100.0,
        industry: 100.0,
        photochemical: 100.0,
    };
    let outcome = simulate(&shares, &wild, 300.0);
    assert_eq!(outcome.projected_index, 120.0);
    assert_eq!(effectiveness(&shares, &wild), 0.6);

    let negative = PolicyLevers {
        traffic: -50.0,
        dust_stubble: f64::NAN,
        industry: 0.0,
        photochemical: 0.0,
    };
    assert_eq!(simulate(&shares, &negative, 300.0).projected_index, 300.0);

    // Deserialized levers skip `new` too.
    let parsed: PolicyLevers =
        serde_json::from_str(r#"{ "traffic": 500.0, "dust_stubble": 500.0, "industry": 500.0, "photochemical": 500.0 }"#)
            .unwrap();
    assert_eq!(parsed.traffic, 500.0);
    assert_eq!(simulate(&shares, &parsed, 300.0).projected_index, 120.0);
}

#[test]
fn simulate_weights_levers_by_share() {
    let shares = SourceShares::new([25.0, 50.0, 12.5, 12.5]);
    let levers = PolicyLevers::default();
    // 0.25*0.20 + 0.50*0.15 + 0.125*0.10 + 0.125*0.05
    let expected = 0.05 + 0.075 + 0.0125 + 0.00625;
    assert!(close(effectiveness(&shares, &levers), expected));
    let outcome = simulate(&shares, &levers, 200.0);
    assert!(close(outcome.projected_index, 200.0 * (1.0 - expected)));
    assert!(close(outcome.reduction(), 200.0 * expected));
}

#[test]
fn simulate_stays_within_bounds() {
    let mut rng = rand::thread_rng();
    for _ in 0..200 {
        let shares = attribute(&PollutantWeights::new([(); 6].map(|_| rng.gen_range(0.0..1.0))));
        let levers = PolicyLevers::new(
            rng.gen_range(0.0..60.0),
            rng.gen_range(0.0..60.0),
            rng.gen_range(0.0..60.0),
            rng.gen_range(0.0..60.0),
        );
        let baseline = rng.gen_range(0.0..500.0);
        let projected = simulate(&shares, &levers, baseline).projected_index;
        assert!(projected <= baseline + 1e-9);
        assert!(projected >= 0.4 * baseline - 1e-9);
    }
}

#[test]
fn baseline_falls_back_to_configured_default() {
    let mut config = AirVisionConfig::default();
    assert_eq!(baseline_or_default(None, &config), DEFAULT_BASELINE_AQI);
    assert_eq!(baseline_or_default(Some(312.0), &config), 312.0);
    config.default_baseline = 150.0;
    assert_eq!(baseline_or_default(None, &config), 150.0);
}

#[test]
fn config_fills_missing_fields_with_defaults() {
    let raw = r#"{ "default_baseline": 180.0, "levers": { "traffic": 40.0 } }"#;
    let config = AirVisionConfig::from_json_str(raw, Path::new("inline.json")).unwrap();
    assert_eq!(config.default_baseline, 180.0);
    assert_eq!(config.forecast_steps, 3);
    assert_eq!(config.ncr_cities.len(), 5);
    assert_eq!(config.levers.traffic, 40.0);
    assert_eq!(config.levers.dust_stubble, 15.0);
}

#[test]
fn config_rejects_negative_baseline() {
    let raw = r#"{ "default_baseline": -1.0 }"#;
    assert!(AirVisionConfig::from_json_str(raw, Path::new("inline.json")).is_err());
}

#[test]
fn classifier_without_importances_falls_back_to_uniform() {
    let ctx = ModelContext::new(
        Box::new(ClassifierExport::default()),
        Box::new(ForecastExport::default()),
    );
    let shares = attribute(&ctx.pollutant_weights());
    assert!(close(shares.get(SourceBucket::Traffic), 100.0 / 3.0));
    assert!(close(shares.get(SourceBucket::Industry), 100.0 / 6.0));
}

#[test]
fn classifier_export_maps_feature_names() {
    let export = ClassifierExport {
        feature_names: vec!["O3".into(), "pm2.5".into(), "Temp".into()],
        feature_importances: Some(vec![0.4, 0.5, 0.1]),
    };
    let w = export.feature_importances().unwrap();
    assert_eq!(w.get(Pollutant::O3), 0.4);
    assert_eq!(w.get(Pollutant::Pm25), 0.5);
    assert_eq!(w.get(Pollutant::No2), 0.0);
}

#[test]
fn model_context_loads_json_exports() {
    let dir = scratch_dir("load");
    std::fs::write(
        dir.join("aqi_model.json"),
        r#"{"feature_names":["PM2.5","PM10","NO2","SO2","CO","O3"],
            "feature_importances":[0.3,0.2,0.15,0.05,0.2,0.1]}"#,
    )
    .unwrap();
    std::fs::write(dir.join("aqi_forecast.json"), r#"{"forecast":[210.0,220.0,205.0]}"#).unwrap();

    let ctx = ModelContext::load(&dir).unwrap();
    let shares = attribute(&ctx.pollutant_weights());
    assert!(close(shares.get(SourceBucket::Traffic), 35.0));
    assert!(close(shares.get(SourceBucket::DustStubble), 50.0));
    assert_eq!(ctx.forecaster().forecast(3), vec![210.0, 220.0, 205.0]);
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn model_context_reports_missing_and_misshapen_artifacts() {
    let dir = scratch_dir("missing");
    assert!(matches!(ModelContext::load(&dir), Err(ModelError::Missing(_))));

    std::fs::write(
        dir.join("aqi_model.json"),
        r#"{"feature_names":["PM2.5","PM10"],"feature_importances":[0.3]}"#,
    )
    .unwrap();
    assert!(matches!(
        ModelContext::load(&dir),
        Err(ModelError::ShapeMismatch { names: 2, scores: 1 })
    ));
    std::fs::remove_dir_all(&dir).ok();
}
