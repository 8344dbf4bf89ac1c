//! End-to-end risk scenarios over synthetic ensembles.

use walletlab_core::domain::{Trajectory, WalletSnapshot, WalletState};
use walletlab_risk::{analyze_ensemble, compute_risk_packet, AnalysisConfig, RiskLevel};

fn trajectory_from_balances(balances: &[f64]) -> Trajectory {
    let mut history: Vec<WalletSnapshot> = vec![];
    let days = balances
        .iter()
        .enumerate()
        .map(|(day, &balance)| {
            let state = WalletState {
                balance,
                assets: vec![],
                liabilities: vec![],
                credit_score: 690.0,
                day,
                history: history.clone(),
            };
            history.push(state.snapshot());
            state
        })
        .collect();
    Trajectory::new(days)
}

/// A steady 60-day path that never dips.
fn healthy_path() -> Vec<f64> {
    (0..60).map(|d| 1_000.0 + d as f64 * 5.0).collect()
}

/// A 60-day path that dips negative around day 20 and recovers by day 30.
fn dip_and_recover_path() -> Vec<f64> {
    (0..60)
        .map(|d| match d {
            20..=24 => -50.0 - d as f64,
            25..=29 => -10.0,
            _ => 500.0 + d as f64,
        })
        .collect()
}

#[test]
fn five_percent_dip_ensemble_is_low_risk() {
    // 95 healthy members, 5 that dip mid-run and recover by day 30.
    let mut ensemble: Vec<Trajectory> =
        (0..95).map(|_| trajectory_from_balances(&healthy_path())).collect();
    ensemble.extend((0..5).map(|_| trajectory_from_balances(&dip_and_recover_path())));

    let packet = compute_risk_packet(&ensemble, 0.05).unwrap();
    assert_eq!(packet.collapse_probability, 0.05);
    assert_eq!(packet.recovery_rate, 1.0);
    assert_eq!(packet.risk_level, RiskLevel::Low);
    assert_eq!(packet.average_collapse_day, 20);
    assert!(packet.average_recovery_slope > 0);
}

#[test]
fn all_collapsed_ensemble_is_critical() {
    let ensemble: Vec<Trajectory> = (0..10)
        .map(|_| trajectory_from_balances(&[100.0, -50.0, -60.0]))
        .collect();
    let packet = compute_risk_packet(&ensemble, 0.05).unwrap();
    assert_eq!(packet.collapse_probability, 1.0);
    assert_eq!(packet.recovery_rate, 0.0);
    assert_eq!(packet.risk_level, RiskLevel::Critical);
}

#[test]
fn var_reflects_the_weak_tail() {
    // 90 members end at 1000, 10 end at 10; p=0.05 lands inside the weak tail.
    let mut ensemble: Vec<Trajectory> = (0..10)
        .map(|_| trajectory_from_balances(&[500.0, 10.0]))
        .collect();
    ensemble.extend((0..90).map(|_| trajectory_from_balances(&[500.0, 1_000.0])));

    let packet = compute_risk_packet(&ensemble, 0.05).unwrap();
    assert_eq!(packet.value_at_risk, 10.0);
    assert_eq!(packet.conditional_value_at_risk, 10.0);
}

#[test]
fn full_report_over_mixed_ensemble() {
    let mut ensemble: Vec<Trajectory> =
        (0..80).map(|_| trajectory_from_balances(&healthy_path())).collect();
    ensemble.extend((0..20).map(|_| trajectory_from_balances(&dip_and_recover_path())));

    let rates = walletlab_core::fx::ExchangeRateTable::new(
        chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
    );
    let report = analyze_ensemble(&ensemble, &rates, &AnalysisConfig::default()).unwrap();

    assert_eq!(report.ensemble_size, 100);
    assert_eq!(report.day_count, 60);
    assert_eq!(report.risk.collapse_probability, 0.2);
    assert_eq!(report.risk.risk_level, RiskLevel::Moderate);
    // Healthy members dominate the upper percentiles.
    assert!(report.balances.percentile_high > report.balances.percentile_low);
    assert_eq!(report.credit.mean_score, 690.0);
}
