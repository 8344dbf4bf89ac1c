//! Multi-day stepping behavior across the whole core.

use chrono::NaiveDate;
use walletlab_core::domain::{Asset, LiquidityClass, WalletState};
use walletlab_core::engine::step_wallet_day;
use walletlab_core::fx::ExchangeRateTable;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn asset(id: &str, amount: f64, volatility: f64, class: LiquidityClass) -> Asset {
    Asset {
        id: id.into(),
        name: id.into(),
        amount,
        currency: "USD".into(),
        volatility,
        liquidity_class: class,
        locked_until: None,
        base_value: None,
    }
}

fn starting_state() -> WalletState {
    WalletState {
        balance: 2_500.0,
        assets: vec![
            asset("cash", 1_000.0, 0.0, LiquidityClass::Liquid),
            asset("bond", 5_000.0, 0.02, LiquidityClass::Yield),
            asset("stock", 2_000.0, 0.35, LiquidityClass::Volatile),
            asset("house", 100_000.0, 0.01, LiquidityClass::Illiquid),
        ],
        liabilities: vec![],
        credit_score: 705.0,
        day: 0,
        history: vec![],
    }
}

/// Drive a 30-day run with a fixed per-day seed schedule.
fn run_days(start: WalletState, days: usize, master_seed: u64) -> Vec<WalletState> {
    let rates = ExchangeRateTable::new(date(2026, 1, 1));
    let mut states = vec![start];
    for day in 0..days {
        let prior = states.last().unwrap();
        let today = date(2026, 1, 2) + chrono::Duration::days(day as i64);
        let day_seed = master_seed.wrapping_add(day as u64);
        let next = step_wallet_day(prior, day_seed, today, &rates, "USD").unwrap();
        states.push(next);
    }
    states
}

#[test]
fn thirty_day_run_keeps_invariants() {
    let states = run_days(starting_state(), 30, 42);
    assert_eq!(states.len(), 31);
    for (i, state) in states.iter().enumerate() {
        assert_eq!(state.day, i);
        state.check_invariants().unwrap();
        for asset in &state.assets {
            assert!(asset.amount >= 0.0, "day {i}: {} negative", asset.id);
        }
    }
}

#[test]
fn full_replay_is_identical() {
    let a = run_days(starting_state(), 30, 42);
    let b = run_days(starting_state(), 30, 42);
    assert_eq!(a, b);
}

#[test]
fn different_master_seeds_diverge() {
    let a = run_days(starting_state(), 10, 1);
    let b = run_days(starting_state(), 10, 2);
    assert_ne!(
        a.last().unwrap().assets[2].amount,
        b.last().unwrap().assets[2].amount
    );
}

#[test]
fn history_records_each_prior_day() {
    let states = run_days(starting_state(), 5, 9);
    let last = states.last().unwrap();
    assert_eq!(last.history.len(), 5);
    for (d, snap) in last.history.iter().enumerate() {
        assert_eq!(snap.day, d);
        assert_eq!(snap.balance, states[d].balance);
    }
}

#[test]
fn locked_asset_survives_insolvent_run() {
    let mut start = starting_state();
    start.balance = -500_000.0; // deeper than total unlockable wealth
    start.assets[3].locked_until = Some(date(2026, 12, 31));

    let states = run_days(start, 10, 7);
    for state in &states[1..] {
        let house = state.assets.iter().find(|a| a.id == "house").unwrap();
        assert!(house.amount > 0.0, "locked asset was liquidated");
        assert!(state.balance < 0.0, "insolvency should persist");
    }
}
