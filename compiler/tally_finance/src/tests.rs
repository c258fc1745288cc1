#![allow(clippy::unwrap_used)]

use super::*;
use proptest::prelude::*;

fn close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

mod time_value {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn npv_discounts_every_flow() {
        let flows = [-1000.0, 300.0, 300.0, 300.0, 300.0];
        close(npv(0.08, &flows).unwrap(), -5.890, 1e-3);
        close(npv(0.0, &flows).unwrap(), 200.0, 1e-12);
        assert_eq!(npv(0.1, &[]).unwrap(), 0.0);
    }

    #[test]
    fn npv_rejects_rate_at_minus_one() {
        assert_eq!(
            npv(-1.0, &[1.0]),
            Err(FinanceError::InvalidRate { rate: -1.0 })
        );
    }

    #[test]
    fn irr_finds_the_zero() {
        let flows = [-1000.0, 300.0, 300.0, 300.0, 300.0];
        let rate = irr(&flows).unwrap();
        close(rate, 0.0771, 1e-4);
        close(npv(rate, &flows).unwrap(), 0.0, 1e-6);
    }

    #[test]
    fn irr_of_empty_series() {
        assert_eq!(irr(&[]), Err(FinanceError::EmptySeries { what: "IRR" }));
    }

    #[test]
    fn irr_with_flat_curve_keeps_guess() {
        // All-zero flows have zero slope everywhere.
        assert_eq!(irr(&[0.0, 0.0]).unwrap(), 0.10);
    }

    #[test]
    fn present_and_future_value() {
        close(pv(0.05, 10.0, 100.0, 0.0).unwrap(), 772.173, 1e-3);
        close(pv(0.05, 10.0, 0.0, 1000.0).unwrap(), 613.913, 1e-3);
        close(fv(0.05, 10.0, 0.0, 1000.0).unwrap(), 1628.895, 1e-3);
        close(fv(0.05, 10.0, 100.0, 0.0).unwrap(), 1257.789, 1e-3);
    }

    #[test]
    fn zero_rate_is_plain_sum() {
        assert_eq!(pv(0.0, 4.0, 25.0, 100.0).unwrap(), 200.0);
        assert_eq!(fv(0.0, 4.0, 25.0, 100.0).unwrap(), 200.0);
    }
}

#[test]
fn wacc_and_capm() {
    close(wacc(0.6, 0.4, 0.10, 0.05, 0.25), 0.075, 1e-12);
    close(capm(0.03, 1.2, 0.08), 0.09, 1e-12);
    close(capm(0.03, 0.0, 0.08), 0.03, 1e-12);
}

mod risk_measures {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn z_scores() {
        assert_eq!(z_score(0.95), 1.65);
        assert_eq!(z_score(0.99), 2.33);
        assert_eq!(z_score(0.9), 1.0);
    }

    #[test]
    fn var_of_series() {
        // mean 0.01, population sigma 0.02
        let series = [0.03, -0.01, 0.03, -0.01];
        close(value_at_risk(&series, 0.95).unwrap(), 1.65 * 0.02 - 0.01, 1e-12);
    }

    #[test]
    fn var_of_empty_series() {
        assert!(value_at_risk(&[], 0.95).is_err());
    }

    #[test]
    fn weighted_var_matches_plain_var_for_equal_weights() {
        let returns = [0.02, 0.04, -0.01, 0.03];
        let weights = [0.25; 4];
        close(
            weighted_value_at_risk(&returns, &weights, 0.99).unwrap(),
            value_at_risk(&returns, 0.99).unwrap(),
            1e-12,
        );
    }

    #[test]
    fn weighted_var_checks_lengths() {
        assert_eq!(
            weighted_value_at_risk(&[0.1], &[0.5, 0.5], 0.95),
            Err(FinanceError::LengthMismatch {
                values: 1,
                weights: 2
            })
        );
    }
}

mod moving_averages {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sma_window_count() {
        assert_eq!(sma(&[1.0, 2.0, 3.0, 4.0], 2).unwrap(), vec![1.5, 2.5, 3.5]);
        assert_eq!(sma(&[1.0, 2.0], 3).unwrap(), Vec::<f64>::new());
        assert_eq!(
            sma(&[1.0], 0),
            Err(FinanceError::InvalidPeriod { period: 0 })
        );
    }

    #[test]
    fn ema_seeded_with_first_value() {
        // alpha = 0.5 for period 3
        assert_eq!(ema(&[2.0, 4.0, 8.0], 3).unwrap(), vec![2.0, 3.0, 5.5]);
        assert_eq!(ema(&[], 3).unwrap(), Vec::<f64>::new());
    }

    #[test]
    fn rolling_mean_expands_then_slides() {
        assert_eq!(
            rolling_mean(&[2.0, 4.0, 6.0, 8.0], 2).unwrap(),
            vec![2.0, 3.0, 5.0, 7.0]
        );
        assert_eq!(
            rolling_mean(&[3.0, 6.0, 9.0], 10).unwrap(),
            vec![3.0, 4.5, 6.0]
        );
    }

    #[test]
    fn zip_with_truncates() {
        assert_eq!(zip_with(&[1.0, 2.0, 3.0], &[10.0, 20.0], |a, b| a + b), vec![11.0, 22.0]);
    }
}

mod schedules {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn level_payment() {
        close(amortization::payment(100_000.0, 0.005, 360), 599.55, 1e-2);
        assert_eq!(amortization::payment(1200.0, 0.0, 12), 100.0);
    }

    #[test]
    fn schedule_rows() {
        let rows = amortize(1000.0, 0.01, 12).unwrap();
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0].period, 1);
        close(rows[0].interest, 10.0, 1e-12);
        close(rows[0].principal, rows[0].payment - 10.0, 1e-12);
        assert_eq!(AmortizationRow::COLUMNS[4], "balance");
        assert_eq!(rows[0].values()[0], 1.0);
    }

    #[test]
    fn zero_periods_rejected() {
        assert_eq!(
            amortize(1000.0, 0.01, 0),
            Err(FinanceError::InvalidPeriod { period: 0 })
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            FinanceError::InvalidPeriod { period: 0 }.to_string(),
            "period must be at least 1, got 0"
        );
        assert_eq!(
            FinanceError::EmptySeries { what: "IRR" }.to_string(),
            "IRR needs at least one value"
        );
    }
}

proptest! {
    #[test]
    fn npv_at_irr_is_zero(
        investment in 100.0f64..10_000.0,
        returns in proptest::collection::vec(0.1f64..0.6, 2..8),
    ) {
        // One outflow followed by inflows totalling more than it.
        let mut flows = vec![-investment];
        flows.extend(returns.iter().map(|r| r * investment));
        prop_assume!(flows.iter().sum::<f64>() > 0.0);
        let rate = irr(&flows).unwrap();
        prop_assert!(npv(rate, &flows).unwrap().abs() < 1e-4);
    }

    #[test]
    fn amortization_pays_off_the_loan(
        principal in 1_000.0f64..1_000_000.0,
        rate in 0.0f64..0.02,
        periods in 1usize..360,
    ) {
        let rows = amortize(principal, rate, periods).unwrap();
        let last = rows.last().unwrap();
        prop_assert!(last.balance.abs() < 1e-6 * principal);
        let repaid: f64 = rows.iter().map(|r| r.principal).sum();
        prop_assert!((repaid - principal).abs() < 1e-6 * principal);
    }
}
