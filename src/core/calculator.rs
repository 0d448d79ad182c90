use super::types::{CalculatorInput, CalculatorResult, ChartSlice};

pub const INVESTED_SLICE_LABEL: &str = "Invested Amount";
pub const RETURNS_SLICE_LABEL: &str = "Est. Returns";
const INVESTED_SLICE_COLOUR: &str = "#d3d3d3";
const RETURNS_SLICE_COLOUR: &str = "#4169e1";
const INVESTED_SLICE_HOVER_COLOUR: &str = "#a9a9a9";
const RETURNS_SLICE_HOVER_COLOUR: &str = "#1e90ff";

/// Projects a monthly contribution paid at the start of each month, compounded monthly.
///
/// `estimated_returns` is the future value of the annuity due; `invested_amount` is the plain
/// sum of contributions. A zero rate falls back to the limit of the annuity factor (`n`).
pub fn compute(
    monthly_contribution: f64,
    annual_rate_percent: f64,
    years: u32,
) -> CalculatorResult {
    let r = annual_rate_percent / 12.0 / 100.0;
    let n = f64::from(years) * 12.0;

    let invested_amount = monthly_contribution * n;
    let annuity_factor = if r == 0.0 {
        n
    } else {
        ((1.0 + r).powf(n) - 1.0) / r * (1.0 + r)
    };
    let estimated_returns = monthly_contribution * annuity_factor;

    CalculatorResult {
        invested_amount,
        estimated_returns,
        total_value: invested_amount + estimated_returns,
    }
}

pub fn compute_input(input: &CalculatorInput) -> CalculatorResult {
    compute(
        input.monthly_contribution,
        input.annual_rate_percent,
        input.years,
    )
}

pub fn breakdown(result: &CalculatorResult) -> [ChartSlice; 2] {
    let invested = result.invested_amount.max(0.0);
    let returns = result.estimated_returns.max(0.0);
    let total = invested + returns;
    let share = |value: f64| if total > 0.0 { value / total } else { 0.0 };

    [
        ChartSlice {
            label: INVESTED_SLICE_LABEL,
            value: invested,
            share: share(invested),
            colour: INVESTED_SLICE_COLOUR,
            hover_colour: INVESTED_SLICE_HOVER_COLOUR,
        },
        ChartSlice {
            label: RETURNS_SLICE_LABEL,
            value: returns,
            share: share(returns),
            colour: RETURNS_SLICE_COLOUR,
            hover_colour: RETURNS_SLICE_HOVER_COLOUR,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{
        ANNUAL_RATE_BOUNDS, InvestmentMode, MONTHLY_CONTRIBUTION_BOUNDS, YEARS_BOUNDS,
    };
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    fn assert_approx_tol(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    fn contribution_from_steps(steps: u32) -> f64 {
        MONTHLY_CONTRIBUTION_BOUNDS.min + f64::from(steps) * MONTHLY_CONTRIBUTION_BOUNDS.step
    }

    fn rate_from_steps(steps: u32) -> f64 {
        ANNUAL_RATE_BOUNDS.min + f64::from(steps) * ANNUAL_RATE_BOUNDS.step
    }

    #[test]
    fn default_scenario_matches_annuity_due_formula() {
        let result = compute(25_000.0, 12.0, 10);

        assert_eq!(result.invested_amount, 3_000_000.0);
        let expected_returns = 25_000.0 * ((1.01f64.powf(120.0) - 1.0) / 0.01) * 1.01;
        assert_approx_tol(result.estimated_returns, expected_returns, 1e-6);
        assert_approx_tol(result.estimated_returns, 5_808_476.908_8, 1e-3);
        assert_approx_tol(result.total_value, 8_808_476.908_8, 1e-3);
    }

    #[test]
    fn minimum_scenario_matches_formula() {
        let result = compute(500.0, 5.0, 1);
        let r = 5.0 / 12.0 / 100.0;

        assert_eq!(result.invested_amount, 6_000.0);
        assert_approx_tol(r, 0.004_167, 1e-6);
        assert_approx_tol(result.estimated_returns, 6_165.008_694_7, 1e-6);
        assert_eq!(
            result.total_value,
            result.invested_amount + result.estimated_returns
        );
    }

    #[test]
    fn zero_rate_returns_plain_sum_of_contributions() {
        let result = compute(1_000.0, 0.0, 2);

        assert_eq!(result.invested_amount, 24_000.0);
        assert_eq!(result.estimated_returns, 24_000.0);
        assert!(result.total_value.is_finite());
    }

    #[test]
    fn compute_input_ignores_mode() {
        let sip = CalculatorInput::default();
        let lumpsum = CalculatorInput {
            mode: InvestmentMode::Lumpsum,
            ..sip
        };

        assert_eq!(compute_input(&sip), compute_input(&lumpsum));
        assert_eq!(compute_input(&sip), compute(25_000.0, 12.0, 10));
    }

    #[test]
    fn breakdown_orders_invested_then_returns() {
        let result = compute(25_000.0, 12.0, 10);
        let [invested, returns] = breakdown(&result);

        assert_eq!(invested.label, "Invested Amount");
        assert_eq!(invested.value, result.invested_amount);
        assert_eq!(invested.colour, "#d3d3d3");
        assert_eq!(returns.label, "Est. Returns");
        assert_eq!(returns.value, result.estimated_returns);
        assert_eq!(returns.colour, "#4169e1");
        assert_eq!(invested.hover_colour, "#a9a9a9");
        assert_eq!(returns.hover_colour, "#1e90ff");
        assert_approx_tol(invested.share + returns.share, 1.0, 1e-12);
        assert!(returns.share > invested.share);
    }

    #[test]
    fn breakdown_of_empty_result_has_zero_shares() {
        let empty = CalculatorResult {
            invested_amount: 0.0,
            estimated_returns: 0.0,
            total_value: 0.0,
        };
        let [invested, returns] = breakdown(&empty);

        assert_eq!(invested.share, 0.0);
        assert_eq!(returns.share, 0.0);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_total_is_sum_of_parts(
            contribution_steps in 0u32..200,
            rate_steps in 0u32..31,
            years in 1u32..31
        ) {
            let result = compute(
                contribution_from_steps(contribution_steps),
                rate_from_steps(rate_steps),
                years,
            );
            prop_assert_eq!(result.total_value, result.invested_amount + result.estimated_returns);
            prop_assert!(result.total_value.is_finite());
        }

        #[test]
        fn prop_invested_amount_is_contribution_times_months(
            contribution_steps in 0u32..200,
            rate_steps in 0u32..31,
            years in 1u32..31
        ) {
            let contribution = contribution_from_steps(contribution_steps);
            let result = compute(contribution, rate_from_steps(rate_steps), years);
            prop_assert_eq!(result.invested_amount, contribution * 12.0 * f64::from(years));
        }

        #[test]
        fn prop_more_contribution_increases_invested_and_returns(
            contribution_steps in 0u32..199,
            extra_steps in 1u32..20,
            rate_steps in 0u32..31,
            years in 1u32..31
        ) {
            let rate = rate_from_steps(rate_steps);
            let lower = compute(contribution_from_steps(contribution_steps), rate, years);
            let higher = compute(
                contribution_from_steps(contribution_steps + extra_steps),
                rate,
                years,
            );
            prop_assert!(higher.invested_amount > lower.invested_amount);
            prop_assert!(higher.estimated_returns > lower.estimated_returns);
        }

        #[test]
        fn prop_higher_rate_increases_returns(
            contribution_steps in 0u32..200,
            rate_steps in 0u32..30,
            extra_steps in 1u32..10,
            years in 1u32..31
        ) {
            let contribution = contribution_from_steps(contribution_steps);
            let lower = compute(contribution, rate_from_steps(rate_steps), years);
            let higher = compute(contribution, rate_from_steps(rate_steps + extra_steps), years);
            prop_assert!(higher.estimated_returns > lower.estimated_returns);
            prop_assert_eq!(higher.invested_amount, lower.invested_amount);
        }

        #[test]
        fn prop_compute_is_bit_identical_on_repeat(
            contribution_steps in 0u32..200,
            rate_steps in 0u32..31,
            years in 1u32..31
        ) {
            let contribution = contribution_from_steps(contribution_steps);
            let rate = rate_from_steps(rate_steps);
            let first = compute(contribution, rate, years);
            let second = compute(contribution, rate, years);
            prop_assert_eq!(first.invested_amount.to_bits(), second.invested_amount.to_bits());
            prop_assert_eq!(first.estimated_returns.to_bits(), second.estimated_returns.to_bits());
            prop_assert_eq!(first.total_value.to_bits(), second.total_value.to_bits());
        }
    }

    #[test]
    fn bounds_cover_the_generated_grid() {
        assert!(MONTHLY_CONTRIBUTION_BOUNDS.contains(contribution_from_steps(199)));
        assert!(ANNUAL_RATE_BOUNDS.contains(rate_from_steps(30)));
        assert!(YEARS_BOUNDS.contains(30.0));
    }
}
