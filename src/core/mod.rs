mod calculator;
mod format;
mod state;
mod types;

pub use calculator::{INVESTED_SLICE_LABEL, RETURNS_SLICE_LABEL, breakdown, compute, compute_input};
pub use format::{format_currency, format_rate, format_years};
pub use state::CalculatorState;
pub use types::{
    ANNUAL_RATE_BOUNDS, CalculatorInput, CalculatorResult, ChartSlice, DEFAULT_ANNUAL_RATE_PERCENT,
    DEFAULT_MONTHLY_CONTRIBUTION, DEFAULT_YEARS, InputBounds, InputError, InvestmentMode,
    MONTHLY_CONTRIBUTION_BOUNDS, YEARS_BOUNDS,
};
