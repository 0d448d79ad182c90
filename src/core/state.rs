use super::calculator::{breakdown, compute_input};
use super::types::{
    ANNUAL_RATE_BOUNDS, CalculatorInput, CalculatorResult, ChartSlice, InputBounds, InputError,
    InvestmentMode, MONTHLY_CONTRIBUTION_BOUNDS, YEARS_BOUNDS,
};

#[derive(Debug, Clone, Default)]
pub struct CalculatorState {
    input: CalculatorInput,
}

impl CalculatorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> CalculatorInput {
        self.input
    }

    pub fn set_monthly_contribution(&mut self, value: f64) -> Result<f64, InputError> {
        let value = clamp_finite("monthlyContribution", MONTHLY_CONTRIBUTION_BOUNDS, value)?;
        self.input.monthly_contribution = value;
        Ok(value)
    }

    pub fn set_annual_rate_percent(&mut self, value: f64) -> Result<f64, InputError> {
        let value = clamp_finite("annualRatePercent", ANNUAL_RATE_BOUNDS, value)?;
        self.input.annual_rate_percent = value;
        Ok(value)
    }

    pub fn set_years(&mut self, value: f64) -> Result<u32, InputError> {
        let value = clamp_finite("years", YEARS_BOUNDS, value)? as u32;
        self.input.years = value;
        Ok(value)
    }

    pub fn set_mode(&mut self, mode: InvestmentMode) {
        self.input.mode = mode;
    }

    pub fn result(&self) -> CalculatorResult {
        compute_input(&self.input)
    }

    pub fn breakdown(&self) -> [ChartSlice; 2] {
        breakdown(&self.result())
    }
}

fn clamp_finite(field: &'static str, bounds: InputBounds, value: f64) -> Result<f64, InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite { field });
    }
    Ok(bounds.clamp(value))
}
