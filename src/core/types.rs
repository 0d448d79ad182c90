use serde::Serialize;
use thiserror::Error;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentMode {
    #[default]
    Sip,
    Lumpsum,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct InputBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl InputBounds {
    pub fn clamp(self, value: f64) -> f64 {
        let steps = ((value - self.min) / self.step).round();
        (self.min + steps * self.step).clamp(self.min, self.max)
    }

    pub fn contains(self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

pub const MONTHLY_CONTRIBUTION_BOUNDS: InputBounds = InputBounds {
    min: 500.0,
    max: 100_000.0,
    step: 500.0,
};

pub const ANNUAL_RATE_BOUNDS: InputBounds = InputBounds {
    min: 5.0,
    max: 20.0,
    step: 0.5,
};

pub const YEARS_BOUNDS: InputBounds = InputBounds {
    min: 1.0,
    max: 30.0,
    step: 1.0,
};

pub const DEFAULT_MONTHLY_CONTRIBUTION: f64 = 25_000.0;
pub const DEFAULT_ANNUAL_RATE_PERCENT: f64 = 12.0;
pub const DEFAULT_YEARS: u32 = 10;

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorInput {
    pub monthly_contribution: f64,
    pub annual_rate_percent: f64,
    pub years: u32,
    pub mode: InvestmentMode,
}

impl Default for CalculatorInput {
    fn default() -> Self {
        Self {
            monthly_contribution: DEFAULT_MONTHLY_CONTRIBUTION,
            annual_rate_percent: DEFAULT_ANNUAL_RATE_PERCENT,
            years: DEFAULT_YEARS,
            mode: InvestmentMode::Sip,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorResult {
    pub invested_amount: f64,
    pub estimated_returns: f64,
    pub total_value: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSlice {
    pub label: &'static str,
    pub value: f64,
    pub share: f64,
    pub colour: &'static str,
    pub hover_colour: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
}
