//! Fixed-rate mortgage estimate.

use serde::Serialize;

use crate::error::CalculatorError;
use crate::utils::text::format_money;

const MAX_TERM_YEARS: u32 = 100;
const MAX_RATE_PERCENT: f64 = 100.0;
/// Keeps every total within whole-cent formatting range.
const MAX_HOME_PRICE: f64 = 1e12;

/// Validated calculator inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MortgageInput {
    pub home_price: f64,
    pub down_payment_percent: f64,
    pub annual_rate_percent: f64,
    pub term_years: u32,
}

impl MortgageInput {
    /// Parse raw form fields. A blank or non-numeric field rejects the whole
    /// form with [`CalculatorError::MissingInput`].
    pub fn parse(
        home_price: &str,
        down_payment_percent: &str,
        annual_rate_percent: &str,
        term_years: &str,
    ) -> Result<Self, CalculatorError> {
        let home_price = parse_field("home price", home_price)?;
        let down_payment_percent = parse_field("down payment", down_payment_percent)?;
        let annual_rate_percent = parse_field("interest rate", annual_rate_percent)?;
        let term = parse_field("loan term", term_years)?;

        if term.fract() != 0.0 {
            return Err(out_of_range("loan term", "must be a whole number of years"));
        }
        if term < 1.0 || term > MAX_TERM_YEARS as f64 {
            return Err(out_of_range(
                "loan term",
                &format!("must be between 1 and {} years", MAX_TERM_YEARS),
            ));
        }

        Self::new(
            home_price,
            down_payment_percent,
            annual_rate_percent,
            term as u32,
        )
    }

    pub fn new(
        home_price: f64,
        down_payment_percent: f64,
        annual_rate_percent: f64,
        term_years: u32,
    ) -> Result<Self, CalculatorError> {
        if !home_price.is_finite() || home_price <= 0.0 {
            return Err(out_of_range("home price", "must be greater than zero"));
        }
        if home_price > MAX_HOME_PRICE {
            return Err(out_of_range("home price", "is too large"));
        }
        if !(0.0..=100.0).contains(&down_payment_percent) {
            return Err(out_of_range("down payment", "must be between 0 and 100 percent"));
        }
        if !annual_rate_percent.is_finite() || annual_rate_percent < 0.0 {
            return Err(out_of_range("interest rate", "must not be negative"));
        }
        if annual_rate_percent > MAX_RATE_PERCENT {
            return Err(out_of_range(
                "interest rate",
                &format!("must be at most {} percent", MAX_RATE_PERCENT),
            ));
        }
        if term_years == 0 || term_years > MAX_TERM_YEARS {
            return Err(out_of_range(
                "loan term",
                &format!("must be between 1 and {} years", MAX_TERM_YEARS),
            ));
        }

        Ok(Self {
            home_price,
            down_payment_percent,
            annual_rate_percent,
            term_years,
        })
    }

    pub fn quote(&self) -> MortgageQuote {
        let down_payment = self.home_price * self.down_payment_percent / 100.0;
        let loan_amount = self.home_price - down_payment;
        let months = self.term_years * 12;
        let n = months as f64;
        let r = self.annual_rate_percent / 100.0 / 12.0;

        // (1+r)^n - 1 via exp_m1 stays non-zero for rates below f64 resolution
        let log_growth = n * r.ln_1p();
        let growth_minus_one = log_growth.exp_m1();
        let monthly_payment = if growth_minus_one == 0.0 {
            loan_amount / n
        } else {
            loan_amount * r * log_growth.exp() / growth_minus_one
        };

        let total_paid = monthly_payment * n;
        MortgageQuote {
            down_payment,
            loan_amount,
            monthly_payment,
            months,
            total_paid,
            total_interest: total_paid - loan_amount,
        }
    }
}

/// Result of [`MortgageInput::quote`]. Totals cover the loan only, not the
/// down payment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MortgageQuote {
    pub down_payment: f64,
    pub loan_amount: f64,
    pub monthly_payment: f64,
    pub months: u32,
    pub total_paid: f64,
    pub total_interest: f64,
}

impl MortgageQuote {
    /// `$1,438.92/mo`
    pub fn monthly_display(&self) -> String {
        format!("{}/mo", format_money(self.monthly_payment))
    }
}

fn parse_field(field: &str, raw: &str) -> Result<f64, CalculatorError> {
    raw.trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CalculatorError::MissingInput {
            field: field.to_string(),
        })
}

fn out_of_range(field: &str, reason: &str) -> CalculatorError {
    CalculatorError::OutOfRange {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
