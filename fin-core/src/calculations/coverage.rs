//! Income vs. essential-expenses coverage diagnostic.
//!
//! Classifies how reliably a monthly income covers essential expenses once
//! both are adjusted conservatively: income takes a variability haircut,
//! essentials take an uplift for hidden costs. The resulting coverage ratio
//! maps to a band with a deterministic verdict and two recommended actions.
//!
//! # Diagnostic Structure
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Adjusted income = income × (1 − swing%) |
//! | 2    | Adjusted essentials = essentials × (1 + hidden%) |
//! | 3    | Ratio = adjusted income / adjusted essentials |
//! | 4    | Band: < 1.00 Underprepared, < 1.15 Borderline, else Stable |
//! | 5    | Gap targets: to 1.00x coverage and to the 1.15x buffer |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use fin_core::calculations::coverage::{CoverageBand, CoverageInput, diagnose};
//!
//! let input = CoverageInput {
//!     income: dec!(3000.00),
//!     essentials: dec!(2000.00),
//!     income_swing_pct: dec!(10),
//!     hidden_essentials_pct: dec!(10),
//! };
//!
//! let report = diagnose(&input).unwrap();
//!
//! assert_eq!(report.band, CoverageBand::Stable);
//! assert_eq!(report.ratio, dec!(1.23));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::{max, round_half_up};

/// Errors that can occur when running the coverage diagnostic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoverageError {
    /// Income may not be negative.
    #[error("monthly income may not be negative")]
    NegativeIncome,

    /// Essentials must be greater than zero.
    #[error("essential expenses must be greater than 0")]
    NonPositiveEssentials,

    /// Income variability haircut must be 0..=30 percent.
    #[error("income variability haircut must be between 0% and 30%")]
    SwingOutOfRange,

    /// Hidden essentials uplift must be 0..=20 percent.
    #[error("hidden essentials uplift must be between 0% and 20%")]
    HiddenOutOfRange,
}

/// Input values for the coverage diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageInput {
    /// Typical monthly income.
    pub income: Decimal,

    /// Essential monthly expenses (housing, food, transport, insurance...).
    pub essentials: Decimal,

    /// Haircut applied to income for month-to-month variability, percent.
    pub income_swing_pct: Decimal,

    /// Uplift applied to essentials for costs people forget, percent.
    pub hidden_essentials_pct: Decimal,
}

/// Classification bands for the coverage ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverageBand {
    /// Conservative income does not reliably cover core expenses.
    Underprepared,
    /// Essentials are covered but the cushion is thin.
    Borderline,
    /// Conservative income covers essentials with some margin.
    Stable,
}

impl CoverageBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Underprepared => "Underprepared",
            Self::Borderline => "Borderline",
            Self::Stable => "Stable",
        }
    }
}

/// Result of the coverage diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageReport {
    /// Coverage ratio rounded to two decimal places for display.
    pub ratio: Decimal,

    pub band: CoverageBand,

    /// Income after the variability haircut.
    pub adjusted_income: Decimal,

    /// Essentials after the hidden-cost uplift.
    pub adjusted_essentials: Decimal,

    /// Monthly amount missing to reach 1.00x coverage (zero when covered).
    pub gap_to_covered: Decimal,

    /// Monthly amount missing to reach the 1.15x buffer (zero when reached).
    pub gap_to_buffer: Decimal,

    /// One-line verdict for the band.
    pub note: String,

    /// Two concrete next steps for the band.
    pub actions: [String; 2],
}

/// The buffer multiple separating Borderline from Stable.
const BUFFER_RATIO: Decimal = Decimal::from_parts(115, 0, 0, false, 2);

/// Runs the coverage diagnostic.
///
/// # Errors
///
/// Returns a [`CoverageError`] when an input is outside its allowed range.
pub fn diagnose(input: &CoverageInput) -> Result<CoverageReport, CoverageError> {
    validate(input)?;

    let hundred = Decimal::ONE_HUNDRED;
    let adjusted_income =
        round_half_up(input.income * (hundred - input.income_swing_pct) / hundred);
    let adjusted_essentials =
        round_half_up(input.essentials * (hundred + input.hidden_essentials_pct) / hundred);

    let ratio = adjusted_income / adjusted_essentials;

    let band = if ratio < Decimal::ONE {
        CoverageBand::Underprepared
    } else if ratio < BUFFER_RATIO {
        CoverageBand::Borderline
    } else {
        CoverageBand::Stable
    };

    let gap_to_covered = max(
        round_half_up(adjusted_essentials - adjusted_income),
        Decimal::ZERO,
    );
    let gap_to_buffer = max(
        round_half_up(adjusted_essentials * BUFFER_RATIO - adjusted_income),
        Decimal::ZERO,
    );

    let note = match band {
        CoverageBand::Underprepared => {
            "Your conservative income does not reliably cover core expenses."
        }
        CoverageBand::Borderline => "Your essentials are covered, but the cushion is thin.",
        CoverageBand::Stable => "Your conservative income covers essentials with some margin.",
    }
    .to_string();

    let actions = match band {
        CoverageBand::Underprepared => [
            format!(
                "Close the baseline gap: increase monthly income by {gap_to_covered} or cut \
                 essentials by the same amount until you reach 1.00x."
            ),
            "Freeze new discretionary commitments until you reach at least 1.10x coverage \
             (small shocks stop becoming debt)."
                .to_string(),
        ],
        CoverageBand::Borderline => [
            format!(
                "Build margin: target an extra {gap_to_buffer} per month (income up or \
                 essentials down) to reach 1.15x."
            ),
            "Pick two essentials to renegotiate this week (housing, transport, insurance, \
             utilities) and lock savings as defaults."
                .to_string(),
        ],
        CoverageBand::Stable => [
            "Formalise your cushion: set an automatic monthly transfer tied to your margin \
             so lifestyle creep does not eat it."
                .to_string(),
            "Run a quarterly essentials audit: if essentials rise faster than income, your \
             stability will silently decay."
                .to_string(),
        ],
    };

    Ok(CoverageReport {
        ratio: round_half_up(ratio),
        band,
        adjusted_income,
        adjusted_essentials,
        gap_to_covered,
        gap_to_buffer,
        note,
        actions,
    })
}

fn validate(input: &CoverageInput) -> Result<(), CoverageError> {
    if input.income < Decimal::ZERO {
        return Err(CoverageError::NegativeIncome);
    }
    if input.essentials <= Decimal::ZERO {
        return Err(CoverageError::NonPositiveEssentials);
    }
    if input.income_swing_pct < Decimal::ZERO || input.income_swing_pct > Decimal::from(30) {
        return Err(CoverageError::SwingOutOfRange);
    }
    if input.hidden_essentials_pct < Decimal::ZERO
        || input.hidden_essentials_pct > Decimal::from(20)
    {
        return Err(CoverageError::HiddenOutOfRange);
    }
    Ok(())
}
