//! Swaption description files.
//!
//! A file holds everything one pricing needs: valuation date, model,
//! curve, swap, exercise schedule and engine settings. TOML and JSON are
//! accepted, chosen by file extension.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use swaptree_core::curves::{DiscountCurve, FlatForward, ZeroCurve};
use swaptree_core::daycounts::DayCountConvention;
use swaptree_core::types::{Date, Frequency};
use swaptree_lattice::HullWhite;
use swaptree_pricing::prelude::*;

use crate::error::{CliError, CliResult};

/// A swaption to price, as read from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwaptionFile {
    /// Valuation date; lattice time zero.
    pub reference_date: Date,

    /// Day count turning dates into lattice times.
    #[serde(default)]
    pub day_count: DayCountConvention,

    /// Hull-White parameters.
    #[serde(default)]
    pub model: ModelSpec,

    /// Discount curve.
    pub curve: CurveSpec,

    /// Underlying swap.
    pub swap: SwapSpec,

    /// Exercise schedule.
    #[serde(default)]
    pub exercise: ExerciseSpec,

    /// Engine settings.
    #[serde(default)]
    pub engine: TreeEngineConfig,
}

/// Hull-White model parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Mean reversion speed.
    #[serde(default = "default_mean_reversion")]
    pub mean_reversion: f64,

    /// Short-rate volatility.
    #[serde(default = "default_volatility")]
    pub volatility: f64,
}

fn default_mean_reversion() -> f64 {
    0.03
}

fn default_volatility() -> f64 {
    0.01
}

impl Default for ModelSpec {
    fn default() -> Self {
        Self {
            mean_reversion: default_mean_reversion(),
            volatility: default_volatility(),
        }
    }
}

/// Discount curve, continuously compounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CurveSpec {
    /// One rate for every maturity.
    Flat {
        /// Zero rate.
        rate: f64,
    },
    /// Zero rates at pillar times, linearly interpolated.
    Zero {
        /// Pillar times in years.
        times: Vec<f64>,
        /// Zero rate per pillar.
        rates: Vec<f64>,
    },
}

/// Vanilla swap terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapSpec {
    /// Payer or receiver.
    #[serde(default)]
    pub swap_type: SwapType,

    /// Notional amount.
    #[serde(default = "default_nominal")]
    pub nominal: f64,

    /// Fixed rate.
    pub fixed_rate: f64,

    /// First accrual start.
    pub start: Date,

    /// Last accrual end.
    pub maturity: Date,

    /// Fixed leg frequency.
    #[serde(default = "default_fixed_frequency")]
    pub fixed_frequency: Frequency,

    /// Floating leg frequency.
    #[serde(default = "default_floating_frequency")]
    pub floating_frequency: Frequency,

    /// Fixed leg day count.
    #[serde(default = "default_fixed_day_count")]
    pub fixed_day_count: DayCountConvention,

    /// Floating leg day count.
    #[serde(default = "default_floating_day_count")]
    pub floating_day_count: DayCountConvention,

    /// Spread over the floating index.
    #[serde(default)]
    pub spread: f64,

    /// Index fixings of floating coupons resetting before the reference date.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fixings: Vec<Fixing>,
}

fn default_nominal() -> f64 {
    1_000_000.0
}

fn default_fixed_frequency() -> Frequency {
    Frequency::Annual
}

fn default_floating_frequency() -> Frequency {
    Frequency::SemiAnnual
}

fn default_fixed_day_count() -> DayCountConvention {
    DayCountConvention::Thirty360US
}

fn default_floating_day_count() -> DayCountConvention {
    DayCountConvention::Act360
}

/// Index fixing of one floating coupon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fixing {
    /// Reset date of the coupon.
    pub date: Date,
    /// Fixed index rate.
    pub rate: f64,
}

/// Exercise style accepted in files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseStyle {
    /// Exercisable once.
    European,
    /// Exercisable on each listed date.
    #[default]
    Bermudan,
}

/// Exercise schedule.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExerciseSpec {
    /// European or Bermudan.
    #[serde(default)]
    pub style: ExerciseStyle,

    /// Exercise dates. Empty means every fixed reset date of the swap, or
    /// the first one for a European.
    #[serde(default)]
    pub dates: Vec<Date>,
}

impl SwaptionFile {
    /// Reads a TOML or JSON file.
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "toml" => toml::from_str(&content).map_err(|e| CliError::Parse(e.to_string())),
            "json" => serde_json::from_str(&content).map_err(|e| CliError::Parse(e.to_string())),
            _ => Err(CliError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// A five-year payer swap starting in one year, Bermudan on every
    /// fixed reset.
    pub fn sample() -> CliResult<Self> {
        Ok(Self {
            reference_date: Date::from_ymd(2025, 1, 15)?,
            day_count: DayCountConvention::Act365Fixed,
            model: ModelSpec::default(),
            curve: CurveSpec::Zero {
                times: vec![0.5, 1.0, 2.0, 5.0, 10.0],
                rates: vec![0.036, 0.037, 0.039, 0.041, 0.043],
            },
            swap: SwapSpec {
                swap_type: SwapType::Payer,
                nominal: default_nominal(),
                fixed_rate: 0.04,
                start: Date::from_ymd(2026, 1, 15)?,
                maturity: Date::from_ymd(2031, 1, 15)?,
                fixed_frequency: default_fixed_frequency(),
                floating_frequency: default_floating_frequency(),
                fixed_day_count: default_fixed_day_count(),
                floating_day_count: default_floating_day_count(),
                spread: 0.0,
                fixings: Vec::new(),
            },
            exercise: ExerciseSpec::default(),
            engine: TreeEngineConfig::default(),
        })
    }

    /// Builds the swaption arguments.
    pub fn swaption_arguments(&self) -> CliResult<SwaptionArguments> {
        let terms = &self.swap;
        let mut builder = VanillaSwapBuilder::new()
            .swap_type(terms.swap_type)
            .nominal(terms.nominal)
            .fixed_rate(terms.fixed_rate)
            .start(terms.start)
            .maturity(terms.maturity)
            .fixed_frequency(terms.fixed_frequency)
            .floating_frequency(terms.floating_frequency)
            .fixed_day_count(terms.fixed_day_count)
            .floating_day_count(terms.floating_day_count)
            .spread(terms.spread);
        for fixing in &terms.fixings {
            builder = builder.fixing(fixing.date, fixing.rate);
        }
        let swap = builder.build()?;

        let dates = if self.exercise.dates.is_empty() {
            swap.fixed_reset_dates.clone()
        } else {
            self.exercise.dates.clone()
        };
        let exercise = match self.exercise.style {
            ExerciseStyle::European => {
                let date = dates
                    .first()
                    .copied()
                    .ok_or_else(|| CliError::Config("no exercise date".to_string()))?;
                Exercise::european(date)
            }
            ExerciseStyle::Bermudan => Exercise::bermudan(dates)?,
        };
        Ok(SwaptionArguments::new(swap, exercise)?)
    }

    /// Builds the discount curve.
    pub fn discount_curve(&self) -> CliResult<Arc<dyn DiscountCurve>> {
        Ok(match &self.curve {
            CurveSpec::Flat { rate } => Arc::new(FlatForward::new(*rate)),
            CurveSpec::Zero { times, rates } => Arc::new(ZeroCurve::new(times.clone(), rates.clone())?),
        })
    }

    /// Builds the pricing engine.
    pub fn engine(&self) -> CliResult<TreeSwaptionEngine> {
        let model = HullWhite::new(self.model.mean_reversion, self.model.volatility);
        Ok(TreeSwaptionEngine::new(
            Arc::new(model),
            self.discount_curve()?,
            self.engine.clone(),
        ))
    }
}

impl Validate for SwaptionFile {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.model.mean_reversion < 0.0 || !self.model.mean_reversion.is_finite() {
            errors.push(ValidationError::new(
                "model.mean_reversion",
                "must be finite and non-negative",
            ));
        }
        if self.model.volatility <= 0.0 || !self.model.volatility.is_finite() {
            errors.push(ValidationError::new("model.volatility", "must be finite and positive"));
        }

        match &self.curve {
            CurveSpec::Flat { rate } => {
                if !rate.is_finite() {
                    errors.push(ValidationError::new("curve.rate", "must be finite"));
                }
            }
            CurveSpec::Zero { times, rates } => {
                if times.is_empty() || times.len() != rates.len() {
                    errors.push(ValidationError::new(
                        "curve",
                        format!("{} times and {} rates", times.len(), rates.len()),
                    ));
                }
            }
        }

        if self.swap.nominal <= 0.0 {
            errors.push(ValidationError::new("swap.nominal", "must be positive"));
        }
        if !self.swap.fixed_rate.is_finite() {
            errors.push(ValidationError::new("swap.fixed_rate", "must be finite"));
        }
        if self.swap.maturity <= self.swap.start {
            errors.push(ValidationError::new("swap.maturity", "must be after swap.start"));
        }

        if self.exercise.style == ExerciseStyle::European && self.exercise.dates.len() > 1 {
            errors.push(ValidationError::new(
                "exercise.dates",
                "a European swaption takes at most one date",
            ));
        }
        if let Some(last) = self.exercise.dates.iter().max() {
            if *last > self.swap.maturity {
                errors.push(ValidationError::new(
                    "exercise.dates",
                    format!("{last} is after the swap maturity"),
                ));
            }
        }

        errors.extend(self.engine.validate().into_iter().map(|e| {
            ValidationError::new(format!("engine.{}", e.field), e.message)
        }));
        errors
    }
}
