//! Mifflin-St Jeor basal metabolic rate and activity-scaled maintenance.

use std::str::FromStr;

use crate::{
    error::{AppError, AppResult},
    parse::round2,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

impl FromStr for Sex {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            _ => Err(AppError::invalid("sex", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Normal,
    Heavy,
    Very,
}

impl ActivityLevel {
    pub fn factor(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Normal => 1.55,
            ActivityLevel::Heavy => 1.725,
            ActivityLevel::Very => 1.9,
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" => Ok(ActivityLevel::Light),
            "normal" => Ok(ActivityLevel::Normal),
            "heavy" => Ok(ActivityLevel::Heavy),
            "very" => Ok(ActivityLevel::Very),
            _ => Err(AppError::invalid("activity", s)),
        }
    }
}

/// Displayed figures: both rounded to 2 decimals, maintenance derived from
/// the rounded BMR.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmrResult {
    pub bmr: f64,
    pub maintenance: f64,
}

pub fn bmr(weight_kg: f64, height_cm: f64, age: u32, sex: Sex) -> f64 {
    let offset = match sex {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
    };
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age) + offset
}

pub fn maintenance(bmr: f64, activity: ActivityLevel) -> f64 {
    bmr * activity.factor()
}

pub fn estimate(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    sex: Sex,
    activity: ActivityLevel,
) -> BmrResult {
    let bmr = round2(bmr(weight_kg, height_cm, age, sex));
    BmrResult {
        bmr,
        maintenance: round2(maintenance(bmr, activity)),
    }
}

/// Parse and validate raw form strings, then [`estimate`].
pub fn estimate_from_strs(
    weight: &str,
    height: &str,
    age: &str,
    sex: &str,
    activity: &str,
) -> AppResult<BmrResult> {
    use crate::parse::{required_f64, required_u32};

    Ok(estimate(
        required_f64("weight", weight)?,
        required_f64("height", height)?,
        required_u32("age", age)?,
        sex.parse()?,
        activity.parse()?,
    ))
}
