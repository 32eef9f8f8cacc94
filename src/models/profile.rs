use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{NutriError, Result};

/// Daily or per-meal macro-nutrient quantities.
///
/// Grams for protein, carbs and fats; kcal for calories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub calories: f64,
}

impl Macros {
    pub fn new(protein: f64, carbs: f64, fats: f64, calories: f64) -> Self {
        Self {
            protein,
            carbs,
            fats,
            calories,
        }
    }

    /// All four fields are finite and non-negative.
    pub fn is_valid(&self) -> bool {
        [self.protein, self.carbs, self.fats, self.calories]
            .into_iter()
            .all(|v| v.is_finite() && v >= 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    LoseWeight,
    Maintain,
    GainMuscle,
}

impl Goal {
    pub const ALL: [Goal; 3] = [Goal::LoseWeight, Goal::Maintain, Goal::GainMuscle];

    /// Wire value, also what the prompts send to the advisor.
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::LoseWeight => "lose_weight",
            Goal::Maintain => "maintain",
            Goal::GainMuscle => "gain_muscle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(Gender, Goal, ActivityLevel);

/// Biometric profile sent to the nutrition advisor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub age: u32,

    /// Kilograms.
    pub weight: f64,

    /// Centimeters.
    pub height: f64,

    pub gender: Gender,
    pub goal: Goal,
    pub activity_level: ActivityLevel,

    #[serde(default)]
    pub dietary_restrictions: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculated_macros: Option<Macros>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            age: 30,
            weight: 70.0,
            height: 170.0,
            gender: Gender::Female,
            goal: Goal::LoseWeight,
            activity_level: ActivityLevel::Moderate,
            dietary_restrictions: String::new(),
            calculated_macros: None,
        }
    }
}

impl UserProfile {
    /// Reject profiles with non-positive body measurements.
    pub fn validate(&self) -> Result<()> {
        if self.age == 0 {
            return Err(NutriError::InvalidInput("Age must be positive".to_string()));
        }
        if !(self.weight.is_finite() && self.weight > 0.0) {
            return Err(NutriError::InvalidInput(
                "Weight must be a positive number of kilograms".to_string(),
            ));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(NutriError::InvalidInput(
                "Height must be a positive number of centimeters".to_string(),
            ));
        }
        Ok(())
    }

    /// Restrictions text, or `None` when the user left it blank.
    pub fn restrictions(&self) -> Option<&str> {
        let trimmed = self.dietary_restrictions.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_is_valid() {
        assert!(UserProfile::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_positive_measurements() {
        let mut profile = UserProfile::default();
        profile.age = 0;
        assert!(profile.validate().is_err());

        let mut profile = UserProfile::default();
        profile.weight = 0.0;
        assert!(profile.validate().is_err());

        let mut profile = UserProfile::default();
        profile.height = f64::NAN;
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_profile_wire_format() {
        let json = r#"{
            "age": 41, "weight": 82.5, "height": 180, "gender": "male",
            "goal": "gain_muscle", "activityLevel": "very_active",
            "dietaryRestrictions": "  "
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.goal, Goal::GainMuscle);
        assert_eq!(profile.activity_level, ActivityLevel::VeryActive);
        assert_eq!(profile.restrictions(), None);
        assert!(profile.calculated_macros.is_none());

        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["activityLevel"], "very_active");
        assert!(value.get("calculatedMacros").is_none());
    }

    #[test]
    fn test_macros_validity() {
        assert!(Macros::new(150.0, 200.0, 60.0, 2000.0).is_valid());
        assert!(!Macros::new(-1.0, 200.0, 60.0, 2000.0).is_valid());
    }
}
