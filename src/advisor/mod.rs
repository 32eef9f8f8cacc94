//! Typed boundary around the generative-AI nutrition service.
//!
//! The rest of the crate only sees [`NutritionAdvisor`]; the provider's wire
//! format stays inside the implementations.

pub mod canned;
pub mod gemini;
pub mod prompts;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Macros, UserProfile, WeekPlan};

pub use canned::CannedAdvisor;
pub use gemini::GeminiAdvisor;

/// Result of a macro calculation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroAdvice {
    pub macros: Macros,
    pub advice: String,
}

/// Source of macro targets and weekly meal plans.
pub trait NutritionAdvisor {
    /// Compute daily macro targets for a profile.
    fn calculate_macros(&self, profile: &UserProfile) -> Result<MacroAdvice>;

    /// Generate a week of meals for a profile.
    fn generate_week_plan(&self, profile: &UserProfile) -> Result<WeekPlan>;
}
