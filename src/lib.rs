pub mod advisor;
pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod models;
pub mod shopping;
pub mod state;

pub use advisor::{CannedAdvisor, GeminiAdvisor, MacroAdvice, NutritionAdvisor};
pub use error::{NutriError, Result};
pub use models::{Ingredient, Meal, UserProfile, WeekPlan};
pub use shopping::{consolidate, progress, summarize_amounts, ShoppingList};
