pub mod plan;
pub mod profile;

pub use plan::{DayPlan, Ingredient, Meal, MealType, WeekPlan};
pub use profile::{ActivityLevel, Gender, Goal, Macros, UserProfile};
