use std::cell::Cell;

use tracing::debug;

use super::{MacroAdvice, NutritionAdvisor};
use crate::error::{NutriError, Result};
use crate::models::{DayPlan, Ingredient, Macros, Meal, MealType, UserProfile, WeekPlan};

const WEEK_DAYS: [&str; 7] = [
    "Segunda-feira",
    "Terça-feira",
    "Quarta-feira",
    "Quinta-feira",
    "Sexta-feira",
    "Sábado",
    "Domingo",
];

/// Deterministic advisor that answers without any network call.
///
/// Used for offline sessions and as the test double for the AI boundary.
#[derive(Debug, Clone)]
pub struct CannedAdvisor {
    advice: MacroAdvice,
    plan: WeekPlan,
    failure: Option<String>,
    calls: Cell<usize>,
}

impl Default for CannedAdvisor {
    fn default() -> Self {
        Self::new(
            MacroAdvice {
                macros: Macros::new(140.0, 200.0, 60.0, 1900.0),
                advice: "Mantenha a constância: proteína em todas as refeições e bastante água."
                    .to_string(),
            },
            sample_week_plan(),
        )
    }
}

impl CannedAdvisor {
    pub fn new(advice: MacroAdvice, plan: WeekPlan) -> Self {
        Self {
            advice,
            plan,
            failure: None,
            calls: Cell::new(0),
        }
    }

    /// Advisor whose every call fails with the given message.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Number of requests answered or refused so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    fn respond<T: Clone>(&self, value: &T) -> Result<T> {
        self.calls.set(self.calls.get() + 1);
        match &self.failure {
            Some(message) => Err(NutriError::Api {
                status: 503,
                message: message.clone(),
            }),
            None => Ok(value.clone()),
        }
    }
}

impl NutritionAdvisor for CannedAdvisor {
    fn calculate_macros(&self, profile: &UserProfile) -> Result<MacroAdvice> {
        debug!(goal = %profile.goal, "Canned macro calculation");
        self.respond(&self.advice)
    }

    fn generate_week_plan(&self, profile: &UserProfile) -> Result<WeekPlan> {
        debug!(goal = %profile.goal, "Canned week plan");
        self.respond(&self.plan)
    }
}

fn meal(
    id: String,
    name: &str,
    meal_type: MealType,
    macros: Macros,
    ingredients: Vec<Ingredient>,
    prep_time: &str,
) -> Meal {
    Meal {
        id,
        name: name.to_string(),
        meal_type,
        calories: macros.calories,
        macros,
        ingredients,
        instructions: vec![
            "Separe e higienize os ingredientes.".to_string(),
            "Prepare conforme o modo de preparo habitual e sirva.".to_string(),
        ],
        prep_time: prep_time.to_string(),
    }
}

/// A small, fixed seven-day plan with repeated ingredients.
pub fn sample_week_plan() -> WeekPlan {
    let days = WEEK_DAYS
        .iter()
        .enumerate()
        .map(|(i, &day)| {
            let protein = if i % 2 == 0 {
                Ingredient::new("Peito de frango", "150g", "Meat")
            } else {
                Ingredient::new("Tilápia", "150g", "Seafood")
            };

            let meals = vec![
                meal(
                    format!("d{}-breakfast", i + 1),
                    "Iogurte com aveia e banana",
                    MealType::Breakfast,
                    Macros::new(22.0, 55.0, 8.0, 380.0),
                    vec![
                        Ingredient::new("Iogurte natural", "170g", "Dairy"),
                        Ingredient::new("Aveia", "40g", "Grains"),
                        Ingredient::new("Banana", "1 un", "Produce"),
                    ],
                    "5 min",
                ),
                meal(
                    format!("d{}-lunch", i + 1),
                    "Prato fit com arroz integral",
                    MealType::Lunch,
                    Macros::new(45.0, 60.0, 14.0, 560.0),
                    vec![
                        protein,
                        Ingredient::new("Arroz integral", "100g", "Grains"),
                        Ingredient::new("Brócolis", "1 xícara", "Vegetables"),
                        Ingredient::new("Azeite", "1 colher", "Oils"),
                    ],
                    "30 min",
                ),
                meal(
                    format!("d{}-snack", i + 1),
                    "Mix de castanhas",
                    MealType::Snack,
                    Macros::new(7.0, 8.0, 16.0, 200.0),
                    vec![Ingredient::new("Castanhas", "30g", "Snacks")],
                    "1 min",
                ),
                meal(
                    format!("d{}-dinner", i + 1),
                    "Omelete de legumes",
                    MealType::Dinner,
                    Macros::new(26.0, 12.0, 20.0, 340.0),
                    vec![
                        Ingredient::new("Ovos", "3 un", "Dairy"),
                        Ingredient::new("Tomate", if i < 3 { "1 un" } else { "2 un" }, "Produce"),
                        Ingredient::new("Espinafre", "1 xícara", "Vegetables"),
                    ],
                    "15 min",
                ),
            ];

            DayPlan {
                day: day.to_string(),
                meals,
                total_macros: Macros::new(100.0, 135.0, 58.0, 1480.0),
            }
        })
        .collect();

    WeekPlan {
        id: "sample".to_string(),
        title: "Semana Fit de Exemplo".to_string(),
        days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_plan_covers_week() {
        let plan = sample_week_plan();
        assert_eq!(plan.days.len(), WeekPlan::EXPECTED_DAYS);
        assert_eq!(plan.meal_count(), 28);
    }

    #[test]
    fn test_failing_advisor_counts_calls() {
        let advisor = CannedAdvisor::failing("offline");
        let profile = UserProfile::default();
        assert!(advisor.calculate_macros(&profile).is_err());
        assert!(advisor.generate_week_plan(&profile).is_err());
        assert_eq!(advisor.calls(), 2);
    }
}
