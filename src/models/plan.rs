use std::fmt;

use serde::{Deserialize, Serialize};

use super::Macros;

/// A single ingredient line of a meal.
///
/// `amount` is free text ("200g", "1 unit"); there is no unit system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub item: String,
    pub amount: String,
    pub category: String,
}

impl Ingredient {
    pub fn new(item: &str, amount: &str, category: &str) -> Self {
        Self {
            item: item.to_string(),
            amount: amount.to_string(),
            category: category.to_string(),
        }
    }
}

/// Meal slot within a day. Accepts the Portuguese labels on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealType {
    #[serde(alias = "Café da Manhã")]
    Breakfast,
    #[serde(alias = "Almoço")]
    Lunch,
    #[serde(alias = "Lanche")]
    Snack,
    #[serde(alias = "Jantar")]
    Dinner,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Snack,
        MealType::Dinner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Snack => "Snack",
            MealType::Dinner => "Dinner",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    /// Not part of the required schema; empty when the advisor omits it.
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub calories: f64,
    pub macros: Macros,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub prep_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub day: String,
    pub meals: Vec<Meal>,
    pub total_macros: Macros,
}

/// A generated week of meals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekPlan {
    /// Assigned locally at generation time.
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub days: Vec<DayPlan>,
}

impl WeekPlan {
    /// Days a complete plan is expected to contain. Not enforced.
    pub const EXPECTED_DAYS: usize = 7;

    /// Iterate every ingredient in day, meal, ingredient order.
    pub fn ingredients(&self) -> impl Iterator<Item = (&DayPlan, &Meal, &Ingredient)> {
        self.days.iter().flat_map(|day| {
            day.meals.iter().flat_map(move |meal| {
                meal.ingredients
                    .iter()
                    .map(move |ingredient| (day, meal, ingredient))
            })
        })
    }

    pub fn meal_count(&self) -> usize {
        self.days.iter().map(|d| d.meals.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
