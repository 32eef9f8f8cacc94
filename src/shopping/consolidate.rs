use std::collections::HashMap;

use tracing::debug;

use crate::models::{MealType, WeekPlan};
use crate::shopping::categories::translate_category;

/// One shopping-list line: every use of an ingredient across the week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedItem {
    /// Casing of the first occurrence.
    pub name: String,

    /// Raw amount strings, in encounter order.
    pub amounts: Vec<String>,

    /// "<day> (<meal type>)" labels, in encounter order.
    pub occurrences: Vec<String>,
}

impl GroupedItem {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            amounts: Vec::new(),
            occurrences: Vec::new(),
        }
    }

    /// Merged amount text for display.
    pub fn summary(&self) -> String {
        summarize_amounts(&self.amounts)
    }
}

/// Items of one category, keyed by normalized item name in encounter order.
#[derive(Debug, Clone, Default)]
pub struct CategoryGroup {
    key: String,
    items: Vec<(String, GroupedItem)>,
    index: HashMap<String, usize>,
}

impl CategoryGroup {
    fn new(key: String) -> Self {
        Self {
            key,
            ..Default::default()
        }
    }

    fn entry(&mut self, item_key: String, display_name: &str) -> &mut GroupedItem {
        let pos = match self.index.get(&item_key) {
            Some(&pos) => pos,
            None => {
                let pos = self.items.len();
                self.index.insert(item_key.clone(), pos);
                self.items.push((item_key, GroupedItem::new(display_name)));
                pos
            }
        };
        &mut self.items[pos].1
    }

    /// Normalized category key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Localized display label.
    pub fn label(&self) -> String {
        translate_category(&self.key)
    }

    pub fn get(&self, item_key: &str) -> Option<&GroupedItem> {
        self.index.get(item_key).map(|&pos| &self.items[pos].1)
    }

    pub fn items(&self) -> impl Iterator<Item = (&str, &GroupedItem)> {
        self.items.iter().map(|(k, item)| (k.as_str(), item))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Category-grouped shopping list derived from a week plan.
///
/// Categories and items iterate in first-encounter order.
#[derive(Debug, Clone, Default)]
pub struct ShoppingList {
    categories: Vec<CategoryGroup>,
    index: HashMap<String, usize>,
}

impl ShoppingList {
    fn category_mut(&mut self, category_key: String) -> &mut CategoryGroup {
        let pos = match self.index.get(&category_key) {
            Some(&pos) => pos,
            None => {
                let pos = self.categories.len();
                self.index.insert(category_key.clone(), pos);
                self.categories.push(CategoryGroup::new(category_key));
                pos
            }
        };
        &mut self.categories[pos]
    }

    pub fn get(&self, category_key: &str) -> Option<&CategoryGroup> {
        self.index.get(category_key).map(|&pos| &self.categories[pos])
    }

    /// Look up an item by its normalized keys.
    pub fn item(&self, category_key: &str, item_key: &str) -> Option<&GroupedItem> {
        self.get(category_key).and_then(|group| group.get(item_key))
    }

    pub fn categories(&self) -> impl Iterator<Item = &CategoryGroup> {
        self.categories.iter()
    }

    /// Every item as (category key, item key, item).
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &GroupedItem)> {
        self.categories.iter().flat_map(|group| {
            group
                .items()
                .map(move |(item_key, item)| (group.key(), item_key, item))
        })
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Number of unique (category, item) lines.
    pub fn total_items(&self) -> usize {
        self.categories.iter().map(CategoryGroup::len).sum()
    }
}

/// Grouping key: trimmed and lower-cased.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Day name up to its first hyphen ("Segunda-feira" -> "Segunda").
///
/// Names without a hyphen are returned whole.
pub fn short_day_label(day: &str) -> &str {
    day.split_once('-').map_or(day, |(head, _)| head)
}

pub fn occurrence_label(day: &str, meal_type: MealType) -> String {
    format!("{} ({})", short_day_label(day), meal_type)
}

/// Merge every ingredient of the plan into one line per category and item.
///
/// Traversal is day, then meal, then ingredient order; it decides the
/// display casing and the order of amounts and occurrences.
pub fn consolidate(plan: &WeekPlan) -> ShoppingList {
    let mut list = ShoppingList::default();
    let mut ingredient_count = 0usize;

    for (day, meal, ingredient) in plan.ingredients() {
        let category_key = normalize_key(&ingredient.category);
        let item_key = normalize_key(&ingredient.item);

        let grouped = list
            .category_mut(category_key)
            .entry(item_key, &ingredient.item);
        grouped.amounts.push(ingredient.amount.clone());
        grouped
            .occurrences
            .push(occurrence_label(&day.day, meal.meal_type));

        ingredient_count += 1;
    }

    debug!(
        plan_id = %plan.id,
        ingredients = ingredient_count,
        categories = list.len(),
        items = list.total_items(),
        "Consolidated shopping list"
    );

    list
}

/// Summarize the amounts of one line.
///
/// Identical repeated amounts collapse to "<n>x <amount>"; anything else is
/// joined with " + " in input order.
pub fn summarize_amounts<S: AsRef<str>>(amounts: &[S]) -> String {
    match amounts {
        [first, rest @ ..] if !rest.is_empty() && rest.iter().all(|a| a.as_ref() == first.as_ref()) => {
            format!("{}x {}", amounts.len(), first.as_ref())
        }
        _ => amounts
            .iter()
            .map(|a| a.as_ref())
            .collect::<Vec<&str>>()
            .join(" + "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayPlan, Ingredient, Macros, Meal};

    fn meal(meal_type: MealType, ingredients: Vec<Ingredient>) -> Meal {
        Meal {
            id: String::new(),
            name: "Test meal".to_string(),
            meal_type,
            calories: 400.0,
            macros: Macros::default(),
            ingredients,
            instructions: vec![],
            prep_time: "5 min".to_string(),
        }
    }

    fn day(name: &str, meals: Vec<Meal>) -> DayPlan {
        DayPlan {
            day: name.to_string(),
            meals,
            total_macros: Macros::default(),
        }
    }

    fn plan(days: Vec<DayPlan>) -> WeekPlan {
        WeekPlan {
            id: "1".to_string(),
            title: "Test".to_string(),
            days,
        }
    }

    #[test]
    fn test_short_day_label() {
        assert_eq!(short_day_label("Segunda-feira"), "Segunda");
        assert_eq!(short_day_label("Monday-ish"), "Monday");
        assert_eq!(short_day_label("Monday"), "Monday");
        assert_eq!(short_day_label("-feira"), "");
    }

    #[test]
    fn test_summarize_amounts() {
        assert_eq!(summarize_amounts(&["200g", "200g"]), "2x 200g");
        assert_eq!(summarize_amounts(&["200g", "150g"]), "200g + 150g");
        assert_eq!(summarize_amounts(&["1 unit"]), "1 unit");
        assert_eq!(summarize_amounts(&["1 un", "1 un", "1 un"]), "3x 1 un");
        assert_eq!(summarize_amounts(&["1 un", "2 un", "1 un"]), "1 un + 2 un + 1 un");
        assert_eq!(summarize_amounts::<&str>(&[]), "");
    }

    #[test]
    fn test_empty_plan_yields_empty_list() {
        let list = consolidate(&plan(vec![]));
        assert!(list.is_empty());
        assert_eq!(list.total_items(), 0);
    }

    #[test]
    fn test_case_and_whitespace_insensitive_grouping() {
        let week = plan(vec![
            day(
                "Monday",
                vec![meal(
                    MealType::Lunch,
                    vec![Ingredient::new("Rice", "100g", "Grains")],
                )],
            ),
            day(
                "Tuesday",
                vec![meal(
                    MealType::Dinner,
                    vec![Ingredient::new("  rice ", "100g", " grains")],
                )],
            ),
        ]);

        let list = consolidate(&week);
        assert_eq!(list.len(), 1);
        assert_eq!(list.total_items(), 1);

        let rice = list.item("grains", "rice").unwrap();
        assert_eq!(rice.name, "Rice");
        assert_eq!(rice.amounts, vec!["100g", "100g"]);
        assert_eq!(rice.summary(), "2x 100g");
        assert_eq!(rice.occurrences, vec!["Monday (Lunch)", "Tuesday (Dinner)"]);
    }

    #[test]
    fn test_categories_keep_encounter_order() {
        let week = plan(vec![day(
            "Wednesday",
            vec![
                meal(
                    MealType::Breakfast,
                    vec![
                        Ingredient::new("Milk", "200ml", "Dairy"),
                        Ingredient::new("Banana", "1 unit", "Produce"),
                    ],
                ),
                meal(
                    MealType::Snack,
                    vec![
                        Ingredient::new("Yogurt", "1 cup", "dairy"),
                        Ingredient::new("Almonds", "30g", "Snacks"),
                    ],
                ),
            ],
        )]);

        let list = consolidate(&week);
        let keys: Vec<&str> = list.categories().map(CategoryGroup::key).collect();
        assert_eq!(keys, vec!["dairy", "produce", "snacks"]);

        let dairy: Vec<&str> = list.get("dairy").unwrap().items().map(|(k, _)| k).collect();
        assert_eq!(dairy, vec!["milk", "yogurt"]);
    }

    #[test]
    fn test_same_item_in_different_categories_stays_separate() {
        let week = plan(vec![day(
            "Friday",
            vec![meal(
                MealType::Dinner,
                vec![
                    Ingredient::new("Tomato", "2 units", "Produce"),
                    Ingredient::new("Tomato", "1 can", "Canned"),
                ],
            )],
        )]);

        let list = consolidate(&week);
        assert_eq!(list.total_items(), 2);
        assert_eq!(list.item("produce", "tomato").unwrap().amounts, vec!["2 units"]);
        assert_eq!(list.item("canned", "tomato").unwrap().amounts, vec!["1 can"]);
    }
}
