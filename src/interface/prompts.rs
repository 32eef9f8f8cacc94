use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::Result;
use crate::models::{ActivityLevel, Gender, Goal, UserProfile};
use crate::shopping::{normalize_key, GroupedItem, ShoppingList};

/// Minimum Jaro-Winkler score for a fuzzy item match.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// Maximum fuzzy candidates offered at once.
const MAX_CANDIDATES: usize = 5;

/// Screens of the interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Setup,
    Dashboard,
    MealPlan,
    Shopping,
    Quit,
}

impl View {
    const MENU: [View; 5] = [
        View::Dashboard,
        View::MealPlan,
        View::Shopping,
        View::Setup,
        View::Quit,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            View::Setup => "Edit profile",
            View::Dashboard => "Dashboard",
            View::MealPlan => "Meal plan",
            View::Shopping => "Shopping list",
            View::Quit => "Quit",
        }
    }
}

/// What the user asked for in the checklist loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChecklistAction {
    Toggle {
        category_key: String,
        item_key: String,
    },
    Skip,
    Done,
}

/// A shopping-list line matching a typed name.
#[derive(Debug, Clone)]
pub struct ItemCandidate<'a> {
    pub category_key: &'a str,
    pub item_key: &'a str,
    pub item: &'a GroupedItem,
    pub score: f64,
}

impl ItemCandidate<'_> {
    fn action(&self) -> ChecklistAction {
        ChecklistAction::Toggle {
            category_key: self.category_key.to_string(),
            item_key: self.item_key.to_string(),
        }
    }

    fn describe(&self) -> String {
        format!("{} ({})", self.item.name, self.category_key)
    }
}

/// Find lines matching a typed item name.
///
/// Exact (case- and whitespace-insensitive) matches win; otherwise fuzzy
/// matches above [`FUZZY_MATCH_THRESHOLD`], best first.
pub fn find_item_candidates<'a>(list: &'a ShoppingList, query: &str) -> Vec<ItemCandidate<'a>> {
    let query = normalize_key(query);
    if query.is_empty() {
        return Vec::new();
    }

    let exact: Vec<ItemCandidate> = list
        .entries()
        .filter(|(_, item_key, _)| *item_key == query)
        .map(|(category_key, item_key, item)| ItemCandidate {
            category_key,
            item_key,
            item,
            score: 1.0,
        })
        .collect();

    if !exact.is_empty() {
        return exact;
    }

    let mut fuzzy: Vec<ItemCandidate> = list
        .entries()
        .map(|(category_key, item_key, item)| ItemCandidate {
            category_key,
            item_key,
            item,
            score: jaro_winkler(item_key, &query),
        })
        .filter(|c| c.score > FUZZY_MATCH_THRESHOLD)
        .collect();

    fuzzy.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    fuzzy
}

/// Prompt for every profile field, starting from `defaults`.
pub fn collect_profile(defaults: &UserProfile) -> Result<UserProfile> {
    let age: u32 = Input::new()
        .with_prompt("Age")
        .default(defaults.age)
        .validate_with(|v: &u32| if *v > 0 { Ok(()) } else { Err("Age must be positive") })
        .interact_text()?;

    let weight: f64 = Input::new()
        .with_prompt("Weight (kg)")
        .default(defaults.weight)
        .validate_with(|v: &f64| {
            if v.is_finite() && *v > 0.0 {
                Ok(())
            } else {
                Err("Weight must be positive")
            }
        })
        .interact_text()?;

    let height: f64 = Input::new()
        .with_prompt("Height (cm)")
        .default(defaults.height)
        .validate_with(|v: &f64| {
            if v.is_finite() && *v > 0.0 {
                Ok(())
            } else {
                Err("Height must be positive")
            }
        })
        .interact_text()?;

    let gender = select_option("Gender", &Gender::ALL, defaults.gender, Gender::as_str)?;
    let activity_level = select_option(
        "Activity level",
        &ActivityLevel::ALL,
        defaults.activity_level,
        ActivityLevel::as_str,
    )?;
    let goal = select_option("Goal", &Goal::ALL, defaults.goal, Goal::as_str)?;

    let dietary_restrictions: String = Input::new()
        .with_prompt("Dietary restrictions (optional)")
        .with_initial_text(defaults.dietary_restrictions.clone())
        .allow_empty(true)
        .interact_text()?;

    Ok(UserProfile {
        age,
        weight,
        height,
        gender,
        goal,
        activity_level,
        dietary_restrictions: dietary_restrictions.trim().to_string(),
        calculated_macros: None,
    })
}

fn select_option<T: Copy + PartialEq>(
    prompt: &str,
    options: &[T],
    current: T,
    label: fn(&T) -> &'static str,
) -> Result<T> {
    let labels: Vec<&str> = options.iter().map(label).collect();
    let default = options.iter().position(|o| *o == current).unwrap_or(0);

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(default)
        .interact()?;

    Ok(options[selection])
}

/// Prompt for the next screen.
pub fn prompt_view(has_plan: bool) -> Result<View> {
    let views: Vec<View> = View::MENU
        .into_iter()
        .filter(|v| has_plan || !matches!(v, View::MealPlan | View::Shopping))
        .collect();
    let titles: Vec<&str> = views.iter().map(View::title).collect();

    let selection = Select::new()
        .with_prompt("Where to next?")
        .items(&titles)
        .default(0)
        .interact()?;

    Ok(views[selection])
}

/// Ask which shopping-list line to check or uncheck.
pub fn prompt_checklist_toggle(list: &ShoppingList) -> Result<ChecklistAction> {
    let input: String = Input::new()
        .with_prompt("Item to check/uncheck (or press Enter to finish)")
        .allow_empty(true)
        .interact_text()?;

    if input.trim().is_empty() {
        return Ok(ChecklistAction::Done);
    }

    let candidates = find_item_candidates(list, &input);

    match candidates.as_slice() {
        [] => {
            println!("No matching item found for '{}'", input.trim());
            Ok(ChecklistAction::Skip)
        }
        [only] if only.score >= 1.0 => Ok(only.action()),
        [only] => {
            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}'?", only.item.name))
                .default(true)
                .interact()?;
            Ok(if confirm {
                only.action()
            } else {
                ChecklistAction::Skip
            })
        }
        many => {
            let shown = &many[..many.len().min(MAX_CANDIDATES)];
            let mut options: Vec<String> = shown.iter().map(ItemCandidate::describe).collect();
            options.push("None of these".to_string());

            let selection = Select::new()
                .with_prompt("Which did you mean?")
                .items(&options)
                .default(0)
                .interact()?;

            Ok(shown
                .get(selection)
                .map(ItemCandidate::action)
                .unwrap_or(ChecklistAction::Skip))
        }
    }
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayPlan, Ingredient, Macros, Meal, MealType, WeekPlan};
    use crate::shopping::consolidate;

    fn list() -> ShoppingList {
        let meal = Meal {
            id: String::new(),
            name: "Salada".to_string(),
            meal_type: MealType::Lunch,
            calories: 300.0,
            macros: Macros::default(),
            ingredients: vec![
                Ingredient::new("Tomato", "2 un", "Produce"),
                Ingredient::new("Tomato", "1 lata", "Canned"),
                Ingredient::new("Cucumber", "1 un", "Produce"),
                Ingredient::new("Olive oil", "1 colher", "Oils"),
            ],
            instructions: vec![],
            prep_time: "10 min".to_string(),
        };
        consolidate(&WeekPlan {
            id: "1".to_string(),
            title: "t".to_string(),
            days: vec![DayPlan {
                day: "Monday".to_string(),
                meals: vec![meal],
                total_macros: Macros::default(),
            }],
        })
    }

    #[test]
    fn test_exact_match_ignores_case() {
        let list = list();
        let found = find_item_candidates(&list, "  CUCUMBER ");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].category_key, "produce");
        assert_eq!(found[0].item_key, "cucumber");
    }

    #[test]
    fn test_exact_match_across_categories() {
        let list = list();
        let found = find_item_candidates(&list, "tomato");
        let categories: Vec<&str> = found.iter().map(|c| c.category_key).collect();
        assert_eq!(categories, vec!["produce", "canned"]);
    }

    #[test]
    fn test_fuzzy_match() {
        let list = list();
        let found = find_item_candidates(&list, "olive oill");
        assert!(!found.is_empty());
        assert_eq!(found[0].item_key, "olive oil");
        assert!(found[0].score < 1.0);
    }

    #[test]
    fn test_no_match() {
        let list = list();
        assert!(find_item_candidates(&list, "zzzz").is_empty());
        assert!(find_item_candidates(&list, "   ").is_empty());
    }
}
