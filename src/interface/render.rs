use crate::config::API_KEY_ENV;
use crate::models::{Macros, UserProfile, WeekPlan};
use crate::shopping::{Checklist, ShoppingList};

/// Width of rendered bars, in characters.
const BAR_WIDTH: usize = 30;

/// Text progress bar for a percentage in `[0, 100]`.
pub fn progress_bar(percent: f64, width: usize) -> String {
    let ratio = (percent / 100.0).clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

fn macro_line(macros: &Macros) -> String {
    format!(
        "P {:.0}g | C {:.0}g | F {:.0}g | {:.0} kcal",
        macros.protein, macros.carbs, macros.fats, macros.calories
    )
}

/// Persistent banner shown while no API key is configured.
pub fn display_api_key_warning() {
    println!();
    println!("!! No API key configured. Set {} to talk to the nutrition advisor,", API_KEY_ENV);
    println!("!! or run with --offline to use the built-in sample plan.");
    println!();
}

/// Display daily targets and plan status.
pub fn display_dashboard(profile: &UserProfile, has_plan: bool) {
    println!();
    println!("=== Dashboard ===");
    println!();

    let Some(macros) = profile.calculated_macros else {
        println!("No macro targets yet.");
        return;
    };

    println!("Daily target: {:.0} kcal", macros.calories);
    println!("Goal: {}", profile.goal.as_str().replace('_', " "));
    println!();

    let rows = [
        ("Protein", macros.protein),
        ("Carbs", macros.carbs),
        ("Fats", macros.fats),
    ];
    let max = rows.iter().map(|(_, v)| *v).fold(0.0, f64::max);

    for (name, value) in rows {
        let percent = if max > 0.0 { value / max * 100.0 } else { 0.0 };
        println!(
            "  {:<8} {} {:>5.0} g",
            name,
            progress_bar(percent, BAR_WIDTH),
            value
        );
    }

    println!();
    if has_plan {
        println!("Your meal plan is ready. Check the recipes and the shopping list.");
    } else {
        println!("Ready to plan your week? Generate a meal plan from the menu.");
    }
    println!();
}

/// Display every day and meal of a plan, fully expanded.
pub fn display_meal_plan(plan: &WeekPlan) {
    if plan.is_empty() {
        println!("The meal plan has no days.");
        return;
    }

    println!();
    println!("=== {} ===", plan.title);

    for day in &plan.days {
        println!();
        println!("--- {} ---  {}", day.day, macro_line(&day.total_macros));

        for meal in &day.meals {
            println!();
            println!(
                "  [{}] {} - {:.0} kcal, {}",
                meal.meal_type, meal.name, meal.calories, meal.prep_time
            );
            println!("      {}", macro_line(&meal.macros));

            if !meal.ingredients.is_empty() {
                println!("      Ingredients:");
                for ingredient in &meal.ingredients {
                    println!("        - {} ({})", ingredient.item, ingredient.amount);
                }
            }

            if !meal.instructions.is_empty() {
                println!("      Instructions:");
                for (i, step) in meal.instructions.iter().enumerate() {
                    println!("        {}. {}", i + 1, step);
                }
            }
        }
    }

    println!();
}

/// Display the consolidated shopping list with check marks and progress.
pub fn display_shopping_list(list: &ShoppingList, checklist: &Checklist) {
    if list.is_empty() {
        println!("The shopping list is empty.");
        return;
    }

    println!();
    println!("=== Shopping List ===");

    for group in list.categories() {
        println!();
        println!("{} ({})", group.label(), group.len());

        for (item_key, item) in group.items() {
            let mark = if checklist.is_checked(group.key(), item_key) {
                "x"
            } else {
                " "
            };
            println!("  [{}] {} - {}", mark, item.name, item.summary());
            println!("        For: {}", item.occurrences.join(", "));
        }
    }

    let percent = checklist.progress(list);
    println!();
    println!(
        "My basket {} {:.0}%  ({} of {} items)",
        progress_bar(percent, BAR_WIDTH),
        percent,
        checklist.checked_in(list),
        list.total_items()
    );
    println!();
}
