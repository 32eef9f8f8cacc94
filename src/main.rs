use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use nutri_planner_rs::advisor::{CannedAdvisor, GeminiAdvisor, NutritionAdvisor};
use nutri_planner_rs::cli::{Cli, Command};
use nutri_planner_rs::config::AppConfig;
use nutri_planner_rs::error::Result;
use nutri_planner_rs::interface::{
    collect_profile, display_api_key_warning, display_dashboard, display_meal_plan,
    display_shopping_list, prompt_checklist_toggle, prompt_view, prompt_yes_no, ChecklistAction,
    View,
};
use nutri_planner_rs::models::UserProfile;
use nutri_planner_rs::shopping::{consolidate, save_csv, Checklist};
use nutri_planner_rs::state::{load_plan, save_plan, Session};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or_default() {
        Command::Session { offline, save_plan } => cmd_session(offline, save_plan.as_deref()),
        Command::Shopping { plan, csv } => cmd_shopping(&plan, csv),
        Command::Show { plan } => cmd_show(&plan),
    }
}

/// Pick the advisor for an interactive session.
///
/// Returns `None` when there is no key and the user declines the sample plan.
fn select_advisor(offline: bool) -> Result<Option<Box<dyn NutritionAdvisor>>> {
    if offline {
        return Ok(Some(Box::new(CannedAdvisor::default())));
    }

    let config = AppConfig::from_env();
    if config.has_api_key() {
        let advisor = GeminiAdvisor::from_config(&config)?;
        info!(model = advisor.model(), "Using Gemini advisor");
        return Ok(Some(Box::new(advisor)));
    }

    warn!("No API key configured");
    display_api_key_warning();
    if prompt_yes_no("Continue with the built-in sample advisor?", true)? {
        Ok(Some(Box::new(CannedAdvisor::default())))
    } else {
        Ok(None)
    }
}

/// Run the interactive planning session.
fn cmd_session(offline: bool, save_plan_path: Option<&Path>) -> Result<()> {
    let Some(boxed) = select_advisor(offline)? else {
        return Ok(());
    };
    let advisor: &dyn NutritionAdvisor = boxed.as_ref();

    let mut session = Session::new();
    let mut view = View::Setup;

    loop {
        view = match view {
            View::Setup => setup_profile(&mut session, advisor)?,
            View::Dashboard => show_dashboard(&mut session, advisor, save_plan_path)?,
            View::MealPlan => {
                if let Some(plan) = session.plan() {
                    display_meal_plan(plan);
                }
                prompt_view(session.has_plan())?
            }
            View::Shopping => {
                run_checklist(&mut session)?;
                prompt_view(session.has_plan())?
            }
            View::Quit => break,
        };
    }

    Ok(())
}

fn setup_profile(session: &mut Session, advisor: &dyn NutritionAdvisor) -> Result<View> {
    loop {
        let defaults = session.profile().cloned().unwrap_or_default();
        let profile: UserProfile = collect_profile(&defaults)?;

        println!("Calculating your macros...");
        match session.calculate_profile(advisor, profile) {
            Ok(advice) => {
                println!();
                println!("{}", advice);
                return Ok(View::Dashboard);
            }
            Err(e) => {
                eprintln!("Could not calculate macros: {}", e);
                if !prompt_yes_no("Try again?", true)? {
                    return Ok(if session.profile().is_some() {
                        View::Dashboard
                    } else {
                        View::Quit
                    });
                }
            }
        }
    }
}

fn show_dashboard(
    session: &mut Session,
    advisor: &dyn NutritionAdvisor,
    save_plan_path: Option<&Path>,
) -> Result<View> {
    if let Some(profile) = session.profile() {
        display_dashboard(profile, session.has_plan());
    }

    if !session.has_plan() && prompt_yes_no("Generate your meal plan now?", true)? {
        println!("Generating your week... this can take a minute.");
        match session.generate_plan(advisor) {
            Ok(plan) => {
                if let Some(path) = save_plan_path {
                    save_plan(path, plan)?;
                    println!("Plan saved to {}", path.display());
                }
                return Ok(View::MealPlan);
            }
            Err(e) => eprintln!("Error generating the meal plan, please try again: {}", e),
        }
    }

    prompt_view(session.has_plan())
}

fn run_checklist(session: &mut Session) -> Result<()> {
    let list = session.shopping_list()?;

    loop {
        display_shopping_list(&list, session.checklist());

        match prompt_checklist_toggle(&list)? {
            ChecklistAction::Toggle {
                category_key,
                item_key,
            } => {
                session.toggle_item(&category_key, &item_key)?;
            }
            ChecklistAction::Skip => {}
            ChecklistAction::Done => return Ok(()),
        }
    }
}

/// Print (and optionally export) the shopping list of a saved plan.
fn cmd_shopping(plan_path: &Path, csv_path: Option<PathBuf>) -> Result<()> {
    let plan = load_plan(plan_path)?;
    let list = consolidate(&plan);
    let checklist = Checklist::new();

    display_shopping_list(&list, &checklist);

    if let Some(path) = csv_path {
        save_csv(&list, &checklist, &path)?;
        println!("Shopping list exported to {}", path.display());
    }

    Ok(())
}

/// Print a saved plan.
fn cmd_show(plan_path: &Path) -> Result<()> {
    let plan = load_plan(plan_path)?;
    display_meal_plan(&plan);
    Ok(())
}
