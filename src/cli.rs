use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// NutriPlanner: AI-generated weekly meal plans and consolidated shopping lists.
#[derive(Parser, Debug)]
#[command(name = "nutri_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive session: profile, macros, meal plan and shopping list.
    Session {
        /// Use the built-in sample advisor instead of the Gemini API.
        #[arg(long)]
        offline: bool,

        /// Export the generated plan to this JSON file.
        #[arg(long)]
        save_plan: Option<PathBuf>,
    },

    /// Print the consolidated shopping list of a saved plan.
    Shopping {
        /// Plan JSON file.
        #[arg(short, long)]
        plan: PathBuf,

        /// Also export the list as CSV.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Print a saved plan.
    Show {
        /// Plan JSON file.
        #[arg(short, long)]
        plan: PathBuf,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Session {
            offline: false,
            save_plan: None,
        }
    }
}
