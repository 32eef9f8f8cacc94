pub mod prompts;
pub mod render;

pub use prompts::{
    collect_profile, find_item_candidates, prompt_checklist_toggle, prompt_view, prompt_yes_no,
    ChecklistAction, ItemCandidate, View,
};
pub use render::{
    display_api_key_warning, display_dashboard, display_meal_plan, display_shopping_list,
    progress_bar,
};
