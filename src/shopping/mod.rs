pub mod categories;
pub mod checklist;
pub mod consolidate;
pub mod export;

pub use categories::{translate_category, CATEGORY_LABELS};
pub use checklist::{item_id, progress, Checklist};
pub use consolidate::{
    consolidate, normalize_key, occurrence_label, short_day_label, summarize_amounts,
    CategoryGroup, GroupedItem, ShoppingList,
};
pub use export::{save_csv, write_csv};
