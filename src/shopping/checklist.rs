use std::collections::HashMap;

use crate::shopping::consolidate::ShoppingList;

/// Checked/unchecked state of shopping-list lines for one session.
///
/// Keyed by (category key, item key). Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checklist {
    checked: HashMap<(String, String), bool>,
}

/// Display id of a line: `"<category key>-<item key>"`.
pub fn item_id(category_key: &str, item_key: &str) -> String {
    format!("{}-{}", category_key, item_key)
}

impl Checklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a line and return its new state.
    pub fn toggle(&mut self, category_key: &str, item_key: &str) -> bool {
        let flag = self
            .checked
            .entry((category_key.to_string(), item_key.to_string()))
            .or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn is_checked(&self, category_key: &str, item_key: &str) -> bool {
        self.checked
            .get(&(category_key.to_string(), item_key.to_string()))
            .copied()
            .unwrap_or(false)
    }

    /// Lines currently checked.
    pub fn checked_count(&self) -> usize {
        self.checked.values().filter(|&&v| v).count()
    }

    /// Checked lines that exist in `list`.
    pub fn checked_in(&self, list: &ShoppingList) -> usize {
        list.entries()
            .filter(|(category_key, item_key, _)| self.is_checked(category_key, item_key))
            .count()
    }

    pub fn clear(&mut self) {
        self.checked.clear();
    }

    /// Completion percentage against a shopping list, within `[0, 100]`.
    pub fn progress(&self, list: &ShoppingList) -> f64 {
        progress(self.checked_in(list), list.total_items())
    }
}

/// Percentage of checked lines; 0 when there are no lines.
pub fn progress(checked_count: usize, total_item_count: usize) -> f64 {
    if total_item_count == 0 {
        return 0.0;
    }
    checked_count as f64 * 100.0 / total_item_count as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::*;

    #[test]
    fn test_progress_zero_total() {
        assert_eq!(progress(0, 0), 0.0);
        assert_eq!(progress(3, 0), 0.0);
    }

    #[test]
    fn test_progress_percentage() {
        assert_float_absolute_eq!(progress(1, 4), 25.0);
        assert_float_absolute_eq!(progress(1, 3), 33.333, 0.001);
        assert_float_absolute_eq!(progress(5, 5), 100.0);
    }

    #[test]
    fn test_toggle_flips_state() {
        let mut checklist = Checklist::new();
        assert!(!checklist.is_checked("grains", "rice"));

        assert!(checklist.toggle("grains", "rice"));
        assert!(checklist.is_checked("grains", "rice"));
        assert_eq!(checklist.checked_count(), 1);

        assert!(!checklist.toggle("grains", "rice"));
        assert!(!checklist.is_checked("grains", "rice"));
        assert_eq!(checklist.checked_count(), 0);
    }

    #[test]
    fn test_item_id_format() {
        assert_eq!(item_id("dairy", "greek yogurt"), "dairy-greek yogurt");
    }

    #[test]
    fn test_progress_against_empty_list() {
        let mut checklist = Checklist::new();
        checklist.toggle("grains", "rice");
        assert_eq!(checklist.progress(&ShoppingList::default()), 0.0);
    }

    #[test]
    fn test_hyphenated_keys_do_not_collide() {
        let mut checklist = Checklist::new();
        checklist.toggle("a-b", "c");

        assert_eq!(item_id("a-b", "c"), item_id("a", "b-c"));
        assert!(checklist.is_checked("a-b", "c"));
        assert!(!checklist.is_checked("a", "b-c"));
        assert_eq!(checklist.checked_count(), 1);
    }
}
