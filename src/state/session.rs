use tracing::{info, warn};

use crate::advisor::NutritionAdvisor;
use crate::error::{NutriError, Result};
use crate::models::{UserProfile, WeekPlan};
use crate::shopping::{consolidate, item_id, Checklist, ShoppingList};

/// In-memory state of one planning session.
///
/// Nothing here outlives the process unless a plan is exported explicitly.
#[derive(Debug, Default)]
pub struct Session {
    profile: Option<UserProfile>,
    plan: Option<WeekPlan>,
    checklist: Checklist,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session resuming from an already generated plan.
    pub fn with_plan(plan: WeekPlan) -> Self {
        Self {
            plan: Some(plan),
            ..Self::default()
        }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn plan(&self) -> Option<&WeekPlan> {
        self.plan.as_ref()
    }

    pub fn checklist(&self) -> &Checklist {
        &self.checklist
    }

    pub fn has_plan(&self) -> bool {
        self.plan.is_some()
    }

    /// Validate a profile, ask the advisor for its macros and store it.
    ///
    /// Returns the advice text. The previous profile survives a failure.
    pub fn calculate_profile(
        &mut self,
        advisor: &dyn NutritionAdvisor,
        mut profile: UserProfile,
    ) -> Result<String> {
        profile.validate()?;
        let result = advisor.calculate_macros(&profile)?;

        profile.calculated_macros = Some(result.macros);
        info!(calories = result.macros.calories, "Profile updated");
        self.profile = Some(profile);
        Ok(result.advice)
    }

    /// Generate a new week plan for the current profile.
    ///
    /// On success the plan is replaced and the checklist cleared; on failure
    /// nothing is committed.
    pub fn generate_plan(&mut self, advisor: &dyn NutritionAdvisor) -> Result<&WeekPlan> {
        let profile = self.profile.as_ref().ok_or(NutriError::MissingProfile)?;

        match advisor.generate_week_plan(profile) {
            Ok(plan) => {
                self.checklist.clear();
                Ok(self.plan.insert(plan))
            }
            Err(e) => {
                warn!(error = %e, "Plan generation failed; keeping previous state");
                Err(e)
            }
        }
    }

    /// Consolidated shopping list of the current plan.
    pub fn shopping_list(&self) -> Result<ShoppingList> {
        self.plan
            .as_ref()
            .map(consolidate)
            .ok_or(NutriError::MissingPlan)
    }

    /// Flip one shopping-list line and return its new state.
    ///
    /// Only lines of the current list can be toggled.
    pub fn toggle_item(&mut self, category_key: &str, item_key: &str) -> Result<bool> {
        let list = self.shopping_list()?;
        if list.item(category_key, item_key).is_none() {
            return Err(NutriError::InvalidInput(format!(
                "'{}' is not on the shopping list",
                item_id(category_key, item_key)
            )));
        }
        Ok(self.checklist.toggle(category_key, item_key))
    }

    /// Shopping progress in percent; 0 without a plan.
    pub fn progress(&self) -> f64 {
        match &self.plan {
            Some(plan) => self.checklist.progress(&consolidate(plan)),
            None => 0.0,
        }
    }
}
