use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::models::WeekPlan;

/// Load a week plan previously exported with [`save_plan`].
pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<WeekPlan> {
    let content = fs::read_to_string(&path)?;
    let plan: WeekPlan = serde_json::from_str(&content)?;
    debug!(path = %path.as_ref().display(), days = plan.days.len(), "Loaded plan");
    Ok(plan)
}

/// Export a week plan as pretty-printed JSON.
pub fn save_plan<P: AsRef<Path>>(path: P, plan: &WeekPlan) -> Result<()> {
    let json = serde_json::to_string_pretty(plan)?;
    fs::write(&path, json)?;
    debug!(path = %path.as_ref().display(), "Saved plan");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::canned::sample_week_plan;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_save_and_load() {
        let plan = sample_week_plan();
        let file = NamedTempFile::new().unwrap();

        save_plan(file.path(), &plan).unwrap();
        let reloaded = load_plan(file.path()).unwrap();
        assert_eq!(reloaded, plan);
    }

    #[test]
    fn test_load_rejects_malformed_plan() {
        let json = r#"{"id": "1", "title": "Semana", "days": [{"day": "Segunda", "meals": [{"name": "x"}]}]}"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        assert!(load_plan(file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_plan("/nonexistent/plan.json").is_err());
    }
}
