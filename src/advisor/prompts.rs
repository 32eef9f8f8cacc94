//! Prompts and response schemas sent to the nutrition advisor.
//!
//! Schemas use Gemini's OpenAPI subset (upper-case type names).

use serde_json::{json, Value};

use crate::models::{MealType, UserProfile};

/// Calorie target used when the profile has no calculated macros yet.
pub const DEFAULT_TARGET_CALORIES: f64 = 2000.0;

const NO_RESTRICTIONS: &str = "Nenhuma";

/// Wire labels of the meal types, in schema order.
pub fn meal_type_labels() -> Vec<&'static str> {
    MealType::ALL.iter().map(MealType::as_str).collect()
}

/// Prompt asking for daily macro targets and a short piece of advice.
pub fn macro_prompt(profile: &UserProfile) -> String {
    format!(
        "Calcule as macros diárias ideais (proteína, carboidratos, gorduras, calorias totais) para esta pessoa:\n\
         Idade: {}\n\
         Peso: {}kg\n\
         Altura: {}cm\n\
         Gênero: {}\n\
         Nível de Atividade: {}\n\
         Objetivo: {}\n\
         Restrições: {}\n\
         \n\
         Forneça também um conselho curto (advice) motivacional e nutricional em português.",
        profile.age,
        profile.weight,
        profile.height,
        profile.gender,
        profile.activity_level,
        profile.goal,
        profile.restrictions().unwrap_or(NO_RESTRICTIONS),
    )
}

/// Prompt asking for a seven-day plan starting on Monday.
pub fn week_plan_prompt(profile: &UserProfile) -> String {
    let target = profile
        .calculated_macros
        .map(|m| m.calories)
        .filter(|&c| c > 0.0)
        .unwrap_or(DEFAULT_TARGET_CALORIES);

    format!(
        "Crie um cardápio semanal completo (7 dias, começando segunda-feira) em Português para uma pessoa com o seguinte perfil:\n\
         Calorias Alvo: {}\n\
         Objetivo: {}\n\
         Restrições Alimentares: {}\n\
         \n\
         Cada dia deve ter {}.\n\
         As receitas devem ser saudáveis, práticas e \"fitness\".\n\
         \n\
         A resposta deve seguir estritamente o schema JSON fornecido.",
        target,
        profile.goal,
        profile.restrictions().unwrap_or(NO_RESTRICTIONS),
        meal_type_labels().join(", "),
    )
}

fn macros_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "protein": { "type": "NUMBER" },
            "carbs": { "type": "NUMBER" },
            "fats": { "type": "NUMBER" },
            "calories": { "type": "NUMBER" }
        },
        "required": ["protein", "carbs", "fats", "calories"]
    })
}

/// Schema of the macro calculation response.
pub fn macro_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "macros": macros_schema(),
            "advice": { "type": "STRING" }
        },
        "required": ["macros", "advice"]
    })
}

/// Schema of the week plan response.
pub fn week_plan_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "days": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "day": { "type": "STRING", "description": "Day of week in Portuguese" },
                        "totalMacros": macros_schema(),
                        "meals": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "id": { "type": "STRING" },
                                    "name": { "type": "STRING" },
                                    "type": { "type": "STRING", "enum": meal_type_labels() },
                                    "calories": { "type": "NUMBER" },
                                    "macros": macros_schema(),
                                    "prepTime": { "type": "STRING" },
                                    "instructions": {
                                        "type": "ARRAY",
                                        "items": { "type": "STRING" }
                                    },
                                    "ingredients": {
                                        "type": "ARRAY",
                                        "items": {
                                            "type": "OBJECT",
                                            "properties": {
                                                "item": { "type": "STRING" },
                                                "amount": { "type": "STRING" },
                                                "category": {
                                                    "type": "STRING",
                                                    "description": "Produce, Dairy, Meat, Pantry, etc."
                                                }
                                            },
                                            "required": ["item", "amount", "category"]
                                        }
                                    }
                                },
                                "required": ["name", "type", "calories", "macros", "ingredients", "instructions", "prepTime"]
                            }
                        }
                    },
                    "required": ["day", "meals", "totalMacros"]
                }
            }
        },
        "required": ["title", "days"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Macros;

    #[test]
    fn test_macro_prompt_defaults_restrictions() {
        let prompt = macro_prompt(&UserProfile::default());
        assert!(prompt.contains("Idade: 30"));
        assert!(prompt.contains("Peso: 70kg"));
        assert!(prompt.contains("Nível de Atividade: moderate"));
        assert!(prompt.contains("Objetivo: lose_weight"));
        assert!(prompt.contains("Restrições: Nenhuma"));
    }

    #[test]
    fn test_week_plan_prompt_uses_calculated_calories() {
        let mut profile = UserProfile::default();
        assert!(week_plan_prompt(&profile).contains("Calorias Alvo: 2000"));

        profile.calculated_macros = Some(Macros::new(140.0, 180.0, 55.0, 1750.0));
        profile.dietary_restrictions = "sem lactose".to_string();
        let prompt = week_plan_prompt(&profile);
        assert!(prompt.contains("Calorias Alvo: 1750"));
        assert!(prompt.contains("Restrições Alimentares: sem lactose"));
        assert!(prompt.contains("Breakfast, Lunch, Snack, Dinner"));
    }

    #[test]
    fn test_week_plan_schema_enumerates_meal_types() {
        let schema = week_plan_schema();
        let meal = &schema["properties"]["days"]["items"]["properties"]["meals"]["items"];
        assert_eq!(
            meal["properties"]["type"]["enum"],
            json!(["Breakfast", "Lunch", "Snack", "Dinner"])
        );
        assert!(meal["required"]
            .as_array()
            .unwrap()
            .contains(&json!("ingredients")));
    }
}
