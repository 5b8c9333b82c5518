use serde_json::{json, Value};

pub const SCHEMA_NAME: &str = "meal_plan";

/// JSON Schema handed to the provider as the output contract. Mirrors the
/// serde types in `dto.rs`; `dto::MealPlanResponse::validate` re-checks the
/// same constraints on whatever comes back.
pub fn meal_plan_schema() -> Value {
    json!({
        "type": "object",
        "additionalProperties": false,
        "required": ["assumptions", "dailyTargets", "meals", "notes"],
        "properties": {
            "assumptions": {
                "type": "object",
                "additionalProperties": false,
                "required": ["mealsPerDay", "notes"],
                "properties": {
                    "mealsPerDay": { "type": "integer", "minimum": 1, "maximum": 8 },
                    "notes": { "type": "string", "maxLength": 200 }
                }
            },
            "dailyTargets": macro_totals_schema(),
            "meals": {
                "type": "array",
                "minItems": 4,
                "maxItems": 4,
                "items": {
                    "type": "object",
                    "additionalProperties": false,
                    "required": [
                        "name", "mealType", "description",
                        "portionGuidance", "estimatedMacros", "swapOptions"
                    ],
                    "properties": {
                        "name": { "type": "string", "maxLength": 60 },
                        "mealType": {
                            "type": "string",
                            "enum": ["breakfast", "lunch", "dinner", "snack"]
                        },
                        "description": { "type": "string", "maxLength": 120 },
                        "portionGuidance": { "type": "string", "maxLength": 160 },
                        "estimatedMacros": macro_totals_schema(),
                        "swapOptions": {
                            "type": "array",
                            "maxItems": 2,
                            "items": { "type": "string", "maxLength": 80 }
                        }
                    }
                }
            },
            "notes": { "type": "string", "maxLength": 200 }
        }
    })
}

fn macro_totals_schema() -> Value {
    json!({
        "type": "object",
        "additionalProperties": false,
        "required": ["calories", "protein", "carbs", "fat"],
        "properties": {
            "calories": { "type": "number", "minimum": 0 },
            "protein": { "type": "number", "minimum": 0 },
            "carbs": { "type": "number", "minimum": 0 },
            "fat": { "type": "number", "minimum": 0 }
        }
    })
}
