use serde::{Deserialize, Serialize};

// --- request side ---

/// Raw wire shape for POST /plan/analyze. Loose on purpose: validation turns
/// it into a `PlanRequest` or a field-level issue list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub plan_text: Option<String>,
    #[serde(default)]
    pub macros: Option<MacroInput>,
    #[serde(default)]
    pub details: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MacroInput {
    #[serde(default)]
    pub calories: Option<i64>,
    #[serde(default)]
    pub protein: Option<i64>,
    #[serde(default)]
    pub carbs: Option<i64>,
    #[serde(default)]
    pub fats: Option<i64>,
}

/// Daily macro targets as the caller stated them (request uses `fats`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroTargets {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fats: u32,
}

/// Validated input. Structured macros win when both modes are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanRequest {
    Text(String),
    Macros { targets: MacroTargets, details: String },
}

impl AnalyzeRequest {
    pub fn validate(self) -> Result<PlanRequest, Vec<String>> {
        if let Some(macros) = self.macros {
            let mut issues = Vec::new();
            let calories = check_macro("calories", macros.calories, &mut issues);
            let protein = check_macro("protein", macros.protein, &mut issues);
            let carbs = check_macro("carbs", macros.carbs, &mut issues);
            let fats = check_macro("fats", macros.fats, &mut issues);
            if !issues.is_empty() {
                return Err(issues);
            }
            let details = self
                .details
                .map(|d| d.trim().to_string())
                .unwrap_or_default();
            Ok(PlanRequest::Macros {
                targets: MacroTargets { calories, protein, carbs, fats },
                details,
            })
        } else if let Some(text) = self.plan_text {
            let trimmed = text.trim();
            if trimmed.chars().count() < 5 {
                Err(vec!["planText must be at least 5 characters".into()])
            } else {
                Ok(PlanRequest::Text(trimmed.to_string()))
            }
        } else {
            Err(vec!["either planText or macros is required".into()])
        }
    }
}

fn check_macro(name: &str, value: Option<i64>, issues: &mut Vec<String>) -> u32 {
    match value {
        None => {
            issues.push(format!("macros.{name} is required"));
            0
        }
        Some(n) if n < 0 => {
            issues.push(format!("macros.{name} must be non-negative"));
            0
        }
        Some(n) => match u32::try_from(n) {
            Ok(v) => v,
            Err(_) => {
                issues.push(format!("macros.{name} is out of range"));
                0
            }
        },
    }
}

// --- response side ---

const MAX_NAME: usize = 60;
const MAX_DESCRIPTION: usize = 120;
const MAX_PORTION: usize = 160;
const MAX_SWAP: usize = 80;
const MAX_SWAPS: usize = 2;
const MAX_NOTES: usize = 200;
pub const MEALS_PER_PLAN: usize = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanResponse {
    pub assumptions: Assumptions,
    pub daily_targets: MacroTotals,
    pub meals: Vec<Meal>,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assumptions {
    pub meals_per_day: u8,
    pub notes: String,
}

/// Response-side macros (response uses `fat`, numbers not integers).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub name: String,
    pub meal_type: MealType,
    pub description: String,
    pub portion_guidance: String,
    pub estimated_macros: MacroTotals,
    #[serde(default)]
    pub swap_options: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

impl MealPlanResponse {
    /// Re-checks the provider contract locally before the plan is relayed.
    /// Extra keys were already rejected by the provider-side strict schema.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut issues = Vec::new();

        if !(1..=8).contains(&self.assumptions.meals_per_day) {
            issues.push("assumptions.mealsPerDay must be between 1 and 8".into());
        }
        check_len("assumptions.notes", &self.assumptions.notes, MAX_NOTES, &mut issues);
        check_len("notes", &self.notes, MAX_NOTES, &mut issues);
        check_totals("dailyTargets", &self.daily_targets, &mut issues);

        if self.meals.len() != MEALS_PER_PLAN {
            issues.push(format!(
                "meals must contain exactly {} entries, got {}",
                MEALS_PER_PLAN,
                self.meals.len()
            ));
        }
        for kind in MealType::ALL {
            let count = self.meals.iter().filter(|m| m.meal_type == kind).count();
            if count != 1 {
                issues.push(format!(
                    "meals must contain exactly one {}, got {}",
                    kind.as_str(),
                    count
                ));
            }
        }

        for (i, meal) in self.meals.iter().enumerate() {
            let field = |name: &str| format!("meals[{i}].{name}");
            check_len(&field("name"), &meal.name, MAX_NAME, &mut issues);
            check_len(&field("description"), &meal.description, MAX_DESCRIPTION, &mut issues);
            check_len(&field("portionGuidance"), &meal.portion_guidance, MAX_PORTION, &mut issues);
            check_totals(&field("estimatedMacros"), &meal.estimated_macros, &mut issues);
            if meal.swap_options.len() > MAX_SWAPS {
                issues.push(format!(
                    "{} must have at most {} entries",
                    field("swapOptions"),
                    MAX_SWAPS
                ));
            }
            for (j, swap) in meal.swap_options.iter().enumerate() {
                check_len(&field(&format!("swapOptions[{j}]")), swap, MAX_SWAP, &mut issues);
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}

fn check_len(field: &str, value: &str, max: usize, issues: &mut Vec<String>) {
    if value.chars().count() > max {
        issues.push(format!("{field} must be at most {max} characters"));
    }
}

fn check_totals(field: &str, totals: &MacroTotals, issues: &mut Vec<String>) {
    for (name, value) in [
        ("calories", totals.calories),
        ("protein", totals.protein),
        ("carbs", totals.carbs),
        ("fat", totals.fat),
    ] {
        if !value.is_finite() || value < 0.0 {
            issues.push(format!("{field}.{name} must be a non-negative number"));
        }
    }
}


#[cfg(test)]
mod response_tests {
    use super::*;
    use serde_json::json;

    fn meal(meal_type: &str) -> serde_json::Value {
        json!({
            "name": "Meal",
            "mealType": meal_type,
            "description": "A meal.",
            "portionGuidance": "One serving.",
            "estimatedMacros": { "calories": 500, "protein": 30, "carbs": 50, "fat": 15 },
            "swapOptions": []
        })
    }

    fn plan_with_meals(meals: Vec<serde_json::Value>) -> serde_json::Value {
        json!({
            "assumptions": { "mealsPerDay": 4, "notes": "ok" },
            "dailyTargets": { "calories": 2000, "protein": 150, "carbs": 200, "fat": 70 },
            "meals": meals,
            "notes": "ok"
        })
    }

    #[test]
    fn valid_plan_passes() {
        let plan: MealPlanResponse = serde_json::from_value(plan_with_meals(vec![
            meal("breakfast"),
            meal("lunch"),
            meal("dinner"),
            meal("snack"),
        ]))
        .unwrap();
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn three_meals_fail() {
        let plan: MealPlanResponse = serde_json::from_value(plan_with_meals(vec![
            meal("breakfast"),
            meal("lunch"),
            meal("dinner"),
        ]))
        .unwrap();
        let issues = plan.validate().unwrap_err();
        assert!(issues.iter().any(|i| i.contains("exactly 4 entries")));
    }

    #[test]
    fn duplicate_meal_types_fail() {
        let plan: MealPlanResponse = serde_json::from_value(plan_with_meals(vec![
            meal("breakfast"),
            meal("breakfast"),
            meal("dinner"),
            meal("snack"),
        ]))
        .unwrap();
        let issues = plan.validate().unwrap_err();
        assert!(issues.iter().any(|i| i.contains("exactly one lunch")));
    }

    #[test]
    fn unknown_meal_type_fails_to_deserialize() {
        let result: Result<MealPlanResponse, _> =
            serde_json::from_value(plan_with_meals(vec![
                meal("brunch"),
                meal("lunch"),
                meal("dinner"),
                meal("snack"),
            ]));
        assert!(result.is_err());
    }

    #[test]
    fn over_long_fields_are_reported() {
        let mut long_meal = meal("breakfast");
        long_meal["name"] = json!("x".repeat(61));
        let plan: MealPlanResponse = serde_json::from_value(plan_with_meals(vec![
            long_meal,
            meal("lunch"),
            meal("dinner"),
            meal("snack"),
        ]))
        .unwrap();
        let issues = plan.validate().unwrap_err();
        assert!(issues.iter().any(|i| i.contains("meals[0].name")));
    }

    #[test]
    fn negative_macros_are_reported() {
        let mut bad = meal("snack");
        bad["estimatedMacros"]["fat"] = json!(-1.0);
        let plan: MealPlanResponse = serde_json::from_value(plan_with_meals(vec![
            meal("breakfast"),
            meal("lunch"),
            meal("dinner"),
            bad,
        ]))
        .unwrap();
        let issues = plan.validate().unwrap_err();
        assert!(issues.iter().any(|i| i.contains("meals[3].estimatedMacros.fat")));
    }

    #[test]
    fn meals_per_day_out_of_range_fails() {
        let mut value = plan_with_meals(vec![
            meal("breakfast"),
            meal("lunch"),
            meal("dinner"),
            meal("snack"),
        ]);
        value["assumptions"]["mealsPerDay"] = json!(9);
        let plan: MealPlanResponse = serde_json::from_value(value).unwrap();
        assert!(plan.validate().is_err());
    }

    #[test]
    fn too_many_swap_options_fail() {
        let mut bad = meal("lunch");
        bad["swapOptions"] = json!(["a", "b", "c"]);
        let plan: MealPlanResponse = serde_json::from_value(plan_with_meals(vec![
            meal("breakfast"),
            bad,
            meal("dinner"),
            meal("snack"),
        ]))
        .unwrap();
        let issues = plan.validate().unwrap_err();
        assert!(issues.iter().any(|i| i.contains("meals[1].swapOptions")));
    }
}
