use super::dto::PlanRequest;

/// Fixed instruction set for the planner model. Kept as data so tuning never
/// touches the pipeline code.
pub const SYSTEM_PROMPT: &str = "\
You are a meal-planning assistant. Build a one-day meal plan from the user's \
macro or diet description.

Rules:
- Prefer whole foods; every meal must be preparable in 30 minutes or less.
- Return exactly four meals: one breakfast, one lunch, one dinner, one snack.
- Keep every string concise; descriptions are a single sentence.
- When inputs are incomplete, make reasonable assumptions and document them \
in the assumptions field.
- Output JSON only, conforming exactly to the provided schema.
- Never make medical claims or give medical advice.";

/// Renders the validated request into the single user prompt string.
/// Deterministic; structured input uses a fixed field order.
pub fn user_prompt(request: &PlanRequest) -> String {
    match request {
        PlanRequest::Text(text) => text.clone(),
        PlanRequest::Macros { targets, details } => {
            let details = if details.is_empty() { "none" } else { details };
            format!(
                "Daily macro targets:\nCalories: {}\nProtein: {}g\nCarbs: {}g\nFat: {}g\nDetails: {}",
                targets.calories, targets.protein, targets.carbs, targets.fats, details
            )
        }
    }
}
