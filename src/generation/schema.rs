//! Response schema for structured meal plan output.

use serde_json::json;

/// Structured-output schema describing `MealPlan`, in the OpenAPI subset the
/// Gemini API accepts for `responseSchema`.
pub fn meal_plan_schema() -> serde_json::Value {
    let string_list = json!({ "type": "ARRAY", "items": { "type": "STRING" } });

    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "caloriesTarget": { "type": "INTEGER" },
            "macros": {
                "type": "OBJECT",
                "properties": {
                    "protein": { "type": "STRING" },
                    "carbs": { "type": "STRING" },
                    "fats": { "type": "STRING" }
                },
                "required": ["protein", "carbs", "fats"]
            },
            "meals": {
                "type": "OBJECT",
                "properties": {
                    "breakfast": string_list,
                    "lunch": string_list,
                    "snack": string_list,
                    "dinner": string_list
                },
                "required": ["breakfast", "lunch", "snack", "dinner"]
            },
            "motivationalMessage": { "type": "STRING" }
        },
        "required": ["summary", "caloriesTarget", "macros", "meals", "motivationalMessage"]
    })
}
