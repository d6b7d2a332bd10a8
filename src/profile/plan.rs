//! Meal plan returned by the generation service.

use serde::{Deserialize, Serialize};

/// A one-day meal plan. Produced only by a successful generation call and
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    pub summary: String,
    pub calories_target: u32,
    pub macros: Macros,
    pub meals: Meals,
    pub motivational_message: String,
}

/// Macro split as free text; the service decides between percentages and
/// grams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Macros {
    pub protein: String,
    pub carbs: String,
    pub fats: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meals {
    pub breakfast: Vec<String>,
    pub lunch: Vec<String>,
    pub snack: Vec<String>,
    pub dinner: Vec<String>,
}

impl Meals {
    /// The four meals in serving order, paired with their section titles.
    pub fn sections(&self) -> [(&'static str, &[String]); 4] {
        [
            ("Café da Manhã", &self.breakfast),
            ("Almoço", &self.lunch),
            ("Lanche da Tarde", &self.snack),
            ("Jantar", &self.dinner),
        ]
    }
}
