//! Profile and plan data shapes.

pub mod model;
pub mod plan;

pub use model::{
    ActivityLevel, DietQuality, Gender, MealFrequency, Objective, Restriction, Routine, UserProfile,
};
pub use plan::{Macros, MealPlan, Meals};
