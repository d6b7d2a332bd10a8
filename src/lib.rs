//! NutriPlan: questionnaire-driven meal plan generator.

pub mod app;
pub mod config;
pub mod error;
pub mod generation;
pub mod profile;
pub mod quiz;
pub mod terminal;
pub mod view;
