//! Partial profile accumulated while the quiz runs, and the per-field
//! validity predicates.

use crate::error::QuizError;
use crate::profile::{
    ActivityLevel, DietQuality, Gender, MealFrequency, Objective, Restriction, Routine, UserProfile,
};

use super::step::{Answer, Field, NumericField};

/// Exclusive bounds, in years.
pub const AGE_BOUNDS: (u32, u32) = (10, 120);
/// Exclusive bounds, in centimetres.
pub const HEIGHT_BOUNDS: (f64, f64) = (50.0, 300.0);
/// Exclusive bounds, in kilograms.
pub const WEIGHT_BOUNDS: (f64, f64) = (20.0, 500.0);

pub fn valid_age(age: u32) -> bool {
    age > AGE_BOUNDS.0 && age < AGE_BOUNDS.1
}

pub fn valid_height(height: f64) -> bool {
    height > HEIGHT_BOUNDS.0 && height < HEIGHT_BOUNDS.1
}

pub fn valid_weight(weight: f64) -> bool {
    weight > WEIGHT_BOUNDS.0 && weight < WEIGHT_BOUNDS.1
}

/// Answers given so far. A field is `None` until answered; each field holds
/// at most one value and a new answer overwrites the old one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDraft {
    pub objective: Option<Objective>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub routine: Option<Routine>,
    pub activity_level: Option<ActivityLevel>,
    pub diet_quality: Option<DietQuality>,
    pub restriction: Option<Restriction>,
    pub meal_frequency: Option<MealFrequency>,
}

impl ProfileDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a single-choice answer.
    pub fn record(&mut self, answer: Answer) {
        match answer {
            Answer::Objective(v) => self.objective = Some(v),
            Answer::Gender(v) => self.gender = Some(v),
            Answer::Routine(v) => self.routine = Some(v),
            Answer::ActivityLevel(v) => self.activity_level = Some(v),
            Answer::DietQuality(v) => self.diet_quality = Some(v),
            Answer::Restriction(v) => self.restriction = Some(v),
            Answer::MealFrequency(v) => self.meal_frequency = Some(v),
        }
    }

    /// Parse and record a typed number. Input that does not parse (or, for
    /// age, is not a whole number) clears the field.
    pub fn set_numeric(&mut self, field: NumericField, raw: &str) {
        let value = parse_number(raw);
        match field {
            NumericField::Age => self.age = value.and_then(whole_number),
            NumericField::Height => self.height = value,
            NumericField::Weight => self.weight = value,
        }
    }

    pub fn is_answered(&self, field: Field) -> bool {
        match field {
            Field::Objective => self.objective.is_some(),
            Field::Age => self.age.is_some(),
            Field::Gender => self.gender.is_some(),
            Field::Height => self.height.is_some(),
            Field::Weight => self.weight.is_some(),
            Field::Routine => self.routine.is_some(),
            Field::ActivityLevel => self.activity_level.is_some(),
            Field::DietQuality => self.diet_quality.is_some(),
            Field::Restriction => self.restriction.is_some(),
            Field::MealFrequency => self.meal_frequency.is_some(),
        }
    }

    /// Field-level validity: present, and inside the exclusive range for the
    /// numeric fields.
    pub fn is_valid(&self, field: Field) -> bool {
        match field {
            Field::Age => self.age.is_some_and(valid_age),
            Field::Height => self.height.is_some_and(valid_height),
            Field::Weight => self.weight.is_some_and(valid_weight),
            other => self.is_answered(other),
        }
    }

    pub fn invalid_fields(&self) -> Vec<Field> {
        Field::ORDER
            .into_iter()
            .filter(|f| !self.is_valid(*f))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        Field::ORDER.iter().all(|f| self.is_valid(*f))
    }

    /// Freeze the draft into a profile. Fails with every invalid field when
    /// any predicate does not hold.
    pub fn finalize(&self) -> Result<UserProfile, QuizError> {
        let incomplete = || QuizError::IncompleteProfile {
            fields: self
                .invalid_fields()
                .iter()
                .map(ToString::to_string)
                .collect(),
        };

        if !self.is_complete() {
            return Err(incomplete());
        }

        Ok(UserProfile {
            objective: self.objective.ok_or_else(incomplete)?,
            age: self.age.ok_or_else(incomplete)?,
            gender: self.gender.ok_or_else(incomplete)?,
            height: self.height.ok_or_else(incomplete)?,
            weight: self.weight.ok_or_else(incomplete)?,
            routine: self.routine.ok_or_else(incomplete)?,
            activity_level: self.activity_level.ok_or_else(incomplete)?,
            diet_quality: self.diet_quality.ok_or_else(incomplete)?,
            restriction: self.restriction.ok_or_else(incomplete)?,
            meal_frequency: self.meal_frequency.ok_or_else(incomplete)?,
        })
    }
}

/// Lenient number parsing for typed input: surrounding whitespace is
/// ignored and a comma is accepted as the decimal separator.
fn parse_number(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn whole_number(value: f64) -> Option<u32> {
    if value.fract() == 0.0 && value >= 0.0 && value <= f64::from(u32::MAX) {
        Some(value as u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> ProfileDraft {
        let mut draft = ProfileDraft::new();
        draft.record(Answer::Objective(Objective::LoseWeight));
        draft.set_numeric(NumericField::Age, "30");
        draft.record(Answer::Gender(Gender::Male));
        draft.set_numeric(NumericField::Height, "175");
        draft.set_numeric(NumericField::Weight, "80");
        draft.record(Answer::Routine(Routine::Active));
        draft.record(Answer::ActivityLevel(ActivityLevel::ThreeToFivePerWeek));
        draft.record(Answer::DietQuality(DietQuality::Regular));
        draft.record(Answer::Restriction(Restriction::NoRestriction));
        draft.record(Answer::MealFrequency(MealFrequency::Four));
        draft
    }

    #[test]
    fn age_bounds_are_exclusive() {
        assert!(!valid_age(10));
        assert!(valid_age(11));
        assert!(valid_age(119));
        assert!(!valid_age(120));
    }

    #[test]
    fn height_and_weight_bounds_are_exclusive() {
        assert!(!valid_height(50.0));
        assert!(valid_height(50.5));
        assert!(valid_height(299.0));
        assert!(!valid_height(300.0));
        assert!(!valid_weight(20.0));
        assert!(valid_weight(499.0));
        assert!(!valid_weight(500.0));
    }

    #[test]
    fn numeric_input_parsing() {
        let mut draft = ProfileDraft::new();

        draft.set_numeric(NumericField::Weight, " 72,5 ");
        assert_eq!(draft.weight, Some(72.5));

        draft.set_numeric(NumericField::Weight, "abc");
        assert_eq!(draft.weight, None);

        draft.set_numeric(NumericField::Height, "");
        assert_eq!(draft.height, None);

        draft.set_numeric(NumericField::Age, "30.5");
        assert_eq!(draft.age, None);
        assert!(!draft.is_valid(Field::Age));

        draft.set_numeric(NumericField::Age, "31");
        assert_eq!(draft.age, Some(31));
    }

    #[test]
    fn recording_overwrites_previous_answer() {
        let mut draft = ProfileDraft::new();
        draft.record(Answer::Objective(Objective::LoseWeight));
        draft.record(Answer::Objective(Objective::GainMuscle));
        draft.record(Answer::Objective(Objective::Maintain));
        assert_eq!(draft.objective, Some(Objective::Maintain));
    }

    #[test]
    fn finalize_complete_draft() {
        let profile = complete_draft().finalize().unwrap();
        assert_eq!(profile.objective, Objective::LoseWeight);
        assert_eq!(profile.age, 30);
        assert_eq!(profile.height, 175.0);
        assert_eq!(profile.meal_frequency, MealFrequency::Four);
    }

    #[test]
    fn finalize_reports_invalid_fields() {
        let mut draft = complete_draft();
        draft.set_numeric(NumericField::Weight, "500");
        draft.restriction = None;

        match draft.finalize() {
            Err(QuizError::IncompleteProfile { fields }) => {
                assert_eq!(fields, ["weight", "restriction"]);
            }
            Ok(profile) => panic!("expected failure, got {profile:?}"),
        }
    }

    #[test]
    fn empty_draft_is_invalid_everywhere() {
        let draft = ProfileDraft::new();
        assert_eq!(draft.invalid_fields().len(), 10);
        assert!(!draft.is_complete());
    }
}
