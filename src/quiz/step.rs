//! Quiz steps, one per profile field, in a fixed order.

use serde::{Deserialize, Serialize};

use crate::profile::{
    ActivityLevel, DietQuality, Gender, MealFrequency, Objective, Restriction, Routine,
};

/// Total number of steps in the quiz.
pub const TOTAL_STEPS: usize = Field::ORDER.len();

/// A profile field, which is also a quiz step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Objective,
    Age,
    Gender,
    Height,
    Weight,
    Routine,
    ActivityLevel,
    DietQuality,
    Restriction,
    MealFrequency,
}

/// How a step is answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepKind {
    /// Single choice among fixed labels.
    Choice { options: Vec<&'static str> },
    /// Free numeric entry with a unit suffix.
    Numeric { suffix: &'static str },
}

impl Field {
    /// Quiz order. The step index of a field is its position here.
    pub const ORDER: [Field; 10] = [
        Field::Objective,
        Field::Age,
        Field::Gender,
        Field::Height,
        Field::Weight,
        Field::Routine,
        Field::ActivityLevel,
        Field::DietQuality,
        Field::Restriction,
        Field::MealFrequency,
    ];

    pub fn at_step(index: usize) -> Option<Field> {
        Self::ORDER.get(index).copied()
    }

    pub fn step_index(&self) -> usize {
        Self::ORDER
            .iter()
            .position(|f| f == self)
            .unwrap_or_default()
    }

    /// Question shown for this step.
    pub fn title(&self) -> &'static str {
        match self {
            Field::Objective => "Qual é seu objetivo principal?",
            Field::Age => "Qual sua idade?",
            Field::Gender => "Qual seu sexo?",
            Field::Height => "Qual sua altura?",
            Field::Weight => "Qual seu peso atual?",
            Field::Routine => "Como é sua rotina diária?",
            Field::ActivityLevel => "Você pratica atividade física?",
            Field::DietQuality => "Como é sua alimentação hoje?",
            Field::Restriction => "Você possui alguma restrição alimentar?",
            Field::MealFrequency => "Quantas refeições por dia você consegue fazer?",
        }
    }

    pub fn kind(&self) -> StepKind {
        fn labels<T>(all: &[T], label: fn(&T) -> &'static str) -> StepKind {
            StepKind::Choice {
                options: all.iter().map(label).collect(),
            }
        }

        match self {
            Field::Objective => labels(Objective::ALL, Objective::label),
            Field::Gender => labels(Gender::ALL, Gender::label),
            Field::Routine => labels(Routine::ALL, Routine::label),
            Field::ActivityLevel => labels(ActivityLevel::ALL, ActivityLevel::label),
            Field::DietQuality => labels(DietQuality::ALL, DietQuality::label),
            Field::Restriction => labels(Restriction::ALL, Restriction::label),
            Field::MealFrequency => labels(MealFrequency::ALL, MealFrequency::label),
            Field::Age => StepKind::Numeric { suffix: "anos" },
            Field::Height => StepKind::Numeric { suffix: "cm" },
            Field::Weight => StepKind::Numeric { suffix: "kg" },
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Field::Age | Field::Height | Field::Weight)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Objective => "objective",
            Self::Age => "age",
            Self::Gender => "gender",
            Self::Height => "height",
            Self::Weight => "weight",
            Self::Routine => "routine",
            Self::ActivityLevel => "activityLevel",
            Self::DietQuality => "dietQuality",
            Self::Restriction => "restriction",
            Self::MealFrequency => "mealFrequency",
        };
        write!(f, "{s}")
    }
}

/// The three fields answered by typing a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Age,
    Height,
    Weight,
}

impl NumericField {
    pub fn field(&self) -> Field {
        match self {
            Self::Age => Field::Age,
            Self::Height => Field::Height,
            Self::Weight => Field::Weight,
        }
    }

    pub fn from_field(field: Field) -> Option<Self> {
        match field {
            Field::Age => Some(Self::Age),
            Field::Height => Some(Self::Height),
            Field::Weight => Some(Self::Weight),
            _ => None,
        }
    }
}

/// A single-choice answer. The variant identifies the field it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Objective(Objective),
    Gender(Gender),
    Routine(Routine),
    ActivityLevel(ActivityLevel),
    DietQuality(DietQuality),
    Restriction(Restriction),
    MealFrequency(MealFrequency),
}

impl Answer {
    pub fn field(&self) -> Field {
        match self {
            Self::Objective(_) => Field::Objective,
            Self::Gender(_) => Field::Gender,
            Self::Routine(_) => Field::Routine,
            Self::ActivityLevel(_) => Field::ActivityLevel,
            Self::DietQuality(_) => Field::DietQuality,
            Self::Restriction(_) => Field::Restriction,
            Self::MealFrequency(_) => Field::MealFrequency,
        }
    }

    /// Pick the option at `index` (0-based, in presentation order) for a
    /// choice field. `None` for numeric fields or an out-of-range index.
    pub fn choose(field: Field, index: usize) -> Option<Answer> {
        match field {
            Field::Objective => Objective::ALL.get(index).copied().map(Self::Objective),
            Field::Gender => Gender::ALL.get(index).copied().map(Self::Gender),
            Field::Routine => Routine::ALL.get(index).copied().map(Self::Routine),
            Field::ActivityLevel => ActivityLevel::ALL
                .get(index)
                .copied()
                .map(Self::ActivityLevel),
            Field::DietQuality => DietQuality::ALL.get(index).copied().map(Self::DietQuality),
            Field::Restriction => Restriction::ALL.get(index).copied().map(Self::Restriction),
            Field::MealFrequency => MealFrequency::ALL
                .get(index)
                .copied()
                .map(Self::MealFrequency),
            Field::Age | Field::Height | Field::Weight => None,
        }
    }
}
