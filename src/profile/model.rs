//! User profile: the ten answers that drive plan generation.

use serde::{Deserialize, Serialize};

/// Declares a closed set of answers whose wire form and display form are
/// the Portuguese label shown to the user.
macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every value, in the order the quiz presents them.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    other => Err(format!(
                        "'{}' is not a valid {}",
                        other,
                        stringify!($name)
                    )),
                }
            }
        }
    };
}

labeled_enum! {
    /// Main goal of the plan.
    Objective {
        LoseWeight => "Emagrecer",
        Maintain => "Manter peso",
        GainWeight => "Ganhar peso",
        GainMuscle => "Ganhar massa muscular",
    }
}

labeled_enum! {
    Gender {
        Male => "Masculino",
        Female => "Feminino",
    }
}

labeled_enum! {
    /// How active the user's day is outside of exercise.
    Routine {
        VerySedentary => "Muito sedentária",
        SlightlyActive => "Pouco ativa",
        Active => "Ativa",
        VeryActive => "Muito ativa",
    }
}

labeled_enum! {
    /// How often the user exercises.
    ActivityLevel {
        Sedentary => "Não pratico",
        OneToTwoPerWeek => "1 a 2 vezes por semana",
        ThreeToFivePerWeek => "3 a 5 vezes por semana",
        Daily => "Todos os dias",
    }
}

labeled_enum! {
    /// Self-assessed quality of the current diet.
    DietQuality {
        VeryIrregular => "Muito desregulada",
        Regular => "Regular",
        Good => "Boa",
        VeryHealthy => "Muito saudável",
    }
}

labeled_enum! {
    Restriction {
        NoRestriction => "Nenhuma",
        LactoseIntolerance => "Intolerância à lactose",
        Vegetarian => "Vegetariano(a)",
        Vegan => "Vegano(a)",
    }
}

labeled_enum! {
    /// Meals per day the user can fit into their routine.
    MealFrequency {
        Three => "3",
        Four => "4",
        FiveOrMore => "5 ou mais",
    }
}

/// A complete, validated set of quiz answers.
///
/// The quiz builds it through `ProfileDraft::finalize`, which checks every
/// field predicate first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub objective: Objective,
    pub age: u32,
    pub gender: Gender,
    /// Height in centimetres.
    pub height: f64,
    /// Weight in kilograms.
    pub weight: f64,
    pub routine: Routine,
    pub activity_level: ActivityLevel,
    pub diet_quality: DietQuality,
    pub restriction: Restriction,
    pub meal_frequency: MealFrequency,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_from_str() {
        for objective in Objective::ALL {
            assert_eq!(objective.label().parse::<Objective>().unwrap(), *objective);
        }
        for level in ActivityLevel::ALL {
            assert_eq!(level.to_string().parse::<ActivityLevel>().unwrap(), *level);
        }
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = "Correr".parse::<Objective>().unwrap_err();
        assert!(err.contains("Objective"));
    }

    #[test]
    fn option_counts_match_the_quiz() {
        assert_eq!(Objective::ALL.len(), 4);
        assert_eq!(Gender::ALL.len(), 2);
        assert_eq!(Routine::ALL.len(), 4);
        assert_eq!(ActivityLevel::ALL.len(), 4);
        assert_eq!(DietQuality::ALL.len(), 4);
        assert_eq!(Restriction::ALL.len(), 4);
        assert_eq!(MealFrequency::ALL.len(), 3);
    }

    #[test]
    fn profile_serializes_with_portuguese_labels() {
        let profile = UserProfile {
            objective: Objective::GainMuscle,
            age: 25,
            gender: Gender::Female,
            height: 165.0,
            weight: 58.5,
            routine: Routine::SlightlyActive,
            activity_level: ActivityLevel::Daily,
            diet_quality: DietQuality::Good,
            restriction: Restriction::Vegan,
            meal_frequency: MealFrequency::FiveOrMore,
        };

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["objective"], "Ganhar massa muscular");
        assert_eq!(json["activityLevel"], "Todos os dias");
        assert_eq!(json["restriction"], "Vegano(a)");
        assert_eq!(json["mealFrequency"], "5 ou mais");

        let parsed: UserProfile = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, profile);
    }
}
