//! Instruction text sent to the generation service.

use crate::profile::{Objective, UserProfile};

/// Free-text elaboration of the objective, embedded next to it in the
/// prompt.
pub fn objective_elaboration(objective: Objective) -> &'static str {
    match objective {
        Objective::LoseWeight => "perda de gordura saudável com déficit calórico moderado",
        Objective::GainMuscle => "hipertrofia com superávit calórico limpo e alta proteína",
        Objective::GainWeight => "ganho de peso saudável focado em alimentos densos em nutrientes",
        _ => "manutenção de peso com foco em qualidade nutricional",
    }
}

/// Build the nutritionist instruction for `profile`.
///
/// Every profile field appears once, followed by a description of the JSON
/// object expected back.
pub fn meal_plan_prompt(profile: &UserProfile) -> String {
    format!(
        "Atue como um nutricionista esportivo de elite. Crie um plano alimentar personalizado \
         de um dia para o seguinte perfil:\n\
         \n\
         - Objetivo: {objective} ({elaboration})\n\
         - Idade: {age} anos\n\
         - Sexo: {gender}\n\
         - Altura: {height} cm\n\
         - Peso: {weight} kg\n\
         - Rotina Diária: {routine}\n\
         - Atividade Física: {activity}\n\
         - Qualidade Atual da Dieta: {diet}\n\
         - Restrições: {restriction}\n\
         - Preferência de Frequência: {meals} refeições por dia.\n\
         \n\
         Retorne APENAS um objeto JSON com a seguinte estrutura:\n\
         - summary: Um resumo curto (máx 20 palavras) do perfil metabólico.\n\
         - caloriesTarget: Meta calórica diária (número inteiro).\n\
         - macros: Objeto com strings de porcentagem ou gramas para protein, carbs, fats.\n\
         - meals: Objeto contendo arrays de strings (itens do cardápio) para breakfast, lunch, \
         snack, dinner. Seja específico nas quantidades (ex: \"2 ovos\", \"100g de frango\").\n\
         - motivationalMessage: Uma frase curta e inspiradora focada no objetivo da pessoa.",
        objective = profile.objective,
        elaboration = objective_elaboration(profile.objective),
        age = profile.age,
        gender = profile.gender,
        height = profile.height,
        weight = profile.weight,
        routine = profile.routine,
        activity = profile.activity_level,
        diet = profile.diet_quality,
        restriction = profile.restriction,
        meals = profile.meal_frequency,
    )
}
