//! Result document. The printable plan, as HTML for export and as plain
//! text for the terminal.

use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::profile::{MealPlan, UserProfile};

/// Id of the printable container handed to the PDF exporter.
pub const PRINTABLE_CONTAINER_ID: &str = "pdf-content";

const DISCLAIMER: &str = "Este plano é uma sugestão gerada por inteligência artificial e não \
                          substitui o aconselhamento médico ou de um nutricionista profissional.";

/// Everything shown on the result screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultDocument {
    pub profile: UserProfile,
    pub plan: MealPlan,
    pub date: NaiveDate,
}

impl ResultDocument {
    pub fn new(profile: UserProfile, plan: MealPlan, date: NaiveDate) -> Self {
        Self {
            profile,
            plan,
            date,
        }
    }

    /// Dated today, local time.
    pub fn today(profile: UserProfile, plan: MealPlan) -> Self {
        Self::new(profile, plan, chrono::Local::now().date_naive())
    }

    fn formatted_date(&self) -> String {
        self.date.format("%d/%m/%Y").to_string()
    }

    /// Standalone HTML page. Only the `#pdf-content` container is meant for
    /// printing.
    pub fn to_html(&self) -> String {
        let p = &self.profile;
        let plan = &self.plan;
        let mut html = String::new();

        html.push_str(
            "<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>NutriPlan Pro</title>\n</head>\n<body>\n",
        );
        let _ = writeln!(
            html,
            "<section class=\"banner\"><h2>Vamos alcançar esse objetivo!</h2><p>\"{}\"</p></section>",
            escape(&plan.motivational_message)
        );
        let _ = writeln!(html, "<div id=\"{PRINTABLE_CONTAINER_ID}\">");
        let _ = writeln!(
            html,
            "<header><h1>NutriPlan Pro</h1><p>Plano Alimentar Inteligente</p>\
             <p class=\"date\">{}</p><p class=\"objective\">{}</p></header>",
            self.formatted_date(),
            escape(p.objective.label())
        );

        html.push_str("<section class=\"profile\"><h3>Perfil do Aluno</h3>\n<dl>\n");
        for (label, value) in self.profile_rows() {
            let _ = writeln!(html, "<dt>{}</dt><dd>{}</dd>", label, escape(&value));
        }
        let _ = writeln!(
            html,
            "</dl>\n<p><strong>Análise:</strong> {}</p></section>",
            escape(&plan.summary)
        );

        html.push_str("<section class=\"targets\">\n");
        let _ = writeln!(
            html,
            "<div class=\"calories\"><p>Meta Calórica</p><p class=\"value\">{}</p><p>kcal/dia</p></div>",
            plan.calories_target
        );
        for (label, value) in self.macro_rows() {
            let _ = writeln!(
                html,
                "<div class=\"macro\"><p>{}</p><p class=\"value\">{}</p></div>",
                label,
                escape(value)
            );
        }
        html.push_str("</section>\n");

        html.push_str("<section class=\"meals\"><h3>Cardápio Sugerido</h3>\n");
        for (title, items) in plan.meals.sections() {
            let _ = writeln!(html, "<div class=\"meal\"><h4>{}</h4>\n<ul>", title);
            for item in items {
                let _ = writeln!(html, "<li>{}</li>", escape(item));
            }
            html.push_str("</ul></div>\n");
        }
        html.push_str("</section>\n");

        let _ = writeln!(html, "<footer><p>{}</p></footer>", DISCLAIMER);
        html.push_str("</div>\n</body>\n</html>\n");
        html
    }

    /// Plain-text rendering for the terminal.
    pub fn to_text(&self) -> String {
        let plan = &self.plan;
        let mut out = String::new();

        let _ = writeln!(out, "Seu Plano Personalizado");
        let _ = writeln!(out, "Vamos alcançar esse objetivo!");
        let _ = writeln!(out, "\"{}\"\n", plan.motivational_message);
        let _ = writeln!(
            out,
            "NutriPlan Pro · Plano Alimentar Inteligente · {} · {}\n",
            self.formatted_date(),
            self.profile.objective
        );

        let _ = writeln!(out, "Perfil do Aluno");
        for (label, value) in self.profile_rows() {
            let _ = writeln!(out, "  {label}: {value}");
        }
        let _ = writeln!(out, "  Análise: {}\n", plan.summary);

        let _ = writeln!(out, "Meta Calórica: {} kcal/dia", plan.calories_target);
        for (label, value) in self.macro_rows() {
            let _ = writeln!(out, "  {label}: {value}");
        }

        let _ = writeln!(out, "\nCardápio Sugerido");
        for (title, items) in plan.meals.sections() {
            let _ = writeln!(out, "\n{title}");
            for item in items {
                let _ = writeln!(out, "  • {item}");
            }
        }

        let _ = writeln!(out, "\n{DISCLAIMER}");
        out
    }

    fn profile_rows(&self) -> [(&'static str, String); 4] {
        let p = &self.profile;
        [
            ("Idade", format!("{} anos", p.age)),
            ("Peso/Altura", format!("{}kg / {}cm", p.weight, p.height)),
            ("Nível Ativ.", p.activity_level.to_string()),
            ("Restrições", p.restriction.to_string()),
        ]
    }

    fn macro_rows(&self) -> [(&'static str, &str); 3] {
        let m = &self.plan.macros;
        [
            ("Proteína", m.protein.as_str()),
            ("Carboidratos", m.carbs.as_str()),
            ("Gorduras", m.fats.as_str()),
        ]
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
