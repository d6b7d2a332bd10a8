//! Terminal host: stdin/stdout front end for the app.
//!
//! Lines from stdin are mapped to user actions according to the current
//! view; events posted by background work arrive on the app channel. Both
//! are fed to `App::handle` and the screen is redrawn after each one.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, error, info};

use crate::app::{App, AppEvent, Notice, UserAction};
use crate::quiz::{Field, ProfileDraft, Quiz, StepKind, TOTAL_STEPS};
use crate::view::{ResultDocument, View};

const HELP: &str = "Comandos: número = escolher opção · Enter = próximo/finalizar · \
                    v = voltar · p = baixar PDF · n = novo quiz · q = sair";

/// What a line of input means in the current view.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Actions(Vec<UserAction>),
    Help,
    Quit,
    Ignore,
}

/// Map one stdin line to actions for `view`.
pub fn parse_input(view: &View, quiz: Option<&Quiz>, line: &str) -> Input {
    let line = line.trim();
    match line.to_lowercase().as_str() {
        "q" | "sair" => return Input::Quit,
        "?" | "ajuda" => return Input::Help,
        _ => {}
    }

    let actions = match view {
        View::Landing { error } => match line {
            "" | "c" => vec![UserAction::Start],
            "x" if error.is_some() => vec![UserAction::DismissError],
            _ => return Input::Ignore,
        },
        View::Quiz => {
            let Some(quiz) = quiz else {
                return Input::Ignore;
            };
            match line {
                "" => vec![UserAction::Next],
                "v" => vec![UserAction::Back],
                raw if quiz.current_field().is_numeric() => {
                    vec![UserAction::Enter(raw.to_string()), UserAction::Next]
                }
                raw => match raw.parse::<usize>() {
                    Ok(n) => vec![UserAction::Choose(n)],
                    Err(_) => return Input::Help,
                },
            }
        }
        View::Loading { .. } => return Input::Ignore,
        View::Result { .. } => match line {
            "p" => vec![UserAction::Export],
            "n" => vec![UserAction::Restart],
            _ => return Input::Ignore,
        },
    };
    Input::Actions(actions)
}

/// Full-screen text for the current state.
pub fn render(view: &View, quiz: Option<&Quiz>) -> String {
    match view {
        View::Landing { error } => render_landing(error.as_deref()),
        View::Quiz => quiz.map(render_quiz).unwrap_or_default(),
        View::Loading { .. } => "Analisando seu perfil...\n\
             Nossa inteligência artificial está calculando suas necessidades metabólicas \
             e montando o cardápio ideal para o seu objetivo.\n"
            .to_string(),
        View::Result { profile, plan } => {
            let document = ResultDocument::today(profile.clone(), plan.clone());
            format!(
                "{}\n[p] Baixar PDF   [n] Novo Quiz\n",
                document.to_text()
            )
        }
    }
}

fn render_landing(error: Option<&str>) -> String {
    let mut out = String::from(
        "NutriPlan Pro · Nutrição Inteligente\n\n\
         Descubra o plano alimentar ideal para o seu objetivo.\n\
         Responda um rápido questionário e receba um cardápio personalizado, gerado por \
         inteligência artificial, de acordo com seu corpo, rotina e metas.\n\n\
         ✓ Análise personalizada  ✓ Baseado em hábitos  ✓ Cardápio prático  ✓ Download em PDF\n\n\
         [Enter] Começar Quiz   (* Gratuito e leva menos de 2 minutos.)\n",
    );
    if let Some(error) = error {
        out.push_str(&format!("\n⚠ {error}\n[x] fechar aviso\n"));
    }
    out
}

fn render_quiz(quiz: &Quiz) -> String {
    let field = quiz.current_field();
    let mut out = format!(
        "Passo {} de {} · {}% concluído\n\n{}\n",
        quiz.current_step() + 1,
        TOTAL_STEPS,
        quiz.progress_percent(),
        field.title()
    );

    match field.kind() {
        StepKind::Choice { options } => {
            let selected = selected_label(quiz.draft(), field);
            for (i, option) in options.iter().enumerate() {
                let marker = if selected.as_deref() == Some(*option) {
                    "●"
                } else {
                    "○"
                };
                out.push_str(&format!("  {marker} {}. {option}\n", i + 1));
            }
        }
        StepKind::Numeric { suffix } => {
            let current = numeric_value(quiz.draft(), field)
                .map(|v| format!(" (atual: {v} {suffix})"))
                .unwrap_or_default();
            out.push_str(&format!("  Digite o valor em {suffix}{current}\n"));
        }
    }

    let next = if quiz.is_last_step() {
        "Finalizar"
    } else {
        "Próximo"
    };
    let state = if quiz.can_advance() { "" } else { " (indisponível)" };
    out.push_str(&format!("\n[v] Voltar   [Enter] {next}{state}\n"));
    out
}

fn selected_label(draft: &ProfileDraft, field: Field) -> Option<String> {
    match field {
        Field::Objective => draft.objective.map(|v| v.to_string()),
        Field::Gender => draft.gender.map(|v| v.to_string()),
        Field::Routine => draft.routine.map(|v| v.to_string()),
        Field::ActivityLevel => draft.activity_level.map(|v| v.to_string()),
        Field::DietQuality => draft.diet_quality.map(|v| v.to_string()),
        Field::Restriction => draft.restriction.map(|v| v.to_string()),
        Field::MealFrequency => draft.meal_frequency.map(|v| v.to_string()),
        Field::Age | Field::Height | Field::Weight => None,
    }
}

fn numeric_value(draft: &ProfileDraft, field: Field) -> Option<String> {
    match field {
        Field::Age => draft.age.map(|v| v.to_string()),
        Field::Height => draft.height.map(|v| v.to_string()),
        Field::Weight => draft.weight.map(|v| v.to_string()),
        _ => None,
    }
}

fn spawn_stdin_reader() -> UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Ok(None) => break, // EOF
                Err(e) => {
                    error!("Error reading stdin: {}", e);
                    break;
                }
            }
        }
    });

    rx
}

fn show(app: &App) {
    println!("\n{}", render(app.view(), app.quiz()));
    eprint!("> ");
}

/// Run the interactive loop until the user quits or stdin closes.
pub async fn run(mut app: App, mut events: UnboundedReceiver<AppEvent>) -> anyhow::Result<()> {
    let mut lines = spawn_stdin_reader();
    show(&app);

    loop {
        let batch: Vec<AppEvent> = tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else {
                    info!("stdin closed");
                    break;
                };
                match parse_input(app.view(), app.quiz(), &line) {
                    Input::Quit => break,
                    Input::Help => {
                        println!("{HELP}");
                        eprint!("> ");
                        continue;
                    }
                    Input::Ignore => {
                        eprint!("> ");
                        continue;
                    }
                    Input::Actions(actions) => actions.into_iter().map(AppEvent::from).collect(),
                }
            }
            Some(event) = events.recv() => vec![event],
        };

        for event in batch {
            debug!(?event, "Handling event");
            match app.handle(event).await {
                Notice::None => {}
                Notice::Alert(message) => println!("\n⚠ {message}"),
                Notice::Exported(path) => println!("\nPDF salvo em {}", path.display()),
            }
        }
        show(&app);
    }

    Ok(())
}
