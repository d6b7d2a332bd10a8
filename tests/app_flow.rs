//! End-to-end flows through `App` with a scripted generation service.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::sync::mpsc::UnboundedReceiver;

use nutriplan::app::{App, AppEvent, Notice, UserAction};
use nutriplan::config::GenerationConfig;
use nutriplan::error::{ExportError, GenerationError};
use nutriplan::generation::{GenerationRequest, GenerationTransport, PlanGenerator};
use nutriplan::quiz::{AUTO_ADVANCE_DELAY, Field};
use nutriplan::view::{
    EXPORT_UNAVAILABLE_MESSAGE, ExportOptions, Exporter, GENERATION_FAILED_MESSAGE,
    ResultDocument, View,
};

const PLAN: &str = r#"{
    "summary": "Perfil ativo",
    "caloriesTarget": 2200,
    "macros": { "protein": "160g", "carbs": "220g", "fats": "70g" },
    "meals": {
        "breakfast": ["2 ovos"],
        "lunch": ["100g de frango"],
        "snack": ["1 fruta"],
        "dinner": ["Salada"]
    },
    "motivationalMessage": "Vamos lá!"
}"#;

struct ScriptedTransport {
    reply: Option<String>,
    calls: Mutex<usize>,
}

impl ScriptedTransport {
    fn replying(reply: Option<&str>) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.map(str::to_string),
            calls: Mutex::new(0),
        })
    }

    fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl GenerationTransport for ScriptedTransport {
    fn provider(&self) -> &str {
        "scripted"
    }

    async fn generate_content(
        &self,
        _api_key: &SecretString,
        _request: &GenerationRequest,
    ) -> Result<Option<String>, GenerationError> {
        *self.calls.lock().unwrap() += 1;
        Ok(self.reply.clone())
    }
}

struct UnavailableExporter;

#[async_trait]
impl Exporter for UnavailableExporter {
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn is_available(&self) -> bool {
        false
    }

    async fn export(
        &self,
        _document: &ResultDocument,
        _options: &ExportOptions,
    ) -> Result<PathBuf, ExportError> {
        panic!("export must not run when unavailable");
    }
}

struct MemoryExporter {
    filenames: Mutex<Vec<String>>,
}

#[async_trait]
impl Exporter for MemoryExporter {
    fn name(&self) -> &str {
        "memory"
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn export(
        &self,
        document: &ResultDocument,
        options: &ExportOptions,
    ) -> Result<PathBuf, ExportError> {
        assert!(document.to_html().contains("100g de frango"));
        self.filenames.lock().unwrap().push(options.filename.clone());
        Ok(PathBuf::from("/tmp").join(&options.filename))
    }
}

fn app_with(
    transport: Arc<ScriptedTransport>,
    exporter: Option<Arc<dyn Exporter>>,
) -> (App, UnboundedReceiver<AppEvent>) {
    let generator = PlanGenerator::new(
        GenerationConfig {
            api_key: Some(SecretString::from("key".to_string())),
            model: "gemini-2.5-flash".to_string(),
        },
        transport,
    );
    App::new(Arc::new(generator), exporter)
}

async fn act(app: &mut App, action: UserAction) -> Notice {
    app.handle(AppEvent::Action(action)).await
}

/// Answer all ten steps (first option, valid numbers) and confirm each.
async fn complete_quiz(app: &mut App) {
    act(app, UserAction::Start).await;
    for field in Field::ORDER {
        match field {
            Field::Age => act(app, UserAction::Enter("30".to_string())).await,
            Field::Height => act(app, UserAction::Enter("175".to_string())).await,
            Field::Weight => act(app, UserAction::Enter("80".to_string())).await,
            _ => act(app, UserAction::Choose(1)).await,
        };
        act(app, UserAction::Next).await;
    }
}

async fn next_plan_ready(app: &mut App, rx: &mut UnboundedReceiver<AppEvent>) {
    loop {
        let event = rx.recv().await.expect("event channel open");
        if matches!(event, AppEvent::PlanReady { .. }) {
            app.handle(event).await;
            return;
        }
    }
}

#[tokio::test]
async fn successful_generation_shows_result() {
    let transport = ScriptedTransport::replying(Some(PLAN));
    let (mut app, mut rx) = app_with(transport.clone(), None);

    complete_quiz(&mut app).await;
    match app.view() {
        View::Loading { profile } => assert_eq!(profile.age, 30),
        other => panic!("expected loading, got {other:?}"),
    }

    next_plan_ready(&mut app, &mut rx).await;
    match app.view() {
        View::Result { profile, plan } => {
            assert_eq!(profile.height, 175.0);
            assert_eq!(plan.calories_target, 2200);
        }
        other => panic!("expected result, got {other:?}"),
    }
    assert_eq!(transport.calls(), 1);

    act(&mut app, UserAction::Restart).await;
    assert_eq!(app.view(), &View::Landing { error: None });
}

#[tokio::test]
async fn empty_reply_returns_to_landing_with_message() {
    let transport = ScriptedTransport::replying(None);
    let (mut app, mut rx) = app_with(transport.clone(), None);

    complete_quiz(&mut app).await;
    next_plan_ready(&mut app, &mut rx).await;

    assert_eq!(
        app.view(),
        &View::Landing {
            error: Some(GENERATION_FAILED_MESSAGE.to_string())
        }
    );
    assert!(app.quiz().is_none());
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn unavailable_export_keeps_result() {
    let (mut app, mut rx) = app_with(
        ScriptedTransport::replying(Some(PLAN)),
        Some(Arc::new(UnavailableExporter)),
    );
    complete_quiz(&mut app).await;
    next_plan_ready(&mut app, &mut rx).await;
    let before = app.view().clone();

    let notice = act(&mut app, UserAction::Export).await;
    assert_eq!(notice, Notice::Alert(EXPORT_UNAVAILABLE_MESSAGE.to_string()));
    assert_eq!(app.view(), &before);
}

#[tokio::test]
async fn export_uses_objective_filename() {
    let exporter = Arc::new(MemoryExporter {
        filenames: Mutex::new(Vec::new()),
    });
    let (mut app, mut rx) = app_with(
        ScriptedTransport::replying(Some(PLAN)),
        Some(exporter.clone()),
    );
    complete_quiz(&mut app).await;
    next_plan_ready(&mut app, &mut rx).await;

    let notice = act(&mut app, UserAction::Export).await;
    assert_eq!(
        notice,
        Notice::Exported(PathBuf::from("/tmp/plano-nutricional-emagrecer.pdf"))
    );
    assert_eq!(
        *exporter.filenames.lock().unwrap(),
        ["plano-nutricional-emagrecer.pdf"]
    );
}

#[tokio::test(start_paused = true)]
async fn selection_auto_advances_after_delay() {
    let (mut app, mut rx) = app_with(ScriptedTransport::replying(Some(PLAN)), None);
    act(&mut app, UserAction::Start).await;

    let started = tokio::time::Instant::now();
    act(&mut app, UserAction::Choose(3)).await;
    assert_eq!(app.quiz().unwrap().current_step(), 0);

    let event = rx.recv().await.unwrap();
    assert!(started.elapsed() >= AUTO_ADVANCE_DELAY);
    assert!(matches!(event, AppEvent::AutoAdvance { token } if token.step == 0));

    app.handle(event).await;
    assert_eq!(app.quiz().unwrap().current_field(), Field::Age);
}

#[tokio::test(start_paused = true)]
async fn leaving_quiz_cancels_pending_auto_advance() {
    let (mut app, mut rx) = app_with(ScriptedTransport::replying(Some(PLAN)), None);
    act(&mut app, UserAction::Start).await;
    act(&mut app, UserAction::Choose(1)).await;
    assert!(app.auto_advance_pending());

    act(&mut app, UserAction::Back).await;
    assert_eq!(app.view(), &View::Landing { error: None });
    assert!(!app.auto_advance_pending());

    tokio::time::sleep(AUTO_ADVANCE_DELAY * 4).await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn queued_auto_advance_is_stale_after_next_and_back() {
    let (mut app, mut rx) = app_with(ScriptedTransport::replying(Some(PLAN)), None);
    act(&mut app, UserAction::Start).await;
    act(&mut app, UserAction::Choose(1)).await;

    // The delayed event is already queued when the user moves by hand.
    tokio::time::sleep(AUTO_ADVANCE_DELAY * 2).await;
    let event = rx.try_recv().unwrap();

    act(&mut app, UserAction::Next).await;
    act(&mut app, UserAction::Enter("30".to_string())).await;
    act(&mut app, UserAction::Back).await;
    assert_eq!(app.quiz().unwrap().current_field(), Field::Objective);

    app.handle(event).await;
    assert_eq!(app.quiz().unwrap().current_field(), Field::Objective);
    assert!(rx.try_recv().is_err());
}
