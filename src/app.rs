//! Application driver. Owns all state and reacts to events.
//!
//! Hosts feed [`AppEvent`]s into [`App::handle`] one at a time. Background
//! work (the delayed auto-advance and the generation call) reports back by
//! posting events on the same channel, so all state changes happen on the
//! host's loop.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::error::{ExportError, GenerationError};
use crate::generation::PlanGenerator;
use crate::profile::MealPlan;
use crate::quiz::{Answer, AutoAdvanceTimer, AutoAdvanceToken, NumericField, Quiz, Selection, Transition};
use crate::view::{
    EXPORT_UNAVAILABLE_MESSAGE, Exporter, GenerationTicket, Orchestrator, ResultDocument, View,
    export_plan,
};

/// Alert for a converter that ran but did not produce a PDF.
pub const EXPORT_FAILED_MESSAGE: &str = "Erro ao gerar o PDF. Tente novamente.";

/// Something the user did.
#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    /// Landing page call to action.
    Start,
    /// Pick option `n` (1-based) on a choice step.
    Choose(usize),
    /// Raw text for a numeric step.
    Enter(String),
    Next,
    Back,
    Restart,
    Export,
    DismissError,
}

#[derive(Debug)]
pub enum AppEvent {
    Action(UserAction),
    AutoAdvance {
        token: AutoAdvanceToken,
    },
    PlanReady {
        ticket: GenerationTicket,
        result: Result<MealPlan, GenerationError>,
    },
}

impl From<UserAction> for AppEvent {
    fn from(action: UserAction) -> Self {
        Self::Action(action)
    }
}

/// Feedback for the host beyond the current view.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    None,
    Alert(String),
    Exported(PathBuf),
}

pub struct App {
    orchestrator: Orchestrator,
    /// Present exactly while the view is `Quiz`.
    quiz: Option<Quiz>,
    timer: AutoAdvanceTimer,
    generator: Arc<PlanGenerator>,
    exporter: Option<Arc<dyn Exporter>>,
    events: UnboundedSender<AppEvent>,
}

impl App {
    /// Create the app and the receiving end of its event channel.
    pub fn new(
        generator: Arc<PlanGenerator>,
        exporter: Option<Arc<dyn Exporter>>,
    ) -> (Self, UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let app = Self {
            orchestrator: Orchestrator::new(),
            quiz: None,
            timer: AutoAdvanceTimer::default(),
            generator,
            exporter,
            events: tx,
        };
        (app, rx)
    }

    pub fn view(&self) -> &View {
        self.orchestrator.view()
    }

    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    pub fn auto_advance_pending(&self) -> bool {
        self.timer.is_pending()
    }

    pub async fn handle(&mut self, event: AppEvent) -> Notice {
        match event {
            AppEvent::Action(action) => self.handle_action(action).await,
            AppEvent::AutoAdvance { token } => {
                let Some(quiz) = self.quiz.as_mut() else {
                    debug!(step = token.step, "Auto-advance after the quiz closed");
                    return Notice::None;
                };
                let transition = quiz.apply_auto_advance(token);
                self.apply(transition)
            }
            AppEvent::PlanReady { ticket, result } => {
                self.orchestrator.resolve(&ticket, result);
                Notice::None
            }
        }
    }

    async fn handle_action(&mut self, action: UserAction) -> Notice {
        match action {
            UserAction::Start => {
                if self.orchestrator.start() {
                    self.quiz = Some(Quiz::new());
                    info!("Quiz started");
                }
                Notice::None
            }
            UserAction::DismissError => {
                self.orchestrator.dismiss_error();
                Notice::None
            }
            UserAction::Choose(n) => self.choose(n),
            UserAction::Enter(raw) => {
                if let Some(quiz) = self.quiz.as_mut() {
                    match NumericField::from_field(quiz.current_field()) {
                        Some(field) => quiz.set_numeric_field(field, &raw),
                        None => debug!(field = %quiz.current_field(), "Numeric input on a choice step"),
                    }
                }
                Notice::None
            }
            UserAction::Next => {
                let Some(quiz) = self.quiz.as_mut() else {
                    return Notice::None;
                };
                let transition = quiz.advance();
                self.apply(transition)
            }
            UserAction::Back => {
                let Some(quiz) = self.quiz.as_mut() else {
                    return Notice::None;
                };
                let transition = quiz.retreat();
                self.apply(transition)
            }
            UserAction::Restart => {
                if self.orchestrator.restart() {
                    info!("Plan discarded, back to landing");
                }
                Notice::None
            }
            UserAction::Export => self.export().await,
        }
    }

    fn choose(&mut self, n: usize) -> Notice {
        let Some(quiz) = self.quiz.as_mut() else {
            return Notice::None;
        };
        let field = quiz.current_field();
        let Some(answer) = n.checked_sub(1).and_then(|i| Answer::choose(field, i)) else {
            return Notice::Alert(format!("Opção inválida: {n}"));
        };

        if let Selection::AutoAdvance(token) = quiz.select_option(answer) {
            self.timer
                .schedule(self.events.clone(), AppEvent::AutoAdvance { token });
        }
        Notice::None
    }

    fn apply(&mut self, transition: Transition) -> Notice {
        match transition {
            Transition::Unchanged => {}
            Transition::Advanced { step } | Transition::Retreated { step } => {
                self.timer.cancel();
                debug!(step, "Quiz moved");
            }
            Transition::Cancelled => {
                self.leave_quiz();
                self.orchestrator.cancel_quiz();
                info!("Quiz cancelled");
            }
            Transition::Completed(profile) => {
                self.leave_quiz();
                if let Some(ticket) = self.orchestrator.complete(profile) {
                    self.spawn_generation(ticket);
                }
            }
        }
        Notice::None
    }

    fn leave_quiz(&mut self) {
        self.timer.cancel();
        self.quiz = None;
    }

    fn spawn_generation(&self, ticket: GenerationTicket) {
        let generator = Arc::clone(&self.generator);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = generator.generate(&ticket.profile).await;
            if events.send(AppEvent::PlanReady { ticket, result }).is_err() {
                warn!("Generation finished after the app shut down");
            }
        });
    }

    async fn export(&self) -> Notice {
        let View::Result { profile, plan } = self.orchestrator.view() else {
            return Notice::None;
        };
        let document = ResultDocument::today(profile.clone(), plan.clone());

        match export_plan(self.exporter.as_deref(), &document).await {
            Ok(path) => Notice::Exported(path),
            Err(ExportError::Unavailable) => Notice::Alert(EXPORT_UNAVAILABLE_MESSAGE.to_string()),
            Err(e) => {
                warn!(error = %e, "PDF export failed");
                Notice::Alert(EXPORT_FAILED_MESSAGE.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use secrecy::SecretString;

    use crate::config::GenerationConfig;
    use crate::generation::{GenerationRequest, GenerationTransport};
    use crate::quiz::{AUTO_ADVANCE_DELAY, Field};

    struct UnreachableTransport;

    #[async_trait]
    impl GenerationTransport for UnreachableTransport {
        fn provider(&self) -> &str {
            "unreachable"
        }

        async fn generate_content(
            &self,
            _api_key: &SecretString,
            _request: &GenerationRequest,
        ) -> Result<Option<String>, GenerationError> {
            panic!("transport must not be called without a credential");
        }
    }

    fn app() -> (App, UnboundedReceiver<AppEvent>) {
        let generator = PlanGenerator::new(
            GenerationConfig::default(),
            Arc::new(UnreachableTransport),
        );
        App::new(Arc::new(generator), None)
    }

    async fn act(app: &mut App, action: UserAction) -> Notice {
        app.handle(action.into()).await
    }

    #[tokio::test]
    async fn quiz_exists_only_in_quiz_view() {
        let (mut app, _rx) = app();
        assert!(app.quiz().is_none());

        act(&mut app, UserAction::Start).await;
        assert_eq!(app.view(), &View::Quiz);
        assert_eq!(app.quiz().unwrap().current_step(), 0);

        act(&mut app, UserAction::Back).await;
        assert_eq!(app.view(), &View::Landing { error: None });
        assert!(app.quiz().is_none());
    }

    #[tokio::test]
    async fn invalid_option_is_reported() {
        let (mut app, _rx) = app();
        act(&mut app, UserAction::Start).await;

        for n in [0, 5] {
            let notice = act(&mut app, UserAction::Choose(n)).await;
            assert!(matches!(notice, Notice::Alert(_)));
        }
        assert!(!app.quiz().unwrap().can_advance());
        assert!(!app.auto_advance_pending());
    }

    #[tokio::test]
    async fn choice_schedules_auto_advance_and_manual_next_cancels_it() {
        let (mut app, _rx) = app();
        act(&mut app, UserAction::Start).await;

        act(&mut app, UserAction::Choose(2)).await;
        assert!(app.auto_advance_pending());

        act(&mut app, UserAction::Next).await;
        assert_eq!(app.quiz().unwrap().current_field(), Field::Age);
        assert!(!app.auto_advance_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn queued_auto_advance_after_manual_next_is_ignored() {
        let (mut app, mut rx) = app();
        act(&mut app, UserAction::Start).await;
        act(&mut app, UserAction::Choose(2)).await;

        // Timer fires before the user's Next is handled.
        tokio::time::sleep(AUTO_ADVANCE_DELAY * 2).await;
        let event = rx.try_recv().unwrap();
        assert!(matches!(event, AppEvent::AutoAdvance { .. }));

        act(&mut app, UserAction::Next).await;
        app.handle(event).await;
        assert_eq!(app.quiz().unwrap().current_step(), 1);
    }

    #[tokio::test]
    async fn numeric_entry_requires_explicit_next() {
        let (mut app, _rx) = app();
        act(&mut app, UserAction::Start).await;
        act(&mut app, UserAction::Choose(1)).await;
        act(&mut app, UserAction::Next).await;

        act(&mut app, UserAction::Enter("9".to_string())).await;
        act(&mut app, UserAction::Next).await;
        assert_eq!(app.quiz().unwrap().current_field(), Field::Age);

        act(&mut app, UserAction::Enter("30".to_string())).await;
        assert!(!app.auto_advance_pending());
        act(&mut app, UserAction::Next).await;
        assert_eq!(app.quiz().unwrap().current_field(), Field::Gender);
    }

    #[tokio::test]
    async fn missing_credential_lands_with_fixed_message() {
        let (mut app, mut rx) = app();
        act(&mut app, UserAction::Start).await;
        for field in Field::ORDER {
            match field {
                Field::Age => act(&mut app, UserAction::Enter("30".into())).await,
                Field::Height => act(&mut app, UserAction::Enter("175".into())).await,
                Field::Weight => act(&mut app, UserAction::Enter("80".into())).await,
                _ => act(&mut app, UserAction::Choose(1)).await,
            };
            act(&mut app, UserAction::Next).await;
        }
        assert!(matches!(app.view(), View::Loading { .. }));
        assert!(app.quiz().is_none());

        let event = loop {
            match rx.recv().await.unwrap() {
                event @ AppEvent::PlanReady { .. } => break event,
                _ => continue,
            }
        };
        app.handle(event).await;
        assert_eq!(
            app.view(),
            &View::Landing {
                error: Some(crate::view::GENERATION_FAILED_MESSAGE.to_string())
            }
        );

        act(&mut app, UserAction::DismissError).await;
        assert_eq!(app.view(), &View::Landing { error: None });
    }

    #[tokio::test]
    async fn export_outside_result_does_nothing() {
        let (mut app, _rx) = app();
        assert_eq!(act(&mut app, UserAction::Export).await, Notice::None);
    }
}
