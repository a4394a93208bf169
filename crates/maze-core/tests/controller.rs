//! Controller behavior against scripted generators and a recording presenter.

use std::future::pending;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use maze_core::{Failure, MazeController, Presenter, RequestState, SubmitError};
use maze_generator::{CancellationSource, GeneratorError, MazeGenerator};
use maze_model::{BoundsProfile, Dimension, DimensionErrorKind, DisplayTier, MazeRequest};
use maze_sizing::DisplaySizer;
use tokio::sync::Notify;

const TIER_ONE: DisplayTier = DisplayTier::new(18, 45, 76);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    ShowError(Dimension, String),
    HideError(Dimension),
    SetValue(Dimension, u32),
    Loading(bool),
    Render(String, Option<DisplayTier>),
}

#[derive(Default)]
struct RecordingPresenter {
    events: Mutex<Vec<Event>>,
}

impl RecordingPresenter {
    fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl Presenter for RecordingPresenter {
    fn show_field_error(&self, field: Dimension, message: &str) {
        self.push(Event::ShowError(field, message.to_string()));
    }

    fn hide_field_error(&self, field: Dimension) {
        self.push(Event::HideError(field));
    }

    fn set_field_value(&self, field: Dimension, value: u32) {
        self.push(Event::SetValue(field, value));
    }

    fn set_loading(&self, loading: bool) {
        self.push(Event::Loading(loading));
    }

    fn render_output(&self, text: &str, tier: Option<DisplayTier>) {
        self.push(Event::Render(text.to_string(), tier));
    }
}

/// Answers every call with the same result and counts calls.
struct Scripted {
    reply: Result<String, GeneratorError>,
    calls: AtomicUsize,
}

impl Scripted {
    fn ok(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing(error: GeneratorError) -> Self {
        Self {
            reply: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MazeGenerator for Scripted {
    fn describe(&self) -> String {
        "scripted".to_string()
    }

    async fn generate(&self, _request: MazeRequest) -> Result<String, GeneratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

/// Waits for the gate to open before answering.
struct Gated {
    gate: Notify,
}

impl MazeGenerator for Gated {
    fn describe(&self) -> String {
        "gated".to_string()
    }

    async fn generate(&self, request: MazeRequest) -> Result<String, GeneratorError> {
        self.gate.notified().await;
        Ok(format!("maze {request}"))
    }
}

struct Hanging;

impl MazeGenerator for Hanging {
    fn describe(&self) -> String {
        "hanging".to_string()
    }

    async fn generate(&self, _request: MazeRequest) -> Result<String, GeneratorError> {
        pending().await
    }
}

fn controller<G: MazeGenerator>(generator: G) -> MazeController<G, RecordingPresenter> {
    MazeController::new(
        BoundsProfile::classic(),
        DisplaySizer::classic(),
        generator,
        RecordingPresenter::default(),
    )
}

#[tokio::test]
async fn valid_submission_renders_maze_with_tier_one() {
    let controller = controller(Scripted::ok("+-+-+\n"));
    assert_eq!(controller.state(), RequestState::Idle);

    let state = controller.submit("25", "10").await.unwrap();

    assert_eq!(
        state,
        RequestState::Success {
            request: MazeRequest::new(25, 10),
            maze: "+-+-+\n".to_string(),
            tier: Some(TIER_ONE),
        }
    );
    assert_eq!(controller.state(), state);
    assert_eq!(controller.generator().calls(), 1);
    assert_eq!(
        controller.presenter().events(),
        vec![
            Event::HideError(Dimension::Width),
            Event::SetValue(Dimension::Width, 25),
            Event::HideError(Dimension::Height),
            Event::SetValue(Dimension::Height, 10),
            Event::Loading(true),
            Event::Loading(false),
            Event::Render("+-+-+\n".to_string(), Some(TIER_ONE)),
        ]
    );
}

#[tokio::test]
async fn invalid_width_skips_generator_but_validates_height() {
    let controller = controller(Scripted::ok("unused"));

    let state = controller.submit("abc", "10").await.unwrap();

    let Some(Failure::Validation(errors)) = state.failure() else {
        panic!("expected validation failure, got {state:?}");
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, Dimension::Width);
    assert_eq!(errors[0].kind, DimensionErrorKind::NotANumber);
    assert_eq!(controller.generator().calls(), 0);

    let events = controller.presenter().events();
    assert_eq!(
        events[..2],
        [
            Event::ShowError(Dimension::Width, "The width must be a number".to_string()),
            Event::HideError(Dimension::Height),
        ]
    );
    assert!(!events.contains(&Event::Loading(true)));
    assert!(matches!(events.last(), Some(Event::Render(_, None))));
}

#[tokio::test]
async fn accepted_fields_show_normalized_values() {
    let controller = controller(Scripted::ok("maze"));

    let state = controller.submit(" 5.9", "10.2").await.unwrap();

    assert!(state.is_success());
    let values: Vec<_> = controller
        .presenter()
        .events()
        .into_iter()
        .filter(|event| matches!(event, Event::SetValue(..)))
        .collect();
    assert_eq!(
        values,
        [
            Event::SetValue(Dimension::Width, 5),
            Event::SetValue(Dimension::Height, 10),
        ]
    );
}

#[tokio::test]
async fn rejected_field_keeps_its_text() {
    let controller = controller(Scripted::ok("unused"));
    controller.submit("4.5", "x").await.unwrap();
    let events = controller.presenter().events();
    assert!(events.contains(&Event::SetValue(Dimension::Width, 4)));
    assert!(!events.iter().any(|event| matches!(event, Event::SetValue(Dimension::Height, _))));
}

#[tokio::test]
async fn both_fields_report_errors() {
    let controller = controller(Scripted::ok("unused"));

    controller.submit("1", "34").await.unwrap();

    let shown: Vec<_> = controller
        .presenter()
        .events()
        .into_iter()
        .filter_map(|event| match event {
            Event::ShowError(field, message) => Some((field, message)),
            _ => None,
        })
        .collect();
    assert_eq!(
        shown,
        [
            (
                Dimension::Width,
                "Please make sure the width is between 3 and 52".to_string()
            ),
            (
                Dimension::Height,
                "Please make sure the height is between 3 and 33".to_string()
            ),
        ]
    );
}

#[tokio::test]
async fn transport_failure_still_applies_sizing() {
    let controller = controller(Scripted::failing(GeneratorError::Transport(
        "timeout".to_string(),
    )));

    let state = controller.submit("5", "10").await.unwrap();

    assert_eq!(
        state,
        RequestState::Failed(Failure::Generator {
            request: MazeRequest::new(5, 10),
            error: GeneratorError::Transport("timeout".to_string()),
            tier: Some(TIER_ONE),
        })
    );
    let Some(Event::Render(text, tier)) = controller.presenter().events().pop() else {
        panic!("expected a render call");
    };
    assert!(text.contains("timeout"), "{text}");
    assert!(text.starts_with("Sorry, an internal error has occurred"), "{text}");
    assert_eq!(tier, Some(TIER_ONE));
}

#[tokio::test]
async fn empty_output_is_a_failure() {
    let controller = controller(Scripted::ok("   \n"));
    let state = controller.submit("5", "5").await.unwrap();
    assert!(matches!(
        state.failure(),
        Some(Failure::Generator {
            error: GeneratorError::EmptyOutput,
            ..
        })
    ));
}

#[tokio::test]
async fn sizes_beyond_all_tiers_keep_current_tier() {
    let controller = MazeController::new(
        BoundsProfile::wide(),
        DisplaySizer::classic(),
        Scripted::ok("wide maze"),
        RecordingPresenter::default(),
    );
    controller.submit("119", "32").await.unwrap();
    assert_eq!(
        controller.presenter().events().last(),
        Some(&Event::Render("wide maze".to_string(), None))
    );
}

#[tokio::test]
async fn fallback_tier_sizes_wide_mazes() {
    let controller = MazeController::new(
        BoundsProfile::wide(),
        DisplaySizer::default(),
        Scripted::ok("wide maze"),
        RecordingPresenter::default(),
    );
    let state = controller.submit("119", "32").await.unwrap();
    assert!(matches!(
        state,
        RequestState::Success {
            tier: Some(tier),
            ..
        } if tier == maze_sizing::WIDE_FALLBACK
    ));
}

#[tokio::test]
async fn overlapping_submission_is_rejected() {
    let controller = controller(Gated {
        gate: Notify::new(),
    });

    let first = controller.submit("10", "10");
    let second = async {
        while !matches!(controller.state(), RequestState::Loading { .. }) {
            tokio::task::yield_now().await;
        }
        let rejected = controller.submit("20", "20").await;
        controller.generator().gate.notify_one();
        rejected
    };
    let (first, second) = tokio::join!(first, second);

    assert_eq!(second, Err(SubmitError::Busy));
    assert!(first.unwrap().is_success());
    // A fresh submission is accepted once the first has settled.
    controller.generator().gate.notify_one();
    assert!(controller.submit("20", "20").await.unwrap().is_success());
}

#[tokio::test]
async fn hanging_generator_times_out() {
    let controller = controller(Hanging).with_timeout(Duration::from_millis(20));
    let state = controller.submit("5", "5").await.unwrap();
    assert_eq!(
        state.failure(),
        Some(&Failure::Generator {
            request: MazeRequest::new(5, 5),
            error: GeneratorError::Timeout {
                after: Duration::from_millis(20)
            },
            tier: Some(TIER_ONE),
        })
    );
}

#[tokio::test]
async fn cancellation_ends_in_failed() {
    let controller = controller(Hanging);
    let source = CancellationSource::new();
    let token = source.token();

    let submission = controller.submit_with_cancel("5", "5", &token);
    let cancel = async {
        while !matches!(controller.state(), RequestState::Loading { .. }) {
            tokio::task::yield_now().await;
        }
        source.cancel();
    };
    let (state, ()) = tokio::join!(submission, cancel);

    let state = state.unwrap();
    assert!(matches!(
        state.failure(),
        Some(Failure::Generator {
            error: GeneratorError::Cancelled,
            ..
        })
    ));
    assert_eq!(
        controller.presenter().events().last(),
        Some(&Event::Render(
            "Sorry, an internal error has occurred: request was cancelled".to_string(),
            Some(TIER_ONE)
        ))
    );
}

#[tokio::test]
async fn dropped_submission_releases_the_controller() {
    let controller = controller(Hanging);

    let abandoned = tokio::time::timeout(Duration::from_millis(20), controller.submit("5", "5")).await;
    assert!(abandoned.is_err());

    assert!(matches!(
        controller.state().failure(),
        Some(Failure::Generator {
            error: GeneratorError::Cancelled,
            tier: None,
            ..
        })
    ));
    assert_eq!(
        controller.presenter().events().last(),
        Some(&Event::Loading(false))
    );
    // Not stuck in Loading: validation failures still go through.
    assert!(controller.submit("x", "5").await.unwrap().failure().is_some());
}
