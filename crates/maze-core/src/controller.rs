//! The maze request controller.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use maze_generator::{CancellationToken, GeneratorError, MazeGenerator, dispatch};
use maze_model::{BoundsProfile, MazeRequest};
use maze_sizing::DisplaySizer;
use maze_validate::validate_submission;
use thiserror::Error;
use tracing::{debug, info, info_span, warn};

use crate::presenter::Presenter;
use crate::state::{Failure, RequestState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("a maze request is already in progress")]
    Busy,
}

/// Orchestrates one submission at a time: validation, the generator call, and
/// display sizing.
pub struct MazeController<G, P> {
    profile: BoundsProfile,
    sizer: DisplaySizer,
    generator: G,
    presenter: P,
    timeout: Duration,
    state: Mutex<RequestState>,
}

impl<G, P> MazeController<G, P>
where
    G: MazeGenerator,
    P: Presenter,
{
    pub fn new(profile: BoundsProfile, sizer: DisplaySizer, generator: G, presenter: P) -> Self {
        Self {
            profile,
            sizer,
            generator,
            presenter,
            timeout: maze_generator::DEFAULT_TIMEOUT,
            state: Mutex::new(RequestState::Idle),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn profile(&self) -> &BoundsProfile {
        &self.profile
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn state(&self) -> RequestState {
        self.lock_state().clone()
    }

    /// Submit raw width/height text without external cancellation.
    pub async fn submit(&self, width: &str, height: &str) -> Result<RequestState, SubmitError> {
        self.submit_with_cancel(width, height, &CancellationToken::never())
            .await
    }

    /// Submit raw width/height text and return the terminal state.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Busy`] if another submission is still being
    /// processed. Validation and generator failures are not errors here; they
    /// end in [`RequestState::Failed`].
    pub async fn submit_with_cancel(
        &self,
        width: &str,
        height: &str,
        cancel: &CancellationToken,
    ) -> Result<RequestState, SubmitError> {
        self.begin()?;
        let span = info_span!("submission", profile = %self.profile.name, width, height);

        let report = span.in_scope(|| validate_submission(width, height, &self.profile));
        for (field, result) in report.results() {
            match result {
                Ok(value) => {
                    self.presenter.hide_field_error(field);
                    self.presenter.set_field_value(field, *value);
                }
                Err(error) => self.presenter.show_field_error(field, &error.message()),
            }
        }
        let request = match report.into_request() {
            Ok(request) => request,
            Err(errors) => {
                let failure = Failure::Validation(errors);
                span.in_scope(|| debug!("submission rejected by validation"));
                self.presenter.render_output(&failure.message(), None);
                return Ok(self.transition(RequestState::Failed(failure)));
            }
        };

        self.transition(RequestState::Loading { request });
        let flight = InFlight::arm(self, request);
        self.presenter.set_loading(true);
        let started = Instant::now();
        span.in_scope(|| {
            info!(%request, generator = %self.generator.describe(), "dispatching maze request");
        });
        let outcome = dispatch(&self.generator, request, self.timeout, cancel).await;
        flight.disarm();
        self.presenter.set_loading(false);

        let tier = self.sizer.resolve(request.width, request.height);
        let elapsed_ms = started.elapsed().as_millis();
        let next = match outcome {
            Ok(maze) => {
                span.in_scope(|| info!(%request, elapsed_ms, "maze received"));
                self.presenter.render_output(&maze, tier);
                RequestState::Success {
                    request,
                    maze,
                    tier,
                }
            }
            Err(error) => {
                span.in_scope(|| warn!(%request, elapsed_ms, %error, "maze request failed"));
                self.presenter.render_output(&error.user_message(), tier);
                RequestState::Failed(Failure::Generator {
                    request,
                    error,
                    tier,
                })
            }
        };
        Ok(self.transition(next))
    }

    /// Enter `Validating` unless a submission is already in progress.
    fn begin(&self) -> Result<(), SubmitError> {
        let mut state = self.lock_state();
        if state.is_busy() {
            debug!(state = state.label(), "rejecting overlapping submission");
            return Err(SubmitError::Busy);
        }
        debug!(from = state.label(), to = "validating", "request state transition");
        *state = RequestState::Validating;
        Ok(())
    }

    fn transition(&self, next: RequestState) -> RequestState {
        let mut state = self.lock_state();
        debug!(from = state.label(), to = next.label(), "request state transition");
        *state = next;
        state.clone()
    }

    fn lock_state(&self) -> MutexGuard<'_, RequestState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Marks a generator call in progress. If the submission future is dropped
/// before the call settles, the controller ends in `Failed` (cancelled) and
/// the loading indicator is cleared.
struct InFlight<'a, G: MazeGenerator, P: Presenter> {
    controller: Option<&'a MazeController<G, P>>,
    request: MazeRequest,
}

impl<'a, G: MazeGenerator, P: Presenter> InFlight<'a, G, P> {
    fn arm(controller: &'a MazeController<G, P>, request: MazeRequest) -> Self {
        Self {
            controller: Some(controller),
            request,
        }
    }

    fn disarm(mut self) {
        self.controller = None;
    }
}

impl<G: MazeGenerator, P: Presenter> Drop for InFlight<'_, G, P> {
    fn drop(&mut self) {
        let Some(controller) = self.controller.take() else {
            return;
        };
        warn!(request = %self.request, "maze request abandoned while loading");
        controller.presenter.set_loading(false);
        controller.transition(RequestState::Failed(Failure::Generator {
            request: self.request,
            error: GeneratorError::Cancelled,
            tier: None,
        }));
    }
}
