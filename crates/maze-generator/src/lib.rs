//! External maze generator contract.
//!
//! The generator is a black box that turns a [`MazeRequest`] into maze text.
//! This crate defines the [`MazeGenerator`] trait, two transports
//! ([`ProcessGenerator`], [`HttpGenerator`]), and [`dispatch`], which bounds a
//! call with a timeout and a [`CancellationToken`].

pub mod cancel;
pub mod error;
pub mod http;
pub mod process;

use std::future::Future;
use std::time::Duration;

use maze_model::MazeRequest;

pub use cancel::{CancellationSource, CancellationToken};
pub use error::{GeneratorError, Result};
pub use http::HttpGenerator;
pub use process::ProcessGenerator;

/// Default limit for one generator call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Something that produces maze text for validated dimensions.
pub trait MazeGenerator: Send + Sync {
    /// Short human-readable description used in logs.
    fn describe(&self) -> String;

    fn generate(&self, request: MazeRequest) -> impl Future<Output = Result<String>> + Send;
}

/// Run one generator call bounded by `limit` and `cancel`.
///
/// Blank output is reported as [`GeneratorError::EmptyOutput`].
pub async fn dispatch<G>(
    generator: &G,
    request: MazeRequest,
    limit: Duration,
    cancel: &CancellationToken,
) -> Result<String>
where
    G: MazeGenerator + ?Sized,
{
    let call = tokio::time::timeout(limit, generator.generate(request));
    let outcome = tokio::select! {
        biased;
        () = cancel.cancelled() => return Err(GeneratorError::Cancelled),
        outcome = call => outcome,
    };
    match outcome {
        Err(_elapsed) => Err(GeneratorError::Timeout { after: limit }),
        Ok(Err(error)) => Err(error),
        Ok(Ok(text)) if text.trim().is_empty() => Err(GeneratorError::EmptyOutput),
        Ok(Ok(text)) => Ok(text),
    }
}

/// Transport chosen at startup.
#[derive(Debug, Clone)]
pub enum GeneratorBackend {
    Process(ProcessGenerator),
    Http(HttpGenerator),
}

impl MazeGenerator for GeneratorBackend {
    fn describe(&self) -> String {
        match self {
            Self::Process(generator) => generator.describe(),
            Self::Http(generator) => generator.describe(),
        }
    }

    async fn generate(&self, request: MazeRequest) -> Result<String> {
        match self {
            Self::Process(generator) => generator.generate(request).await,
            Self::Http(generator) => generator.generate(request).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::pending;

    struct Fixed(&'static str);

    impl MazeGenerator for Fixed {
        fn describe(&self) -> String {
            "fixed".to_string()
        }

        async fn generate(&self, _request: MazeRequest) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct Hanging;

    impl MazeGenerator for Hanging {
        fn describe(&self) -> String {
            "hanging".to_string()
        }

        async fn generate(&self, _request: MazeRequest) -> Result<String> {
            pending().await
        }
    }

    const REQUEST: MazeRequest = MazeRequest::new(5, 5);

    #[tokio::test]
    async fn passes_text_through() {
        let text = dispatch(&Fixed("+-+"), REQUEST, DEFAULT_TIMEOUT, &CancellationToken::never())
            .await
            .unwrap();
        assert_eq!(text, "+-+");
    }

    #[tokio::test]
    async fn blank_output_is_an_error() {
        let error = dispatch(&Fixed(" \n"), REQUEST, DEFAULT_TIMEOUT, &CancellationToken::never())
            .await
            .unwrap_err();
        assert_eq!(error, GeneratorError::EmptyOutput);
    }

    #[tokio::test]
    async fn hanging_generator_times_out() {
        let limit = Duration::from_millis(20);
        let error = dispatch(&Hanging, REQUEST, limit, &CancellationToken::never())
            .await
            .unwrap_err();
        assert_eq!(error, GeneratorError::Timeout { after: limit });
    }

    #[tokio::test]
    async fn cancelled_token_wins_over_call() {
        let source = CancellationSource::new();
        source.cancel();
        let error = dispatch(&Fixed("+-+"), REQUEST, DEFAULT_TIMEOUT, &source.token())
            .await
            .unwrap_err();
        assert_eq!(error, GeneratorError::Cancelled);
    }

    #[tokio::test]
    async fn cancel_while_waiting() {
        let source = CancellationSource::new();
        let token = source.token();
        let call = tokio::spawn(async move {
            let generator = Hanging;
            dispatch(&generator, REQUEST, DEFAULT_TIMEOUT, &token).await
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        source.cancel();
        assert_eq!(call.await.unwrap(), Err(GeneratorError::Cancelled));
    }
}
