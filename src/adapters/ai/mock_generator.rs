//! Mock text generator for testing.
//!
//! Configurable implementation of the TextGenerator port so tests run
//! without calling the real generation API: queued responses, error
//! injection and prompt capture for verification.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{GenerationError, TextGenerator};

/// A configured mock reply.
#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Failure(MockFailure),
}

/// Failure modes the mock can inject.
#[derive(Debug, Clone)]
enum MockFailure {
    MissingCredentials,
    AuthenticationFailed,
    RateLimited { retry_after_secs: u32 },
    Network { message: String },
    Unavailable { message: String },
}

impl From<MockFailure> for GenerationError {
    fn from(failure: MockFailure) -> Self {
        match failure {
            MockFailure::MissingCredentials => GenerationError::MissingCredentials,
            MockFailure::AuthenticationFailed => GenerationError::AuthenticationFailed,
            MockFailure::RateLimited { retry_after_secs } => {
                GenerationError::rate_limited(retry_after_secs)
            }
            MockFailure::Network { message } => GenerationError::network(message),
            MockFailure::Unavailable { message } => GenerationError::unavailable(message),
        }
    }
}

/// Mock text generator.
///
/// Replies are consumed in order; when the queue is empty the last
/// configured reply repeats. With nothing configured, generation fails as
/// unavailable.
#[derive(Debug, Clone, Default)]
pub struct MockTextGenerator {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    last: Arc<Mutex<Option<MockReply>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockTextGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful text reply.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.push(MockReply::Text(content.into()))
    }

    /// Queues a missing-credentials failure.
    pub fn with_missing_credentials(self) -> Self {
        self.push(MockReply::Failure(MockFailure::MissingCredentials))
    }

    /// Queues an authentication failure.
    pub fn with_auth_failure(self) -> Self {
        self.push(MockReply::Failure(MockFailure::AuthenticationFailed))
    }

    /// Queues a rate-limit failure.
    pub fn with_rate_limit(self, retry_after_secs: u32) -> Self {
        self.push(MockReply::Failure(MockFailure::RateLimited {
            retry_after_secs,
        }))
    }

    /// Queues a network failure.
    pub fn with_network_failure(self, message: impl Into<String>) -> Self {
        self.push(MockReply::Failure(MockFailure::Network {
            message: message.into(),
        }))
    }

    /// Prompts received so far, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn push(self, reply: MockReply) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        let reply = {
            let mut replies = self.replies.lock().unwrap();
            match replies.pop_front() {
                Some(reply) => {
                    *self.last.lock().unwrap() = Some(reply.clone());
                    reply
                }
                None => match self.last.lock().unwrap().clone() {
                    Some(reply) => reply,
                    None => MockReply::Failure(MockFailure::Unavailable {
                        message: "no mock reply configured".to_string(),
                    }),
                },
            }
        };

        match reply {
            MockReply::Text(content) => Ok(content),
            MockReply::Failure(failure) => Err(failure.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_are_consumed_in_order() {
        let generator = MockTextGenerator::new()
            .with_response("first")
            .with_response("second");

        assert_eq!(generator.generate("a").await.unwrap(), "first");
        assert_eq!(generator.generate("b").await.unwrap(), "second");
        // Queue drained: the last reply repeats.
        assert_eq!(generator.generate("c").await.unwrap(), "second");
    }

    #[tokio::test]
    async fn prompts_are_captured() {
        let generator = MockTextGenerator::new().with_response("ok");
        generator.generate("primeiro prompt").await.unwrap();

        assert_eq!(generator.prompts(), vec!["primeiro prompt"]);
    }

    #[tokio::test]
    async fn unconfigured_mock_fails_as_unavailable() {
        let generator = MockTextGenerator::new();
        let result = generator.generate("a").await;
        assert!(matches!(result, Err(GenerationError::Unavailable(_))));
    }

    #[tokio::test]
    async fn injected_failures_convert_to_generation_errors() {
        let generator = MockTextGenerator::new()
            .with_rate_limit(10)
            .with_auth_failure()
            .with_network_failure("boom");

        assert!(matches!(
            generator.generate("a").await,
            Err(GenerationError::RateLimited {
                retry_after_secs: 10
            })
        ));
        assert!(matches!(
            generator.generate("b").await,
            Err(GenerationError::AuthenticationFailed)
        ));
        assert!(matches!(
            generator.generate("c").await,
            Err(GenerationError::Network(_))
        ));
    }
}
