//! AskQuestionHandler - relays one question through a provider conversation.
//!
//! This is the only component in the system with logic of its own: it makes
//! sure a conversation exists, composes the prompt, starts a run and polls it
//! to completion, then extracts the assistant's reply.
//!
//! The conversation identifier is threaded explicitly through the contract:
//! callers pass in the one they have (if any) and get back the one that was
//! used, storing it wherever their session state lives.

use std::sync::Arc;
use std::time::Duration;

use crate::ports::{AssistantClient, AssistantError, ConversationId, RunStatus};

/// Command to ask one question.
#[derive(Debug, Clone)]
pub struct AskQuestionCommand {
    /// Conversation to continue, or `None` to start a new one.
    pub conversation: Option<ConversationId>,
    /// The user's question.
    pub question: String,
    /// Optional supporting text prepended to the prompt.
    pub supporting_text: Option<String>,
}

/// Result of a successfully answered question.
#[derive(Debug, Clone)]
pub struct AskQuestionResult {
    /// Conversation the question was asked in; newly created when the
    /// command carried `None`.
    pub conversation: ConversationId,
    /// The assistant's reply, trimmed of surrounding whitespace.
    pub answer: String,
}

/// Handler relaying questions to the assistant provider.
pub struct AskQuestionHandler {
    client: Arc<dyn AssistantClient>,
    assistant_id: String,
    poll_interval: Duration,
    max_poll_attempts: u32,
}

impl AskQuestionHandler {
    pub fn new(
        client: Arc<dyn AssistantClient>,
        assistant_id: impl Into<String>,
        poll_interval: Duration,
        max_poll_attempts: u32,
    ) -> Self {
        Self {
            client,
            assistant_id: assistant_id.into(),
            poll_interval,
            max_poll_attempts,
        }
    }

    pub async fn handle(&self, cmd: AskQuestionCommand) -> Result<AskQuestionResult, AskError> {
        // 1. Make sure a conversation exists, creating one at most once
        let conversation = match cmd.conversation {
            Some(conversation) => conversation,
            None => {
                let conversation = self.client.create_conversation().await?;
                tracing::info!(conversation = %conversation, "created conversation");
                conversation
            }
        };

        // 2. Compose the prompt and append it as a user message
        let prompt = compose_prompt(cmd.supporting_text.as_deref(), &cmd.question);
        self.client.add_user_message(&conversation, &prompt).await?;

        // 3. Start a run and wait for it to finish
        let run = self
            .client
            .create_run(&conversation, &self.assistant_id)
            .await?;
        tracing::debug!(conversation = %conversation, run = %run, "run started");

        let mut attempts = 0;
        loop {
            let status = self.client.run_status(&conversation, &run).await?;
            if status.is_completed() {
                break;
            }
            if status.is_terminal_failure() {
                tracing::warn!(run = %run, ?status, "run reached terminal failure");
                return Err(AskError::RunFailed { status });
            }

            attempts += 1;
            if attempts >= self.max_poll_attempts {
                tracing::warn!(run = %run, attempts, "gave up waiting for run");
                return Err(AskError::RunTimedOut { attempts });
            }
            tokio::time::sleep(self.poll_interval).await;
        }

        // 4. The newest message in the conversation is the assistant's reply
        let answer = self.client.latest_message(&conversation).await?;

        Ok(AskQuestionResult {
            conversation,
            answer: answer.trim().to_string(),
        })
    }
}

/// Composes the prompt sent to the assistant.
///
/// Missing supporting text composes as the empty string, so the question is
/// still preceded by the separator.
fn compose_prompt(supporting_text: Option<&str>, question: &str) -> String {
    format!(
        "{}\n\nQuestion: {}",
        supporting_text.unwrap_or_default(),
        question
    )
}

/// Errors from the ask flow.
#[derive(Debug, thiserror::Error)]
pub enum AskError {
    /// A provider call failed.
    #[error(transparent)]
    Assistant(#[from] AssistantError),

    /// The run ended in a non-completed terminal status.
    #[error("run ended with status {status:?}")]
    RunFailed { status: RunStatus },

    /// The run did not finish within the allowed poll attempts.
    #[error("run did not complete within {attempts} poll attempts")]
    RunTimedOut { attempts: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::RunId;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Mock assistant client with scripted run statuses and call tracking.
    struct MockAssistantClient {
        statuses: Mutex<Vec<RunStatus>>,
        answer: String,
        conversations_created: Mutex<u32>,
        messages: Mutex<Vec<(ConversationId, String)>>,
        status_calls: Mutex<u32>,
        fail_create_run: bool,
    }

    impl MockAssistantClient {
        fn completing_after(pending_polls: usize, answer: impl Into<String>) -> Self {
            let mut statuses = vec![RunStatus::InProgress; pending_polls];
            statuses.push(RunStatus::Completed);
            Self {
                statuses: Mutex::new(statuses),
                answer: answer.into(),
                conversations_created: Mutex::new(0),
                messages: Mutex::new(Vec::new()),
                status_calls: Mutex::new(0),
                fail_create_run: false,
            }
        }

        fn with_statuses(statuses: Vec<RunStatus>) -> Self {
            Self {
                statuses: Mutex::new(statuses),
                answer: String::new(),
                conversations_created: Mutex::new(0),
                messages: Mutex::new(Vec::new()),
                status_calls: Mutex::new(0),
                fail_create_run: false,
            }
        }

        fn failing_on_create_run() -> Self {
            Self {
                statuses: Mutex::new(Vec::new()),
                answer: String::new(),
                conversations_created: Mutex::new(0),
                messages: Mutex::new(Vec::new()),
                status_calls: Mutex::new(0),
                fail_create_run: true,
            }
        }
    }

    #[async_trait]
    impl AssistantClient for MockAssistantClient {
        async fn create_conversation(&self) -> Result<ConversationId, AssistantError> {
            let mut count = self.conversations_created.lock().unwrap();
            *count += 1;
            Ok(ConversationId::new(format!("thread_{count}")))
        }

        async fn add_user_message(
            &self,
            conversation: &ConversationId,
            content: &str,
        ) -> Result<(), AssistantError> {
            self.messages
                .lock()
                .unwrap()
                .push((conversation.clone(), content.to_string()));
            Ok(())
        }

        async fn create_run(
            &self,
            _conversation: &ConversationId,
            _assistant_id: &str,
        ) -> Result<RunId, AssistantError> {
            if self.fail_create_run {
                return Err(AssistantError::unavailable("simulated outage"));
            }
            Ok(RunId::new("run_1"))
        }

        async fn run_status(
            &self,
            _conversation: &ConversationId,
            _run: &RunId,
        ) -> Result<RunStatus, AssistantError> {
            *self.status_calls.lock().unwrap() += 1;
            let mut statuses = self.statuses.lock().unwrap();
            if statuses.is_empty() {
                Ok(RunStatus::InProgress)
            } else {
                Ok(statuses.remove(0))
            }
        }

        async fn latest_message(
            &self,
            _conversation: &ConversationId,
        ) -> Result<String, AssistantError> {
            Ok(self.answer.clone())
        }
    }

    fn handler(client: Arc<MockAssistantClient>) -> AskQuestionHandler {
        AskQuestionHandler::new(client, "asst_test", Duration::from_secs(1), 120)
    }

    fn command(question: &str) -> AskQuestionCommand {
        AskQuestionCommand {
            conversation: None,
            question: question.to_string(),
            supporting_text: None,
        }
    }

    #[tokio::test]
    async fn creates_conversation_once_when_none_given() {
        let client = Arc::new(MockAssistantClient::completing_after(0, "hello"));
        let handler = handler(client.clone());

        let result = handler.handle(command("Hi")).await.unwrap();

        assert_eq!(*client.conversations_created.lock().unwrap(), 1);
        assert_eq!(result.conversation.as_str(), "thread_1");
    }

    #[tokio::test]
    async fn reuses_given_conversation() {
        let client = Arc::new(MockAssistantClient::completing_after(0, "hello"));
        let handler = handler(client.clone());

        let cmd = AskQuestionCommand {
            conversation: Some(ConversationId::new("thread_existing")),
            ..command("Hi")
        };
        let result = handler.handle(cmd).await.unwrap();

        assert_eq!(*client.conversations_created.lock().unwrap(), 0);
        assert_eq!(result.conversation.as_str(), "thread_existing");
    }

    #[tokio::test]
    async fn composes_prompt_without_supporting_text() {
        let client = Arc::new(MockAssistantClient::completing_after(0, "hello"));
        let handler = handler(client.clone());

        handler.handle(command("Hi")).await.unwrap();

        let messages = client.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].1, "\n\nQuestion: Hi");
    }

    #[tokio::test]
    async fn composes_prompt_with_supporting_text() {
        let client = Arc::new(MockAssistantClient::completing_after(0, "hello"));
        let handler = handler(client.clone());

        let cmd = AskQuestionCommand {
            supporting_text: Some("Some page text".to_string()),
            ..command("Hi")
        };
        handler.handle(cmd).await.unwrap();

        let messages = client.messages.lock().unwrap();
        assert_eq!(messages[0].1, "Some page text\n\nQuestion: Hi");
    }

    #[tokio::test(start_paused = true)]
    async fn polls_until_completion_at_fixed_interval() {
        let client = Arc::new(MockAssistantClient::completing_after(4, "  spaced out  "));
        let handler = handler(client.clone());

        let started = tokio::time::Instant::now();
        let result = handler.handle(command("Hi")).await.unwrap();

        // 4 pending polls + the completed one
        assert_eq!(*client.status_calls.lock().unwrap(), 5);
        // one sleep per pending poll
        assert_eq!(started.elapsed(), Duration::from_secs(4));
        assert_eq!(result.answer, "spaced out");
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_after_max_attempts() {
        let client = Arc::new(MockAssistantClient::with_statuses(Vec::new()));
        let handler = AskQuestionHandler::new(
            client.clone(),
            "asst_test",
            Duration::from_secs(1),
            3,
        );

        let err = handler.handle(command("Hi")).await.unwrap_err();

        assert!(matches!(err, AskError::RunTimedOut { attempts: 3 }));
        assert_eq!(*client.status_calls.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn failed_run_is_reported_distinctly() {
        let client = Arc::new(MockAssistantClient::with_statuses(vec![
            RunStatus::InProgress,
            RunStatus::Failed,
        ]));
        let handler = handler(client.clone());

        let err = handler.handle(command("Hi")).await.unwrap_err();

        assert!(matches!(
            err,
            AskError::RunFailed {
                status: RunStatus::Failed
            }
        ));
    }

    #[tokio::test]
    async fn provider_errors_propagate() {
        let client = Arc::new(MockAssistantClient::failing_on_create_run());
        let handler = handler(client);

        let err = handler.handle(command("Hi")).await.unwrap_err();

        assert!(matches!(
            err,
            AskError::Assistant(AssistantError::Unavailable { .. })
        ));
    }

    #[tokio::test]
    async fn answer_is_trimmed() {
        let client = Arc::new(MockAssistantClient::completing_after(0, "\n  the answer \n"));
        let handler = handler(client);

        let result = handler.handle(command("Hi")).await.unwrap();
        assert_eq!(result.answer, "the answer");
    }

    #[test]
    fn compose_prompt_edge_cases() {
        assert_eq!(compose_prompt(None, "Hi"), "\n\nQuestion: Hi");
        assert_eq!(compose_prompt(Some(""), "Hi"), "\n\nQuestion: Hi");
        assert_eq!(
            compose_prompt(Some("ctx"), "Hi"),
            "ctx\n\nQuestion: Hi"
        );
    }
}
