//! Test double: a `LanguageModel` that replays fixed replies and records every request.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{GenerationRequest, LanguageModel, LlmError};

enum ScriptedReply {
    Text(String),
    Failure(String),
}

pub struct ScriptedModel {
    replies: Mutex<VecDeque<ScriptedReply>>,
    calls: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedModel {
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(
                replies
                    .into_iter()
                    .map(|r| ScriptedReply::Text(r.into()))
                    .collect(),
            ),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queues a transport failure after the replies queued so far.
    pub fn then_fail(self, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(ScriptedReply::Failure(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(request.clone());

        match self.replies.lock().unwrap().pop_front() {
            Some(ScriptedReply::Text(text)) => Ok(text),
            Some(ScriptedReply::Failure(message)) => Err(LlmError::Api {
                status: 503,
                message,
            }),
            None => Err(LlmError::Api {
                status: 500,
                message: "no scripted reply left".to_string(),
            }),
        }
    }
}
