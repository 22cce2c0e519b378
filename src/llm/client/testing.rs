//! Scripted completion provider for unit tests

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::{ChatMessage, CompletionOptions, CompletionProvider};

/// Answers with queued replies in order, then with an empty string.
/// Every request is recorded for later inspection.
#[derive(Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<(Vec<ChatMessage>, CompletionOptions)>>,
}

impl ScriptedProvider {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<(Vec<ChatMessage>, CompletionOptions)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(&self, messages: &[ChatMessage], options: &CompletionOptions) -> String {
        self.requests
            .lock()
            .unwrap()
            .push((messages.to_vec(), options.clone()));
        self.replies.lock().unwrap().pop_front().unwrap_or_default()
    }
}
