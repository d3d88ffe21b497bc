//! Rule-based language backend for tests and offline sessions.

use crate::{FunctionCall, LanguageBackend, Reply, Result, NAVIGATE_FUNCTION};
use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Offline stand-in for the language model. Queued replies are returned
/// first, in order; after that, utterances carrying at least two numbers
/// become a `navigate_robot` call (x, y, and optional z_rotation), and
/// anything else echoes back as plain content.
pub struct MockBackend {
    replies: Mutex<VecDeque<Reply>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
        }
    }

    pub fn with_reply(self, reply: Reply) -> Self {
        if let Ok(mut queue) = self.replies.lock() {
            queue.push_back(reply);
        }
        self
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn extract_numbers(text: &str) -> Vec<f64> {
    text.split(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .filter(|token| !token.is_empty())
        .filter_map(|token| token.parse::<f64>().ok())
        .collect()
}

fn interpret_rules(text: &str) -> Reply {
    let numbers = extract_numbers(text);
    if numbers.len() >= 2 {
        return Reply::FunctionCall(FunctionCall {
            name: NAVIGATE_FUNCTION.to_string(),
            arguments: json!({
                "x": numbers[0],
                "y": numbers[1],
                "z_rotation": numbers.get(2).copied().unwrap_or(0.0),
            }),
        });
    }
    Reply::Content(text.to_string())
}

#[async_trait]
impl LanguageBackend for MockBackend {
    async fn interpret(&self, text: &str) -> Result<Reply> {
        let queued = self.replies.lock().ok().and_then(|mut q| q.pop_front());
        Ok(queued.unwrap_or_else(|| interpret_rules(text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn queued_replies_come_back_in_order_then_rules_apply() -> anyhow::Result<()> {
        let backend = MockBackend::new()
            .with_reply(Reply::Content("hello".to_string()))
            .with_reply(Reply::FunctionCall(FunctionCall {
                name: NAVIGATE_FUNCTION.to_string(),
                arguments: json!({"x": 1.0, "y": 2.0, "z_rotation": 0.0}),
            }));

        assert_eq!(
            backend.interpret("anything").await?,
            Reply::Content("hello".to_string())
        );
        assert!(matches!(
            backend.interpret("go somewhere").await?,
            Reply::FunctionCall(_)
        ));
        assert_eq!(
            backend.interpret("what's the weather").await?,
            Reply::Content("what's the weather".to_string())
        );
        Ok(())
    }

    #[tokio::test]
    async fn utterance_with_coordinates_becomes_a_navigate_call() -> anyhow::Result<()> {
        let reply = MockBackend::new().interpret("go to 2.0, -1.5 facing 1.57").await?;
        let Reply::FunctionCall(call) = reply else {
            panic!("expected a function call, got {reply:?}");
        };
        assert_eq!(call.name, NAVIGATE_FUNCTION);
        assert_eq!(call.arguments["x"], json!(2.0));
        assert_eq!(call.arguments["y"], json!(-1.5));
        assert_eq!(call.arguments["z_rotation"], json!(1.57));
        Ok(())
    }

    #[tokio::test]
    async fn heading_defaults_to_zero_when_only_two_numbers_given() -> anyhow::Result<()> {
        let reply = MockBackend::new().interpret("drive to 3 4").await?;
        let Reply::FunctionCall(call) = reply else {
            panic!("expected a function call, got {reply:?}");
        };
        assert_eq!(call.arguments["z_rotation"], json!(0.0));
        Ok(())
    }

    #[tokio::test]
    async fn plain_text_echoes_back_unchanged() -> anyhow::Result<()> {
        let backend = MockBackend::new();
        assert_eq!(
            backend.interpret("hello there").await?,
            Reply::Content("hello there".to_string())
        );
        // A single number is not enough to look like a goal.
        assert_eq!(
            backend.interpret("wait 5 seconds").await?,
            Reply::Content("wait 5 seconds".to_string())
        );
        Ok(())
    }
}
