use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Function name the model is asked to call for navigation requests.
pub const NAVIGATE_FUNCTION: &str = "navigate_robot";

/// Structured function-call intent produced by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// JSON object of call arguments, as returned by the model.
    pub arguments: Value,
}

/// What the language service returned for one operator utterance: either a
/// function-call intent or plain conversational content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Reply {
    FunctionCall(FunctionCall),
    Content(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Required by the live backend; ignored by the mock.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub system_prompt: String,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4".to_string(),
            system_prompt: "You are a robot control assistant. Interpret user input and decide \
                            when to trigger the 'navigate_robot' function."
                .to_string(),
        }
    }
}

/// Schema for `navigate_robot(x, y, z_rotation)` as declared to the model.
/// All three fields are required numbers.
pub fn navigate_function_schema() -> Value {
    json!({
        "name": NAVIGATE_FUNCTION,
        "description": "Move the robot to a specific location with a given rotation.",
        "parameters": {
            "type": "object",
            "properties": {
                "x": {"type": "number", "description": "X coordinate of the goal position."},
                "y": {"type": "number", "description": "Y coordinate of the goal position."},
                "z_rotation": {
                    "type": "number",
                    "description": "Rotation around the Z-axis in radians."
                },
            },
            "required": ["x", "y", "z_rotation"],
        },
    })
}
