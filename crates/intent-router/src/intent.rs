use crate::{Result, RouterError};
use language_service::{FunctionCall, NAVIGATE_FUNCTION};
use motion_executor::NavigationGoal;
use serde_json::Value;

/// The closed set of commands the router executes. Unknown function names
/// are rejected at the boundary; adding a command means adding a variant
/// and every match on `Command` is checked exhaustively.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Navigate(NavigationGoal),
}

impl Command {
    /// Validate a function call from the language service into a command.
    pub fn from_call(call: &FunctionCall) -> Result<Self> {
        match call.name.as_str() {
            NAVIGATE_FUNCTION => {
                let x = require_number(&call.arguments, "x")?;
                let y = require_number(&call.arguments, "y")?;
                let z_rotation = require_number(&call.arguments, "z_rotation")?;
                let goal = NavigationGoal::new(x, y, z_rotation)
                    .map_err(|e| RouterError::InvalidArguments(e.to_string()))?;
                Ok(Command::Navigate(goal))
            }
            other => Err(RouterError::UnrecognizedIntent(other.to_string())),
        }
    }
}

fn require_number(arguments: &Value, field: &str) -> Result<f64> {
    let value = arguments
        .get(field)
        .ok_or_else(|| RouterError::InvalidArguments(format!("missing field '{field}'")))?;
    value
        .as_f64()
        .filter(|n| n.is_finite())
        .ok_or_else(|| RouterError::InvalidArguments(format!("'{field}' is not a finite number")))
}
