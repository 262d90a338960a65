//! Parser for counter function names typed on the command line

use super::CounterFunction;

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Call(CounterFunction),

    // Unknown command
    Unknown(String),
}

/// Parse a function name, e.g. `increment`, `dec`, `increment-by 5`
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().map(|s| s.trim().to_string());

    match cmd.to_lowercase().as_str() {
        "get-counter" | "get" | "read" => Command::Call(CounterFunction::GetCounter),
        "increment" | "inc" => Command::Call(CounterFunction::Increment),
        "decrement" | "dec" => Command::Call(CounterFunction::Decrement),
        "reset" => Command::Call(CounterFunction::Reset),
        "increment-by" | "by" => match args.and_then(|s| s.parse::<i128>().ok()) {
            Some(n) => Command::Call(CounterFunction::IncrementBy(n)),
            None => Command::Unknown(input.to_string()),
        },

        _ => Command::Unknown(input.to_string()),
    }
}
