//! Contract call preview: the payload a wallet has to sign

use super::ToolResult;
use crate::core::{parse_command, Command, ContractCall};

/// Parse a function name and build the call for the configured contract.
/// Syntax: `increment`, `decrement`, `reset`, `increment-by <n>`
pub fn prepare_call(
    input: &str,
    contract_address: &str,
    contract_name: &str,
) -> Result<ContractCall, String> {
    match parse_command(input) {
        Command::Call(function) if function.is_read_only() => Err(format!(
            "{} is read-only; use `get` instead",
            function.function_name()
        )),
        Command::Call(function) => Ok(ContractCall::new(contract_address, contract_name, function)),
        Command::Unknown(text) => Err(format!(
            "Unknown function {:?}. Expected increment, decrement, reset or increment-by <n>",
            text
        )),
    }
}

pub fn preview(call: &ContractCall) -> ToolResult {
    let args = if call.function_args.is_empty() {
        "()".to_string()
    } else {
        call.function_args.join(", ")
    };
    ToolResult::new("Contract Call (unsigned)")
        .add("contract", call.contract_id())
        .add("function", &call.function_name)
        .add("args", args)
}
