//! Counter contract functions and the call payload handed to a wallet

use serde::Serialize;

use crate::domain::clarity::encode_int_argument;

/// Public functions of the counter contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterFunction {
    /// Read-only
    GetCounter,
    Increment,
    Decrement,
    IncrementBy(i128),
    Reset,
}

impl CounterFunction {
    pub fn function_name(&self) -> &'static str {
        match self {
            CounterFunction::GetCounter => "get-counter",
            CounterFunction::Increment => "increment",
            CounterFunction::Decrement => "decrement",
            CounterFunction::IncrementBy(_) => "increment-by",
            CounterFunction::Reset => "reset",
        }
    }

    /// Serialized Clarity arguments as hex, in call order
    pub fn arguments(&self) -> Vec<String> {
        match self {
            CounterFunction::IncrementBy(n) => vec![encode_int_argument(*n)],
            _ => Vec::new(),
        }
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self, CounterFunction::GetCounter)
    }
}

/// Contract call a wallet is asked to sign
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractCall {
    pub contract_address: String,
    pub contract_name: String,
    pub function_name: String,
    pub function_args: Vec<String>,
}

impl ContractCall {
    pub fn new(
        contract_address: impl Into<String>,
        contract_name: impl Into<String>,
        function: CounterFunction,
    ) -> Self {
        Self {
            contract_address: contract_address.into(),
            contract_name: contract_name.into(),
            function_name: function.function_name().to_string(),
            function_args: function.arguments(),
        }
    }

    /// `<address>.<name>` contract identifier
    pub fn contract_id(&self) -> String {
        format!("{}.{}", self.contract_address, self.contract_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_names() {
        assert_eq!(CounterFunction::GetCounter.function_name(), "get-counter");
        assert_eq!(CounterFunction::IncrementBy(3).function_name(), "increment-by");
        assert!(CounterFunction::GetCounter.is_read_only());
        assert!(!CounterFunction::Reset.is_read_only());
    }

    #[test]
    fn test_increment_by_argument() {
        let call = ContractCall::new("SP000", "counter", CounterFunction::IncrementBy(-2));
        assert_eq!(call.function_name, "increment-by");
        assert_eq!(
            call.function_args,
            vec!["0x00fffffffffffffffffffffffffffffffe".to_string()]
        );
        assert_eq!(call.contract_id(), "SP000.counter");
    }

    #[test]
    fn test_no_argument_functions() {
        let call = ContractCall::new("SP000", "counter", CounterFunction::Increment);
        assert!(call.function_args.is_empty());
    }
}
