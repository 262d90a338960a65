pub mod call;
pub mod command;

pub use call::{ContractCall, CounterFunction};
pub use command::{parse_command, Command};
