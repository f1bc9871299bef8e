pub mod client;
pub mod flag;
