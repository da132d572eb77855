pub mod constants;
pub mod engine;
pub mod rpc;
