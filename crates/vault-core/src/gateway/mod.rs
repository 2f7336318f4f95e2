pub mod policy;
pub mod request;

pub use policy::{Decision, Operation, evaluate, operation_for};
pub use request::{ResourceClass, RoutedRequest, classify, decode_key, encode_key};
