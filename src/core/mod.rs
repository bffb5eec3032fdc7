pub mod calculator;
pub mod service;
pub mod validator;

pub use calculator::compute;
pub use validator::{validate, Field, ValidationErrors};
