// Domain layer: request/result models and the engine port.

pub mod model;
pub mod ports;
