// Domain layer: account/breach models and the store port.

pub mod model;
pub mod ports;
