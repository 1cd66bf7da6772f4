// Domain layer: order models and ports (interfaces).

pub mod model;
pub mod ports;
