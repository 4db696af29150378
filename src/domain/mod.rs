// Domain layer: core models and ports (interfaces).

pub mod departments;
pub mod model;
pub mod ports;
