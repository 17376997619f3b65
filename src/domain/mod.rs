// Domain layer: complaint models and the intake port. No I/O here.

pub mod model;
pub mod ports;
