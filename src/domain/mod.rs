// Domain layer: store-hours model and ports (clock, storage, renderers).

pub mod model;
pub mod ports;
