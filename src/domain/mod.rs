// Domain layer: the CV model and the ports the site builder talks through.

pub mod model;
pub mod ports;
