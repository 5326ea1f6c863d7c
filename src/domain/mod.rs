// Domain layer: elevator state, scenario limits, pacing, and the ports the core drives.

pub mod constraints;
pub mod model;
pub mod ports;
pub mod timing;
