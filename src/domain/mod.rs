// Domain layer: native names and the printer port. No loader code here.

pub mod model;
pub mod ports;
