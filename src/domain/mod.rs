// Domain layer: Rack request/response model and the capability traits applications and bodies implement.

pub mod model;
pub mod ports;
