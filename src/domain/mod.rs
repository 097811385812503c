// Domain layer: the country record and the ports the search controller talks through.

pub mod model;
pub mod ports;
