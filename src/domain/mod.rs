// Core models and ports. Nothing here talks to the network or the file system.

pub mod model;
pub mod ports;
