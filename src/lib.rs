pub mod catalog;
pub mod config;
pub mod consts;
pub mod model;
pub mod normalize;
pub mod places;
pub mod server;
