pub mod catalog;
pub mod config;
pub mod direction;
pub mod goal;
pub mod loops;
pub mod profile;
pub mod suggest;
