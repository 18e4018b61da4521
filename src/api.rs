pub mod backend;
mod client;
pub mod octopus;
