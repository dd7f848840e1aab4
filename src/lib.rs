pub mod cli_main;
pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod fastainfo;
pub mod invoker;
pub mod plot;
pub mod scaffold;
pub mod state;
pub mod termination;
pub mod trigger;
pub mod watch;
