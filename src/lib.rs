#![cfg_attr(not(test), no_std)]

pub mod commands;
pub mod config;
pub mod device;
pub mod dispatcher;
pub mod protocol;
pub mod run_loop;
pub mod serial;
pub mod usb;
