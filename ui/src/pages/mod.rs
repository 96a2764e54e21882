//! Application pages

pub mod home;
pub mod login;
pub mod session;
pub mod view;
