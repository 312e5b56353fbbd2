pub mod auth;
pub mod calendar;
pub mod classify;
pub mod dispatch;
pub mod log;
