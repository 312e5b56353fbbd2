mod auth;
mod calendar;
mod log;

pub use auth::{AuthCommands, AuthCredentialArgs, AuthSetApiKeyArgs};
pub use calendar::{CalendarCommands, CalendarMonthArgs};
pub use log::{LogCheckArgs, LogCommands, LogCountArgs, LogRecordArgs};
