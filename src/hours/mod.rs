pub mod central_datetime_now;
pub mod error;
pub mod exceptions;
pub mod period;
pub mod schedule;
pub mod status;
pub mod time_of_day;
