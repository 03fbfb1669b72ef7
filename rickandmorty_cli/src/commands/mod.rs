pub mod search;
pub mod watch;
