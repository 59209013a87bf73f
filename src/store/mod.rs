pub mod account;
pub mod attendance;
pub mod memory;

pub use account::{AccountStore, MySqlAccountStore};
pub use attendance::{AttendanceStore, MySqlAttendanceStore};
