mod realtime_handle;
mod servo_handle;

pub use realtime_handle::*;
pub use servo_handle::*;
