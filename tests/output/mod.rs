pub mod dispatch;
pub mod formats;
