pub mod expiry_timer;

pub use expiry_timer::ExpiryTimer;
