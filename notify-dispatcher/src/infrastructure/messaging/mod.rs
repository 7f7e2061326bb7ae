mod fcm_sender;
mod noop;

pub use fcm_sender::FcmPushSender;
pub use noop::NoopPushSender;
