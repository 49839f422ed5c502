pub mod email;
pub mod notifier;
pub mod qr;
