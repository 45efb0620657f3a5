//! Outbound integrations: QR issuance and email notifications.
//!
//! Both sit behind traits so the reservation engine can run against
//! in-memory fakes in tests.

pub mod email;
pub mod qr;

pub use email::{Mailer, SesMailer};
pub use qr::{HttpQrGateway, QrGateway};
