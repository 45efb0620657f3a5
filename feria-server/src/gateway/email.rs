//! Reservation email notifications (SES)

use async_trait::async_trait;
use aws_sdk_sesv2::Client as SesClient;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Post-commit booking notifications. Delivery is best effort: the engine
/// logs failures and never rolls a booking back over email.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn reservation_confirmed(
        &self,
        to: &str,
        business_name: &str,
        stall_name: &str,
        qr_code_url: Option<&str>,
    ) -> Result<(), BoxError>;

    async fn reservation_cancelled(
        &self,
        to: &str,
        business_name: &str,
        stall_name: &str,
    ) -> Result<(), BoxError>;
}

pub struct SesMailer {
    ses: SesClient,
    from: String,
}

impl SesMailer {
    pub fn new(ses: SesClient, from: impl Into<String>) -> Self {
        Self {
            ses,
            from: from.into(),
        }
    }
}

#[async_trait]
impl Mailer for SesMailer {
    async fn reservation_confirmed(
        &self,
        to: &str,
        business_name: &str,
        stall_name: &str,
        qr_code_url: Option<&str>,
    ) -> Result<(), BoxError> {
        let subject = Content::builder()
            .data("Reserva confirmada / Reservation confirmed")
            .build()?;

        let mut body_text = format!(
            "Hola {business_name}:\n\
             Tu reserva del puesto \"{stall_name}\" ha sido confirmada.\n\
             Presenta tu código QR en el acceso de expositores.\n\n\
             Hello {business_name},\n\
             Your reservation for stall \"{stall_name}\" is confirmed.\n\
             Present your QR code at the exhibitor entrance."
        );
        if let Some(url) = qr_code_url {
            body_text.push_str(&format!("\n\nCódigo QR / QR code: {url}"));
        }

        let body = Body::builder()
            .text(Content::builder().data(body_text).build()?)
            .build();

        let message = Message::builder().subject(subject).body(body).build();

        self.ses
            .send_email()
            .from_email_address(&self.from)
            .destination(Destination::builder().to_addresses(to).build())
            .content(EmailContent::builder().simple(message).build())
            .send()
            .await?;

        tracing::info!(to = to, stall = stall_name, "Confirmation email sent");
        Ok(())
    }

    async fn reservation_cancelled(
        &self,
        to: &str,
        business_name: &str,
        stall_name: &str,
    ) -> Result<(), BoxError> {
        let subject = Content::builder()
            .data("Reserva cancelada / Reservation cancelled")
            .build()?;

        let body_text = format!(
            "Hola {business_name}:\n\
             Tu reserva del puesto \"{stall_name}\" ha sido cancelada.\n\
             El puesto vuelve a estar disponible.\n\n\
             Hello {business_name},\n\
             Your reservation for stall \"{stall_name}\" has been cancelled.\n\
             The stall is available again."
        );

        let body = Body::builder()
            .text(Content::builder().data(body_text).build()?)
            .build();

        let message = Message::builder().subject(subject).body(body).build();

        self.ses
            .send_email()
            .from_email_address(&self.from)
            .destination(Destination::builder().to_addresses(to).build())
            .content(EmailContent::builder().simple(message).build())
            .send()
            .await?;

        tracing::info!(to = to, stall = stall_name, "Cancellation email sent");
        Ok(())
    }
}
