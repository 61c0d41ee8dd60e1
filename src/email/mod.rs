pub mod templates;

use chrono::{DateTime, Utc};
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;
use crate::models::Booking;

pub struct SystemMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
    site_name: String,
}

impl SystemMailer {
    pub fn new(config: &SmtpConfig, site_name: &str) -> Result<Self, String> {
        let creds = Credentials::new(config.user.clone(), config.pass.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| format!("System SMTP error: {e}"))?
            .port(config.port)
            .credentials(creds)
            .build();

        Ok(Self {
            transport,
            from: config.from.clone(),
            site_name: site_name.to_string(),
        })
    }

    pub async fn send_welcome(
        &self,
        to_email: &str,
        to_name: &str,
        base_url: &str,
    ) -> Result<(), String> {
        let html = templates::render_welcome(to_name, base_url, &self.site_name);
        self.send(to_email, &format!("Welcome to {}", self.site_name), &html)
            .await
    }

    /// Cancellation confirmation for a soft-deleted booking.
    pub async fn send_booking_cancellation(
        &self,
        to_email: &str,
        to_name: &str,
        booking: &Booking,
    ) -> Result<(), String> {
        let html = templates::render_booking_cancellation(
            to_name,
            &format_booking_date(booking.date),
            booking.guests,
            &booking.special_requests,
            &self.site_name,
        );
        self.send(
            to_email,
            &format!("Booking Cancellation Confirmation - {}", self.site_name),
            &html,
        )
        .await
    }

    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), String> {
        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| format!("Invalid from address: {e}"))?,
            )
            .to(to.parse().map_err(|e| format!("Invalid to address: {e}"))?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .map_err(|e| format!("Failed to build email: {e}"))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| format!("Failed to send email: {e}"))?;

        Ok(())
    }
}

fn format_booking_date(date: DateTime<Utc>) -> String {
    date.format("%d %B %Y at %H:%M").to_string()
}
