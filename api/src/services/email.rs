//! SMTP delivery of verification codes, configured for Gmail.
//!
//! Uses the `lettre` crate over TLS with credentials from the application
//! configuration (`GMAIL_USERNAME` / `GMAIL_APP_PASSWORD`).

use lettre::{
    AsyncTransport, Tokio1Executor,
    message::{Message, MultiPart, SinglePart, header},
    transport::smtp::{
        AsyncSmtpTransport,
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
};
use once_cell::sync::Lazy;

use common::config;

/// Global SMTP client, initialized lazily on first send.
static SMTP_CLIENT: Lazy<AsyncSmtpTransport<Tokio1Executor>> = Lazy::new(|| {
    let tls_parameters =
        TlsParameters::new("smtp.gmail.com".to_string()).expect("Failed to create TLS parameters");

    AsyncSmtpTransport::<Tokio1Executor>::relay("smtp.gmail.com")
        .expect("Failed to create SMTP transport")
        .port(587)
        .tls(Tls::Required(tls_parameters))
        .credentials(Credentials::new(
            config::gmail_username(),
            config::gmail_app_password(),
        ))
        .build()
});

/// Sends the verification code for an attendance session to a student.
///
/// The email carries both plain-text and HTML parts and names the expiry
/// window so the student knows how long the code lasts.
pub async fn send_otp_email(
    to_email: &str,
    code: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let from = format!("{} <{}>", config::email_from_name(), config::gmail_username());
    let expiry_minutes = config::otp_expiry_minutes();

    let plain = format!(
        "Your attendance verification code is {code}.\n\n\
         It expires in {expiry_minutes} minutes. If you did not request this \
         code you can ignore this email."
    );
    let html = format!(
        "<div style=\"font-family: sans-serif\">\
           <p>Your attendance verification code is:</p>\
           <p style=\"font-size: 28px; letter-spacing: 4px\"><strong>{code}</strong></p>\
           <p>It expires in {expiry_minutes} minutes. If you did not request \
              this code you can ignore this email.</p>\
         </div>"
    );

    let email = Message::builder()
        .from(from.parse()?)
        .to(to_email.parse()?)
        .subject("Your attendance verification code")
        .multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(header::ContentType::TEXT_PLAIN)
                        .body(plain),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(header::ContentType::TEXT_HTML)
                        .body(html),
                ),
        )?;

    SMTP_CLIENT.send(email).await?;
    Ok(())
}
