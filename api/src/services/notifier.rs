use crate::services::email::send_otp_email;

/// Sink for delivering verification codes to students.
///
/// `deliver` must not block and must not surface failures to the caller: the
/// challenge is already committed when delivery starts, and a slow or broken
/// mail relay must never fail the request that created it.
pub trait OtpNotifier: Send + Sync {
    fn deliver(&self, email: &str, code: &str);
}

/// Production notifier: spawns an SMTP send and logs failures at warn.
pub struct SmtpOtpNotifier;

impl OtpNotifier for SmtpOtpNotifier {
    fn deliver(&self, email: &str, code: &str) {
        let email = email.to_owned();
        let code = code.to_owned();
        tokio::spawn(async move {
            if let Err(e) = send_otp_email(&email, &code).await {
                tracing::warn!(error = %e, to = %email, "failed to deliver verification code");
            }
        });
    }
}
