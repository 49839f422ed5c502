use db::error::DomainError;
use qrcode::{QrCode, render::svg};

/// Renders a session payload string into an SVG QR artifact.
///
/// Pure function; the payload is whatever `SessionPayload::encode` produced
/// and the scanner recovers it verbatim.
pub fn render_svg(data: &str) -> Result<String, DomainError> {
    let code = QrCode::new(data.as_bytes())
        .map_err(|e| DomainError::Validation(format!("could not encode QR payload: {e}")))?;
    Ok(code
        .render::<svg::Color>()
        .min_dimensions(240, 240)
        .build())
}
