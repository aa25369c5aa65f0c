//! QR code for the WhatsApp hand-off, so a desktop visitor can finish on a phone

use base64::Engine;
use image::{ImageFormat, Luma};
use qrcode::QrCode;
use std::io::Cursor;

#[derive(Debug, thiserror::Error)]
pub enum HandoffError {
    #[error("QR encoding failed: {0}")]
    Qr(String),

    #[error("PNG encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

const QR_MIN_SIZE: u32 = 256;

/// Render `link` as a PNG QR code and return it as a `data:` URI
pub fn qr_data_uri(link: &str) -> Result<String, HandoffError> {
    let code = QrCode::new(link.as_bytes()).map_err(|e| HandoffError::Qr(e.to_string()))?;
    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(QR_MIN_SIZE, QR_MIN_SIZE)
        .build();

    let mut png = Vec::new();
    image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    Ok(format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&png)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qr_data_uri_is_png() {
        let uri = qr_data_uri("https://wa.me/554499180116?text=ol%C3%A1").unwrap();
        let encoded = uri.strip_prefix("data:image/png;base64,").unwrap();
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_oversized_payload_fails() {
        let link = "x".repeat(8000);
        assert!(matches!(qr_data_uri(&link), Err(HandoffError::Qr(_))));
    }
}
