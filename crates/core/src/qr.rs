use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use entrega_primitives::error::ApiError;
use qrcode::render::svg;
use qrcode::QrCode;
use uuid::Uuid;

/// Renders the QR artifact for a delivery: an SVG image encoding the
/// delivery id, base64-encoded for transport. Deterministic given the id.
pub fn encode_delivery_qr(delivery_id: Uuid) -> Result<String, ApiError> {
    let payload = format!("deliveryId={}", delivery_id);

    let code = QrCode::new(payload.as_bytes())
        .map_err(|e| ApiError::Internal(format!("QR encoding failed: {}", e)))?;

    let image = code
        .render::<svg::Color>()
        .min_dimensions(300, 300)
        .build();

    Ok(STANDARD.encode(image))
}
