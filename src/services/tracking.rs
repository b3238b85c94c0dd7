use std::net::SocketAddr;

use axum::http::{header, HeaderMap};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::Result,
    models::email_log::{EmailLogRead, NewEmailLogRead},
    repositories::store::EmailLogRepository,
    services::user_agent::{self, UNKNOWN_USER_AGENT},
};

/// Placeholder recorded when no client address can be determined.
pub const UNKNOWN_IP: &str = "unknown";

/// The 1×1 GIF served by the tracking endpoint.
pub const TRACKING_PIXEL: [u8; 26] = [
    0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x2c, 0x00,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x02, 0x00, 0x3b,
];

/// Who opened the email, as far as the request tells.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientMeta {
    pub ip_address: String,
    pub user_agent: String,
}

impl ClientMeta {
    /// Reads the client address and user agent from a request.
    pub fn from_request(headers: &HeaderMap, peer: Option<SocketAddr>) -> Self {
        Self {
            ip_address: client_ip(headers, peer),
            user_agent: headers
                .get(header::USER_AGENT)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
                .unwrap_or_else(|| UNKNOWN_USER_AGENT.to_string()),
        }
    }
}

/// Client address: first `x-forwarded-for` entry, then `x-real-ip`, then the
/// connection peer, then `"unknown"`.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty());
    if let Some(ip) = forwarded {
        return ip.to_string();
    }

    let real_ip = headers
        .get("x-real-ip")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty());
    if let Some(ip) = real_ip {
        return ip.to_string();
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_IP.to_string())
}

/// Appends an open event for `log_id`.
///
/// Returns `Ok(None)` when the id is not a UUID or names no log.
pub async fn record_open(
    logs: &dyn EmailLogRepository,
    log_id: &str,
    client: &ClientMeta,
) -> Result<Option<EmailLogRead>> {
    let Ok(log_id) = Uuid::parse_str(log_id.trim()) else {
        return Ok(None);
    };

    let Some(log) = logs.find_email_log(log_id).await? else {
        return Ok(None);
    };

    let info = user_agent::classify(&client.user_agent);
    let read = logs
        .insert_email_log_read(NewEmailLogRead {
            email_log_id: log.id,
            ip_address: client.ip_address.clone(),
            browser: info.browser,
            operating_system: info.operating_system,
            read_at: Utc::now(),
        })
        .await?;

    Ok(Some(read))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use base64::{engine::general_purpose::STANDARD, Engine as _};

    #[test]
    fn pixel_is_the_canonical_gif() {
        assert_eq!(STANDARD.encode(TRACKING_PIXEL), "R0lGODlhAQABAAAAACwAAAAAAQABAAACADs=");
        assert!(TRACKING_PIXEL.starts_with(b"GIF89a"));
    }

    #[test]
    fn client_ip_prefers_forwarded() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("1.2.3.4, 5.6.7.8"));
        headers.insert("x-real-ip", HeaderValue::from_static("9.9.9.9"));
        assert_eq!(client_ip(&headers, None), "1.2.3.4");
    }

    #[test]
    fn client_ip_falls_back_to_real_ip_then_peer() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("9.9.9.9"));
        assert_eq!(client_ip(&headers, None), "9.9.9.9");

        let peer: SocketAddr = "10.0.0.7:55000".parse().unwrap();
        assert_eq!(client_ip(&HeaderMap::new(), Some(peer)), "10.0.0.7");
        assert_eq!(client_ip(&HeaderMap::new(), None), "unknown");
    }

    #[test]
    fn missing_user_agent_is_unknown() {
        let meta = ClientMeta::from_request(&HeaderMap::new(), None);
        assert_eq!(meta.user_agent, "unknown");
        assert_eq!(meta.ip_address, "unknown");
    }
}
