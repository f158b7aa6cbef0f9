//! 签名会话 Cookie
//!
//! Cookie 值格式：`base64url(JSON).base64url(HMAC-SHA256)`。
//! 签名不对或格式错误时当作新会话处理，不报错。

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::models::SessionState;
use crate::web::state::SharedState;

type HmacSha256 = Hmac<Sha256>;

/// 会话 Cookie 名
pub const SESSION_COOKIE: &str = "tutor_session";
/// 浏览器普遍支持的单个 Cookie 上限
const MAX_COOKIE_BYTES: usize = 4096;

/// 会话签名器
#[derive(Clone)]
pub struct SessionSigner {
    key: Vec<u8>,
}

impl SessionSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            key: secret.as_bytes().to_vec(),
        }
    }

    fn mac(&self) -> AppResult<HmacSha256> {
        HmacSha256::new_from_slice(&self.key)
            .map_err(|e| AppError::Other(format!("会话密钥无效: {e}")))
    }

    /// 序列化并签名
    pub fn encode(&self, state: &SessionState) -> AppResult<String> {
        let payload = serde_json::to_vec(state)
            .map_err(|e| AppError::Other(format!("会话序列化失败: {e}")))?;

        let mut mac = self.mac()?;
        mac.update(&payload);
        let signature = mac.finalize().into_bytes();

        Ok(format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(&payload),
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }

    /// 校验签名并反序列化，任何一步失败都返回 `None`
    pub fn decode(&self, value: &str) -> Option<SessionState> {
        let (payload_b64, signature_b64) = value.split_once('.')?;
        let payload = URL_SAFE_NO_PAD.decode(payload_b64).ok()?;
        let signature = URL_SAFE_NO_PAD.decode(signature_b64).ok()?;

        let mut mac = self.mac().ok()?;
        mac.update(&payload);
        if mac.verify_slice(&signature).is_err() {
            warn!("⚠️ 会话 Cookie 签名校验失败，使用新会话");
            return None;
        }

        serde_json::from_slice(&payload).ok()
    }

    /// 从请求头中读取会话，没有或无效时返回默认会话
    pub fn read(&self, headers: &HeaderMap) -> SessionState {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|header| header.to_str().ok())
            .flat_map(|header| header.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .and_then(|(_, value)| self.decode(value))
            .unwrap_or_default()
    }

    /// 生成 `Set-Cookie` 头
    pub fn set_cookie(&self, state: &SessionState) -> AppResult<HeaderValue> {
        let value = self.encode(state)?;
        let cookie = format!("{SESSION_COOKIE}={value}; Path=/; HttpOnly; SameSite=Lax");
        if cookie.len() > MAX_COOKIE_BYTES {
            warn!(
                "⚠️ 会话 Cookie 过大 ({} 字节)，浏览器可能丢弃",
                cookie.len()
            );
        }
        debug!("写回会话 Cookie ({} 字节)", cookie.len());

        HeaderValue::from_str(&cookie).map_err(|e| AppError::Other(format!("Cookie 头无效: {e}")))
    }
}

/// 当前请求的会话
///
/// 修改后需要调用 [`SessionSigner::set_cookie`] 写回
#[derive(Debug, Clone, Default)]
pub struct Session(pub SessionState);

impl FromRequestParts<SharedState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Session(state.sessions.read(&parts.headers)))
    }
}
