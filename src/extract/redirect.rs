// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Outbound link resolution
//!
//! The wiki wraps external links as `//link.mcmod.cn/target/<payload>`, where
//! the payload is the percent-escaped target URL, base64url encoded. Links are
//! either decoded locally ([`RedirectStrategy::Decode`]) or followed over the
//! network with a HEAD request ([`RedirectStrategy::Follow`]). Resolution never
//! fails: any problem hands back the link unchanged.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Redirector prefix used by the wiki for outbound links
pub const LINK_PREFIX: &str = "https://link.mcmod.cn/target/";

// Redirector links rendered on a page served over plain http
const LINK_PREFIX_HTTP: &str = "http://link.mcmod.cn/target/";

const MAX_REDIRECTS: usize = 10;

// Payloads show up both with and without `=` padding
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// How obfuscated links are turned into their real targets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RedirectStrategy {
    /// Decode the payload locally; no network round-trip
    #[default]
    Decode,
    /// Issue a HEAD request and report where the redirect chain ends
    Follow,
}

/// Reasons a redirector payload could not be decoded
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("not a redirector link")]
    NotObfuscated,

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("percent-decoded payload is not valid UTF-8")]
    Percent,
}

/// Prefix scheme-relative URLs (`//host/...`) with `https:`
pub fn with_scheme(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{}", url)
    } else {
        url.to_string()
    }
}

fn payload(url: &str) -> Option<&str> {
    url.strip_prefix(LINK_PREFIX)
        .or_else(|| url.strip_prefix(LINK_PREFIX_HTTP))
}

/// True if `url` goes through the wiki's redirector
pub fn is_obfuscated(url: &str) -> bool {
    payload(&with_scheme(url)).is_some()
}

/// Decode the target of a redirector link
pub fn decode_target(url: &str) -> Result<String, DecodeError> {
    let url = with_scheme(url);
    let encoded = payload(&url).ok_or(DecodeError::NotObfuscated)?;

    let bytes = URL_SAFE_LENIENT.decode(encoded)?;
    let escaped = String::from_utf8(bytes)?;
    let target = urlencoding::decode(&escaped).map_err(|_| DecodeError::Percent)?;

    Ok(target.into_owned())
}

/// Canonical absolute form of `url`, decoding redirector links
///
/// Falls back to the scheme-prefixed input when the payload is malformed.
pub fn resolve(url: &str) -> String {
    let canonical = with_scheme(url);
    if payload(&canonical).is_none() {
        return canonical;
    }

    match decode_target(&canonical) {
        Ok(target) => target,
        Err(e) => {
            debug!("Keeping undecodable redirect link {}: {}", canonical, e);
            canonical
        }
    }
}

/// Link normalisation applied while extracting a page
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkResolver {
    strategy: RedirectStrategy,
}

impl LinkResolver {
    pub fn new(strategy: RedirectStrategy) -> Self {
        Self { strategy }
    }

    /// Under `Follow`, redirector links are only scheme-prefixed here and
    /// left for [`RedirectFollower`].
    pub fn resolve(&self, url: &str) -> String {
        match self.strategy {
            RedirectStrategy::Decode => resolve(url),
            RedirectStrategy::Follow => with_scheme(url),
        }
    }
}

/// Network-based resolution: HEAD the link and report the final address
pub struct RedirectFollower {
    client: Client,
}

impl RedirectFollower {
    pub fn new(timeout: Duration, user_agent: &str) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self { client })
    }

    #[cfg(test)]
    pub(crate) fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Final address after redirects, or `url` itself on any error or timeout
    pub async fn follow(&self, url: &str) -> String {
        let target = with_scheme(url);
        match Url::parse(&target) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            _ => return url.to_string(),
        }

        match self.client.head(&target).send().await {
            Ok(response) => response.url().to_string(),
            Err(e) => {
                debug!("Redirect follow failed for {}: {}", target, e);
                url.to_string()
            }
        }
    }
}
