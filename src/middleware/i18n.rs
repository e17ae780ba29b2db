// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};

// Nosso extrator de idioma (só o idioma primário: "pt-BR" -> "pt")
#[derive(Debug, Clone)]
pub struct Locale(String);

const DEFAULT_LANG: &str = "en";

impl Locale {
    pub fn new(lang: impl Into<String>) -> Self {
        Self(lang.into())
    }

    pub fn english() -> Self {
        Self(DEFAULT_LANG.to_string())
    }

    pub fn lang(&self) -> &str {
        &self.0
    }

    /// Deriva o idioma do Accept-Language (usado também fora de handlers,
    /// ex: nos guards, onde não há extrator).
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let lang = headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok())
            .and_then(|header_str| {
                accept_language::parse(header_str)
                    .first()
                    .map(|tag_string| {
                        // "pt-BR" -> ["pt", "BR"] -> "pt"
                        tag_string
                            .split('-')
                            .next()
                            .unwrap_or(tag_string)
                            .to_string()
                    })
            })
            .unwrap_or_else(|| DEFAULT_LANG.to_string());

        Self(lang)
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(Locale::from_headers(&parts.headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn picks_primary_language_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("pt-BR,pt;q=0.9,en;q=0.8"),
        );
        assert_eq!(Locale::from_headers(&headers).lang(), "pt");
    }

    #[test]
    fn missing_header_defaults_to_english() {
        assert_eq!(Locale::from_headers(&HeaderMap::new()).lang(), "en");
    }
}
