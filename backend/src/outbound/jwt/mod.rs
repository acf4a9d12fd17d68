//! HMAC-signed JWT implementation of the token codec port.
//!
//! Only the signature and the claim structure are checked here. Expiry is
//! evaluated by the token service so it can use an injected clock.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::config::SigningAlgorithm;
use crate::domain::TokenClaims;
use crate::domain::ports::{TokenCodec, TokenCodecError};

impl From<SigningAlgorithm> for Algorithm {
    fn from(value: SigningAlgorithm) -> Self {
        match value {
            SigningAlgorithm::Hs256 => Self::HS256,
            SigningAlgorithm::Hs384 => Self::HS384,
            SigningAlgorithm::Hs512 => Self::HS512,
        }
    }
}

/// Symmetric JWT codec.
///
/// # Examples
/// ```
/// use bookshelf::config::SigningAlgorithm;
/// use bookshelf::domain::ports::TokenCodec;
/// use bookshelf::domain::{TokenClaims, TokenKind};
/// use bookshelf::outbound::jwt::JwtTokenCodec;
///
/// let codec = JwtTokenCodec::new(b"0123456789abcdef0123456789abcdef", SigningAlgorithm::Hs256);
/// let claims = TokenClaims::issue("usuario", TokenKind::Access, chrono::Utc::now(), chrono::Duration::minutes(1));
/// let token = codec.encode(&claims).unwrap();
/// assert_eq!(codec.decode(&token).unwrap(), claims);
/// ```
#[derive(Clone)]
pub struct JwtTokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    header: Header,
    validation: Validation,
}

impl JwtTokenCodec {
    /// Codec signing with `secret` under `algorithm`.
    #[must_use]
    pub fn new(secret: &[u8], algorithm: SigningAlgorithm) -> Self {
        let algorithm = Algorithm::from(algorithm);
        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            header: Header::new(algorithm),
            validation,
        }
    }
}

impl std::fmt::Debug for JwtTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenCodec")
            .field("algorithm", &self.header.alg)
            .finish_non_exhaustive()
    }
}

impl TokenCodec for JwtTokenCodec {
    fn encode(&self, claims: &TokenClaims) -> Result<String, TokenCodecError> {
        encode(&self.header, claims, &self.encoding)
            .map_err(|err| TokenCodecError::encode(err.to_string()))
    }

    fn decode(&self, token: &str) -> Result<TokenClaims, TokenCodecError> {
        decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| TokenCodecError::rejected(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TokenKind;
    use chrono::{Duration, TimeZone, Utc};
    use rstest::{fixture, rstest};

    const SECRET: &[u8] = b"an-hmac-secret-that-is-32-bytes!";

    #[fixture]
    fn codec() -> JwtTokenCodec {
        JwtTokenCodec::new(SECRET, SigningAlgorithm::Hs256)
    }

    #[fixture]
    fn claims() -> TokenClaims {
        let now = Utc::now();
        TokenClaims::issue("usuario", TokenKind::Refresh, now, Duration::days(7))
    }

    #[rstest]
    #[case(SigningAlgorithm::Hs256)]
    #[case(SigningAlgorithm::Hs384)]
    #[case(SigningAlgorithm::Hs512)]
    fn signs_with_each_hmac_algorithm(#[case] algorithm: SigningAlgorithm, claims: TokenClaims) {
        let codec = JwtTokenCodec::new(SECRET, algorithm);
        let token = codec.encode(&claims).expect("encode");
        assert_eq!(token.split('.').count(), 3);
        assert_eq!(codec.decode(&token).expect("decode"), claims);
    }

    #[rstest]
    fn rejects_tokens_signed_with_another_secret(codec: JwtTokenCodec, claims: TokenClaims) {
        let forger = JwtTokenCodec::new(b"some-other-secret-of-enough-size", SigningAlgorithm::Hs256);
        let forged = forger.encode(&claims).expect("encode");
        let err = codec.decode(&forged).expect_err("foreign signature");
        assert!(matches!(err, TokenCodecError::Rejected { .. }));
    }

    #[rstest]
    fn rejects_tokens_signed_with_another_algorithm(codec: JwtTokenCodec, claims: TokenClaims) {
        let other = JwtTokenCodec::new(SECRET, SigningAlgorithm::Hs512);
        let token = other.encode(&claims).expect("encode");
        assert!(codec.decode(&token).is_err());
    }

    #[rstest]
    #[case("")]
    #[case("not-a-jwt")]
    #[case("a.b.c")]
    fn rejects_malformed_tokens(codec: JwtTokenCodec, #[case] token: &str) {
        assert!(codec.decode(token).is_err());
    }

    #[rstest]
    fn leaves_expiry_to_the_caller(codec: JwtTokenCodec) {
        let long_ago = Utc
            .with_ymd_and_hms(2001, 1, 1, 0, 0, 0)
            .single()
            .expect("valid");
        let stale = TokenClaims::issue("usuario", TokenKind::Access, long_ago, Duration::minutes(30));
        let token = codec.encode(&stale).expect("encode");
        assert_eq!(codec.decode(&token).expect("decode"), stale);
    }
}
