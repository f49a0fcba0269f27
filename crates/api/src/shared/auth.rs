use crate::error::NurtureError;
use actix_web::HttpRequest;
use nurture_scheduler_infra::NurtureContext;

/// Protects a route with the pre-shared secret, expected as
/// `Authorization: Bearer <secret>`. On mismatch no work is performed.
pub fn protect_route(http_req: &HttpRequest, ctx: &NurtureContext) -> Result<(), NurtureError> {
    let token = http_req
        .headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.trim());

    match token {
        Some(token) if token == ctx.config.api_secret => Ok(()),
        Some(_) => Err(NurtureError::Unauthorized(
            "Invalid api secret provided".into(),
        )),
        None => Err(NurtureError::Unauthorized(
            "Expected api secret in the authorization header. Example: `Authorization: Bearer SECRET`"
                .into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use nurture_scheduler_infra::NurtureContext;

    fn ctx_with_secret(secret: &str) -> NurtureContext {
        let mut ctx = NurtureContext::create_inmemory();
        ctx.config.api_secret = secret.into();
        ctx
    }

    #[test]
    fn accepts_the_configured_secret() {
        let ctx = ctx_with_secret("opnsesame");
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer opnsesame"))
            .to_http_request();
        assert!(protect_route(&req, &ctx).is_ok());
    }

    #[test]
    fn rejects_missing_and_invalid_secrets() {
        let ctx = ctx_with_secret("opnsesame");

        let req = TestRequest::default().to_http_request();
        assert!(protect_route(&req, &ctx).is_err());

        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer nope"))
            .to_http_request();
        assert!(protect_route(&req, &ctx).is_err());

        // Secret without the bearer scheme is not accepted either
        let req = TestRequest::default()
            .insert_header(("Authorization", "opnsesame"))
            .to_http_request();
        assert!(protect_route(&req, &ctx).is_err());
    }
}
