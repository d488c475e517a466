//! Rate limiting middleware.

use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::{HeaderMap, HeaderName, HeaderValue},
};
use blog_shared::ApiResponse;
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::sync::Arc;

use blog_core::ports::RateLimiter;

const LIMIT_HEADER: &str = "x-ratelimit-limit";
const REMAINING_HEADER: &str = "x-ratelimit-remaining";
const RESET_HEADER: &str = "x-ratelimit-reset";

/// Seconds until the bucket is full again, at most.
const RESET_SECONDS: &str = "1";

/// Rate limiting middleware factory.
pub struct RateLimitMiddleware {
    limiter: Arc<dyn RateLimiter>,
}

impl RateLimitMiddleware {
    pub fn new(limiter: Arc<dyn RateLimiter>) -> Self {
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RateLimitMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService {
            service,
            limiter: self.limiter.clone(),
        }))
    }
}

pub struct RateLimitMiddlewareService<S> {
    service: S,
    limiter: Arc<dyn RateLimiter>,
}

fn insert_rate_limit_headers(headers: &mut HeaderMap, limit: u64, remaining: u64) {
    headers.insert(HeaderName::from_static(LIMIT_HEADER), HeaderValue::from(limit));
    headers.insert(
        HeaderName::from_static(REMAINING_HEADER),
        HeaderValue::from(remaining),
    );
    headers.insert(
        HeaderName::from_static(RESET_HEADER),
        HeaderValue::from_static(RESET_SECONDS),
    );
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Disabled: no bucket access and no headers
        if !self.limiter.is_enabled() {
            let fut = self.service.call(req);
            return Box::pin(async move { Ok(fut.await?.map_into_left_body()) });
        }

        tracing::debug!(uri = %req.uri(), "Rate limit check");

        let allowed = self.limiter.try_admit();
        let limit = self.limiter.limit();
        let remaining = self.limiter.remaining_tokens();

        if !allowed {
            // Rate limited - return 429 immediately
            let body = ApiResponse::<()>::error("Rate limit exceeded. Please try again later.")
                .with_error(
                    429,
                    format!(
                        "Too many requests. Maximum {} requests per second allowed.",
                        limit
                    ),
                );

            let mut response = HttpResponse::TooManyRequests()
                .insert_header(("Retry-After", RESET_SECONDS))
                .json(body);
            insert_rate_limit_headers(response.headers_mut(), limit, remaining);

            let (http_req, _payload) = req.into_parts();
            let srv_response = ServiceResponse::new(http_req, response);

            return Box::pin(async move { Ok(srv_response.map_into_right_body()) });
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let mut res = fut.await?;
            insert_rate_limit_headers(res.headers_mut(), limit, remaining);
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use blog_infra::{ManualClock, RateLimitSettings, TokenBucketRateLimiter};
    use std::time::Duration;

    fn limiter(rate: i64, enabled: bool) -> (Arc<TokenBucketRateLimiter>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        let settings = RateLimitSettings {
            enabled,
            requests_per_second: rate,
            ..Default::default()
        };
        let limiter = Arc::new(TokenBucketRateLimiter::new(&settings, clock.clone()).unwrap());
        (limiter, clock)
    }

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().body("pong")
    }

    #[actix_web::test]
    async fn test_admitted_requests_carry_headers() {
        let (limiter, _clock) = limiter(3, true);
        let app = test::init_service(
            App::new()
                .wrap(RateLimitMiddleware::new(limiter))
                .route("/ping", web::get().to(ok)),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/ping").to_request()).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers().get(LIMIT_HEADER).unwrap(), "3");
        assert_eq!(res.headers().get(REMAINING_HEADER).unwrap(), "2");
        assert_eq!(res.headers().get(RESET_HEADER).unwrap(), "1");
    }

    #[actix_web::test]
    async fn test_exhausted_bucket_returns_429() {
        let (limiter, clock) = limiter(2, true);
        let app = test::init_service(
            App::new()
                .wrap(RateLimitMiddleware::new(limiter))
                .route("/ping", web::get().to(ok)),
        )
        .await;

        for _ in 0..2 {
            let res =
                test::call_service(&app, test::TestRequest::get().uri("/ping").to_request()).await;
            assert_eq!(res.status(), StatusCode::OK);
        }

        let res = test::call_service(&app, test::TestRequest::get().uri("/ping").to_request()).await;
        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(res.headers().get(REMAINING_HEADER).unwrap(), "0");
        assert_eq!(res.headers().get("retry-after").unwrap(), "1");

        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], 429);
        assert_eq!(
            body["error"]["details"],
            "Too many requests. Maximum 2 requests per second allowed."
        );

        clock.advance(Duration::from_millis(500));
        let res = test::call_service(&app, test::TestRequest::get().uri("/ping").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_disabled_limiter_passes_everything_without_headers() {
        let (limiter, _clock) = limiter(1, false);
        let app = test::init_service(
            App::new()
                .wrap(RateLimitMiddleware::new(limiter.clone()))
                .route("/ping", web::get().to(ok)),
        )
        .await;

        for _ in 0..5 {
            let res =
                test::call_service(&app, test::TestRequest::get().uri("/ping").to_request()).await;
            assert_eq!(res.status(), StatusCode::OK);
            assert!(res.headers().get(LIMIT_HEADER).is_none());
        }
        assert_eq!(limiter.remaining_tokens(), 1);
    }
}
