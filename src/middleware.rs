//! `Authorization` header parsing middleware.

use std::sync::Arc;

use actix_utils::future::{ready, Ready};
use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures_util::future::{FutureExt as _, LocalBoxFuture};

use crate::headers::authorization::{ParsedAuthorization, SignatureOptions, SignatureParser};

/// Middleware that parses the `Authorization` header of every request.
///
/// On success it stores a [`ParsedAuthorization`] and a [`Username`] in the request
/// extensions before calling the wrapped service. Requests without the header, or with a
/// scheme other than `Basic` and `Signature`, are passed through as well.
///
/// No credentials are verified. If the header is present but cannot be parsed, the wrapped
/// service is not called and a `400 Bad Request` response is returned instead.
///
/// `Signature` headers are handed to the [`SignatureParser`] given at construction.
///
/// [`Username`]: crate::headers::authorization::Username
#[derive(Debug)]
pub struct AuthorizationParser<P> {
    inner: Arc<Inner<P>>,
}

#[derive(Debug)]
struct Inner<P> {
    parser: P,
    options: SignatureOptions,
}

impl<P> AuthorizationParser<P>
where
    P: SignatureParser,
{
    /// Construct `AuthorizationParser` middleware with the given signature parser and default
    /// [`SignatureOptions`].
    ///
    /// # Example
    /// ```
    /// # use actix_web::HttpRequest;
    /// # use actix_web_authparser::headers::authorization::{ParsedSignature, SignatureOptions};
    /// # use actix_web_authparser::middleware::AuthorizationParser;
    /// fn parse_signature(
    ///     req: &HttpRequest,
    ///     options: &SignatureOptions,
    /// ) -> Result<ParsedSignature, String> {
    ///     Err("signatures are not accepted here".to_owned())
    /// }
    ///
    /// let middleware = AuthorizationParser::new(parse_signature);
    /// ```
    pub fn new(parser: P) -> Self {
        Self::with_options(parser, SignatureOptions::default())
    }

    /// Construct `AuthorizationParser` middleware with the given signature parser and
    /// options.
    ///
    /// The options' algorithm list is always replaced by
    /// [`ALGORITHMS`](crate::headers::authorization::ALGORITHMS) before being passed to the
    /// parser.
    pub fn with_options(parser: P, options: SignatureOptions) -> Self {
        AuthorizationParser {
            inner: Arc::new(Inner { parser, options }),
        }
    }

    /// Returns the configured signature options.
    pub fn options(&self) -> &SignatureOptions {
        &self.inner.options
    }
}

impl<P> Clone for AuthorizationParser<P> {
    fn clone(&self) -> Self {
        AuthorizationParser {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, B, P> Transform<S, ServiceRequest> for AuthorizationParser<P>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    P: SignatureParser + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthorizationParserMiddleware<S, P>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthorizationParserMiddleware {
            service,
            inner: Arc::clone(&self.inner),
        }))
    }
}

#[doc(hidden)]
pub struct AuthorizationParserMiddleware<S, P> {
    service: S,
    inner: Arc<Inner<P>>,
}

impl<S, B, P> Service<ServiceRequest> for AuthorizationParserMiddleware<S, P>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    P: SignatureParser + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_service::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let parsed =
            ParsedAuthorization::parse(req.request(), &self.inner.parser, &self.inner.options);

        let auth = match parsed {
            Ok(auth) => auth,
            Err(err) => {
                log::debug!("rejecting request to {}: {err}", req.path());

                // returning a response rather than an error lets outer middleware see it
                let res = req.error_response(err).map_into_right_body();
                return ready(Ok(res)).boxed_local();
            }
        };

        let username = auth.username();
        log::trace!(
            "parsed Authorization header (scheme: {:?}, username: {:?})",
            auth.scheme(),
            username.as_str()
        );

        req.extensions_mut().insert(auth);
        req.extensions_mut().insert(username);

        self.service
            .call(req)
            .map(|res| res.map(|res| res.map_into_left_body()))
            .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use actix_service::into_service;
    use actix_web::{
        http::{header::AUTHORIZATION, StatusCode},
        test::{self, TestRequest},
        web, App, HttpRequest, HttpResponse,
    };

    use super::*;
    use crate::{
        extractors::AuthorizationExt,
        headers::authorization::{ParsedSignature, Username, ALGORITHMS},
    };

    fn by_key_id(
        req: &HttpRequest,
        options: &SignatureOptions,
    ) -> Result<ParsedSignature, String> {
        if options.algorithms != ALGORITHMS {
            return Err("algorithms were not pinned".to_owned());
        }

        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        header
            .split_once("keyId=\"")
            .and_then(|(_, rest)| rest.split_once('"'))
            .map(|(key_id, _)| ParsedSignature::new(key_id))
            .ok_or_else(|| "missing keyId".to_owned())
    }

    type Parser = fn(&HttpRequest, &SignatureOptions) -> Result<ParsedSignature, String>;

    fn middleware_with<S>(service: S) -> AuthorizationParserMiddleware<S, Parser> {
        AuthorizationParserMiddleware {
            service,
            inner: Arc::new(Inner {
                parser: by_key_id as Parser,
                options: SignatureOptions::default().algorithms(["rsa-md5"]),
            }),
        }
    }

    #[actix_web::test]
    async fn test_middleware_stores_authorization() {
        let middleware = middleware_with(into_service(|req: ServiceRequest| async move {
            let auth = req.get_authorization().unwrap();
            assert_eq!(auth.scheme(), Some("Basic"));
            assert_eq!(auth.basic().and_then(|b| b.username()), Some("alice"));
            assert_eq!(req.get_username().unwrap().as_str(), Some("alice"));

            Ok::<_, Error>(req.into_response(HttpResponse::Ok().finish()))
        }));

        let req = TestRequest::get()
            .append_header((AUTHORIZATION, "Basic YWxpY2U6c2VjcmV0"))
            .to_srv_request();

        let res = middleware.call(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_middleware_without_header() {
        let middleware = middleware_with(into_service(|req: ServiceRequest| async move {
            assert!(req.get_authorization().unwrap().is_empty());
            assert_eq!(req.get_username(), Some(Username::anonymous()));

            Ok::<_, Error>(req.into_response(HttpResponse::Ok().finish()))
        }));

        let res = middleware
            .call(TestRequest::get().to_srv_request())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_middleware_rejects_invalid_header() {
        let called = Rc::new(Cell::new(false));

        let middleware = middleware_with(into_service({
            let called = Rc::clone(&called);
            move |req: ServiceRequest| {
                called.set(true);
                async move { Ok::<_, Error>(req.into_response(HttpResponse::Ok().finish())) }
            }
        }));

        let req = TestRequest::get()
            .append_header((AUTHORIZATION, "Basic "))
            .to_srv_request();

        let res = middleware.call(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(!called.get());
    }

    #[actix_web::test]
    async fn test_middleware_signature() {
        let middleware = middleware_with(into_service(|req: ServiceRequest| async move {
            let auth = req.get_authorization().unwrap();
            assert_eq!(auth.signature().map(ParsedSignature::key_id), Some("Test"));
            assert_eq!(req.get_username().unwrap().as_str(), Some("Test"));

            Ok::<_, Error>(req.into_response(HttpResponse::Ok().finish()))
        }));

        let req = TestRequest::get()
            .append_header((AUTHORIZATION, "Signature keyId=\"Test\",algorithm=\"rsa-sha256\""))
            .to_srv_request();

        let res = middleware.call(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_middleware_works_with_app() {
        let srv = test::init_service(
            App::new()
                .wrap(AuthorizationParser::new(by_key_id))
                .route(
                    "/",
                    web::get().to(|username: Username| async move { username.to_string() }),
                ),
        )
        .await;

        let req = TestRequest::with_uri("/")
            .append_header((AUTHORIZATION, "Basic YWxpY2U6c2VjcmV0"))
            .to_request();
        let body = test::call_and_read_body(&srv, req).await;
        assert_eq!(body, "alice");

        let req = TestRequest::with_uri("/")
            .append_header((AUTHORIZATION, "Digest abc123"))
            .to_request();
        let body = test::call_and_read_body(&srv, req).await;
        assert_eq!(body, "anonymous");

        // lone colon: credentials were sent, but with an empty username
        let req = TestRequest::with_uri("/")
            .append_header((AUTHORIZATION, "Basic Og=="))
            .to_request();
        let body = test::call_and_read_body(&srv, req).await;
        assert_eq!(body, "");

        let req = TestRequest::with_uri("/")
            .append_header((AUTHORIZATION, "Signature algorithm=\"rsa-sha256\""))
            .to_request();
        let res = test::call_service(&srv, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = test::read_body(res).await;
        assert_eq!(body, "Authorization header invalid: missing keyId");
    }

    #[actix_web::test]
    async fn test_middleware_works_with_scope() {
        let middleware = actix_web::middleware::Compat::new(AuthorizationParser::new(by_key_id));

        let srv = test::init_service(
            App::new().service(
                web::scope("/api").wrap(middleware).route(
                    "/",
                    web::get().to(|auth: ParsedAuthorization| async move {
                        auth.scheme().unwrap_or("none").to_owned()
                    }),
                ),
            ),
        )
        .await;

        let req = TestRequest::with_uri("/api/")
            .append_header((AUTHORIZATION, "Bearer mF_9.B5f-4.1JqM"))
            .to_request();
        let body = test::call_and_read_body(&srv, req).await;
        assert_eq!(body, "Bearer");
    }

    #[actix_web::test]
    async fn test_requests_are_independent() {
        let middleware = middleware_with(into_service(|req: ServiceRequest| async move {
            let body = req.get_username().unwrap().to_string();
            Ok::<_, Error>(req.into_response(HttpResponse::Ok().body(body)))
        }));

        for _ in 0..2 {
            let req = TestRequest::get()
                .append_header((AUTHORIZATION, "Basic YWxpY2U6c2VjcmV0"))
                .to_srv_request();
            let res = middleware.call(req).await.unwrap();
            assert_eq!(test::read_body(res).await, "alice");

            let res = middleware
                .call(TestRequest::get().to_srv_request())
                .await
                .unwrap();
            assert_eq!(test::read_body(res).await, "anonymous");
        }
    }
}
