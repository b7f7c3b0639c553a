use actix_web::{get, middleware::Logger, App, HttpRequest, HttpServer, Responder};
use actix_web_authparser::{
    headers::authorization::{ParsedAuthorization, ParsedSignature, SignatureOptions, Username},
    middleware::AuthorizationParser,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Signature parser that:
/// - accepts any `keyId="..."` parameter as the key identifier;
/// - rejects headers without one (for quick testing using command line HTTP clients).
fn parse_signature(
    req: &HttpRequest,
    options: &SignatureOptions,
) -> Result<ParsedSignature, String> {
    tracing::debug!(algorithms = ?options.algorithms, "parsing signature");

    let header = req
        .headers()
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    header
        .split_once("keyId=\"")
        .and_then(|(_, rest)| rest.split_once('"'))
        .map(|(key_id, _)| ParsedSignature::new(key_id))
        .ok_or_else(|| "missing keyId parameter".to_owned())
}

#[get("/")]
async fn index(auth: ParsedAuthorization, username: Username) -> impl Responder {
    format!(
        "scheme: {}, username: {}",
        auth.scheme().unwrap_or("none"),
        username.as_str().unwrap_or("(empty)")
    )
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .without_time()
        .init();

    HttpServer::new(|| {
        let options = SignatureOptions::default().headers(["(request-target)", "date"]);

        App::new()
            .service(index)
            .wrap(AuthorizationParser::with_options(parse_signature, options))
            .wrap(Logger::default().log_target("@"))
    })
    .bind("127.0.0.1:8080")?
    .workers(2)
    .run()
    .await
}
