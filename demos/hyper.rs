use linear_router::pipe::trace_response;
use linear_router::{
    pipe, route_table, AugmentedRequest, AugmentedResponse, ForMethod, QueryParams, RouteParams,
    Router,
};

use std::convert::Infallible as Never;

use http::header::{HeaderValue, CACHE_CONTROL};
use hyper::service::make_service_fn;

async fn hello(
    _: AugmentedRequest,
    _: QueryParams,
    params: RouteParams,
) -> Result<AugmentedResponse, Never> {
    let name = name_or_world(&params);
    Ok(AugmentedResponse::text(format!("hello, {}!", name)))
}

/// `/hello` has an empty terminal capture, not a missing one.
fn name_or_world(params: &RouteParams) -> &str {
    params.get(0).filter(|s| !s.is_empty()).unwrap_or("world")
}

async fn file(
    _: AugmentedRequest,
    _: QueryParams,
    params: RouteParams,
) -> Result<AugmentedResponse, Never> {
    let path = params.get(0).unwrap_or_default();
    Ok(AugmentedResponse::text(format!("access file: {}", path)))
}

async fn login(
    req: AugmentedRequest,
    _: QueryParams,
    _: RouteParams,
) -> Result<AugmentedResponse, Never> {
    let user = req.query_params().get("user").unwrap_or("anonymous");
    let res = AugmentedResponse::text(format!("welcome, {}", user));
    Ok(res.with_cookies(vec![("user", user)]))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cached = pipe![
        |_, res| {
            res.headers_mut()
                .insert(CACHE_CONTROL, HeaderValue::from_static("max-age=86400"));
            None
        },
        trace_response(),
    ];

    let api = Router::new(route_table! {
        "/file/*" => cached.wrap(file),
        "/login" => ForMethod::new().get(login).post(login),
    });

    let router = Router::new(route_table! {
        "/hello/*" => hello,
        "/api/v1/*" => api,
    });

    if let Err(e) = router.precompile() {
        eprintln!("{}", e);
        return;
    }

    let service = router.into_service();
    let make = make_service_fn(move |_| {
        let service = service.clone();
        async move { Ok::<_, Never>(service) }
    });

    let addr = "127.0.0.1:3000";

    let server = hyper::Server::bind(&addr.parse().unwrap()).serve(make);

    println!("Server is listening on: http://{}", addr);
    println!("hello: http://{}/hello/world", addr);
    println!("api: http://{}/api/v1/file/path/to/public/file", addr);
    println!("login: http://{}/api/v1/login?user=nugine", addr);
    println!("404: http://{}/other/path", addr);
    println!();

    if let Err(e) = server.await {
        eprintln!("server error: {}", e);
    }
}
