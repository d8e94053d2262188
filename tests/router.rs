use linear_router::{
    is_missing_route, route_table, AugmentedRequest, AugmentedResponse, Body, BoxError, Handler,
    MissingRouteError, PathCompiler, QueryParams, RouteParams, RoutePattern, RouteTable, Router,
    RouterError, WildcardCompiler,
};

use std::borrow::Cow;
use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use http::header::SET_COOKIE;
use regex::Regex;

#[derive(Debug, Clone, PartialEq)]
struct Seen {
    uri: String,
    pathname: String,
    query: Vec<(String, String)>,
    route_params: Vec<String>,
    forwarded_params: Vec<String>,
}

type Log = Arc<Mutex<Vec<Seen>>>;

fn recorder(log: &Log, reply: &'static str) -> impl Handler {
    let log = Arc::clone(log);
    move |req: AugmentedRequest, query: QueryParams, params: RouteParams| {
        log.lock().unwrap().push(Seen {
            uri: req.uri().to_string(),
            pathname: req.pathname().to_owned(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
            route_params: req.route_params().to_vec(),
            forwarded_params: params.to_vec(),
        });
        async move { Ok::<_, Infallible>(AugmentedResponse::text(reply)) }
    }
}

fn get(uri: &str) -> http::Request<Body> {
    http::Request::builder()
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_text(res: AugmentedResponse) -> String {
    let bytes = res.into_inner().into_body().to_bytes().await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn router_invokes_handler() {
    let log = Log::default();
    let router = Router::new(route_table! {
        Regex::new(r"/foo$").unwrap() => recorder(&log, "foo"),
    });

    let res = router.route(get("/foo")).await.unwrap();
    assert_eq!(body_text(res).await, "foo");

    let seen = log.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].uri, "/foo");
    assert!(seen[0].route_params.is_empty());
}

#[tokio::test]
async fn router_wildcards_as_params() {
    let cases: &[(&str, &str, &[&str])] = &[
        ("/foo/*/bar/*/baz", "/foo/one/bar/two/baz", &["one", "two"]),
        ("/foo/*/bar/*/baz", "/foo/one/bar/two/baz/", &["one", "two"]),
        ("/files/*", "/files/home/asd/.bashrc", &["home/asd/.bashrc"]),
        ("/files/*", "/files", &[""]),
        ("/user/*/post/*", "/user/asd/post/123", &["asd", "123"]),
        ("/user/*/post/*", "/user/asd/post/123/comments", &["asd", "123/comments"]),
    ];

    for &(pattern, path, params) in cases {
        dbg!((pattern, path));
        let log = Log::default();
        let router = Router::new(route_table! { pattern => recorder(&log, "ok") });

        router.route(get(path)).await.unwrap();

        let seen = log.lock().unwrap()[0].clone();
        assert_eq!(seen.route_params, params);
        assert_eq!(seen.forwarded_params, params);
    }
}

#[tokio::test]
async fn router_regex_captures() {
    let log = Log::default();
    let router = Router::new(route_table! {
        Regex::new(r"^/api/swanson/?([0-9]?)$").unwrap() => recorder(&log, "quotes"),
    });

    router.route(get("/api/swanson/3")).await.unwrap();
    router.route(get("/api/swanson")).await.unwrap();

    let seen = log.lock().unwrap().clone();
    assert_eq!(seen[0].route_params, ["3"]);
    assert_eq!(seen[1].route_params, [""]);
}

#[tokio::test]
async fn router_nested() {
    let log = Log::default();
    let inner = Router::new(route_table! { "/baz" => recorder(&log, "baz") });
    let middle = Router::new(route_table! { "/bar/*" => inner });
    let router = Router::new(route_table! { "/foo/*" => middle });

    let res = router
        .route(get("/foo/bar/baz?lol=rofl&rofl=lmao"))
        .await
        .unwrap();
    assert_eq!(body_text(res).await, "baz");

    let seen = log.lock().unwrap()[0].clone();
    assert_eq!(seen.uri, "/foo/bar/baz?lol=rofl&rofl=lmao");
    assert_eq!(seen.pathname, "/baz");
    assert!(seen.route_params.is_empty());
    assert!(seen.forwarded_params.is_empty());
    assert_eq!(
        seen.query,
        [
            ("lol".to_owned(), "rofl".to_owned()),
            ("rofl".to_owned(), "lmao".to_owned())
        ]
    );
}

#[tokio::test]
async fn router_nested_recaptures() {
    let log = Log::default();
    let users = Router::new(route_table! {
        "/*/posts/*" => recorder(&log, "post"),
        "/*" => recorder(&log, "user"),
    });
    let router = Router::new(route_table! {
        "/home" => recorder(&log, "home"),
        "/users/*" => users,
    });

    let res = router.route(get("/users/asd/posts/123?q=1")).await.unwrap();
    assert_eq!(body_text(res).await, "post");

    let res = router.route(get("/users/asd")).await.unwrap();
    assert_eq!(body_text(res).await, "user");

    let seen = log.lock().unwrap().clone();
    assert_eq!(seen[0].pathname, "/asd/posts/123");
    assert_eq!(seen[0].route_params, ["asd", "123"]);
    assert_eq!(seen[0].query, [("q".to_owned(), "1".to_owned())]);
    assert_eq!(seen[1].route_params, ["asd"]);
}

#[tokio::test]
async fn router_missing_route() {
    let router = Router::new(route_table! {
        Regex::new(r"^/foo$").unwrap() => recorder(&Log::default(), "foo"),
    });

    let err = router.route(get("/foo-bar")).await.unwrap_err();
    assert!(is_missing_route(&err));
    assert_eq!(err.to_string(), "No match for /foo-bar");

    let err = err.downcast::<MissingRouteError>().unwrap();
    assert_eq!(err.pathname(), "/foo-bar");
}

#[tokio::test]
async fn router_nested_missing_route() {
    let api = Router::new(route_table! { "/items" => recorder(&Log::default(), "items") });
    let router = Router::new(route_table! { "/api/*" => api });

    let err = router.route(get("/api/nothing")).await.unwrap_err();
    assert!(is_missing_route(&err));
    assert_eq!(err.to_string(), "No match for /api/nothing");

    let v1 = Router::new(route_table! { "/users/*" => recorder(&Log::default(), "user") });
    let api = Router::new(route_table! { "/v1/*" => v1 });
    let router = Router::new(route_table! { "/api/*" => api });

    let err = router.route(get("/api/v1/posts%2042")).await.unwrap_err();
    let err = err.downcast::<MissingRouteError>().unwrap();
    assert_eq!(err.pathname(), "/api/v1/posts 42");
}

#[tokio::test]
async fn router_empty_table() {
    let router = Router::new(RouteTable::new());
    let err = router.route(get("/")).await.unwrap_err();
    assert!(is_missing_route(&err));
}

#[tokio::test]
async fn router_forwards_handler_errors() {
    async fn fail(
        _: AugmentedRequest,
        _: QueryParams,
        _: RouteParams,
    ) -> Result<AugmentedResponse, std::io::Error> {
        Err(std::io::Error::new(std::io::ErrorKind::Other, "Some error!"))
    }

    let router = Router::new(route_table! { "/foo" => fail });

    let err = router.route(get("/foo")).await.unwrap_err();
    assert!(!is_missing_route(&err));
    assert_eq!(err.to_string(), "Some error!");
    assert!(err.downcast_ref::<std::io::Error>().is_some());
}

#[tokio::test]
async fn router_first_match_wins() {
    let first = Log::default();
    let second = Log::default();
    let router = Router::new(route_table! {
        "/a/*" => recorder(&first, "first"),
        "/a/b" => recorder(&second, "second"),
    });

    let res = router.route(get("/a/b")).await.unwrap();
    assert_eq!(body_text(res).await, "first");
    assert_eq!(first.lock().unwrap().len(), 1);
    assert!(second.lock().unwrap().is_empty());
}

#[tokio::test]
async fn router_catch_all_default() {
    let router = Router::new(route_table! {
        "/known" => recorder(&Log::default(), "known"),
        "/*" => recorder(&Log::default(), "fallback"),
    });

    for path in &["/", "/unknown", "/a/b/c"] {
        let res = router.route(get(path)).await.unwrap();
        assert_eq!(body_text(res).await, "fallback");
    }
}

#[tokio::test]
async fn router_writes_cookies() {
    async fn login(
        _: AugmentedRequest,
        _: QueryParams,
        _: RouteParams,
    ) -> Result<AugmentedResponse, Infallible> {
        let cookies = vec![("session_id", "abc"), ("theme", "dark")];
        Ok(AugmentedResponse::text("hi").with_cookies(cookies))
    }

    let api = Router::new(route_table! { "/login" => login });
    let router = Router::new(route_table! { "/api/*" => api });

    let res = router.route(get("/api/login")).await.unwrap();
    assert!(res.cookies().is_empty());

    let cookies: Vec<_> = res.headers().get_all(SET_COOKIE).iter().collect();
    assert_eq!(cookies, ["session_id=abc", "theme=dark"]);
}

#[tokio::test]
async fn router_percent_decoded_path() {
    let log = Log::default();
    let router = Router::new(route_table! { "/files/*" => recorder(&log, "file") });

    router.route(get("/files/my%20notes.txt")).await.unwrap();
    router.route(get("/files/a%0Ab")).await.unwrap();

    let log = log.lock().unwrap();
    assert_eq!(log[0].route_params, ["my notes.txt"]);
    assert_eq!(log[1].route_params, ["a\nb"]);
}

struct CountingCompiler {
    count: Arc<AtomicUsize>,
}

impl PathCompiler for CountingCompiler {
    fn compile<'a>(&self, pattern: &'a RoutePattern) -> Result<Cow<'a, Regex>, regex::Error> {
        self.count.fetch_add(1, Ordering::SeqCst);
        WildcardCompiler.compile(pattern)
    }
}

#[tokio::test]
async fn router_custom_compiler() {
    let count = Arc::new(AtomicUsize::new(0));
    let compiler = CountingCompiler {
        count: Arc::clone(&count),
    };
    let table = route_table! {
        "/x" => recorder(&Log::default(), "x"),
        "/y" => recorder(&Log::default(), "y"),
        "/z" => recorder(&Log::default(), "z"),
    };
    let router = Router::with_compiler(table, compiler);
    assert_eq!(count.load(Ordering::SeqCst), 0);

    router.route(get("/y")).await.unwrap();
    router.route(get("/y")).await.unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 2);

    router.route(get("/z")).await.unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn router_malformed_pattern_fails() {
    let fallback = Log::default();
    let router = Router::new(route_table! {
        "/ok" => recorder(&Log::default(), "ok"),
        "/bad/(" => recorder(&Log::default(), "bad"),
        "/*" => recorder(&fallback, "fallback"),
    });

    let err = router.precompile().unwrap_err();
    assert_eq!(err.pattern(), "/bad/(");

    // entries before the broken one still route
    let res = router.route(get("/ok")).await.unwrap();
    assert_eq!(body_text(res).await, "ok");

    for path in &["/bad/(", "/anything"] {
        let err = router.route(get(path)).await.unwrap_err();
        assert!(!is_missing_route(&err));
        let err = err.downcast::<RouterError>().unwrap();
        assert_eq!(err.pattern(), "/bad/(");
    }
    assert!(fallback.lock().unwrap().is_empty());

    assert!(router.lookup("/bad/(").is_err());
}

#[test]
fn router_lookup() {
    let router = Router::new(route_table! {
        "/user/*/post/*" => recorder(&Log::default(), "post"),
        "/explore" => recorder(&Log::default(), "explore"),
    });
    assert!(router.precompile().is_ok());

    let (pattern, params) = router.lookup("/user/asd/post/123").unwrap().unwrap();
    assert_eq!(pattern.to_string(), "/user/*/post/*");
    assert_eq!(params.to_vec(), ["asd", "123"]);

    assert!(router.lookup("/explore/").unwrap().is_some());
    assert!(router.lookup("/explorer").unwrap().is_none());
    assert!(router.lookup("/user//post/123").unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn router_concurrent_requests() {
    let log = Log::default();
    let router = Router::new(route_table! { "/n/*" => recorder(&log, "n") });

    let tasks: Vec<_> = (0..32)
        .map(|i| {
            let router = router.clone();
            tokio::spawn(async move { router.route(get(&format!("/n/{}", i))).await })
        })
        .collect();

    for t in tasks {
        let res: Result<AugmentedResponse, BoxError> = t.await.unwrap();
        assert!(res.is_ok());
    }

    let mut ids: Vec<usize> = log
        .lock()
        .unwrap()
        .iter()
        .map(|s| s.route_params[0].parse().unwrap())
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, (0..32).collect::<Vec<_>>());
}
