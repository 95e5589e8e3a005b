//! A small blog site: nested layouts, a parameterized route, a direct
//! (non-renderable) response and the not-found fallback.

use micro_router::{get, HandlerOutcome, MemoryWalker, Method, ModuleRegistry, Router, RouterBuilder};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

type Html = String;

/// Route handlers receive their bound parameter value (or the pathname);
/// layout handlers receive the child markup.
type Render = fn(&str) -> HandlerOutcome<Html, Html>;

fn home(_input: &str) -> HandlerOutcome<Html, Html> {
    HandlerOutcome::Renderable("<h1>home</h1>".to_owned())
}

fn blog_post(slug: &str) -> HandlerOutcome<Html, Html> {
    HandlerOutcome::Renderable(format!("<article>{slug}</article>"))
}

fn health(_input: &str) -> HandlerOutcome<Html, Html> {
    HandlerOutcome::Direct("ok".to_owned())
}

fn missing(_input: &str) -> HandlerOutcome<Html, Html> {
    HandlerOutcome::Renderable("<h1>not found</h1>".to_owned())
}

fn site_template(child: &str) -> HandlerOutcome<Html, Html> {
    HandlerOutcome::Renderable(format!("<html><body>{child}</body></html>"))
}

fn nav_layout(child: &str) -> HandlerOutcome<Html, Html> {
    HandlerOutcome::Renderable(format!("<nav>menu</nav>{child}"))
}

fn blog_layout(child: &str) -> HandlerOutcome<Html, Html> {
    HandlerOutcome::Renderable(format!("<section class=\"blog\">{child}</section>"))
}

fn handle(router: &Router<Render>, method: Method, pathname: &str, url: &str) -> Html {
    let resolved = router.resolve(pathname).unwrap();
    let handler = router.handler_for(&resolved, method).unwrap();
    let params = resolved.params(url).unwrap();
    let input = params.get("slug").unwrap_or(pathname);

    let mut html = match handler(input) {
        HandlerOutcome::Direct(response) => return response,
        HandlerOutcome::Renderable(node) => node,
    };

    // layouts run leaf to root, each wrapping the previous output
    for layout in resolved.layouts().iter().rev() {
        let Some(wrap) = layout.handler(method) else { continue };
        html = match wrap(&html) {
            HandlerOutcome::Direct(response) => return response,
            HandlerOutcome::Renderable(node) => node,
        };
    }
    format!("<!DOCTYPE html>{html}")
}

fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::DEBUG).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let walker = MemoryWalker::new([
        "index.tsx",
        "404.tsx",
        "layout.tsx",
        "route.tsx",
        "healthz/route.tsx",
        "blog/layout.tsx",
        "blog/:slug/route.tsx",
    ]);
    let registry: ModuleRegistry<Render> = ModuleRegistry::new()
        .register("index.tsx", get(site_template as Render))
        .register("404.tsx", get(missing as Render))
        .register("layout.tsx", get(nav_layout as Render))
        .register("route.tsx", get(home as Render))
        .register("healthz/route.tsx", get(health as Render))
        .register("blog/layout.tsx", get(blog_layout as Render))
        .register("blog/:slug/route.tsx", get(blog_post as Render));

    let router = RouterBuilder::new().walker(walker).build(registry).unwrap();

    let origin = "http://localhost:3000";
    for pathname in ["/", "/blog/hello", "/healthz", "/somewhere/else"] {
        let url = format!("{origin}{pathname}");
        println!("GET {pathname}\n  {}", handle(&router, Method::Get, pathname, &url));
    }
}
