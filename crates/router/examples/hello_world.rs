use micro_router::{get, MemoryWalker, Method, ModuleRegistry, RouterBuilder};

type Handler = fn() -> &'static str;

fn hello_world() -> &'static str {
    "hello world"
}

fn not_found() -> &'static str {
    "404 not found"
}

fn main() {
    let walker = MemoryWalker::new(["route.tsx", "404.tsx"]);
    let registry: ModuleRegistry<Handler> = ModuleRegistry::new()
        .register("route.tsx", get(hello_world as Handler))
        .register("404.tsx", get(not_found as Handler));

    let router = RouterBuilder::new().walker(walker).build(registry).unwrap();

    for pathname in ["/", "/somewhere/else"] {
        let resolved = router.resolve(pathname).unwrap();
        let handler = router.handler_for(&resolved, Method::Get).unwrap();
        println!("GET {pathname} -> {}", handler());
    }
}
