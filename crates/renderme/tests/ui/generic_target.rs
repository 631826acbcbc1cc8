use renderme::Renderable;

#[derive(Renderable)]
struct Wrapper<T> {
    #[render]
    inner: T,
}

fn main() {}
