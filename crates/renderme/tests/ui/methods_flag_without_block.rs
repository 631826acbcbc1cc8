use renderme::Renderable;

#[derive(Renderable)]
#[render(methods)]
struct Promise {
    #[render]
    kept: bool,
}

fn main() {}
