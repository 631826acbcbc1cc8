use renderme::{Renderable, render_methods};

#[derive(Renderable)]
#[render(methods)]
struct Counter {
    #[render]
    count: i32,
}

#[render_methods]
impl Counter {
    #[render]
    fn origin() -> i32 {
        0
    }
}

fn main() {}
