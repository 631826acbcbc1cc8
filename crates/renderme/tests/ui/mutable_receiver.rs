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
    fn bump(&mut self) -> i32 {
        self.count += 1;
        self.count
    }
}

fn main() {}
