use renderme::{Renderable, render_methods};

#[derive(Renderable)]
#[render(methods)]
struct Calculator {
    #[render]
    total: i32,
}

#[render_methods]
impl Calculator {
    #[render]
    fn add(&self, amount: i32) -> i32 {
        self.total + amount
    }
}

fn main() {}
