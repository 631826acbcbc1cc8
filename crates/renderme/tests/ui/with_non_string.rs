use renderme::Renderable;

#[derive(Renderable)]
struct Config {
    #[render(with = 5)]
    port: i32,
}

fn main() {}
