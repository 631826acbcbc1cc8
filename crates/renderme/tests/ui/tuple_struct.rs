use renderme::Renderable;

#[derive(Renderable)]
struct Pair(i32, i32);

fn main() {}
