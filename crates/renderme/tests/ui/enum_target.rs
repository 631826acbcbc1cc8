use renderme::Renderable;

#[derive(Renderable)]
enum Direction {
    North,
    South,
}

fn main() {}
