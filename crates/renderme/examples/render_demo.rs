use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use renderme::{IntVecRenderer, Renderable, Renderer, register_plugin, render_methods};

#[derive(Renderable)]
#[render(methods)]
struct SomeClass {
    #[render]
    foo: i32,
    #[render(with = "int_vec")]
    array: Vec<i32>,
    #[render]
    date: DateTime<Utc>,
    comment: String,
}

#[render_methods]
impl SomeClass {
    #[render]
    fn answer(&self) -> i32 {
        self.foo * 2
    }
}

fn main() -> Result<()> {
    renderme::telemetry::init_tracing()?;
    register_plugin::<IntVecRenderer, Vec<i32>>("int_vec")?;

    let target = SomeClass {
        foo: 5,
        array: vec![1, 2, 3],
        date: Utc.timestamp_millis_opt(123_456_789).unwrap(),
        comment: String::from("not marked, not rendered"),
    };

    let dump = Renderer::new(&target).render()?;
    println!("{dump}");
    tracing::debug!(answer = target.answer(), comment = %target.comment, "rendered demo target");

    Ok(())
}
