//! Output-format tests for the renderer.

use std::any::type_name;

use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use renderme::{
    FieldRenderer, IntVecRenderer, PluginRegistry, Renderable, Renderer, render_methods,
};
use rstest::*;

/// The reference target: one default-formatted primitive, one delegated
/// array, one default-formatted named type.
#[derive(Renderable)]
struct SomeClass {
    #[render]
    foo: i32,
    #[render(with = "int_vec")]
    array: Vec<i32>,
    #[render]
    date: DateTime<Utc>,
}

impl SomeClass {
    fn new(foo: i32) -> Self {
        Self {
            foo,
            array: vec![1, 2, 3],
            date: Utc.timestamp_millis_opt(123_456_789).unwrap(),
        }
    }
}

fn reference_registry() -> PluginRegistry {
    let registry = PluginRegistry::new();
    registry
        .register::<IntVecRenderer, Vec<i32>>("int_vec")
        .unwrap();
    registry
}

fn expected_dump(foo: i32, date: &DateTime<Utc>) -> String {
    format!(
        "Instance of {}:\nfoo (Type i32): {}\narray (Type Vec<i32>): [1, 2, 3, ]\ndate (Type {}): {}\n",
        type_name::<SomeClass>(),
        foo,
        type_name::<DateTime<Utc>>(),
        date,
    )
}

#[rstest]
fn renders_the_reference_scenario() {
    let target = SomeClass::new(5);
    let registry = reference_registry();

    let rendered = Renderer::with_registry(&target, &registry).render().unwrap();

    assert_eq!(rendered, expected_dump(5, &target.date));
}

#[rstest]
#[case(0)]
#[case(9425)]
#[case(4_357_345)]
#[case(1_000_000_001)]
#[case(i32::MIN)]
#[case(i32::MAX)]
fn boundary_values_substitute_without_disturbing_other_lines(#[case] foo: i32) {
    let target = SomeClass::new(foo);
    let registry = reference_registry();

    let rendered = Renderer::with_registry(&target, &registry).render().unwrap();

    assert_eq!(rendered, expected_dump(foo, &target.date));
}

#[rstest]
fn rendering_twice_is_byte_identical() {
    let target = SomeClass::new(42);
    let registry = reference_registry();
    let renderer = Renderer::with_registry(&target, &registry);

    assert_eq!(renderer.render().unwrap(), renderer.render().unwrap());
}

#[derive(Renderable)]
struct NothingMarked {
    _hidden: u64,
}

#[rstest]
fn unmarked_types_render_only_the_header() {
    let target = NothingMarked { _hidden: 1 };

    let rendered = Renderer::new(&target).render().unwrap();

    assert_eq!(
        rendered,
        format!("Instance of {}:\n", type_name::<NothingMarked>())
    );
}

#[derive(Renderable)]
struct Scalars {
    #[render]
    flag: bool,
    #[render]
    ratio: f64,
    #[render]
    letter: char,
}

#[rstest]
fn primitive_labels_use_the_bare_token() {
    let target = Scalars {
        flag: true,
        ratio: 0.5,
        letter: 'x',
    };

    let rendered = Renderer::new(&target).render().unwrap();

    assert_eq!(
        rendered,
        format!(
            "Instance of {}:\nflag (Type bool): true\nratio (Type f64): 0.5\nletter (Type char): x\n",
            type_name::<Scalars>()
        )
    );
}

#[derive(Renderable)]
struct Named {
    #[render]
    text: String,
}

#[rstest]
fn named_labels_use_the_fully_qualified_form() {
    let target = Named {
        text: "hello".into(),
    };

    let rendered = Renderer::new(&target).render().unwrap();

    assert_eq!(
        rendered,
        format!(
            "Instance of {}:\ntext (Type {}): hello\n",
            type_name::<Named>(),
            type_name::<String>(),
        )
    );
}

#[derive(Renderable)]
#[render(methods)]
struct WithMethods {
    #[render]
    id: u32,
}

#[render_methods]
impl WithMethods {
    #[render]
    fn answer(&self) -> i32 {
        self.id as i32
    }

    #[render]
    fn label(&self) -> String {
        String::from("unused by rendering")
    }

    /// Marked but returns no value: filtered out of the dump.
    #[render]
    fn touch(&self) {}

    fn unmarked(&self) -> i32 {
        0
    }
}

#[rstest]
fn methods_render_name_and_return_type_after_fields() {
    let target = WithMethods { id: 7 };

    let rendered = Renderer::new(&target).render().unwrap();

    assert_eq!(
        rendered,
        format!(
            "Instance of {}:\nid (Type u32): 7\nanswer returns: i32\nlabel returns: {}\n",
            type_name::<WithMethods>(),
            type_name::<String>(),
        )
    );
}

#[derive(Default)]
struct AngleStub;

impl FieldRenderer<String> for AngleStub {
    fn render(&self, value: &String) -> anyhow::Result<String> {
        Ok(format!("<<{value}>>\n"))
    }
}

#[derive(Renderable)]
struct Delegating {
    #[render(with = "angle")]
    note: String,
}

#[rstest]
fn delegated_output_is_passed_through_verbatim() {
    let registry = PluginRegistry::new();
    registry.register::<AngleStub, String>("angle").unwrap();
    let target = Delegating {
        note: "hello".into(),
    };

    let rendered = Renderer::with_registry(&target, &registry).render().unwrap();

    assert_eq!(
        rendered,
        format!("Instance of {}:\nnote <<hello>>\n", type_name::<Delegating>())
    );
}

#[derive(Renderable)]
struct EmptyWith {
    #[render(with = "")]
    plain: i32,
}

#[rstest]
fn empty_with_identifier_means_default_formatting() {
    let target = EmptyWith { plain: 3 };

    // No registry entry needed: an empty identifier never resolves.
    let rendered = Renderer::new(&target).render().unwrap();

    assert_eq!(
        rendered,
        format!("Instance of {}:\nplain (Type i32): 3\n", type_name::<EmptyWith>())
    );
}

mod hidden {
    use renderme::Renderable;

    #[derive(Renderable)]
    pub struct Secretive {
        #[render]
        secret: i32,
    }

    impl Secretive {
        pub fn new(secret: i32) -> Self {
            Self { secret }
        }
    }
}

#[rstest]
fn private_fields_are_readable_by_the_renderer() {
    let target = hidden::Secretive::new(99);

    let rendered = Renderer::new(&target).render().unwrap();

    assert_eq!(
        rendered,
        format!(
            "Instance of {}:\nsecret (Type i32): 99\n",
            type_name::<hidden::Secretive>()
        )
    );
}
