//! Object → text → object through the mapper.

use crate::mapper::{load_from_node, to_node};
use crate::persist;

use super::common::{emit, parse};

#[derive(Debug, Default, PartialEq)]
struct Engine {
    power: f32,
    thrust: [f32; 3],
}

#[derive(Debug, Default, PartialEq)]
struct Ship {
    name: String,
    motto: String,
    crew: Vec<u16>,
    engine: Vec<Engine>,
}

persist!(Engine { power, thrust });
persist!(Ship { name, motto, crew, engine });

#[test]
fn ship_through_text() {
    let ship = Ship {
        name: "Enterprise".into(),
        motto: " to boldly go ".into(),
        crew: vec![430, 12],
        engine: vec![
            Engine { power: 100.0, thrust: [0.0, 0.0, 1.0] },
            Engine { power: 50.5, thrust: [0.0, 0.5, -1.0] },
        ],
    };

    let (node, diags) = to_node("Ship", &ship);
    assert!(diags.is_empty(), "{diags}");

    let text = emit(&node);
    assert!(text.contains("\tmotto = \\u0020to boldly go\\u0020\n"));
    assert!(text.contains("\t\tthrust = 0, 0.5, -1\n"));

    let root = parse(&text).root;
    let mut loaded = Ship::default();
    let diags = load_from_node(&mut loaded, root.node("Ship").unwrap());
    assert!(diags.is_empty(), "{diags}");
    assert_eq!(loaded, ship);
}

#[test]
fn hand_written_text() {
    let text = "
Ship
{
    name = Defiant
    crew = 50
    engine { power = 7 }
    engine
    {
        thrust = (1, 2, 3)
    }
    hull = unknown fields are ignored
}
";
    let root = parse(text).root;
    let mut ship = Ship {
        crew: vec![1, 2, 3],
        ..Ship::default()
    };
    let diags = load_from_node(&mut ship, root.node("Ship").unwrap());

    assert!(diags.is_empty(), "{diags}");
    assert_eq!(ship.name, "Defiant");
    assert_eq!(ship.crew, [50]);
    assert_eq!(ship.engine.len(), 2);
    assert_eq!(ship.engine[0].power, 7.0);
    assert_eq!(ship.engine[1].thrust, [1.0, 2.0, 3.0]);
}
