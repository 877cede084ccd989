use std::any::Any;
use std::collections::VecDeque;

use crate::config::Config;
use crate::convert::ConverterRegistry;
use crate::diagnostic::{DiagnosticKind, Diagnostics};
use crate::node::Node;
use crate::persist;

use super::*;

// ============================================================================
// Fixtures
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum Class {
    #[default]
    Light,
    Heavy,
}

impl Describe for Class {
    fn type_info() -> TypeInfo {
        TypeInfo::scalar::<Self>()
    }
}

#[derive(Debug, Default, PartialEq)]
struct Engine {
    power: f32,
    label: String,
}

#[derive(Debug, Default, PartialEq)]
struct Ship {
    name: String,
    class: Class,
    crew: Vec<u32>,
    engines: Vec<Engine>,
    reserve: Option<Engine>,
    tags: Option<Vec<String>>,
    hull: [f32; 3],
    id: String,
}

persist!(Engine { power, label });
persist!(Ship { name, class, crew, engines, reserve, tags, hull; readonly: id });

#[derive(Debug, Default)]
struct Grid {
    rows: Vec<Vec<i32>>,
}

persist!(Grid { rows });

#[derive(Debug, Clone, Copy, PartialEq)]
struct Rgb(u8, u8, u8);

impl Default for Rgb {
    fn default() -> Self {
        Rgb(255, 255, 255)
    }
}

impl Describe for Rgb {
    fn type_info() -> TypeInfo {
        TypeInfo::scalar::<Self>()
    }
}

#[derive(Debug, Default)]
struct Paint {
    color: Rgb,
    layers: u8,
}

persist!(Paint { color, layers });

/// Reads and writes `#rrggbb`.
struct HexColors;

impl CustomTypeHook for HexColors {
    fn parse(&self, ty: &TypeInfo, current: &mut dyn Any, text: &str) -> bool {
        if ty.id() != std::any::TypeId::of::<Rgb>() {
            return false;
        }
        let Some(hex) = text.strip_prefix('#').filter(|h| h.len() == 6) else {
            return false;
        };
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match (channel(0), channel(2), channel(4), current.downcast_mut::<Rgb>()) {
            (Some(r), Some(g), Some(b), Some(slot)) => {
                *slot = Rgb(r, g, b);
                true
            }
            _ => false,
        }
    }

    fn format(&self, _ty: &TypeInfo, value: &dyn Any) -> Option<String> {
        let Rgb(r, g, b) = value.downcast_ref::<Rgb>()?;
        Some(format!("#{r:02x}{g:02x}{b:02x}"))
    }
}

struct Sealed {
    code: u32,
}

impl Persist for Sealed {
    fn fields() -> &'static [Field<Self>] {
        static FIELDS: std::sync::LazyLock<Vec<Field<Sealed>>> = std::sync::LazyLock::new(|| {
            vec![Field::<Sealed>::new("code", |s: &Sealed| &s.code, |s: &mut Sealed| &mut s.code)]
        });
        &FIELDS
    }
}

impl Describe for Sealed {
    fn type_info() -> TypeInfo {
        TypeInfo::object_without_default::<Self>()
    }
}

#[derive(Default)]
struct Vault {
    seal: Option<Sealed>,
}

persist!(Vault { seal });

fn registry() -> ConverterRegistry {
    let mut registry = ConverterRegistry::with_defaults();
    registry.register_enum(&[("Light", Class::Light), ("Heavy", Class::Heavy)]);
    registry
}

fn load<T: Persist>(object: &mut T, node: &Node) -> Diagnostics {
    let config = Config::default();
    let registry = registry();
    let mut mapper = Mapper::new(&config, &registry);
    mapper.load_from_node(object, node);
    mapper.into_diagnostics()
}

fn store<T: Persist>(name: &str, object: &T) -> (Node, Diagnostics) {
    let config = Config::default();
    let registry = registry();
    let mut mapper = Mapper::new(&config, &registry);
    let node = mapper.to_node(name, object);
    (node, mapper.into_diagnostics())
}

fn sample_ship() -> Ship {
    Ship {
        name: "Enterprise".into(),
        class: Class::Heavy,
        crew: vec![4, 8],
        engines: vec![
            Engine { power: 100.0, label: "main".into() },
            Engine { power: 50.0, label: String::new() },
        ],
        reserve: None,
        tags: Some(vec!["flagship".into()]),
        hull: [1.0, 2.5, 3.0],
        id: "NCC-1701".into(),
    }
}

// ============================================================================
// Store
// ============================================================================

#[test]
fn test_store_layout() {
    let (node, diags) = store("Ship", &sample_ship());
    assert!(diags.is_empty(), "{diags}");

    assert_eq!(node.name(), "Ship");
    assert_eq!(node.value("name"), Some("Enterprise"));
    assert_eq!(node.value("class"), Some("Heavy"));
    assert_eq!(node.values("crew"), ["4", "8"]);
    assert_eq!(node.value("hull"), Some("1, 2.5, 3"));
    assert_eq!(node.values("tags"), ["flagship"]);
    assert!(!node.has_field("reserve"));

    let engines = node.nodes("engines");
    assert_eq!(engines.len(), 2);
    assert_eq!(engines[0].value("power"), Some("100"));
    assert_eq!(engines[1].value("label"), Some(""));
}

#[test]
fn test_store_keeps_empty_collection_elements() {
    #[derive(Default)]
    struct Empty {}
    persist!(Empty {});

    #[derive(Default)]
    struct Holder {
        items: Vec<Empty>,
        single: Empty,
    }
    persist!(Holder { items, single });

    let holder = Holder {
        items: vec![Empty {}, Empty {}],
        single: Empty {},
    };
    let (node, _) = store("Holder", &holder);
    assert_eq!(node.nodes("items").len(), 2);
    assert!(!node.has_field("single"));
}

#[test]
fn test_merge_replaces_fields_keeps_others() {
    let mut node = Node::named("Ship");
    node.add_value("crew", "1");
    node.add_value("crew", "2");
    node.add_value("crew", "3");
    node.set_value("comment", "kept");

    let config = Config::default();
    let registry = registry();
    let mut mapper = Mapper::new(&config, &registry);
    mapper.merge_to_node(&sample_ship(), &mut node);

    assert_eq!(node.values("crew"), ["4", "8"]);
    assert_eq!(node.value("comment"), Some("kept"));
}

// ============================================================================
// Load
// ============================================================================

#[test]
fn test_object_roundtrip() {
    let ship = sample_ship();
    let (node, _) = store("Ship", &ship);

    let mut loaded = Ship::default();
    let diags = load(&mut loaded, &node);
    assert!(diags.is_empty(), "{diags}");
    assert_eq!(loaded, ship);
}

#[test]
fn test_load_leaves_missing_fields() {
    let mut ship = sample_ship();
    let node = Node::single_value("name", "Defiant");

    load(&mut ship, &node);
    assert_eq!(ship.name, "Defiant");
    assert_eq!(ship.class, Class::Heavy);
    assert_eq!(ship.hull, [1.0, 2.5, 3.0]);
}

#[test]
fn test_collection_is_cleared() {
    let mut ship = Ship {
        crew: vec![1, 2, 3],
        ..Ship::default()
    };
    let node = Node::single_value("crew", "9");
    load(&mut ship, &node);
    assert_eq!(ship.crew, [9]);

    load(&mut ship, &Node::new());
    assert!(ship.crew.is_empty());
}

#[test]
fn test_bad_collection_element_skipped() {
    let mut node = Node::new();
    node.add_value("crew", "1");
    node.add_value("crew", "many");
    node.add_value("crew", "3");

    let mut ship = Ship::default();
    let diags = load(&mut ship, &node);
    assert_eq!(ship.crew, [1, 3]);

    let errors: Vec<_> = diags.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path.as_deref(), Some("crew[1]"));
}

#[test]
fn test_invalid_scalar_unchanged() {
    let mut ship = sample_ship();
    let mut node = Node::new();
    node.set_value("class", "Medium");
    node.set_value("hull", "1, 2");

    let diags = load(&mut ship, &node);
    assert_eq!(ship.class, Class::Heavy);
    assert_eq!(ship.hull, [1.0, 2.5, 3.0]);
    assert_eq!(diags.of_kind(DiagnosticKind::Mapping).count(), 2);
}

#[test]
fn test_nested_paths() {
    let mut node = Node::new();
    node.add_new_node("engines").set_value("power", "strong");

    let mut ship = Ship::default();
    let diags = load(&mut ship, &node);
    assert_eq!(ship.engines.len(), 1);
    assert_eq!(
        diags.iter().next().and_then(|d| d.path.as_deref()),
        Some("engines[0].power")
    );
}

#[test]
fn test_optional_object() {
    let mut node = Node::new();
    node.add_new_node("reserve").set_value("power", "5");

    let mut ship = Ship::default();
    load(&mut ship, &node);
    assert_eq!(ship.reserve.as_ref().map(|e| e.power), Some(5.0));

    // Present optional is loaded in place.
    let mut node = Node::new();
    node.add_new_node("reserve").set_value("label", "aux");
    load(&mut ship, &node);
    let reserve = ship.reserve.as_ref().unwrap();
    assert_eq!(reserve.power, 5.0);
    assert_eq!(reserve.label, "aux");
}

#[test]
fn test_optional_collection_always_present() {
    let mut ship = Ship::default();
    assert_eq!(ship.tags, None);
    load(&mut ship, &Node::new());
    assert_eq!(ship.tags, Some(Vec::new()));
}

#[test]
fn test_readonly() {
    let node = Node::single_value("id", "NX-01");

    let mut fresh = Ship::default();
    let diags = load(&mut fresh, &node);
    assert_eq!(fresh.id, "NX-01");
    assert!(diags.is_empty());

    let mut ship = sample_ship();
    let diags = load(&mut ship, &node);
    assert_eq!(ship.id, "NCC-1701");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags.iter().next().and_then(|d| d.path.as_deref()), Some("id"));
}

#[test]
fn test_nested_collection_rejected() {
    let mut grid = Grid {
        rows: vec![vec![1, 2]],
    };
    let node = Node::single_value("rows", "3");

    let diags = load(&mut grid, &node);
    assert_eq!(grid.rows, vec![vec![1, 2]]);
    assert_eq!(diags.len(), 1);

    let (stored, diags) = store("Grid", &grid);
    assert!(!stored.has_field("rows"));
    assert_eq!(diags.len(), 1);
}

#[test]
fn test_unknown_type_reported() {
    let mut paint = Paint::default();
    let mut node = Node::new();
    node.set_value("color", "#102030");
    node.set_value("layers", "2");

    let diags = load(&mut paint, &node);
    assert_eq!(paint.color, Rgb(255, 255, 255));
    assert_eq!(paint.layers, 2);
    assert_eq!(diags.len(), 1);

    // Absent values never reach the converter lookup.
    let diags = load(&mut paint, &Node::single_value("layers", "3"));
    assert!(diags.is_empty());
}

#[test]
fn test_custom_hook() {
    let config = Config::default();
    let registry = registry();
    let hook = HexColors;
    let mut mapper = Mapper::new(&config, &registry).with_hook(&hook);

    let mut paint = Paint::default();
    mapper.load_from_node(&mut paint, &Node::single_value("color", "#102030"));
    assert_eq!(paint.color, Rgb(0x10, 0x20, 0x30));

    let node = mapper.to_node("Paint", &paint);
    assert_eq!(node.value("color"), Some("#102030"));
    assert!(mapper.into_diagnostics().is_empty());
}

#[test]
fn test_construction_failed() {
    let mut node = Node::new();
    node.add_new_node("seal").set_value("code", "7");

    let mut vault = Vault::default();
    let diags = load(&mut vault, &node);
    assert!(vault.seal.is_none());
    assert_eq!(diags.len(), 1);

    // Present values still load in place.
    vault.seal = Some(Sealed { code: 1 });
    let diags = load(&mut vault, &node);
    assert!(diags.is_empty());
    assert_eq!(vault.seal.as_ref().map(|s| s.code), Some(7));
}

#[test]
fn test_deque_and_option_elements() {
    #[derive(Default)]
    struct Log {
        entries: VecDeque<String>,
        marks: Vec<Option<i64>>,
    }
    persist!(Log { entries, marks });

    let mut node = Node::new();
    node.add_value("entries", "a");
    node.add_value("entries", "b");
    node.add_value("marks", "-1");

    let mut log = Log::default();
    let diags = load(&mut log, &node);
    assert!(diags.is_empty());
    assert_eq!(log.entries, ["a", "b"]);
    assert_eq!(log.marks, [Some(-1)]);

    log.marks.push(None);
    let (stored, _) = store("Log", &log);
    assert_eq!(stored.values("marks"), ["-1"]);
}

#[test]
fn test_from_node_builds_default() {
    let mut node = Node::named("Engine");
    node.set_value("power", "12.5");

    let config = Config::default();
    let registry = registry();
    let mut mapper = Mapper::new(&config, &registry);
    let engine: Engine = mapper.from_node(&node);

    assert_eq!(engine, Engine { power: 12.5, label: String::new() });
    assert!(mapper.diagnostics().is_empty());
}

#[test]
fn test_readonly_collection_kept_without_data() {
    #[derive(Default)]
    struct Keys {
        label: String,
        codes: Vec<u32>,
    }
    persist!(Keys { label; readonly: codes });

    let mut keys = Keys {
        label: String::new(),
        codes: vec![1, 2, 3],
    };
    let diags = load(&mut keys, &Node::single_value("label", "x"));
    assert_eq!(keys.codes, [1, 2, 3]);
    assert_eq!(keys.label, "x");
    assert!(diags.is_empty());

    // A vacant read-only collection still loads.
    let mut fresh = Keys::default();
    let diags = load(&mut fresh, &Node::single_value("codes", "7"));
    assert_eq!(fresh.codes, [7]);
    assert!(diags.is_empty());
}
