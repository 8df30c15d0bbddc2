//! End-to-end behavior of the compile pipeline.

use logicpy_codegen::{CodegenConfig, Compiler, compile};
use logicpy_foundation::ErrorKind;

fn position(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("missing {needle:?} in:\n{haystack}"))
}

// =============================================================================
// Entity Lists
// =============================================================================

#[test]
fn entity_list_initializes_every_element() {
    let c = compile(
        "class Item:\n    id: Unique[Domain[int, range(1, 4)]]\n\nclass Inventory:\n    items: list[Item, 3]\n",
    )
    .unwrap();

    assert!(c.contains("static int Item_id[] = {1, 2, 3};\n"));
    assert!(c.contains("static bool Item_id_used[3];\n"));
    assert!(c.contains("    struct Item items[3];\n"));
    assert!(c.contains(
        "    for (size_t i = 0; i < sizeof(instance->items) / sizeof(instance->items[0]); ++i) {\n        init_Item(&instance->items[i]);\n    }\n"
    ));
    assert!(position(&c, "struct Item {") < position(&c, "struct Inventory {"));
}

#[test]
fn nested_references_initialize_innermost_first() {
    let c = compile(
        "class Root:\n    middle: Middle\n\nclass Middle:\n    leaf: Leaf\n\nclass Leaf:\n    flag: bool = True\n",
    )
    .unwrap();

    let leaf = position(&c, "struct Leaf {");
    let middle = position(&c, "struct Middle {");
    let root = position(&c, "struct Root {");
    assert!(leaf < middle && middle < root);
    assert!(c.contains("    instance->flag = true;\n"));
    assert!(c.contains("    init_Leaf(&instance->leaf);\n"));
    assert!(c.contains("    init_Middle(&instance->middle);\n"));
}

#[test]
fn shared_dependency_emitted_once() {
    let c = compile(
        "class Color:\n    hue: Domain[str, \"red\", \"blue\"]\n\nclass Car:\n    paint: Color\n\nclass Bike:\n    frame: Color\n\nclass Garage:\n    car: Car\n    bike: Bike\n",
    )
    .unwrap();

    assert_eq!(c.matches("struct Color {").count(), 1);
    assert_eq!(c.matches("static void init_Color(").count(), 1);
    assert!(c.contains("    __CPROVER_domain(instance->hue, Color_hue);\n"));
}

// =============================================================================
// Defaults and Primitives
// =============================================================================

#[test]
fn list_defaults_are_copied() {
    let c = compile("class Grid:\n    weights: list[int, 3] = [4, -1, 0]\n    flags: list[bool, 2] = [True, False]\n    slots: list[int, 5]\n").unwrap();

    assert!(c.contains(
        "    __CPROVER_array_copy(instance->weights, (int[]){4, -1, 0});\n"
    ));
    assert!(c.contains(
        "    __CPROVER_array_copy(instance->flags, (bool[]){true, false});\n"
    ));
    assert!(c.contains("    int slots[5];\n"));
    assert!(!c.contains("instance->slots"));
}

#[test]
fn undecorated_primitives_are_left_nondeterministic() {
    let c = compile("class Cell:\n    value: int\n    label: str\n    seen: bool\n").unwrap();
    assert_eq!(
        c,
        "struct Cell {\n    int value;\n    const char * label;\n    bool seen;\n};\n\nstatic void init_Cell(struct Cell * instance) {\n}\n\n"
    );
}

#[test]
fn string_defaults_are_escaped() {
    let c = compile("class Note:\n    text: str = 'say \"hi\"\\n'\n").unwrap();
    assert!(c.contains(r#"    instance->text = "say \"hi\"\n";"#));
}

#[test]
fn fields_keep_declaration_order() {
    let c = compile(
        "class Row:\n    zeta: int\n    alpha: Domain[int, 3, 1, 2]\n    mid: str = \"m\"\n",
    )
    .unwrap();
    assert!(position(&c, "int zeta;") < position(&c, "int alpha;"));
    assert!(position(&c, "int alpha;") < position(&c, "const char * mid;"));
    assert!(c.contains("static int Row_alpha[] = {3, 1, 2};\n"));
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn custom_primitives_and_indent() {
    let config = CodegenConfig::default()
        .with_indent("\t")
        .with_unique_domain_primitive("pick_unique")
        .with_array_copy_primitive("copy_array");
    let c = Compiler::new(config)
        .compile("class A:\n    id: Unique[Domain[int, 1, 2]]\n    xs: list[int, 2] = [1, 2]\n")
        .unwrap();

    assert!(c.contains("\tint id;\n"));
    assert!(c.contains("\tpick_unique(instance->id, A_id);\n"));
    assert!(c.contains("\tcopy_array(instance->xs, (int[]){1, 2});\n"));
}

#[test]
fn root_alias_renames_references_to_root_only() {
    let compiler = Compiler::new(CodegenConfig::default().with_root_alias("Answer"));
    let c = compiler
        .compile("class Cell:\n    v: int\n\nclass Board:\n    cells: list[Cell, 2]\n")
        .unwrap();

    assert!(c.contains("struct Answer {\n    struct Cell cells[2];\n};\n"));
    assert!(c.contains("static void init_Answer(struct Answer * instance) {\n"));
    assert!(c.contains("struct Cell {"));
    assert!(!c.contains("Board"));
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn cycles_produce_no_output() {
    let err = compile("class A:\n    b: B\n\nclass B:\n    a: list[A, 2]\n").unwrap_err();
    match err.kind {
        ErrorKind::CyclicDependency { cycle } => assert_eq!(cycle, ["A", "B", "A"]),
        other => panic!("expected a cycle, got {other:?}"),
    }
}

#[test]
fn analysis_errors_stop_compilation() {
    let cases = [
        ("class A:\n    x: set[int]\n", "unrecognized"),
        ("class A:\n    x: Domain[int, range(5, 1)]\n", "domain"),
        ("class A:\n    x: int = \"no\"\n", "default"),
        ("class A:\n    x: int\n    x: str\n", "duplicate"),
    ];
    for (source, what) in cases {
        let err = compile(source).unwrap_err();
        let matched = match what {
            "unrecognized" => matches!(err.kind, ErrorKind::UnrecognizedFieldAnnotation { .. }),
            "domain" => matches!(err.kind, ErrorKind::MalformedDomainLiteral { .. }),
            "default" => matches!(err.kind, ErrorKind::InvalidDefault { .. }),
            _ => matches!(err.kind, ErrorKind::DuplicateDeclaration { .. }),
        };
        assert!(matched, "{source:?} gave {:?}", err.kind);
        assert!(!err.is_internal());
    }
}

#[test]
fn colliding_identifiers_are_rejected() {
    let cases = [
        (
            "class A:\n    x: Domain[int, 1, 2]\n    x_used: Domain[int, 3, 4]\n",
            "A_x_used",
        ),
        (
            "class A_b:\n    c: Domain[int, 1]\n\nclass A:\n    b_c: Domain[int, 2]\n    inner: A_b\n",
            "A_b_c",
        ),
        (
            "class Cell:\n    v: int\n\nclass init:\n    Cell: Domain[int, 1]\n    cell: Cell\n",
            "init_Cell",
        ),
    ];
    for (source, symbol) in cases {
        let err = compile(source).unwrap_err();
        match err.kind {
            ErrorKind::DuplicateDeclaration {
                symbol: Some(found),
                ..
            } => assert_eq!(found, symbol, "{source:?}"),
            other => panic!("{source:?} gave {other:?}"),
        }
    }
}

#[test]
fn root_alias_takes_part_in_collision_checks() {
    let source = "class Cell:\n    v: int\n\nclass Board:\n    Cell: Domain[int, 1]\n    cells: list[Cell, 1]\n";
    assert!(compile(source).is_ok());

    let compiler = Compiler::new(CodegenConfig::default().with_root_alias("init"));
    let err = compiler.compile(source).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::DuplicateDeclaration { symbol: Some(ref s), .. } if s == "init_Cell"
    ));
}

#[test]
fn large_domains_compile_by_default() {
    let c = compile("class A:\n    x: Domain[int, range(0, 70000)]\n").unwrap();
    assert!(c.contains("static bool A_x_used[70000];\n"));
}

#[test]
fn sources_share_one_translation_unit() {
    let compiler = Compiler::default();
    let mut unit = compiler.unit();
    unit.add("class House:\n    number: Unique[Domain[int, range(1, 3)]]\n").unwrap();
    unit.add("class Street:\n    name: str = \"Elm\"\n").unwrap();

    let err = unit
        .add("class House:\n    color: Domain[str, \"red\"]\n")
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateDeclaration { field: None, .. }));

    let c = unit.finish();
    assert_eq!(c.matches("struct House {").count(), 1);
    assert!(position(&c, "struct House {") < position(&c, "struct Street {"));
    assert!(!c.contains("color"));
}

#[test]
fn deep_nesting_is_a_parse_error() {
    let depth = 200_000;
    let source = format!(
        "class A:\n    x: list[int, 1] = {}1{}\n",
        "[".repeat(depth),
        "]".repeat(depth)
    );
    let err = std::thread::Builder::new()
        .stack_size(2 << 20)
        .spawn(move || compile(&source).unwrap_err())
        .unwrap()
        .join()
        .unwrap();
    assert!(matches!(err.kind, ErrorKind::Parse { .. }));
}

#[test]
fn check_agrees_with_compile() {
    let compiler = Compiler::default();
    let good = "class A:\n    id: Unique[Domain[int, 1, 2]]\n\nclass B:\n    xs: list[A, 2]\n";
    assert!(compiler.check(good).unwrap().is_empty());
    assert!(compiler.compile(good).is_ok());

    let bad = "class A:\n    b: B\n\nclass B:\n    a: A\n";
    assert!(compiler.check(bad).is_err());
    assert!(compiler.compile(bad).is_err());
}
