//! Integration tests for declaration analysis

use logicpy_foundation::{ErrorKind, Literal, Primitive};
use logicpy_schema::{Domain, ElementType, FieldKind};

use crate::analyze;

const SCALAR_FIELDS: &str = "\
class Person:
    name: Unique[Domain[str, \"Alice\", \"Eric\", \"Arnold\", \"Peter\"]]
    occupation: Unique[Domain[str, \"artist\", \"engineer\", \"teacher\", \"doctor\"]]
    age: int = 10

class House:
    id: Unique[Domain[int, range(1, 5)]]
    person: Person

class Solution:
    houses: list[House, 4]

def validate(solution: Solution) -> None:
    engineer = nondet(solution.houses)
    assume(engineer.person.occupation == \"engineer\")
";

#[test]
fn every_field_kind_is_classified() {
    let schema = analyze(SCALAR_FIELDS).unwrap();
    assert_eq!(schema.len(), 3);

    let person = schema.get("Person").unwrap();
    assert!(matches!(person.fields[0].kind, FieldKind::UniqueDomainScalar(_)));
    assert_eq!(
        person.fields[2].kind,
        FieldKind::ScalarWithDefault(Primitive::Int, Literal::Int(10))
    );

    let house = schema.get("House").unwrap();
    assert_eq!(
        house.fields[0].domain().unwrap().domain,
        Domain::Range { start: 1, stop: 5 }
    );
    assert_eq!(house.fields[1].kind, FieldKind::EntityReference("Person".into()));

    let solution = schema.get("Solution").unwrap();
    assert_eq!(
        solution.fields[0].kind,
        FieldKind::FixedList {
            element: ElementType::Entity("House".into()),
            length: 4,
            defaults: None,
        }
    );
}

#[test]
fn declaration_order_is_kept_in_schema() {
    let schema = analyze(SCALAR_FIELDS).unwrap();
    let names: Vec<_> = schema.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Person", "House", "Solution"]);

    let fields: Vec<_> = schema
        .get("Person")
        .unwrap()
        .fields
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(fields, vec!["name", "occupation", "age"]);
}

#[test]
fn unknown_type_reference_is_unrecognized() {
    let err = analyze("class House:\n    owner: Person\n").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::UnrecognizedFieldAnnotation { ref entity, ref field, .. }
            if entity == "House" && field == "owner"
    ));
}

#[test]
fn dynamic_list_length_is_unrecognized() {
    let err = analyze("class A:\n    xs: list[int, N]\n").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnrecognizedFieldAnnotation { .. }));
}

#[test]
fn module_without_classes_is_empty() {
    let schema = analyze("import os\n\nLIMIT = 3\n").unwrap();
    assert!(schema.is_empty());
}

#[test]
fn primitive_names_cannot_be_redeclared() {
    let err = analyze("class bool:\n    v: int\n\nclass Flags:\n    f: list[bool, 2]\n").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::DuplicateDeclaration { ref entity, field: None, .. } if entity == "bool"
    ));

    let schema = analyze("class Str:\n    v: int\n\nclass Holder:\n    s: Str\n    t: str\n").unwrap();
    let holder = schema.get("Holder").unwrap();
    assert_eq!(holder.field("s").unwrap().kind, FieldKind::EntityReference("Str".into()));
    assert_eq!(holder.field("t").unwrap().kind, FieldKind::ScalarPrimitive(Primitive::Str));
}
