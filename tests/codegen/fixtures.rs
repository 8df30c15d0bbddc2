//! Reference puzzles and the exact C each must compile to.

use logicpy_codegen::{CodegenConfig, Compiler, compile};

// =============================================================================
// Two Houses
// =============================================================================

const TWO_HOUSES: &str = r#"
class House:
    number: Unique[Domain[int, range(1, 3)]]          # houses 1 and 2
    name: Unique[Domain[str, "Alice", "Eric"]]        # one of each name
    occupation: Unique[Domain[str, "Teacher", "Doctor"]]
    genre: Unique[Domain[str, "Fantasy", "Mystery"]]  # each genre used once

class Solution:
    houses: list[House, 2]  
    
def validate(solution: Solution) -> None:
    # The teacher lives directly to the left of the fantasy-book lover
    teacher_house = nondet(solution.houses)
    assume(teacher_house.occupation == "Teacher")

    fantasy_house = nondet(solution.houses)
    assume(fantasy_house.genre == "Fantasy")

    # "Directly to the left" (smaller house number by exactly 1)
    assert teacher_house.number + 1 == fantasy_house.number

    # Eric is the teacher
    eric_house = nondet(solution.houses)
    assume(eric_house.name == "Eric")
    assert eric_house.occupation == "Teacher"

    # Alice loves mystery books
    alice_house = nondet(solution.houses)
    assume(alice_house.name == "Alice")
    assert alice_house.genre == "Mystery"
"#;

const TWO_HOUSES_C: &str = r#"struct House {
    int number;
    const char * name;
    const char * occupation;
    const char * genre;
};

static int House_number[] = {1, 2};
static bool House_number_used[2];
static const char * House_name[] = {"Alice", "Eric"};
static bool House_name_used[2];
static const char * House_occupation[] = {"Teacher", "Doctor"};
static bool House_occupation_used[2];
static const char * House_genre[] = {"Fantasy", "Mystery"};
static bool House_genre_used[2];

static void init_House(struct House * instance) {
    __CPROVER_unique_domain(instance->number, House_number);
    __CPROVER_unique_domain(instance->name, House_name);
    __CPROVER_unique_domain(instance->occupation, House_occupation);
    __CPROVER_unique_domain(instance->genre, House_genre);
}

struct Solution {
    struct House houses[2];
};

static void init_Solution(struct Solution * instance) {
    for (size_t i = 0; i < sizeof(instance->houses) / sizeof(instance->houses[0]); ++i) {
        init_House(&instance->houses[i]);
    }
}

"#;

#[test]
fn two_houses() {
    assert_eq!(compile(TWO_HOUSES).unwrap(), TWO_HOUSES_C);
}

// =============================================================================
// Six Houses, Renamed Root
// =============================================================================

const SIX_HOUSES: &str = r#"class House:
    house_number: Unique[Domain[int, range(1, 7)]]
    name: Unique[Domain[str, "Alice", "Eric", "Peter", "Carol", "Bob", "Arnold"]]
    smoothie: Unique[Domain[str, "watermelon", "blueberry", "desert", "cherry", "dragonfruit", "lime"]]
    lunch: Unique[Domain[str, "stew", "pizza", "grilled cheese", "stir fry", "soup", "spaghetti"]]
    phone: Unique[Domain[str, "google pixel 6", "iphone 13", "xiaomi mi 11", "huawei p50", "samsung galaxy s21", "oneplus 9"]]
    car: Unique[Domain[str, "tesla model 3", "honda civic", "toyota camry", "ford f150", "chevrolet silverado", "bmw 3 series"]]
    house_style: Unique[Domain[str, "craftsman", "ranch", "modern", "victorian", "mediterranean", "colonial"]]

class Solution:
    houses: list[House, 6]
"#;

const SIX_HOUSES_C: &str = r#"struct House {
    int house_number;
    const char * name;
    const char * smoothie;
    const char * lunch;
    const char * phone;
    const char * car;
    const char * house_style;
};

static int House_house_number[] = {1, 2, 3, 4, 5, 6};
static bool House_house_number_used[6];
static const char * House_name[] = {"Alice", "Eric", "Peter", "Carol", "Bob", "Arnold"};
static bool House_name_used[6];
static const char * House_smoothie[] = {"watermelon", "blueberry", "desert", "cherry", "dragonfruit", "lime"};
static bool House_smoothie_used[6];
static const char * House_lunch[] = {"stew", "pizza", "grilled cheese", "stir fry", "soup", "spaghetti"};
static bool House_lunch_used[6];
static const char * House_phone[] = {"google pixel 6", "iphone 13", "xiaomi mi 11", "huawei p50", "samsung galaxy s21", "oneplus 9"};
static bool House_phone_used[6];
static const char * House_car[] = {"tesla model 3", "honda civic", "toyota camry", "ford f150", "chevrolet silverado", "bmw 3 series"};
static bool House_car_used[6];
static const char * House_house_style[] = {"craftsman", "ranch", "modern", "victorian", "mediterranean", "colonial"};
static bool House_house_style_used[6];

static void init_House(struct House * instance) {
    __CPROVER_unique_domain(instance->house_number, House_house_number);
    __CPROVER_unique_domain(instance->name, House_name);
    __CPROVER_unique_domain(instance->smoothie, House_smoothie);
    __CPROVER_unique_domain(instance->lunch, House_lunch);
    __CPROVER_unique_domain(instance->phone, House_phone);
    __CPROVER_unique_domain(instance->car, House_car);
    __CPROVER_unique_domain(instance->house_style, House_house_style);
}

struct PuzzleSolution {
    struct House houses[6];
};

static void init_PuzzleSolution(struct PuzzleSolution * instance) {
    for (size_t i = 0; i < sizeof(instance->houses) / sizeof(instance->houses[0]); ++i) {
        init_House(&instance->houses[i]);
    }
}

"#;

#[test]
fn six_houses_with_root_alias() {
    let compiler = Compiler::new(CodegenConfig::default().with_root_alias("PuzzleSolution"));
    assert_eq!(compiler.compile(SIX_HOUSES).unwrap(), SIX_HOUSES_C);
}

#[test]
fn six_houses_keep_declared_name_by_default() {
    let c = compile(SIX_HOUSES).unwrap();
    assert!(c.contains("struct Solution {\n    struct House houses[6];\n};\n"));
    assert!(!c.contains("PuzzleSolution"));
}

// =============================================================================
// Primitive List
// =============================================================================

const PRIMITIVE_LIST: &str = r#"class House:
    number: Unique[Domain[int, range(1, 7)]]  # House numbers from 1 to 6
    name: Unique[Domain[str, "Alice", "Carol", "Eric", "Peter", "Bob", "Arnold"]]
    music_genre: Unique[Domain[str, "classical", "hip hop", "jazz", "pop", "rock", "country"]]
    mother: Unique[Domain[str, "Sarah", "Penny", "Aniya", "Janelle", "Kailyn", "Holly"]]
    child: Unique[Domain[str, "Alice", "Fred", "Timothy", "Bella", "Samantha", "Meredith"]]
    height: Unique[Domain[str, "very short", "tall", "short", "very tall", "super tall", "average"]]
    animal: Unique[Domain[str, "bird", "dog", "horse", "rabbit", "cat", "fish"]]

class Solution:
    header: list[str, 7] = ["House", "Name", "MusicGenre", "Mother", "Child", "Height", "Animal"]
    rows: list[House, 6]
"#;

const PRIMITIVE_LIST_C: &str = r#"struct House {
    int number;
    const char * name;
    const char * music_genre;
    const char * mother;
    const char * child;
    const char * height;
    const char * animal;
};

static int House_number[] = {1, 2, 3, 4, 5, 6};
static bool House_number_used[6];
static const char * House_name[] = {"Alice", "Carol", "Eric", "Peter", "Bob", "Arnold"};
static bool House_name_used[6];
static const char * House_music_genre[] = {"classical", "hip hop", "jazz", "pop", "rock", "country"};
static bool House_music_genre_used[6];
static const char * House_mother[] = {"Sarah", "Penny", "Aniya", "Janelle", "Kailyn", "Holly"};
static bool House_mother_used[6];
static const char * House_child[] = {"Alice", "Fred", "Timothy", "Bella", "Samantha", "Meredith"};
static bool House_child_used[6];
static const char * House_height[] = {"very short", "tall", "short", "very tall", "super tall", "average"};
static bool House_height_used[6];
static const char * House_animal[] = {"bird", "dog", "horse", "rabbit", "cat", "fish"};
static bool House_animal_used[6];

static void init_House(struct House * instance) {
    __CPROVER_unique_domain(instance->number, House_number);
    __CPROVER_unique_domain(instance->name, House_name);
    __CPROVER_unique_domain(instance->music_genre, House_music_genre);
    __CPROVER_unique_domain(instance->mother, House_mother);
    __CPROVER_unique_domain(instance->child, House_child);
    __CPROVER_unique_domain(instance->height, House_height);
    __CPROVER_unique_domain(instance->animal, House_animal);
}

struct Solution {
    const char * header[7];
    struct House rows[6];
};

static void init_Solution(struct Solution * instance) {
    __CPROVER_array_copy(instance->header, (const char *[]){"House", "Name", "MusicGenre", "Mother", "Child", "Height", "Animal"});
    for (size_t i = 0; i < sizeof(instance->rows) / sizeof(instance->rows[0]); ++i) {
        init_House(&instance->rows[i]);
    }
}

"#;

#[test]
fn primitive_list() {
    assert_eq!(compile(PRIMITIVE_LIST).unwrap(), PRIMITIVE_LIST_C);
}

// =============================================================================
// Scalar Fields
// =============================================================================

const SCALAR_FIELDS: &str = r#"class Person:
    name: Unique[Domain[str, "Alice", "Eric", "Arnold", "Peter"]]
    occupation: Unique[Domain[str, "artist", "engineer", "teacher", "doctor"]]
    book_genre: Unique[Domain[str, "fantasy", "science fiction", "mystery", "romance"]]
    phone_model: Unique[Domain[str, "google pixel 6", "iphone 13", "oneplus 9", "samsung galaxy s21"]]
    age: int = 10

class House:
    id: Unique[Domain[int, range(1, 5)]]
    person: Person

class Solution:
    houses: list[House, 4]

def validate(solution: Solution) -> None:
    # Clue 1: The person who is an engineer is directly left of the person who uses a Samsung Galaxy S21.
    engineer = nondet(solution.houses)
    assume(engineer.person.occupation == "engineer")
    samsung_user = nondet(solution.houses)
    assume(samsung_user.person.phone_model == "samsung galaxy s21")
    assert engineer.id + 1 == samsung_user.id

    # Clue 8: The person who uses a OnePlus 9 is Arnold.
    oneplus_user = nondet(solution.houses)

    assume(oneplus_user.person.phone_model == "oneplus 9")
    assert oneplus_user.person.name == "Arnold"
"#;

const SCALAR_FIELDS_C: &str = r#"struct Person {
    const char * name;
    const char * occupation;
    const char * book_genre;
    const char * phone_model;
    int age;
};

static const char * Person_name[] = {"Alice", "Eric", "Arnold", "Peter"};
static bool Person_name_used[4];
static const char * Person_occupation[] = {"artist", "engineer", "teacher", "doctor"};
static bool Person_occupation_used[4];
static const char * Person_book_genre[] = {"fantasy", "science fiction", "mystery", "romance"};
static bool Person_book_genre_used[4];
static const char * Person_phone_model[] = {"google pixel 6", "iphone 13", "oneplus 9", "samsung galaxy s21"};
static bool Person_phone_model_used[4];

static void init_Person(struct Person * instance) {
    __CPROVER_unique_domain(instance->name, Person_name);
    __CPROVER_unique_domain(instance->occupation, Person_occupation);
    __CPROVER_unique_domain(instance->book_genre, Person_book_genre);
    __CPROVER_unique_domain(instance->phone_model, Person_phone_model);
    instance->age = 10;
}

struct House {
    int id;
    struct Person person;
};

static int House_id[] = {1, 2, 3, 4};
static bool House_id_used[4];

static void init_House(struct House * instance) {
    __CPROVER_unique_domain(instance->id, House_id);
    init_Person(&instance->person);
}

struct Solution {
    struct House houses[4];
};

static void init_Solution(struct Solution * instance) {
    for (size_t i = 0; i < sizeof(instance->houses) / sizeof(instance->houses[0]); ++i) {
        init_House(&instance->houses[i]);
    }
}

"#;

#[test]
fn scalar_fields() {
    assert_eq!(compile(SCALAR_FIELDS).unwrap(), SCALAR_FIELDS_C);
}
