//! End-to-end programs run through the full pipeline.
//!
//! Each scenario makes its outcome observable through `main`'s exit
//! status, so the assertion is a single integer.

use metac::pipeline::{run_program, PipelineError};
use pretty_assertions::assert_eq;

#[test]
fn person_mutation_does_not_leak_into_copies() {
    // person.age goes to 23 in the caller; do_work mutates its own copy
    // and changes nothing the caller can see
    let status = run_program(
        "struct Person {\n\
             name: String,\n\
             age: i32,\n\
         }\n\
         \n\
         proc do_work(person: Person) {\n\
             person.name = \"Jack\";\n\
             person.age = 99;\n\
         }\n\
         \n\
         proc main(): i32 {\n\
             let person: Person = Person { name: \"Jack\", age: 22 };\n\
             person.age = person.age + 1;\n\
             do_work(person);\n\
             if person.name == \"Jack\" {\n\
                 return person.age;\n\
             }\n\
             return 0;\n\
         }",
    )
    .unwrap();
    assert_eq!(status, 23);
}

#[test]
fn car_year_counts_up_to_2023() {
    let status = run_program(
        "struct Car {\n\
             make: String,\n\
             model: String,\n\
             year: i32,\n\
         }\n\
         \n\
         proc main(): i32 {\n\
             let car: Car = Car { make: \"Toyota\", model: \"Camry\", year: 2023 };\n\
             car.year = 2010;\n\
             if car.year == 2010 {\n\
                 while car.year < 2023 {\n\
                     car.year += 1;\n\
                 }\n\
             }\n\
             return car.year - 2000;\n\
         }",
    )
    .unwrap();
    assert_eq!(status, 23);
}

#[test]
fn for_range_constructs_fourteen_independent_cars() {
    // 2010..2024 is 14 iterations; summing (year - 2010) gives 0+1+..+13 = 91,
    // and counting gives 14. Both are packed into one status byte.
    let status = run_program(
        "struct Car {\n\
             make: String,\n\
             model: String,\n\
             year: i32,\n\
         }\n\
         \n\
         impl Car {\n\
             proc new(make: String, model: String, year: i32): Car {\n\
                 return Car { make: make, model: model, year: year };\n\
             }\n\
         }\n\
         \n\
         proc main(): i32 {\n\
             let count: i32 = 0;\n\
             let sum: i32 = 0;\n\
             for year in 2010..2024 {\n\
                 let car: Car = Car::new(\"Honda\", \"Accord\", year);\n\
                 count += 1;\n\
                 sum += car.year - 2010;\n\
             }\n\
             return count * 10 + (sum - 91);\n\
         }",
    )
    .unwrap();
    assert_eq!(status, 140);
}

#[test]
fn resolution_errors_stop_execution_before_it_starts() {
    // the bad call is behind main's first statement; nothing runs
    let err = run_program(
        "proc main(): i32 {\n\
             let x: i32 = 1;\n\
             Ghost::summon();\n\
             return x;\n\
         }",
    )
    .unwrap_err();
    assert!(matches!(err, PipelineError::Resolve(_)));
}

#[test]
fn lex_errors_surface_first() {
    let err = run_program("proc main() { let s: String = \"open; }").unwrap_err();
    assert!(matches!(err, PipelineError::Lex(_)));
}

#[test]
fn struct_literal_round_trip() {
    let status = run_program(
        "struct Pair { a: i32, b: i32 }\n\
         proc main(): i32 {\n\
             let p: Pair = Pair { a: 4, b: 7 };\n\
             return p.a * 10 + p.b;\n\
         }",
    )
    .unwrap();
    assert_eq!(status, 47);
}
