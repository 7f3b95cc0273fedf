//! Property tests over generated packages

use std::fmt::Write;

use proptest::prelude::*;
use protogo_foundation::ErrorKind;

use crate::validate;

fn struct_with_numbers(numbers: &[u32]) -> String {
    let mut source = String::from("package p\ntype T struct {\n");
    for (i, n) in numbers.iter().enumerate() {
        let _ = writeln!(source, "\tF{i} int `protogo:\"{n}\"`");
    }
    source.push_str("}\n");
    source
}

proptest! {
    /// Distinct numbers in any order are accepted and reported sorted.
    #[test]
    fn distinct_numbers_accepted(numbers in prop::collection::hash_set(0u32..1000, 0..12)) {
        let numbers: Vec<_> = numbers.into_iter().collect();
        let validated = validate(&struct_with_numbers(&numbers)).unwrap();
        let mut expected = numbers.clone();
        expected.sort_unstable();
        prop_assert_eq!(&validated.types[0].tags, &expected);
    }

    /// Repeating any number names the field that repeated it.
    #[test]
    fn repeated_number_rejected(mut numbers in prop::collection::hash_set(0u32..1000, 1..8), pick in any::<prop::sample::Index>()) {
        let mut numbers: Vec<_> = numbers.drain().collect();
        let repeated = numbers[pick.index(numbers.len())];
        numbers.push(repeated);
        let kind = validate(&struct_with_numbers(&numbers)).unwrap_err().kind;
        prop_assert_eq!(kind, ErrorKind::DuplicateTag {
            type_name: "T".into(),
            field: format!("F{}", numbers.len() - 1),
            number: repeated,
        });
    }
}
