use pretty_assertions::assert_eq;

use super::*;

fn names(source: &str) -> Vec<String> {
    lambda_locals(source).into_iter().map(|l| l.name).collect()
}

#[test]
fn test_single_local() {
    let locals = lambda_locals("a; b");
    assert_eq!(
        locals,
        vec![LambdaLocal {
            name: "b".into(),
            start: 3,
            end: 4
        }]
    );
}

#[test]
fn test_several_params_and_locals() {
    assert_eq!(names("a, b; c, d"), vec!["c", "d"]);
}

#[test]
fn test_locals_only() {
    assert_eq!(names("; x"), vec!["x"]);
}

#[test]
fn test_no_semicolon_means_no_locals() {
    assert!(names("a, b").is_empty());
    assert!(names("").is_empty());
}

#[test]
fn test_unexpected_shapes_degrade() {
    assert!(names("a = 1; b").is_empty());
    assert!(names("*a; b").is_empty());
    assert!(names("(a, b); c").is_empty());
    assert!(names("a; \"").is_empty());
}

#[test]
fn test_ranges_slice_the_input() {
    let source = "first,  second;   third";
    for local in lambda_locals(source) {
        assert_eq!(&source[local.start as usize..local.end as usize], local.name);
    }
}
