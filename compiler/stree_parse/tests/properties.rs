//! Property-based tests for the parse layer.
//!
//! Programs are generated from a small grammar of nested definitions,
//! conditionals, loops and rescue blocks, with comments sprinkled on header
//! lines, statement lines and lines of their own. Every generated program
//! parses, and every parse must satisfy:
//! 1. Containment: a node's span contains the spans of its children
//! 2. Claim uniqueness: no delimiter is left unclaimed
//! 3. Comment conservation: every comment ends up on exactly one node
//! 4. Order preservation: a node's comments are in source order
//! 5. Slice round-trip: a leaf's span slices to its text
//! 6. Idempotence: attaching an empty backlog changes nothing

#![allow(clippy::unwrap_used, reason = "tests unwrap to fail loudly")]
#![allow(
    clippy::needless_pass_by_value,
    reason = "Proptest macros generate code with these patterns"
)]

use proptest::prelude::*;
use stree_ir::Node;
use stree_parse::{attach_comments, parse, parse_with_leftovers};

// -- Program Generation --

#[derive(Clone, Debug)]
enum Stmt {
    Expr(String),
    Assign(&'static str, String),
    If(String, Vec<Line>),
    While(String, Vec<Line>),
    Def(&'static str, Vec<Line>),
    Begin(Vec<Line>, Vec<Line>),
    /// A comment on a line of its own.
    Note,
}

/// A statement, optionally followed by a comment on its first line.
#[derive(Clone, Debug)]
struct Line {
    stmt: Stmt,
    note: bool,
}

fn leaf_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..1000).prop_map(|n| n.to_string()),
        prop::sample::select(vec!["a", "b", "@count", "nil", "true", ":sym", "\"str\""])
            .prop_map(str::to_owned),
    ]
}

fn expr_strategy() -> BoxedStrategy<String> {
    leaf_strategy()
        .prop_recursive(3, 12, 3, |inner| {
            prop_oneof![
                (inner.clone(), inner.clone()).prop_map(|(l, r)| format!("{l} + {r}")),
                prop::collection::vec(inner.clone(), 0..3)
                    .prop_map(|items| format!("[{}]", items.join(", "))),
                prop::collection::vec(inner, 0..3)
                    .prop_map(|args| format!("foo({})", args.join(", "))),
            ]
        })
        .boxed()
}

fn line_strategy() -> impl Strategy<Value = Line> {
    let simple = prop_oneof![
        4 => expr_strategy().prop_map(Stmt::Expr),
        4 => (prop::sample::select(vec!["x", "y"]), expr_strategy())
            .prop_map(|(name, value)| Stmt::Assign(name, value)),
        1 => Just(Stmt::Note),
    ];
    let stmt = simple.prop_recursive(3, 24, 3, |inner| {
        let body = prop::collection::vec(
            (inner, any::<bool>()).prop_map(|(stmt, note)| Line { stmt, note }),
            0..3,
        )
        .boxed();
        prop_oneof![
            (expr_strategy(), body.clone()).prop_map(|(p, b)| Stmt::If(p, b)),
            (expr_strategy(), body.clone()).prop_map(|(p, b)| Stmt::While(p, b)),
            (prop::sample::select(vec!["run", "call"]), body.clone())
                .prop_map(|(name, b)| Stmt::Def(name, b)),
            (body.clone(), body).prop_map(|(b, r)| Stmt::Begin(b, r)),
        ]
    });
    (stmt, any::<bool>()).prop_map(|(stmt, note)| Line { stmt, note })
}

fn program_strategy() -> impl Strategy<Value = Vec<Line>> {
    prop::collection::vec(line_strategy(), 0..6)
}

/// Write a header line, with its trailing comment when it has one.
fn header(out: &mut String, text: &str, note: bool) -> usize {
    out.push_str(text);
    let written = if note {
        out.push_str(" # note");
        1
    } else {
        0
    };
    out.push('\n');
    written
}

/// Render lines at `depth`, returning how many comments were written.
fn render(lines: &[Line], depth: usize, out: &mut String) -> usize {
    let indent = "  ".repeat(depth);
    let mut comments = 0;
    for line in lines {
        out.push_str(&indent);
        let (text, bodies) = match &line.stmt {
            Stmt::Note => {
                out.push_str("# standalone\n");
                comments += 1;
                continue;
            }
            Stmt::Expr(expr) => (expr.clone(), Vec::new()),
            Stmt::Assign(name, value) => (format!("{name} = {value}"), Vec::new()),
            Stmt::If(predicate, body) => (format!("if {predicate}"), vec![body]),
            Stmt::While(predicate, body) => (format!("while {predicate}"), vec![body]),
            Stmt::Def(name, body) => (format!("def {name}"), vec![body]),
            Stmt::Begin(body, rescue) => ("begin".to_owned(), vec![body, rescue]),
        };
        comments += header(out, &text, line.note);
        if bodies.is_empty() {
            continue;
        }
        for (i, body) in bodies.into_iter().enumerate() {
            if i > 0 {
                out.push_str(&indent);
                out.push_str("rescue\n");
            }
            comments += render(body, depth + 1, out);
        }
        out.push_str(&indent);
        out.push_str("end\n");
    }
    comments
}

fn source_of(lines: &[Line]) -> (String, usize) {
    let mut source = String::new();
    let comments = render(lines, 0, &mut source);
    (source, comments)
}

// -- Checks --

fn check_containment(node: &Node) -> Result<(), String> {
    for child in node.child_nodes() {
        if !node.span.contains(child.span) {
            return Err(format!(
                "{} at {} does not contain {} at {}",
                node.kind.name(),
                node.span,
                child.kind.name(),
                child.span
            ));
        }
        check_containment(child)?;
    }
    Ok(())
}

fn check_children_in_order(node: &Node) -> Result<(), String> {
    let children = node.child_nodes();
    for pair in children.windows(2) {
        if pair[0].span.start_offset > pair[1].span.start_offset {
            return Err(format!(
                "{} children out of order: {} before {}",
                node.kind.name(),
                pair[0].span,
                pair[1].span
            ));
        }
    }
    children.iter().try_for_each(|child| check_children_in_order(child))
}

// -- Property Tests --

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 1000,
        ..ProptestConfig::default()
    })]

    /// Every node contains its children and lists them in source order.
    #[test]
    fn prop_children_are_contained(lines in program_strategy()) {
        let (source, _) = source_of(&lines);
        let program = parse(&source).map_err(|e| TestCaseError::fail(format!("{e}\n{source}")))?;
        prop_assert_eq!(program.span.start_offset, 0);
        prop_assert_eq!(program.span.end_offset as usize, source.len());
        check_containment(&program).map_err(TestCaseError::fail)?;
        check_children_in_order(&program).map_err(TestCaseError::fail)?;
    }

    /// Nothing in the generated grammar leaves a delimiter behind.
    #[test]
    fn prop_every_delimiter_is_claimed(lines in program_strategy()) {
        let (source, _) = source_of(&lines);
        let finished = parse_with_leftovers(&source).unwrap();
        prop_assert!(finished.unclaimed.is_empty(), "unclaimed: {:?}", finished.unclaimed);
    }

    /// Each comment is attached once, and each node holds its comments in
    /// source order.
    #[test]
    fn prop_comments_are_conserved(lines in program_strategy()) {
        let (source, comments) = source_of(&lines);
        let program = parse(&source).unwrap();
        prop_assert_eq!(program.comment_count(), comments);

        let mut ordered = true;
        program.walk(&mut |node| {
            ordered &= node
                .comments
                .windows(2)
                .all(|pair| pair[0].span.start_offset < pair[1].span.start_offset);
        });
        prop_assert!(ordered);
    }

    /// Leaves slice back to their own text.
    #[test]
    fn prop_leaves_slice_to_their_text(lines in program_strategy()) {
        let (source, _) = source_of(&lines);
        let program = parse(&source).unwrap();
        let mut mismatches = Vec::new();
        program.walk(&mut |node| {
            if let Some(text) = node.leaf_text() {
                if node.span.slice(&source) != Some(text) {
                    mismatches.push(format!("{text:?} at {}", node.span));
                }
            }
        });
        prop_assert!(mismatches.is_empty(), "{:?}", mismatches);
    }

    /// Attaching an empty backlog to a finished tree is a no-op, and parsing
    /// is deterministic.
    #[test]
    fn prop_reattaching_is_a_no_op(lines in program_strategy()) {
        let (source, _) = source_of(&lines);
        let program = parse(&source).unwrap();
        let mut again = program.clone();
        attach_comments(&mut again, Vec::new()).unwrap();
        prop_assert_eq!(&again, &program);
        prop_assert_eq!(parse(&source).unwrap(), program);
    }
}
