use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_render_plain() {
    let source = "if x\n  y\n";
    let out = render(source, "demo.rb", ErrorCode::E1003, "unexpected `y`", 2, 2);
    assert_eq!(
        out,
        "error[E1003]: unexpected `y`\n  --> demo.rb:2:2\n   |\n 2 |   y\n   |   ^\n"
    );
}

#[test]
fn test_render_line_out_of_range_has_header_only() {
    let out = render("x", "a.rb", ErrorCode::E1004, "eof", 7, 0);
    assert_eq!(out, "error[E1004]: eof\n  --> a.rb:7:0\n");
}

#[test]
fn test_render_colors() {
    let out = render_with("x", "a.rb", ErrorCode::E0001, "bad", 1, 0, true);
    assert!(out.starts_with("\x1b[1;31merror[E0001]"));
    assert!(out.contains("\x1b[0m"));
}

#[test]
fn test_color_mode() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
}
