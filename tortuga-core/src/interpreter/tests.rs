//! End-to-end interpreter tests: whole programs in, observable turtle
//! state and output buffer out.

use super::Interpreter;
use crate::error::{ErrorKind, LogoError};

fn run_ok(source: &str) -> Interpreter {
    let mut interp = Interpreter::new();
    interp
        .run(source)
        .unwrap_or_else(|e| panic!("program failed: {e}\nsource: {source}"));
    interp
}

fn run_err(source: &str) -> LogoError {
    let mut interp = Interpreter::new();
    interp
        .run(source)
        .expect_err("program should have failed")
}

fn output(source: &str) -> Vec<String> {
    run_ok(source).output().to_vec()
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-6, "expected {b}, got {a}");
}

// ---------------------------------------------------------------------------
// Movement and drawing
// ---------------------------------------------------------------------------

#[test]
fn square_scenario() {
    // Four segments forming a square, back at the origin facing north.
    let interp = run_ok("repeat 4 [forward 100 right 90]");
    let t = interp.turtle();
    assert_eq!(t.lines.len(), 4);

    let expected = [
        ((0.0, 0.0), (0.0, 100.0)),
        ((0.0, 100.0), (100.0, 100.0)),
        ((100.0, 100.0), (100.0, 0.0)),
        ((100.0, 0.0), (0.0, 0.0)),
    ];
    for (seg, ((x1, y1), (x2, y2))) in t.lines.iter().zip(expected) {
        assert_close(seg.x1, x1);
        assert_close(seg.y1, y1);
        assert_close(seg.x2, x2);
        assert_close(seg.y2, y2);
    }
    assert_close(t.x, 0.0);
    assert_close(t.y, 0.0);
    assert_close(t.heading, 0.0);
}

#[test]
fn procedure_square_runs_twice() {
    let interp = run_ok("to sq :n repeat 4 [forward :n right 90] end  sq 50  sq 50");
    let t = interp.turtle();
    assert_eq!(t.lines.len(), 8);
    assert_close(t.x, 0.0);
    assert_close(t.y, 0.0);
    assert_close(t.heading, 0.0);
}

#[test]
fn pen_up_moves_silently() {
    // Exactly two segments, both after the pendown.
    let interp = run_ok("penup forward 100 pendown forward 50 right 90 forward 50");
    let t = interp.turtle();
    assert_eq!(t.lines.len(), 2);
    assert_close(t.lines[0].x1, 0.0);
    assert_close(t.lines[0].y1, 100.0);
    assert_close(t.lines[0].x2, 0.0);
    assert_close(t.lines[0].y2, 150.0);
    assert_close(t.lines[1].x2, 50.0);
    assert_close(t.lines[1].y2, 150.0);
}

#[test]
fn segment_growth_matches_movement_count() {
    // Pen down throughout: one segment per movement statement.
    let interp = run_ok("forward 10 back 5 setxy 3 4 setx 0 sety 0 home");
    assert_eq!(interp.turtle().lines.len(), 6);
}

#[test]
fn rotations_do_not_draw() {
    let interp = run_ok("right 45 left 90 setheading 180");
    assert!(interp.turtle().lines.is_empty());
}

#[test]
fn heading_stays_in_range() {
    for src in [
        "right 725",
        "left 1000",
        "repeat 7 [right 100]",
        "setheading -90",
        "right 359.5 right 0.5",
    ] {
        let h = run_ok(src).turtle().heading;
        assert!((0.0..360.0).contains(&h), "{src}: heading {h}");
    }
}

#[test]
fn home_restores_origin_and_heading() {
    let interp = run_ok("forward 70 right 30 home");
    let t = interp.turtle();
    assert_eq!((t.x, t.y, t.heading), (0.0, 0.0, 0.0));
    // The homing move drew a segment.
    assert_eq!(t.lines.len(), 2);
}

#[test]
fn clear_screen_is_idempotent() {
    let once = run_ok("forward 50 clearscreen");
    let twice = run_ok("forward 50 clearscreen clearscreen");
    assert_eq!(once.turtle().lines, twice.turtle().lines);
    assert_eq!(
        (once.turtle().x, once.turtle().y, once.turtle().heading),
        (twice.turtle().x, twice.turtle().y, twice.turtle().heading),
    );
}

#[test]
fn clear_screen_preserves_pen_state() {
    let interp = run_ok("penup pencolor \"red clearscreen");
    let t = interp.turtle();
    assert!(!t.pen_down);
    assert_eq!(t.pen_color, "red");
}

#[test]
fn circle_draws_36_chords() {
    let interp = run_ok("circle 50");
    assert_eq!(interp.turtle().lines.len(), 36);
}

#[test]
fn arc_draws_rounded_steps() {
    assert_eq!(run_ok("arc 90 50").turtle().lines.len(), 9);
    assert_eq!(run_ok("arc 5 50").turtle().lines.len(), 1);
}

#[test]
fn pen_attributes_stamp_segments() {
    let interp = run_ok("pencolor \"tomato pensize 2.5 forward 10");
    let seg = &interp.turtle().lines[0];
    assert_eq!(seg.color, "tomato");
    assert_close(seg.size, 2.5);
}

#[test]
fn turtle_visibility() {
    assert!(!run_ok("hideturtle").turtle().visible);
    assert!(run_ok("hideturtle showturtle").turtle().visible);
}

// ---------------------------------------------------------------------------
// Output statements
// ---------------------------------------------------------------------------

#[test]
fn print_records_display_form() {
    assert_eq!(output("print 42"), vec!["42"]);
    assert_eq!(output("print \"hello"), vec!["hello"]);
    assert_eq!(output("print [red green blue]"), vec!["[red green blue]"]);
}

#[test]
fn type_records_without_terminating() {
    assert_eq!(output("type 1 type 2"), vec!["1", "2"]);
}

#[test]
fn show_quotes_words_and_brackets_lists() {
    assert_eq!(output("show \"foo"), vec!["\"foo"]);
    assert_eq!(output("show [a [b c]]"), vec!["[a [b c]]"]);
    assert_eq!(output("show 7"), vec!["7"]);
}

// ---------------------------------------------------------------------------
// Expressions and builtins
// ---------------------------------------------------------------------------

#[test]
fn arithmetic_evaluates() {
    assert_eq!(output("print 1 + 2 * 3"), vec!["7"]);
    assert_eq!(output("print (1 + 2) * 3"), vec!["9"]);
    assert_eq!(output("print 7 % 3"), vec!["1"]);
    assert_eq!(output("print -7 % 3"), vec!["-1"]);
    assert_eq!(output("print 1 / 2"), vec!["0.5"]);
}

#[test]
fn comparisons_yield_boolean_atoms() {
    assert_eq!(output("print 1 < 2"), vec!["true"]);
    assert_eq!(output("print 2 <= 1"), vec!["false"]);
    assert_eq!(output("print 2 = 2"), vec!["true"]);
    assert_eq!(output("print 2 <> 2"), vec!["false"]);
}

#[test]
fn comparator_trichotomy() {
    for (a, b) in [(1.0, 2.0), (2.0, 2.0), (3.0, 2.0), (-0.5, 0.5)] {
        // `not` binds tighter than `=`, so the negation needs parens.
        let src = format!(
            "print {a} < {b} print {a} = {b} print {a} > {b} \
             print {a} <> {b} print not ({a} = {b})"
        );
        let out = output(&src);
        let trues = out[..3].iter().filter(|s| *s == "true").count();
        assert_eq!(trues, 1, "trichotomy violated for {a}, {b}: {out:?}");
        assert_eq!(out[3], out[4], "<> must match not-equals for {a}, {b}");
    }
}

#[test]
fn logic_operators() {
    assert_eq!(output("print 1 < 2 and 3 < 4"), vec!["true"]);
    assert_eq!(output("print 1 < 2 and 4 < 3"), vec!["false"]);
    assert_eq!(output("print 1 > 2 or 3 < 4"), vec!["true"]);
    assert_eq!(output("print not (1 > 2)"), vec!["true"]);
}

#[test]
fn equality_is_deep() {
    assert_eq!(output("print [1 [a b]] = [1 [a b]]"), vec!["true"]);
    assert_eq!(output("print [1 2] = [1 3]"), vec!["false"]);
    assert_eq!(output("print \"abc = \"abc"), vec!["true"]);
}

#[test]
fn math_builtins() {
    assert_eq!(output("print sqrt 9"), vec!["3"]);
    assert_eq!(output("print abs -4"), vec!["4"]);
    assert_eq!(output("print int 3.9"), vec!["3"]);
    assert_eq!(output("print int -3.9"), vec!["-3"]);
    assert_eq!(output("print round 3.5"), vec!["4"]);
    assert_eq!(output("print sum 2 3"), vec!["5"]);
    assert_eq!(output("print difference 2 3"), vec!["-1"]);
    assert_eq!(output("print product 4 5"), vec!["20"]);
    assert_eq!(output("print quotient 7 2"), vec!["3.5"]);
    assert_eq!(output("print remainder 7 3"), vec!["1"]);
    assert_eq!(output("print power 2 10"), vec!["1024"]);
}

#[test]
fn trig_works_in_degrees() {
    assert_eq!(output("print sin 90"), vec!["1"]);
    assert_eq!(output("print cos 0"), vec!["1"]);
    let out = output("print atan 1");
    assert_close(out[0].parse().unwrap(), 45.0);
    let out = output("print atan 0 1");
    assert_close(out[0].parse().unwrap(), 90.0);
}

#[test]
fn towards_uses_compass_degrees() {
    let out = output("print towards 10 0");
    assert_close(out[0].parse().unwrap(), 90.0);
    let out = output("forward 10 print towards 0 0");
    assert_close(out[0].parse().unwrap(), 180.0);
}

#[test]
fn list_scenario() {
    // make "colors [red green blue]
    let out = output(
        "make \"colors [red green blue] \
         print first :colors print count :colors print item 2 :colors",
    );
    assert_eq!(out, vec!["red", "3", "green"]);
}

#[test]
fn sequence_builtins_on_lists() {
    assert_eq!(output("print last [a b c]"), vec!["c"]);
    assert_eq!(output("print butfirst [a b c]"), vec!["[b c]"]);
    assert_eq!(output("print butlast [a b c]"), vec!["[a b]"]);
    assert_eq!(output("print bf [a b c]"), vec!["[b c]"]);
    assert_eq!(output("print bl [a b c]"), vec!["[a b]"]);
}

#[test]
fn sequence_builtins_on_words() {
    assert_eq!(output("print first \"hello"), vec!["h"]);
    assert_eq!(output("print last \"hello"), vec!["o"]);
    assert_eq!(output("print butfirst \"hello"), vec!["ello"]);
    assert_eq!(output("print butlast \"hello"), vec!["hell"]);
    assert_eq!(output("print count \"hello"), vec!["5"]);
    assert_eq!(output("print item 2 \"hello"), vec!["e"]);
}

#[test]
fn list_construction_builtins() {
    assert_eq!(output("print fput 1 [2 3]"), vec!["[1 2 3]"]);
    assert_eq!(output("print lput 3 [1 2]"), vec!["[1 2 3]"]);
    assert_eq!(output("print list 1 2 3"), vec!["[1 2 3]"]);
    assert_eq!(output("print sentence [a b] [c]"), vec!["[a b c]"]);
    assert_eq!(output("print sentence \"a [b c]"), vec!["[a b c]"]);
    assert_eq!(output("print sentence \"a \"b"), vec!["[a b]"]);
    assert_eq!(output("print word \"fo \"o"), vec!["foo"]);
    assert_eq!(output("print word \"x 1"), vec!["x1"]);
}

#[test]
fn list_literal_resolves_params_at_construction() {
    assert_eq!(
        output("make \"n 5 print [size :n]"),
        vec!["[size 5]"]
    );
}

#[test]
fn thing_looks_up_by_name() {
    assert_eq!(output("make \"x 42 print thing \"x"), vec!["42"]);
    assert_eq!(output("make \"x 42 make \"name \"x print thing :name"), vec!["42"]);
}

#[test]
fn random_is_bounded_and_whole() {
    let out = output("repeat 50 [print random 6]");
    for entry in out {
        let n: f64 = entry.parse().unwrap();
        assert!((0.0..6.0).contains(&n), "out of range: {n}");
        assert_close(n, n.floor());
    }
}

#[test]
fn random_respects_the_seed() {
    let mut a = Interpreter::new();
    a.random_seed = 99;
    a.run("repeat 5 [print random 100]").unwrap();
    let mut b = Interpreter::new();
    b.random_seed = 99;
    b.run("repeat 5 [print random 100]").unwrap();
    assert_eq!(a.output(), b.output());
}

#[test]
fn reporters_read_turtle_state() {
    assert_eq!(output("print xcor"), vec!["0"]);
    let out = output("forward 10 right 90 print ycor print heading");
    assert_close(out[0].parse().unwrap(), 10.0);
    assert_close(out[1].parse().unwrap(), 90.0);
    assert_eq!(output("print pendown?"), vec!["true"]);
    assert_eq!(output("penup print pendown?"), vec!["false"]);
}

// ---------------------------------------------------------------------------
// Control flow
// ---------------------------------------------------------------------------

#[test]
fn while_counts_upward() {
    assert_eq!(
        output("make \"i 1 while [:i <= 3] [print :i make \"i :i + 1]"),
        vec!["1", "2", "3"]
    );
}

#[test]
fn if_and_ifelse() {
    assert_eq!(output("if 1 < 2 [print \"yes]"), vec!["yes"]);
    assert_eq!(output("if 2 < 1 [print \"yes]"), Vec::<String>::new());
    assert_eq!(
        output("ifelse 2 < 1 [print \"then] [print \"else]"),
        vec!["else"]
    );
}

#[test]
fn truthiness_of_conditions() {
    assert_eq!(output("if \"true [print 1]"), vec!["1"]);
    assert_eq!(output("if \"false [print 1]"), Vec::<String>::new());
    assert_eq!(output("if 0 [print 1]"), Vec::<String>::new());
    assert_eq!(output("if [] [print 1]"), Vec::<String>::new());
    assert_eq!(output("if [x] [print 1]"), vec!["1"]);
}

#[test]
fn repeat_counts_floor_and_clamps() {
    assert_eq!(output("repeat 2.9 [print \"x]").len(), 2);
    assert_eq!(output("repeat 0 [print \"x]").len(), 0);
    assert_eq!(output("repeat -3 [print \"x]").len(), 0);
}

#[test]
fn for_counts_inclusive() {
    assert_eq!(output("for \"i 1 4 [print :i]"), vec!["1", "2", "3", "4"]);
    assert_eq!(output("for \"i 0 10 5 [print :i]"), vec!["0", "5", "10"]);
    assert_eq!(output("for \"i 3 1 -1 [print :i]"), vec!["3", "2", "1"]);
}

#[test]
fn for_with_disagreeing_step_does_nothing() {
    assert_eq!(output("for \"i 1 5 -1 [print :i]"), Vec::<String>::new());
    assert_eq!(output("for \"i 5 1 [print :i]"), Vec::<String>::new());
}

#[test]
fn for_variable_is_scoped_to_the_loop() {
    let err = run_err("for \"i 1 3 [forward 1] print :i");
    assert_eq!(err.kind, ErrorKind::Name);
}

#[test]
fn for_zero_step_is_an_error() {
    assert_eq!(run_err("for \"i 1 5 0 [print :i]").kind, ErrorKind::Arithmetic);
}

// ---------------------------------------------------------------------------
// Procedures, scoping, and non-local return
// ---------------------------------------------------------------------------

#[test]
fn factorial_scenario() {
    let out = output(
        "to fact :n if :n <= 1 [output 1] output :n * fact :n - 1 end \
         print fact 5",
    );
    assert_eq!(out, vec!["120"]);
}

#[test]
fn stop_leaves_only_the_current_procedure() {
    // stop unwinds the repeat inside p, but the caller keeps going.
    let out = output(
        "to p repeat 10 [print \"in stop] print \"unreached end \
         p print \"after",
    );
    assert_eq!(out, vec!["in", "after"]);
}

#[test]
fn output_unwinds_nested_loops() {
    let out = output(
        "to find :limit for \"i 1 :limit [if :i = 3 [output :i]] output 0 end \
         print find 10",
    );
    assert_eq!(out, vec!["3"]);
}

#[test]
fn output_value_discarded_in_statement_position() {
    let out = output("to give output 9 end give print \"done");
    assert_eq!(out, vec!["done"]);
}

#[test]
fn procedures_do_not_see_caller_locals() {
    let err = run_err(
        "to outer local \"secret make \"secret 1 inner end \
         to inner print :secret end \
         outer",
    );
    assert_eq!(err.kind, ErrorKind::Name);
}

#[test]
fn local_is_invisible_after_return() {
    let err = run_err("to p local \"v make \"v 5 end p print :v");
    assert_eq!(err.kind, ErrorKind::Name);
}

#[test]
fn make_reaches_globals_from_procedures() {
    let out = output(
        "make \"total 0 \
         to bump make \"total :total + 1 end \
         bump bump print :total",
    );
    assert_eq!(out, vec!["2"]);
}

#[test]
fn make_of_fresh_name_stays_in_the_procedure() {
    let err = run_err("to p make \"scratch 1 end p print :scratch");
    assert_eq!(err.kind, ErrorKind::Name);
}

#[test]
fn parameters_shadow_globals() {
    let out = output(
        "make \"x 1 \
         to show_x :x print :x end \
         show_x 42 print :x",
    );
    assert_eq!(out, vec!["42", "1"]);
}

#[test]
fn last_definition_wins() {
    let out = output("to p print 1 end to p print 2 end p");
    assert_eq!(out, vec!["2"]);
}

#[test]
fn recursion_depth_square_spiral() {
    let interp = run_ok(
        "to spiral :n if :n < 1 [stop] forward :n right 90 spiral :n - 1 end \
         spiral 50",
    );
    assert_eq!(interp.turtle().lines.len(), 50);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn top_level_stop_is_a_control_error() {
    assert_eq!(run_err("stop").kind, ErrorKind::Control);
    assert_eq!(run_err("output 5").kind, ErrorKind::Control);
    assert_eq!(run_err("repeat 2 [stop]").kind, ErrorKind::Control);
}

#[test]
fn undefined_procedure() {
    let err = run_err("frobnicate 1");
    assert_eq!(err.kind, ErrorKind::Name);
    assert!(err.message.contains("frobnicate"), "got: {}", err.message);
}

#[test]
fn undefined_variable() {
    let err = run_err("print :nowhere");
    assert_eq!(err.kind, ErrorKind::Name);
    assert!(err.message.contains("nowhere"), "got: {}", err.message);
}

#[test]
fn local_without_value() {
    let err = run_err("to p local \"v print :v end p");
    assert_eq!(err.kind, ErrorKind::Name);
    assert!(err.message.contains("no value"), "got: {}", err.message);
}

#[test]
fn arity_checked_in_statement_position() {
    let err = run_err("to pair :a :b print :a end pair 1");
    assert_eq!(err.kind, ErrorKind::Arity);
    assert!(err.message.contains("pair"), "got: {}", err.message);
}

#[test]
fn arity_checked_in_expression_position() {
    let err = run_err("to double :n output :n * 2 end print double 1 2");
    assert_eq!(err.kind, ErrorKind::Arity);
}

#[test]
fn call_without_output_cannot_be_used_as_a_value() {
    let err = run_err("to noop forward 1 end print noop");
    assert_eq!(err.kind, ErrorKind::Type);
    assert!(err.message.contains("noop"), "got: {}", err.message);
}

#[test]
fn division_by_zero() {
    assert_eq!(run_err("print 1 / 0").kind, ErrorKind::Arithmetic);
    assert_eq!(run_err("print 1 % 0").kind, ErrorKind::Arithmetic);
    assert_eq!(run_err("print quotient 1 0").kind, ErrorKind::Arithmetic);
}

#[test]
fn item_out_of_bounds() {
    assert_eq!(run_err("print item 4 [a b c]").kind, ErrorKind::Arithmetic);
    assert_eq!(run_err("print item 0 [a b c]").kind, ErrorKind::Arithmetic);
}

#[test]
fn first_of_empty_sequence() {
    assert_eq!(run_err("print first []").kind, ErrorKind::Arithmetic);
    assert_eq!(run_err("print first \"\"").kind, ErrorKind::Arithmetic);
}

#[test]
fn type_errors_name_the_operation() {
    let err = run_err("print first 5");
    assert_eq!(err.kind, ErrorKind::Type);
    assert!(err.message.contains("first"), "got: {}", err.message);

    let err = run_err("print \"a + 1");
    assert_eq!(err.kind, ErrorKind::Type);

    let err = run_err("forward [10]");
    assert_eq!(err.kind, ErrorKind::Type);
    assert!(err.message.contains("forward"), "got: {}", err.message);
}

#[test]
fn partial_state_survives_an_error() {
    let mut interp = Interpreter::new();
    let err = interp
        .run("forward 10 print \"drawn forward 20 print :missing")
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Name);
    // Both segments and the earlier output remain observable.
    assert_eq!(interp.turtle().lines.len(), 2);
    assert_eq!(interp.output(), ["drawn"]);
}

#[test]
fn frames_unwind_on_error() {
    let mut interp = Interpreter::new();
    interp
        .run("to bad :n forward :n print :oops end")
        .unwrap();
    let before = interp.env.depth();
    assert!(interp.run("bad 5").is_err());
    assert_eq!(interp.env.depth(), before, "procedure frame leaked");
}
