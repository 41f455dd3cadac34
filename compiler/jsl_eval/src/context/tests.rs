use super::*;
use pretty_assertions::assert_eq;

#[test]
fn root_renders_line_one() {
    assert_eq!(Context::root().format(None), "error on line 1");
}

#[test]
fn column_and_message_are_appended() {
    let ctx = Context::new(3, Some(9), None);
    assert_eq!(
        ctx.format(Some("stack underflow")),
        "error on line 4, col 9: stack underflow"
    );
}

#[test]
fn parents_render_beneath_without_message() {
    let root = Context::root().snapshot();
    let call = Context::new(11, Some(7), Some(root)).snapshot();
    let inner = Context::new(3, Some(2), Some(call));

    assert_eq!(
        inner.format(Some("unknown word 'x'")),
        "error on line 4, col 2: unknown word 'x'\n\
         stacktrace:\n\
         error on line 12, col 7\n\
         stacktrace:\n\
         error on line 1"
    );
}

#[test]
fn depth_counts_every_frame() {
    let a = Context::root().snapshot();
    let b = Context::at(1, Some(a)).snapshot();
    let c = Context::at(2, Some(b));
    assert_eq!(c.depth(), 3);
    assert_eq!(Context::root().depth(), 1);
}

#[test]
fn shared_parent_survives_child_drop() {
    let parent = Context::at(5, None).snapshot();
    {
        let _child = Context::at(6, Some(Rc::clone(&parent)));
    }
    assert_eq!(parent.format(None), "error on line 6");
}

#[test]
fn long_chain_formats_and_drops() {
    let mut frame = Context::root();
    for line in 1..20_000 {
        frame = Context::at(line, Some(frame.snapshot()));
    }
    assert_eq!(frame.depth(), 20_000);
    let rendered = frame.format(Some("deep"));
    assert!(rendered.starts_with("error on line 20000: deep"));
    assert_eq!(rendered.matches("stacktrace:").count(), 19_999);
}

#[test]
fn prelude_frames_name_their_function() {
    let call = Context::new(0, Some(4), None).snapshot();
    let inner = Context::new(3, Some(17), Some(call)).within(Origin::Prelude("front"));
    assert_eq!(
        inner.format(Some("boom")),
        "error in prelude 'front' on line 4, col 17: boom\n\
         stacktrace:\n\
         error on line 1, col 4"
    );
}
