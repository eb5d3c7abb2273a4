use super::*;

#[test]
fn push_pop_restores_levels() {
    let mut stack = IndentStack::new();
    assert_eq!(stack.current(), Indent::default());
    stack.push(Indent::new(2, true));
    stack.push(Indent::new(4, false));
    assert_eq!(stack.depth(), 2);
    assert_eq!(stack.pop(), Some(Indent::new(4, false)));
    assert_eq!(stack.current(), Indent::new(2, true));
    assert_eq!(stack.pop(), Some(Indent::new(2, true)));
    assert_eq!(stack.pop(), None);
    assert_eq!(stack.current(), Indent::default());
}

#[test]
fn unwind_counts_blocks() {
    let mut stack = IndentStack::new();
    stack.push(Indent::new(2, true));
    stack.push(Indent::new(4, false));
    stack.push(Indent::new(6, true));
    assert_eq!(stack.unwind_to(2), 1);
    assert_eq!(stack.current(), Indent::new(2, true));
    assert_eq!(stack.unwind_to(0), 1);
    assert_eq!(stack.depth(), 0);
}
