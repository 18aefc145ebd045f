use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_intern_dedupes() {
    let interner = StringInterner::new();
    let a = interner.intern("rgb");
    let b = interner.intern("rgb");
    let c = interner.intern("xyz");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(interner.lookup(a), "rgb");
    assert_eq!(interner.lookup(c), "xyz");
}

#[test]
fn test_empty_is_preinterned() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
    assert_eq!(interner.len(), 1);
}

#[test]
fn test_unknown_name_is_empty() {
    let interner = StringInterner::new();
    assert_eq!(interner.lookup(Name::from_raw(99)), "");
}
