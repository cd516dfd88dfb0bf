use std::fs;
use std::path::Path;

/// RT modules must not call the non-RT `assert_invariant`, which acquires a Mutex.
#[test]
fn rt_does_not_call_assert_invariant() {
    for file in ["processor.rs", "oscillator.rs", "smoother.rs", "atomic.rs"] {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("src").join(file);
        let src = fs::read_to_string(&path).expect("failed to read RT source");
        assert!(
            !src.contains("assert_invariant("),
            "{} must not call assert_invariant (acquires Mutex). Signal through invariant_rt instead.",
            file
        );
        assert!(
            !src.contains("Mutex"),
            "{} must not take locks",
            file
        );
    }
}
