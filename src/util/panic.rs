/// Asserts that running the block panics. The block runs inside
/// [`AssertUnwindSafe`](std::panic::AssertUnwindSafe), so it may capture collections by reference.
macro_rules! assert_panics {
    ($run:block) => {
        assert_panics!($run, "expected the block to panic")
    };
    ($run:block, $msg:literal) => {{
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $run));
        assert!(result.is_err(), $msg);
    }};
}

pub(crate) use assert_panics;
