// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// Build an `Error::Content` describing the anchor or shape that was expected.
#[macro_export]
macro_rules! content_err {
    ($($arg:tt)*) => {
        $crate::error::Error::Content { expected: format!($($arg)*) }
    };
}
