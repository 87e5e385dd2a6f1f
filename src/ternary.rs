/// The ternary expression handler.  `cargo fmt` spreads every `if`
/// over five lines, and the clipping rules at the edges of the
/// min-path matrix are a lot easier to read as a single table of
/// `cq!(at_edge, clipped, neighbor)` rows.
#[macro_export]
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}

/// Bail out of the current function with a `MalformedSeam` error,
/// formatted like `format!`.
#[macro_export]
macro_rules! reject_seam {
    ($($arg: tt)*) => {
        return Err($crate::error::CarveError::MalformedSeam(format!($($arg)*)))
    };
}
