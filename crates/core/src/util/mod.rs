pub mod range;
pub mod unit;

/// A macro to measure the evaluation time of an expression. Wraps an
/// expression, logs how long it took to evaluate, and returns its value.
/// Without an explicit level, the timing is logged at `Debug`.
#[macro_export]
macro_rules! timed {
    ($label:expr, $ex:expr) => {
        $crate::timed!($label, log::Level::Debug, $ex)
    };
    ($label:expr, $log_level:expr, $ex:expr) => {{
        let now = std::time::Instant::now();
        let value = $ex;
        let elapsed = now.elapsed();
        log::log!($log_level, "{} took {} ms", $label, elapsed.as_millis());
        value
    }};
}

/// The number of coordinates visited when iterating a map of the given radius.
/// Both axes span `[-r, r]`, so this is `(2r+1)^2`. Not every coordinate
/// becomes a tile, so this is an upper bound on the tile count, useful for
/// pre-allocating. A negative radius visits nothing.
pub fn coord_count(radius: i32) -> usize {
    if radius < 0 {
        0
    } else {
        let side = 2 * radius as usize + 1;
        side * side
    }
}
