/// Builds a [`PatchPath`](crate::PatchPath) from a literal, panicking on malformed input.
#[macro_export]
macro_rules! patch_path {
    ($path:expr) => {
        <$crate::PatchPath as ::std::str::FromStr>::from_str($path).expect("valid patch path")
    };
}
