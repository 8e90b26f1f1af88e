pub mod bot;
pub mod commands;
pub mod config;
pub mod error;
pub mod extract;
pub mod format;
pub mod handlers;
pub mod reply;
pub mod telemetry;
#[cfg(test)]
mod testing;
pub mod tikapi;

/// Define a function returning a lazily compiled, process-wide [`regex::Regex`].
///
/// ```ignore
/// lazy_regex!(fn digits, r"\d+");
/// assert!(digits().is_match("42"));
/// ```
#[macro_export]
macro_rules! lazy_regex {
    ($vis:vis fn $name:ident, $pattern:expr) => {
        $vis fn $name() -> &'static ::regex::Regex {
            static RE: ::std::sync::OnceLock<::regex::Regex> = ::std::sync::OnceLock::new();
            RE.get_or_init(|| ::regex::Regex::new($pattern).expect("failed to compile regex"))
        }
    };
}
