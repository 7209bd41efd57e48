//! Meta-variable expansion for prompt text
//!
//! Prompts may carry `<<name>>` tokens that are substituted with runtime
//! values (clock, machine, user) just before the prompt is used. Unknown
//! names pass through verbatim, delimiters included, so partial expansion
//! never fails a run. Expansion is a single pass: substituted text is not
//! rescanned.

use chrono::{Local, Utc};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Token pattern: `<<name>>` with name in `[a-zA-Z0-9_-]+`
static META_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<<([a-zA-Z0-9_-]+)>>").expect("meta token pattern is valid"));

/// Expand recognized meta-variables in `text`
///
/// Recognized names: `datetime`, `date`, `time` (local clock),
/// `iso-datetime` (UTC, RFC-3339), `weekday`, `hostname`, `user`.
/// Reads the wall clock and OS identity on every call.
///
/// # Examples
///
/// ```
/// use termchat::meta::expand;
///
/// let expanded = expand("Today is <<date>>.");
/// assert!(!expanded.contains("<<date>>"));
/// assert_eq!(expand("<<no-such-token>>"), "<<no-such-token>>");
/// ```
pub fn expand(text: &str) -> String {
    let now = Local::now();
    let now_utc = Utc::now();

    META_TOKEN
        .replace_all(text, |caps: &Captures| match &caps[1] {
            "datetime" => now.format("%Y-%m-%d %H:%M:%S").to_string(),
            "date" => now.format("%Y-%m-%d").to_string(),
            "time" => now.format("%H:%M:%S").to_string(),
            "iso-datetime" => now_utc.to_rfc3339(),
            "weekday" => now.format("%A").to_string(),
            "hostname" => machine_hostname(),
            "user" => os_username(),
            _ => caps[0].to_string(),
        })
        .into_owned()
}

fn machine_hostname() -> String {
    hostname::get()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn os_username() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_default()
}
