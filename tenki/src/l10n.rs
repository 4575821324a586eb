//! User-facing strings, looked up by key
//!
//! Unknown keys fall through to the key itself so a missing entry is visible
//! in the UI instead of panicking.

pub fn tr(key: &'static str) -> &'static str {
    match key {
        "app.title" => "tenki",
        "list.title" => "Areas",
        "list.empty" => "Nothing here yet. Press r to refresh.",
        "list.hint" => "j/k move  enter open  r refresh  q quit",
        "list.refreshing" => "refreshing",
        "detail.hint" => "r reload  esc back",
        "detail.loading" => "fetching",
        "detail.hint.back" => "esc back",
        "error.title" => "Error",
        "error.generic" => "Something went wrong. Please try again later.",
        "error.ack" => "enter ok",
        _ => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_key() {
        assert_eq!(tr("error.title"), "Error");
    }

    #[test]
    fn test_unknown_key_falls_through() {
        assert_eq!(tr("no.such.key"), "no.such.key");
    }
}
