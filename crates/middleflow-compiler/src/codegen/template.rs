//! Placeholder templates
//!
//! `{{name}}` placeholders are replaced in a single left-to-right pass, so
//! substituted text is never scanned again.

pub(super) struct Template {
    source: &'static str,
}

impl Template {
    pub(super) const fn new(source: &'static str) -> Self {
        Self { source }
    }

    /// Render with the given variables; unknown placeholders are kept verbatim
    pub(super) fn render(&self, vars: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(self.source.len() * 2);
        let mut rest = self.source;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after_open = &rest[start + 2..];

            match after_open.find("}}") {
                Some(end) => {
                    let key = after_open[..end].trim();
                    match vars.iter().find(|(name, _)| *name == key) {
                        Some((_, value)) => out.push_str(value),
                        None => out.push_str(&rest[start..start + 2 + end + 2]),
                    }
                    rest = &after_open[end + 2..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }

        out.push_str(rest);
        out
    }
}
