//! Inline style declarations (`element.style`)

/// Ordered `property: value` declarations of a `style` attribute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `a: b; c: d`. Malformed declarations are skipped.
    pub fn parse(css_text: &str) -> Self {
        let mut style = Self::new();
        for decl in css_text.split(';') {
            let Some((name, value)) = decl.split_once(':') else {
                continue;
            };
            let (name, value) = (name.trim(), value.trim());
            if !name.is_empty() && !value.is_empty() {
                style.set_property(name, value);
            }
        }
        style
    }

    pub fn get_property(&self, name: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Set a property. An empty value removes it, as in CSSOM.
    pub fn set_property(&mut self, name: &str, value: &str) {
        if value.is_empty() {
            self.remove_property(name);
            return;
        }
        match self
            .declarations
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
        {
            Some(decl) => decl.1 = value.to_string(),
            None => self
                .declarations
                .push((name.to_ascii_lowercase(), value.to_string())),
        }
    }

    pub fn remove_property(&mut self, name: &str) -> Option<String> {
        let pos = self
            .declarations
            .iter()
            .position(|(n, _)| n.eq_ignore_ascii_case(name))?;
        Some(self.declarations.remove(pos).1)
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Serialized declaration block
    pub fn css_text(&self) -> String {
        self.declarations
            .iter()
            .map(|(n, v)| format!("{n}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_multiline_block() {
        let style = InlineStyle::parse(
            "
            position: relative;
            display: inline-block;
            width: 640;
            height: auto;
        ",
        );
        assert_eq!(style.get_property("position"), Some("relative"));
        assert_eq!(style.get_property("WIDTH"), Some("640"));
        assert_eq!(
            style.css_text(),
            "position: relative; display: inline-block; width: 640; height: auto;"
        );
    }

    #[test]
    fn test_set_empty_removes() {
        let mut style = InlineStyle::parse("display: none; opacity: 0");
        style.set_property("display", "");
        assert_eq!(style.css_text(), "opacity: 0;");
    }
}
