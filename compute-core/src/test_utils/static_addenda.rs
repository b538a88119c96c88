//! StaticAddenda: a DocAddenda over a static slice.

use crate::registry::DocAddenda;

/// Addenda held in a `'static` table of `(name, text)` pairs.
#[derive(Debug, Clone, Copy)]
pub struct StaticAddenda(pub &'static [(&'static str, &'static str)]);

impl StaticAddenda {
    /// Example snippets for a few of the standard functions.
    pub fn standard() -> Self {
        Self(&[
            (
                "coalesce",
                "Examples\n--------\n>>> coalesce([None, 1], [2, 3])\n[2, 1]\n",
            ),
            (
                "utf8_upper",
                "Examples\n--------\n>>> utf8_upper([\"ab\", None])\n[\"AB\", null]\n",
            ),
        ])
    }
}

impl DocAddenda for StaticAddenda {
    fn lookup(&self, name: &str) -> Option<String> {
        self.0
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, text)| (*text).to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_by_name() {
        let addenda = StaticAddenda::standard();
        assert!(addenda.lookup("coalesce").unwrap().starts_with("Examples"));
        assert!(addenda.lookup("add").is_none());
    }
}
