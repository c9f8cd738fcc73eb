use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Prefix(&'static str);

impl Prefix {
    pub const fn new(token: &'static str) -> Self {
        Prefix(token)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

pub const PREFIX_PRIORITY: Prefix = Prefix::new("p/");
pub const PREFIX_STATUS: Prefix = Prefix::new("s/");
pub const PREFIX_NOTE: Prefix = Prefix::new("n/");
pub const PREFIX_DEADLINE: Prefix = Prefix::new("d/");
pub const PREFIX_TAG: Prefix = Prefix::new("t/");

/// Splits `args` into a preamble and the values following each known prefix.
///
/// A prefix only counts at the start of the input or right after whitespace,
/// so `email/p/x` stays literal text of whatever value it sits in.
pub struct ArgumentTokenizer {
    prefixes: Vec<Prefix>,
}

impl ArgumentTokenizer {
    pub fn new(prefixes: &[Prefix]) -> Self {
        ArgumentTokenizer {
            prefixes: prefixes.to_vec(),
        }
    }

    pub fn tokenize(&self, args: &str) -> ArgumentMultimap {
        let positions = self.find_prefix_positions(args);

        let preamble_end = positions.first().map(|(pos, _)| *pos).unwrap_or(args.len());
        let mut multimap = ArgumentMultimap {
            preamble: args[..preamble_end].trim().to_string(),
            values: HashMap::new(),
        };

        for (i, (start, prefix)) in positions.iter().enumerate() {
            let value_start = start + prefix.as_str().len();
            let value_end = positions
                .get(i + 1)
                .map(|(next, _)| *next)
                .unwrap_or(args.len());
            multimap
                .values
                .entry(*prefix)
                .or_default()
                .push(args[value_start..value_end].trim().to_string());
        }

        multimap
    }

    fn find_prefix_positions(&self, args: &str) -> Vec<(usize, Prefix)> {
        let mut positions = Vec::new();
        let mut after_whitespace = true;

        for (i, c) in args.char_indices() {
            if after_whitespace {
                let rest = &args[i..];
                if let Some(prefix) = self.prefixes.iter().find(|p| rest.starts_with(p.as_str())) {
                    positions.push((i, *prefix));
                }
            }
            after_whitespace = c.is_whitespace();
        }

        positions
    }
}

#[derive(Debug, Default)]
pub struct ArgumentMultimap {
    preamble: String,
    values: HashMap<Prefix, Vec<String>>,
}

impl ArgumentMultimap {
    /// Text before the first prefix, `None` when blank.
    pub fn preamble(&self) -> Option<&str> {
        if self.preamble.is_empty() {
            None
        } else {
            Some(&self.preamble)
        }
    }

    /// The last value given for `prefix`. `Some("")` means the prefix was
    /// typed with nothing after it.
    pub fn value(&self, prefix: Prefix) -> Option<&str> {
        self.values
            .get(&prefix)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    pub fn all_values(&self, prefix: Prefix) -> Option<&[String]> {
        self.values.get(&prefix).map(Vec::as_slice)
    }

    pub fn has_any_prefix(&self) -> bool {
        !self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokenizer() -> ArgumentTokenizer {
        ArgumentTokenizer::new(&[
            PREFIX_PRIORITY,
            PREFIX_STATUS,
            PREFIX_NOTE,
            PREFIX_DEADLINE,
            PREFIX_TAG,
        ])
    }

    #[test]
    fn preamble_only() {
        let map = tokenizer().tokenize("  Buy milk  ");
        assert_eq!(map.preamble(), Some("Buy milk"));
        assert_eq!(map.value(PREFIX_PRIORITY), None);
        assert!(!map.has_any_prefix());
    }

    #[test]
    fn empty_input_has_no_preamble() {
        let map = tokenizer().tokenize("   ");
        assert_eq!(map.preamble(), None);
    }

    #[test]
    fn repeated_prefix_keeps_order() {
        let map = tokenizer().tokenize("Report t/work t/urgent p/hi");
        assert_eq!(map.preamble(), Some("Report"));
        assert_eq!(
            map.all_values(PREFIX_TAG),
            Some(&["work".to_string(), "urgent".to_string()][..])
        );
        assert_eq!(map.value(PREFIX_PRIORITY), Some("hi"));
    }

    #[test]
    fn absent_prefix_differs_from_empty_prefix() {
        let map = tokenizer().tokenize("t/");
        assert_eq!(map.preamble(), None);
        assert_eq!(map.all_values(PREFIX_TAG), Some(&[String::new()][..]));
        assert_eq!(map.all_values(PREFIX_NOTE), None);
    }

    #[test]
    fn unknown_and_embedded_prefixes_are_literal() {
        let map = tokenizer().tokenize("Call x/y n/ask about a/b and p/q");
        assert_eq!(map.preamble(), Some("Call x/y"));
        assert_eq!(map.value(PREFIX_NOTE), Some("ask about a/b and"));
        assert_eq!(map.value(PREFIX_PRIORITY), Some("q"));

        let map = tokenizer().tokenize("Read docs n/see http://x.org/p/hi");
        assert_eq!(map.value(PREFIX_NOTE), Some("see http://x.org/p/hi"));
        assert_eq!(map.value(PREFIX_PRIORITY), None);
    }

    #[test]
    fn last_value_wins_for_single_valued_lookup() {
        let map = tokenizer().tokenize("x p/low p/hi");
        assert_eq!(map.value(PREFIX_PRIORITY), Some("hi"));
    }
}
