// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipewright contributors

//! Question keys and the answer store
//!
//! Answers come from three layers: built-in (or configured) defaults,
//! caller overrides, and values entered at the prompt. Later layers win.

use colored::Colorize;
use std::collections::BTreeMap;

/// The fixed set of questions the wizard can ask
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QuestionKey {
    Cmd,
    Code,
    Data,
    Models,
    Params,
    Metrics,
    Plots,
    Live,
}

impl QuestionKey {
    pub const ALL: [QuestionKey; 8] = [
        Self::Cmd,
        Self::Code,
        Self::Data,
        Self::Models,
        Self::Params,
        Self::Metrics,
        Self::Plots,
        Self::Live,
    ];

    /// Primary questions, asked in this order
    pub const PRIMARY: [QuestionKey; 4] = [Self::Code, Self::Data, Self::Models, Self::Params];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cmd => "cmd",
            Self::Code => "code",
            Self::Data => "data",
            Self::Models => "models",
            Self::Params => "params",
            Self::Metrics => "metrics",
            Self::Plots => "plots",
            Self::Live => "live",
        }
    }

    /// Prompt text, with the noun emphasized
    pub fn label(self) -> String {
        let (before, noun, after) = match self {
            Self::Cmd => ("", "Command", " to execute"),
            Self::Code => ("Path to a ", "code", " file/directory"),
            Self::Data => ("Path to a ", "data", " file/directory"),
            Self::Models => ("Path to a ", "model", " file/directory"),
            Self::Params => ("Path to a ", "parameters", " file"),
            Self::Metrics => ("Path to a ", "metrics", " file"),
            Self::Plots => ("Path to a ", "plots", " file/directory"),
            Self::Live => ("Path to log ", "live", " training outputs"),
        };
        format!("{}{}{}", before, noun.bold(), after)
    }

    /// Only the command must be answered
    pub fn is_required(self) -> bool {
        self == Self::Cmd
    }
}

impl std::fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for QuestionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("Unknown question: {}", s))
    }
}

/// Kind of stage being configured
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StageType {
    #[default]
    Default,
    Live,
}

impl StageType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Live => "live",
        }
    }

    /// Live stages log through `live` instead of `metrics`/`plots`
    pub fn is_live(self) -> bool {
        self == Self::Live
    }
}

impl std::fmt::Display for StageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "live" => Ok(Self::Live),
            _ => Err(format!("Unknown stage type: {}", s)),
        }
    }
}

/// Ordered mapping from question key to answer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers(BTreeMap<QuestionKey, String>);

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in defaults, the lowest merge layer
    pub fn builtin_defaults() -> Self {
        [
            (QuestionKey::Code, "src"),
            (QuestionKey::Data, "data"),
            (QuestionKey::Models, "models"),
            (QuestionKey::Params, "params.yaml"),
            (QuestionKey::Metrics, "metrics.json"),
            (QuestionKey::Plots, "plots"),
            (QuestionKey::Live, "logs"),
        ]
        .into_iter()
        .collect()
    }

    pub fn get(&self, key: QuestionKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    pub fn contains(&self, key: QuestionKey) -> bool {
        self.0.contains_key(&key)
    }

    pub fn insert(&mut self, key: QuestionKey, value: impl Into<String>) -> Option<String> {
        self.0.insert(key, value.into())
    }

    pub fn remove(&mut self, key: QuestionKey) -> Option<String> {
        self.0.remove(&key)
    }

    pub fn keys(&self) -> impl Iterator<Item = QuestionKey> + '_ {
        self.0.keys().copied()
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.0.values().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionKey, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy every answer of `other` over this one
    pub fn extend_from(&mut self, other: &Answers) {
        for (key, value) in other.iter() {
            self.insert(key, value);
        }
    }

    /// Drop empty answers; a skipped answer is absent, never `""`
    pub fn pruned(mut self) -> Self {
        self.0.retain(|_, v| !v.is_empty());
        self
    }

    /// Three-layer merge: `defaults`, then `overrides`, then `entered`.
    ///
    /// Inputs are borrowed; the result is a fresh, pruned store.
    pub fn merge(defaults: &Answers, overrides: &Answers, entered: &Answers) -> Self {
        let mut merged = defaults.clone();
        merged.extend_from(overrides);
        merged.extend_from(entered);
        merged.pruned()
    }

    /// Remove defaults that do not apply to the stage type.
    ///
    /// Live stages drop `metrics` and `plots`; other stages drop `live`.
    /// Keys present in `overrides` are kept either way.
    pub fn suppressed_for(&self, live: bool, overrides: &Answers) -> Self {
        let suppressed: &[QuestionKey] = if live {
            &[QuestionKey::Metrics, QuestionKey::Plots]
        } else {
            &[QuestionKey::Live]
        };

        let mut kept = self.clone();
        for key in suppressed {
            if !overrides.contains(*key) {
                kept.remove(*key);
            }
        }
        kept
    }
}

impl FromIterator<(QuestionKey, String)> for Answers {
    fn from_iter<I: IntoIterator<Item = (QuestionKey, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<(QuestionKey, &'a str)> for Answers {
    fn from_iter<I: IntoIterator<Item = (QuestionKey, &'a str)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k, v.to_string())).collect())
    }
}

/// Secondary questions for the stage type, in order
pub fn secondary_keys(live: bool) -> &'static [QuestionKey] {
    if live {
        &[QuestionKey::Live]
    } else {
        &[QuestionKey::Metrics, QuestionKey::Plots]
    }
}

/// Primary questions still unanswered by overrides
pub fn primary_questions(overrides: &Answers) -> Vec<QuestionKey> {
    QuestionKey::PRIMARY
        .into_iter()
        .filter(|k| !overrides.contains(*k))
        .collect()
}

/// Secondary questions still unanswered by overrides
pub fn secondary_questions(overrides: &Answers, live: bool) -> Vec<QuestionKey> {
    secondary_keys(live)
        .iter()
        .copied()
        .filter(|k| !overrides.contains(*k))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(pairs: &[(QuestionKey, &str)]) -> Answers {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_merge_precedence() {
        let defaults = answers(&[(QuestionKey::Code, "src"), (QuestionKey::Data, "data")]);
        let overrides = answers(&[(QuestionKey::Code, "lib"), (QuestionKey::Cmd, "make")]);
        let entered = answers(&[(QuestionKey::Data, "raw"), (QuestionKey::Code, "app")]);

        let merged = Answers::merge(&defaults, &overrides, &entered);
        assert_eq!(merged.get(QuestionKey::Code), Some("app"));
        assert_eq!(merged.get(QuestionKey::Data), Some("raw"));
        assert_eq!(merged.get(QuestionKey::Cmd), Some("make"));

        // Caller data is untouched
        assert_eq!(defaults.get(QuestionKey::Code), Some("src"));
        assert_eq!(overrides.len(), 2);
    }

    #[test]
    fn test_merge_prunes_empty_answers() {
        let defaults = answers(&[(QuestionKey::Models, "models")]);
        let entered = answers(&[(QuestionKey::Models, "")]);

        let merged = Answers::merge(&defaults, &Answers::new(), &entered);
        assert!(!merged.contains(QuestionKey::Models));
    }

    #[test]
    fn test_live_suppresses_metrics_and_plots() {
        let defaults = Answers::builtin_defaults();

        let live = defaults.suppressed_for(true, &Answers::new());
        assert!(!live.contains(QuestionKey::Metrics));
        assert!(!live.contains(QuestionKey::Plots));
        assert!(live.contains(QuestionKey::Live));

        let overrides = answers(&[(QuestionKey::Plots, "curves")]);
        let live = defaults.suppressed_for(true, &overrides);
        assert!(live.contains(QuestionKey::Plots));
        assert!(!live.contains(QuestionKey::Metrics));
    }

    #[test]
    fn test_default_type_suppresses_live() {
        let defaults = Answers::builtin_defaults();

        let standard = defaults.suppressed_for(false, &Answers::new());
        assert!(!standard.contains(QuestionKey::Live));
        assert!(standard.contains(QuestionKey::Metrics));

        let overrides = answers(&[(QuestionKey::Live, "logs")]);
        assert!(defaults.suppressed_for(false, &overrides).contains(QuestionKey::Live));
    }

    #[test]
    fn test_question_groups_skip_overrides() {
        let overrides = answers(&[(QuestionKey::Code, "src"), (QuestionKey::Metrics, "m.json")]);

        assert_eq!(
            primary_questions(&overrides),
            vec![QuestionKey::Data, QuestionKey::Models, QuestionKey::Params]
        );
        assert_eq!(secondary_questions(&overrides, false), vec![QuestionKey::Plots]);
        assert_eq!(secondary_questions(&overrides, true), vec![QuestionKey::Live]);
    }

    #[test]
    fn test_parse_keys_and_types() {
        assert_eq!("params".parse::<QuestionKey>(), Ok(QuestionKey::Params));
        assert!("outs".parse::<QuestionKey>().is_err());
        assert_eq!("LIVE".parse::<StageType>(), Ok(StageType::Live));
        assert!(QuestionKey::Cmd.is_required());
        assert!(!QuestionKey::Live.is_required());
    }
}
