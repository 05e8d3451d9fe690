use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDateTime;
use serde::Deserialize;
use xdg::BaseDirectories;

use crate::dates;
use crate::types::Mode;

/// A loosely typed option value, as supplied by a host attribute or a
/// config file. Hosts bind options as strings as often as not, so every
/// typed accessor on [`DatepickerConfig`] knows how to read its value out
/// of a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Date(NaiveDateTime),
    Text(String),
}

impl From<bool> for SettingValue {
    fn from(v: bool) -> Self {
        SettingValue::Bool(v)
    }
}

impl From<i64> for SettingValue {
    fn from(v: i64) -> Self {
        SettingValue::Int(v)
    }
}

impl From<&str> for SettingValue {
    fn from(v: &str) -> Self {
        SettingValue::Text(v.to_string())
    }
}

impl From<NaiveDateTime> for SettingValue {
    fn from(v: NaiveDateTime) -> Self {
        SettingValue::Date(v)
    }
}

/// One layer of picker options. Used both for the widget-wide defaults
/// and for per-instance overrides; absent keys fall through to the next
/// layer during resolution.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OptionSet {
    pub panels: Option<SettingValue>,
    pub mode: Option<SettingValue>,
    pub min_date: Option<SettingValue>,
    pub max_date: Option<SettingValue>,
    pub starting_day: Option<SettingValue>,
}

impl OptionSet {
    /// The built-in widget-wide defaults: one panel, single-date mode,
    /// weeks starting on Sunday, no date limits.
    pub fn builtin_defaults() -> Self {
        OptionSet {
            panels: Some(SettingValue::Int(1)),
            mode: Some(SettingValue::Text("single".to_string())),
            min_date: None,
            max_date: None,
            starting_day: Some(SettingValue::Int(0)),
        }
    }
}

/// Resolve one option with instance-over-default precedence.
///
/// The literal string `"false"` coerces to boolean `false`, so a
/// string-typed host attribute can switch off an inherited default. Every
/// other value passes through unchanged.
pub fn resolve(
    override_value: Option<&SettingValue>,
    default_value: Option<&SettingValue>,
) -> Option<SettingValue> {
    let value = override_value.or(default_value)?.clone();
    match value {
        SettingValue::Text(s) if s == "false" => Some(SettingValue::Bool(false)),
        other => Some(other),
    }
}

/// Resolved picker configuration: widget-wide defaults plus per-instance
/// overrides. Values are resolved per key on demand, never cached, so a
/// host can swap either layer at any time.
#[derive(Debug, Clone, PartialEq)]
pub struct DatepickerConfig {
    /// Widget-wide defaults (the global config object).
    pub defaults: OptionSet,
    /// Per-instance overrides (host attributes).
    pub overrides: OptionSet,
}

impl Default for DatepickerConfig {
    fn default() -> Self {
        DatepickerConfig {
            defaults: OptionSet::builtin_defaults(),
            overrides: OptionSet::default(),
        }
    }
}

impl DatepickerConfig {
    pub fn with_overrides(overrides: OptionSet) -> Self {
        DatepickerConfig {
            defaults: OptionSet::builtin_defaults(),
            overrides,
        }
    }

    fn resolved(&self, key: fn(&OptionSet) -> Option<&SettingValue>) -> Option<SettingValue> {
        resolve(key(&self.overrides), key(&self.defaults))
    }

    /// The widget mode. Anything other than the literal `"range"`
    /// resolves to single-date mode.
    pub fn mode(&self) -> Mode {
        match self.resolved(|o| o.mode.as_ref()) {
            Some(SettingValue::Text(s)) if s == "range" => Mode::Range,
            _ => Mode::Single,
        }
    }

    /// Number of month panels to display. `None` when the resolved value
    /// does not parse as an integer; callers degrade to an empty panel
    /// strip rather than erroring.
    pub fn panels(&self) -> Option<i64> {
        match self.resolved(|o| o.panels.as_ref()) {
            Some(SettingValue::Int(n)) => Some(n),
            Some(SettingValue::Text(s)) => dates::parse_int_prefix(&s),
            _ => None,
        }
    }

    pub fn min_date(&self) -> Option<NaiveDateTime> {
        self.date_option(|o| o.min_date.as_ref())
    }

    pub fn max_date(&self) -> Option<NaiveDateTime> {
        self.date_option(|o| o.max_date.as_ref())
    }

    fn date_option(&self, key: fn(&OptionSet) -> Option<&SettingValue>) -> Option<NaiveDateTime> {
        match self.resolved(key) {
            Some(SettingValue::Date(d)) => Some(d),
            Some(SettingValue::Text(s)) => dates::parse_date(&s),
            _ => None,
        }
    }

    /// Configured starting day of the week, reduced to a weekday index
    /// 0-6 (0 = Sunday). Non-numeric or absent config yields 0.
    pub fn starting_day(&self) -> u32 {
        let n = match self.resolved(|o| o.starting_day.as_ref()) {
            Some(SettingValue::Int(n)) => n,
            Some(SettingValue::Text(s)) => dates::parse_int_prefix(&s).unwrap_or(0),
            _ => 0,
        };
        n.rem_euclid(7) as u32
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    let pgm = env!("CARGO_PKG_NAME");
    let xdg_dirs = BaseDirectories::with_prefix(pgm);
    let config_home = xdg_dirs.get_config_home()?;
    Some(config_home.join("config.toml"))
}

/// Read the widget-wide defaults from the XDG config file, falling back
/// to the built-in defaults if the file is missing or malformed.
pub fn read() -> OptionSet {
    let config_path = match get_config_path() {
        Some(path) => path,
        None => return OptionSet::builtin_defaults(),
    };

    if !config_path.exists() {
        return OptionSet::builtin_defaults();
    }

    let content = match fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(_) => return OptionSet::builtin_defaults(),
    };

    toml::from_str(&content).unwrap_or_else(|_| OptionSet::builtin_defaults())
}

/// Load widget-wide defaults from an explicit path, surfacing the cause
/// on failure. Hosts that want the silent-fallback behavior use [`read`]
/// instead.
pub fn load(path: &Path) -> anyhow::Result<OptionSet> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_resolve_prefers_override() {
        let over = SettingValue::Int(3);
        let def = SettingValue::Int(1);
        assert_eq!(resolve(Some(&over), Some(&def)), Some(SettingValue::Int(3)));
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let def = SettingValue::Int(1);
        assert_eq!(resolve(None, Some(&def)), Some(SettingValue::Int(1)));
        assert_eq!(resolve(None, None), None);
    }

    #[test]
    fn test_resolve_false_string_coerces_to_bool() {
        let over = SettingValue::Text("false".to_string());
        assert_eq!(resolve(Some(&over), None), Some(SettingValue::Bool(false)));
    }

    #[test]
    fn test_resolve_false_string_applies_to_defaults_too() {
        let def = SettingValue::Text("false".to_string());
        assert_eq!(resolve(None, Some(&def)), Some(SettingValue::Bool(false)));
    }

    #[test]
    fn test_resolve_other_strings_pass_through() {
        let over = SettingValue::Text("range".to_string());
        assert_eq!(
            resolve(Some(&over), None),
            Some(SettingValue::Text("range".to_string()))
        );
        // "False" is not the literal "false"
        let over = SettingValue::Text("False".to_string());
        assert_eq!(
            resolve(Some(&over), None),
            Some(SettingValue::Text("False".to_string()))
        );
    }

    #[test]
    fn test_mode_defaults_to_single() {
        let config = DatepickerConfig::default();
        assert_eq!(config.mode(), Mode::Single);
    }

    #[test]
    fn test_mode_range_override() {
        let mut config = DatepickerConfig::default();
        config.overrides.mode = Some("range".into());
        assert_eq!(config.mode(), Mode::Range);
    }

    #[test]
    fn test_panels_default() {
        let config = DatepickerConfig::default();
        assert_eq!(config.panels(), Some(1));
    }

    #[test]
    fn test_panels_parses_string_override() {
        let mut config = DatepickerConfig::default();
        config.overrides.panels = Some("3".into());
        assert_eq!(config.panels(), Some(3));
    }

    #[test]
    fn test_panels_unparseable_yields_none() {
        let mut config = DatepickerConfig::default();
        config.overrides.panels = Some("lots".into());
        assert_eq!(config.panels(), None);
    }

    #[test]
    fn test_min_date_from_string() {
        let mut config = DatepickerConfig::default();
        config.overrides.min_date = Some("2024-01-15".into());
        assert_eq!(config.min_date(), Some(date(2024, 1, 15)));
    }

    #[test]
    fn test_min_date_from_date_value() {
        let mut config = DatepickerConfig::default();
        config.overrides.min_date = Some(date(2024, 1, 15).into());
        assert_eq!(config.min_date(), Some(date(2024, 1, 15)));
    }

    #[test]
    fn test_false_string_disables_inherited_min_date() {
        let mut config = DatepickerConfig::default();
        config.defaults.min_date = Some(date(2024, 1, 15).into());
        config.overrides.min_date = Some("false".into());
        assert_eq!(config.min_date(), None);
    }

    #[test]
    fn test_starting_day_default() {
        let config = DatepickerConfig::default();
        assert_eq!(config.starting_day(), 0);
    }

    #[test]
    fn test_starting_day_reduced_modulo_seven() {
        let mut config = DatepickerConfig::default();
        config.overrides.starting_day = Some(SettingValue::Int(8));
        assert_eq!(config.starting_day(), 1);
        config.overrides.starting_day = Some(SettingValue::Int(-1));
        assert_eq!(config.starting_day(), 6);
    }

    #[test]
    fn test_starting_day_from_string() {
        let mut config = DatepickerConfig::default();
        config.overrides.starting_day = Some("1".into());
        assert_eq!(config.starting_day(), 1);
        config.overrides.starting_day = Some("monday".into());
        assert_eq!(config.starting_day(), 0);
    }

    #[test]
    fn test_option_set_from_toml() {
        let toml_str = r#"
panels = 2
mode = "range"
min_date = "2024-01-01"
        "#;

        let options: OptionSet = toml::from_str(toml_str).unwrap();
        assert_eq!(options.panels, Some(SettingValue::Int(2)));
        assert_eq!(options.mode, Some(SettingValue::Text("range".to_string())));
        assert_eq!(
            options.min_date,
            Some(SettingValue::Text("2024-01-01".to_string()))
        );
        assert_eq!(options.starting_day, None);
    }

    #[test]
    fn test_option_set_from_toml_string_typed_values() {
        let toml_str = r#"
panels = "3"
starting_day = "1"
        "#;

        let options: OptionSet = toml::from_str(toml_str).unwrap();
        let config = DatepickerConfig {
            defaults: options,
            overrides: OptionSet::default(),
        };
        assert_eq!(config.panels(), Some(3));
        assert_eq!(config.starting_day(), 1);
    }

    #[test]
    fn test_builtin_defaults() {
        let config = DatepickerConfig::default();
        assert_eq!(config.panels(), Some(1));
        assert_eq!(config.mode(), Mode::Single);
        assert_eq!(config.starting_day(), 0);
        assert_eq!(config.min_date(), None);
        assert_eq!(config.max_date(), None);
    }
}
