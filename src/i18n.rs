/*
Simple i18n helper for notification templates.

This module provides:
- A tiny embedded translations store (compile-time embedded JSON).
- A simple `tr` function to lookup translations by key + optional params.
- `t` / `t_with` convenience wrappers using the default language.

Notes:
- Placeholders in translation strings use single-brace format: `{name}`.
- If a key is missing for the requested language, the default language is
  used; if it is missing entirely, the key itself is returned.
*/

use std::collections::HashMap;
use std::sync::OnceLock;

pub const DEFAULT_LANG: &str = "en";

static TRANSLATIONS: OnceLock<HashMap<String, HashMap<String, String>>> = OnceLock::new();

const EN_JSON: &str = r#"
{
  "request.pending.title": "New media request",
  "request.pending.body": "{user} requested {media}",
  "request.auto_approved.title": "Request automatically approved",
  "request.auto_approved.body": "{user}'s request for {media} was approved automatically",
  "request.failed.title": "Request failed",
  "request.failed.body": "{user}'s request for {media} could not be processed",
  "request.approved.title": "Request approved",
  "request.approved.body": "{user}, your request for {media} has been approved",
  "request.declined.title": "Request declined",
  "request.declined.body": "{user}, your request for {media} has been declined",
  "request.available.title": "Media available",
  "request.available.body": "{user}, {media} is now ready to watch",
  "app.name": "Media Notifications"
}
"#;

/// Initialize translations map (lazy).
fn build_translations() -> HashMap<String, HashMap<String, String>> {
    let mut out: HashMap<String, HashMap<String, String>> = HashMap::new();

    let en_map: HashMap<String, String> = serde_json::from_str(EN_JSON).unwrap_or_else(|e| {
        panic!("failed to parse EN_JSON in i18n module: {}", e);
    });
    out.insert("en".to_string(), en_map);

    out
}

/// Returns the global translations map (lang -> (key -> message)).
fn translations() -> &'static HashMap<String, HashMap<String, String>> {
    TRANSLATIONS.get_or_init(build_translations)
}

/// Translate a key using an explicit language (or default if None).
///
/// Returns the translated and parameter-substituted string. If no translation
/// is found, returns the default-language value or the key itself.
pub fn tr(lang: Option<&str>, key: &str, params: Option<&[(&str, &str)]>) -> String {
    let map = translations();

    let desired = lang.unwrap_or(DEFAULT_LANG);

    let val = map
        .get(desired)
        .and_then(|m| m.get(key))
        .cloned()
        // Fallback to default language
        .or_else(|| map.get(DEFAULT_LANG).and_then(|m| m.get(key)).cloned())
        // If still missing, return the key itself (useful in logs)
        .unwrap_or_else(|| key.to_string());

    if let Some(params) = params {
        let mut s = val;
        for (k, v) in params {
            s = s.replace(&format!("{{{}}}", k), v);
        }
        s
    } else {
        val
    }
}

/// Convenience wrapper: translate using the default language.
pub fn t(key: &str) -> String {
    tr(None, key, None)
}

/// Convenience wrapper with params (default language).
pub fn t_with(key: &str, params: &[(&str, &str)]) -> String {
    tr(None, key, Some(params))
}
