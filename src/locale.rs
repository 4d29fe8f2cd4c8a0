//! Translation bundles, loaded once at start and shared read-only.

use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    Fr,
    En,
}

impl Lang {
    pub const ALL: [Lang; 2] = [Lang::Fr, Lang::En];

    pub fn code(self) -> &'static str {
        match self {
            Lang::Fr => "fr",
            Lang::En => "en",
        }
    }

    /// Exact tag match; anything else, including no tag, is French.
    pub fn resolve(tag: Option<&str>) -> Lang {
        Lang::ALL
            .into_iter()
            .find(|l| Some(l.code()) == tag)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct Locales {
    fr: Value,
    en: Value,
}

impl Locales {
    /// Read `fr.json` and `en.json` from `dir`. Each must hold a JSON object.
    pub fn load(dir: &Path) -> Result<Self, AppError> {
        let read = |lang: Lang| -> Result<Value, AppError> {
            let path = dir.join(format!("{}.json", lang.code()));
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| AppError::Locale(format!("cannot read {}: {e}", path.display())))?;
            let bundle: Value = serde_json::from_str(&raw)
                .map_err(|e| AppError::Locale(format!("parse error in {}: {e}", path.display())))?;
            if !bundle.is_object() {
                return Err(AppError::Locale(format!(
                    "{} must contain a JSON object",
                    path.display()
                )));
            }
            Ok(bundle)
        };

        let locales = Self::from_bundles(read(Lang::Fr)?, read(Lang::En)?);
        info!(dir = %dir.display(), "translations loaded");
        Ok(locales)
    }

    pub fn from_bundles(fr: Value, en: Value) -> Self {
        Self { fr, en }
    }

    pub fn bundle(&self, lang: Lang) -> &Value {
        match lang {
            Lang::Fr => &self.fr,
            Lang::En => &self.en,
        }
    }

    /// Resolve a caller-supplied tag to a language and its bundle.
    pub fn for_tag(&self, tag: Option<&str>) -> (Lang, &Value) {
        let lang = Lang::resolve(tag);
        (lang, self.bundle(lang))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_bundles(dir: &TempDir, fr: &str, en: &str) {
        std::fs::write(dir.path().join("fr.json"), fr).unwrap();
        std::fs::write(dir.path().join("en.json"), en).unwrap();
    }

    #[test]
    fn unknown_tags_fall_back_to_french() {
        assert_eq!(Lang::resolve(Some("en")), Lang::En);
        assert_eq!(Lang::resolve(Some("fr")), Lang::Fr);
        assert_eq!(Lang::resolve(Some("de")), Lang::Fr);
        assert_eq!(Lang::resolve(Some("EN")), Lang::Fr);
        assert_eq!(Lang::resolve(None), Lang::Fr);
    }

    #[test]
    fn load_reads_both_bundles() {
        let dir = TempDir::new().unwrap();
        write_bundles(&dir, r#"{"headline":"Bientôt"}"#, r#"{"headline":"Soon"}"#);

        let locales = Locales::load(dir.path()).unwrap();
        let (lang, bundle) = locales.for_tag(Some("en"));
        assert_eq!(lang, Lang::En);
        assert_eq!(bundle["headline"], json!("Soon"));
        assert_eq!(locales.for_tag(Some("xx")).1["headline"], json!("Bientôt"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("fr.json"), "{}").unwrap();

        let err = Locales::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("en.json"));
    }

    #[test]
    fn non_object_bundle_is_an_error() {
        let dir = TempDir::new().unwrap();
        write_bundles(&dir, "[]", "{}");
        assert!(matches!(Locales::load(dir.path()), Err(AppError::Locale(_))));
    }

    #[test]
    fn shipped_bundles_load() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("locales");
        let locales = Locales::load(&dir).unwrap();
        for lang in Lang::ALL {
            let gemini = &locales.bundle(lang)["gemini"];
            for key in ["emailInvalid", "emailExists", "emailSuccess", "emailError"] {
                assert!(gemini[key].is_string(), "{} missing gemini.{key}", lang.code());
            }
        }
    }
}
