//! Internationalization (i18n) support for `statlab-ui`.
//!
//! This module wires together:
//! - `i18n-embed` (language selection + asset loading)
//! - `fluent` (message formatting)
//! - `rust-embed` (compile-time embedding of `.ftl` files)
//! - `i18n-embed-fl` (`fl!` macro for compile‑time checked lookups)
//!
//! Folder layout (relative to this crate root):
//! ```text
//! i18n.toml
//! i18n/
//!   en-US/statlab-ui.ftl   (fallback/reference)
//!   es-ES/statlab-ui.ftl   (additional locale)
//! ```
//!
//! Only UI chrome is translated. Chart captions and load-error details come
//! from the core and stay English.
//!
//! Platform notes:
//! - Desktop: uses `DesktopLanguageRequester` (OS locale list).
//! - Web/WASM: uses `WebLanguageRequester` (`navigator.languages`).
//! - Assets are always embedded on WASM (`debug-embed` is enabled for that target).
use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use tracing::warn;
use unic_langid::{langid, LanguageIdentifier};

pub use i18n_embed_fl::fl;

/// Ergonomic translation macro.
/// Examples:
///     t!("page-title")
///     t!("load-success", file = "data.csv")
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Fallback file path must be: `i18n/en-US/{DOMAIN}.ftl`
const DOMAIN: &str = "statlab-ui";

const FALLBACK: LanguageIdentifier = langid!("en-US");

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

/// Global language loader used with the `fl!` macro.
pub static LOADER: Lazy<FluentLanguageLoader> =
    Lazy::new(|| FluentLanguageLoader::new(DOMAIN, FALLBACK));

static INIT: Once = Once::new();

/// Initialize i18n (idempotent).
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        match i18n_embed::select(&*LOADER, &Localizations, &requested) {
            Ok(_) => disable_isolation(),
            Err(err) => warn!(%err, "failed selecting languages; continuing with fallback"),
        }
    });
}

/// File names and numbers are interpolated into notices; no bidi marks.
/// Only affects bundles that are already loaded, so it runs after every select.
fn disable_isolation() {
    LOADER.set_use_isolating(false);
}

/// Switch language at runtime. If `tag` cannot be parsed it is ignored (Ok returned).
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let lang: LanguageIdentifier = match tag.parse() {
        Ok(l) => l,
        Err(_) => return Ok(()),
    };
    i18n_embed::select(&*LOADER, &Localizations, &[lang])?;
    disable_isolation();
    Ok(())
}

/// List available (embedded) language identifiers.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(|s| s.to_string()))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::fl;
    use std::sync::Mutex;

    // The loader is global; tests that switch or read languages take turns.
    static LANGUAGE: Mutex<()> = Mutex::new(());

    #[test]
    fn fallback_language_is_present() {
        let langs = available_languages();
        assert!(langs.iter().any(|l| l == "en-US"));
        assert!(langs.iter().any(|l| l == "es-ES"));
    }

    #[test]
    fn interpolated_notice_has_no_isolation_marks() {
        let _guard = LANGUAGE.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        init();
        let _ = set_language("en-US");
        let s = fl!(&*LOADER, "load-success", file = "data.csv");
        assert_eq!(s, "Loaded data.csv successfully.");
    }

    #[test]
    fn switching_language_keeps_notices_free_of_isolation_marks() {
        let _guard = LANGUAGE.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        init();
        set_language("es-ES").unwrap();
        let spanish = fl!(&*LOADER, "load-success", file = "data.json");
        set_language("en-US").unwrap();
        let english = fl!(&*LOADER, "load-success", file = "data.json");
        for text in [&spanish, &english] {
            assert!(!text.contains('\u{2068}') && !text.contains('\u{2069}'), "{text:?}");
        }
        assert_eq!(english, "Loaded data.json successfully.");
    }

    #[test]
    fn dynamic_language_switch_ignores_unknown_tags() {
        let _guard = LANGUAGE.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        init();
        set_language("en-US").unwrap();
        let before = fl!(&*LOADER, "nav-language-label");
        let _ = set_language("zz-ZZ");
        let after = fl!(&*LOADER, "nav-language-label");
        assert_eq!(before, after);
    }
}
