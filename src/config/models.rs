//! Catalog of pretrained sherpa-onnx VITS models.
//!
//! Only runtime-required fields are kept: the language tag the model was
//! trained for, a readable language name, and where its archive can be fetched.

/// Base URL of the sherpa-onnx TTS model releases.
const RELEASE_BASE_URL: &str = "https://github.com/k2-fsa/sherpa-onnx/releases/download/tts-models";

/// Essential metadata for a pretrained model.
#[derive(Debug, Clone, Copy)]
pub struct Model {
    pub language_tag: &'static str,
    pub language: &'static str,
    /// Whether the archive is published in the sherpa-onnx releases.
    /// Unpublished models have to be exported locally or fetched with --model-url.
    pub published: bool,
}

/// All models as a compile-time constant slice (sorted by name for binary search).
const MODELS: &[(&str, Model)] = &[
    ("vits-mms-deu", Model { language_tag: "de", language: "German", published: true }),
    ("vits-mms-eng", Model { language_tag: "en", language: "English", published: true }),
    ("vits-mms-fra", Model { language_tag: "fr", language: "French", published: true }),
    ("vits-mms-nan", Model { language_tag: "nan", language: "Min Nan", published: true }),
    ("vits-mms-rus", Model { language_tag: "ru", language: "Russian", published: true }),
    ("vits-mms-spa", Model { language_tag: "es", language: "Spanish", published: true }),
    ("vits-mms-tha", Model { language_tag: "th", language: "Thai", published: true }),
    ("vits-mms-ukr", Model { language_tag: "uk", language: "Ukrainian", published: true }),
    ("vits-mms-wol", Model { language_tag: "wo", language: "Wolof", published: false }),
];

/// Get model metadata by name using binary search O(log n).
pub fn get_model(name: &str) -> Option<&'static Model> {
    MODELS.binary_search_by_key(&name, |(n, _)| n).ok().map(|idx| &MODELS[idx].1)
}

/// Release archive URL for a published model.
pub fn archive_url(name: &str) -> Option<String> {
    get_model(name).filter(|m| m.published).map(|_| format!("{}/{}.tar.bz2", RELEASE_BASE_URL, name))
}

/// Print all known models.
pub fn print_models() {
    println!("═══════════════════════════════════════════════════════════════════");
    println!("  Pretrained VITS models ({} known)", MODELS.len());
    println!("═══════════════════════════════════════════════════════════════════");
    println!("{:<15} {:<5} {:<12} SOURCE", "MODEL", "TAG", "LANGUAGE");
    println!("{}", "─".repeat(50));

    for (name, model) in MODELS {
        let source = if model.published { "release" } else { "local" };
        println!("{:<15} {:<5} {:<12} {}", name, model.language_tag, model.language, source);
    }

    println!();
    println!("Default: vits-mms-wol (wo) - Wolof");
    println!();
    println!("Usage:");
    println!("  ./wolof-tts --model vits-mms-fra --language fr --download");
}

/// Print detailed information about a specific model.
pub fn print_model_info(name: &str) -> anyhow::Result<()> {
    let model = get_model(name).ok_or_else(|| anyhow::anyhow!("Model '{}' not found. Run with --list-models to see known models", name))?;

    println!();
    println!("Model: {}", name);
    println!("{}", "─".repeat(40));
    println!("Language:      {}", model.language);
    println!("Language tag:  {}", model.language_tag);
    match archive_url(name) {
        Some(url) => println!("Archive:       {}", url),
        None => println!("Archive:       not published, place model.onnx and tokens.txt manually"),
    }
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_sorted() {
        assert!(MODELS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_get_model() {
        assert_eq!(get_model("vits-mms-wol").unwrap().language_tag, "wo");
        assert!(get_model("xtts-v2").is_none());
    }

    #[test]
    fn test_archive_url_only_for_published_models() {
        assert_eq!(
            archive_url("vits-mms-fra").as_deref(),
            Some("https://github.com/k2-fsa/sherpa-onnx/releases/download/tts-models/vits-mms-fra.tar.bz2")
        );
        assert!(archive_url("vits-mms-wol").is_none());
        assert!(archive_url("unknown").is_none());
    }

    #[test]
    fn test_model_info_unknown() {
        assert!(print_model_info("unknown").is_err());
    }
}
