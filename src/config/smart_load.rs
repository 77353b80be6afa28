use figment::providers::{Format, Json, Toml, Yaml};
use std::path::Path;

/// Configuration file provider that picks its format from the file extension
/// Returns a provider that can be directly used with figment.merge()
pub fn auto<P: AsRef<Path>>(path: P) -> impl figment::Provider {
    let path = path.as_ref();
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

    match extension.to_lowercase().as_str() {
        "toml" => SmartProvider::Toml(Toml::file(path)),
        "json" => SmartProvider::Json(Json::file(path)),
        "yaml" | "yml" => SmartProvider::Yaml(Yaml::file(path)),
        _ => {
            let detected = std::fs::read_to_string(path)
                .ok()
                .and_then(|content| detect_format_from_content(&content));
            tracing::debug!("Config {} has no known extension, detected {:?}", path.display(), detected);
            match detected {
                Some("json") => SmartProvider::Json(Json::file(path)),
                Some("yaml") => SmartProvider::Yaml(Yaml::file(path)),
                _ => SmartProvider::Toml(Toml::file(path)),
            }
        }
    }
}

/// Wrapper enum to handle different provider types
enum SmartProvider {
    Toml(figment::providers::Data<Toml>),
    Json(figment::providers::Data<Json>),
    Yaml(figment::providers::Data<Yaml>),
}

impl figment::Provider for SmartProvider {
    fn metadata(&self) -> figment::Metadata {
        match self {
            SmartProvider::Toml(p) => p.metadata(),
            SmartProvider::Json(p) => p.metadata(),
            SmartProvider::Yaml(p) => p.metadata(),
        }
    }

    fn data(&self) -> Result<figment::value::Map<figment::Profile, figment::value::Dict>, figment::Error> {
        match self {
            SmartProvider::Toml(p) => p.data(),
            SmartProvider::Json(p) => p.data(),
            SmartProvider::Yaml(p) => p.data(),
        }
    }
}

/// Guess a configuration format from file content
fn detect_format_from_content(content: &str) -> Option<&'static str> {
    let trimmed = content.trim();

    if (trimmed.starts_with('{') && trimmed.ends_with('}')) || (trimmed.starts_with('[') && trimmed.ends_with(']')) {
        return Some("json");
    }

    // TOML tables or key = value lines
    if trimmed.lines().any(|line| {
        let line = line.trim();
        (line.starts_with('[') && line.ends_with(']')) || (line.contains('=') && !line.contains(':'))
    }) {
        return Some("toml");
    }

    if trimmed.starts_with("---") || trimmed.lines().any(|line| line.trim().contains(": ")) {
        return Some("yaml");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(detect_format_from_content(r#"{"sweep": {"sort_rows": true}}"#), Some("json"));
        assert_eq!(detect_format_from_content("sweep:\n  sort_rows: true"), Some("yaml"));
        assert_eq!(detect_format_from_content("[sweep]\nsort_rows = true"), Some("toml"));
        assert_eq!(detect_format_from_content("csv_name = \"out.csv\""), Some("toml"));
        assert_eq!(detect_format_from_content("just words"), None);
    }
}
