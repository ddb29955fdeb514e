use url::Url;

const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".webp", ".gif"];

/// Clean up an image URL scraped from a page: resolve protocol-relative
/// references, upgrade to https, and strip cache-buster query strings from
/// direct asset URLs. Anything unparsable passes through unchanged.
pub fn normalize_image_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let absolute = if let Some(rest) = trimmed.strip_prefix("//") {
        format!("https://{}", rest)
    } else if let Some(rest) = trimmed.strip_prefix("http://") {
        format!("https://{}", rest)
    } else {
        trimmed.to_string()
    };

    match Url::parse(&absolute) {
        Ok(mut url) => {
            if is_direct_asset(&url) {
                url.set_query(None);
                url.set_fragment(None);
            }
            url.to_string()
        }
        Err(_) => absolute,
    }
}

fn is_direct_asset(url: &Url) -> bool {
    let path = url.path().to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_relative_becomes_https() {
        assert_eq!(
            normalize_image_url("//cdn.example.com/assets/kyogre.png"),
            "https://cdn.example.com/assets/kyogre.png"
        );
    }

    #[test]
    fn http_upgrades_to_https() {
        assert_eq!(
            normalize_image_url("http://cdn.example.com/a.jpg"),
            "https://cdn.example.com/a.jpg"
        );
    }

    #[test]
    fn cache_busters_stripped_from_assets() {
        assert_eq!(
            normalize_image_url("https://cdn.example.com/a.png?v=12345#frag"),
            "https://cdn.example.com/a.png"
        );
        // Non-asset URLs keep their query.
        assert_eq!(
            normalize_image_url("https://example.com/image?id=7"),
            "https://example.com/image?id=7"
        );
    }

    #[test]
    fn garbage_passes_through() {
        assert_eq!(normalize_image_url("  not a url  "), "not a url");
        assert_eq!(normalize_image_url(""), "");
    }
}
