use rust_embed::RustEmbed;

/// Embedded static web assets (HTML, CSS, JS)
#[derive(RustEmbed)]
#[folder = "static/"]
#[prefix = "static/"]
pub struct StaticAssets;

impl StaticAssets {
    /// Get a static asset by path
    pub fn get_asset(path: &str) -> Option<rust_embed::EmbeddedFile> {
        Self::get(path)
    }

    /// Get the content type for a given file extension
    pub fn get_content_type(path: &str) -> &'static str {
        match path.split('.').next_back() {
            Some("html") => "text/html; charset=utf-8",
            Some("css") => "text/css; charset=utf-8",
            Some("js") => "application/javascript; charset=utf-8",
            Some("json") => "application/json; charset=utf-8",
            Some("svg") => "image/svg+xml; charset=utf-8",
            Some("png") => "image/png",
            Some("ico") => "image/x-icon",
            _ => "application/octet-stream",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_is_embedded() {
        let file = StaticAssets::get_asset("static/index.html").unwrap();
        let html = String::from_utf8_lossy(&file.data);
        assert!(html.contains("hls2srt-player"));
    }

    #[test]
    fn test_content_types() {
        assert_eq!(StaticAssets::get_content_type("app.js"), "application/javascript; charset=utf-8");
        assert_eq!(StaticAssets::get_content_type("a/b/style.css"), "text/css; charset=utf-8");
        assert_eq!(StaticAssets::get_content_type("noext"), "application/octet-stream");
    }
}
